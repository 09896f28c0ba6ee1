use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::udi::{Udi, entity_types};

/// A block-type definition record, describing the schema of one kind of block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    /// Data-type the definition's nested content is edited with
    #[serde(default)]
    pub data_type_key: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataType {
    pub key: Uuid,
    #[serde(default)]
    pub name: String,
}

impl DataType {
    pub fn udi(&self) -> Udi {
        Udi::new(entity_types::DATA_TYPE, self.key)
    }
}
