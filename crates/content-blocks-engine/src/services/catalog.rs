use std::collections::HashMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::models::{DataType, Definition};
use crate::services::{DataTypeService, DefinitionRepository};

/// In-memory definitions and data-types, as read from a catalog file
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: HashMap<Uuid, Definition>,
    data_types: HashMap<Uuid, DataType>,
}

/// On-disk shape of a catalog: two flat lists
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub data_types: Vec<DataType>,
}

impl Catalog {
    /// Build a catalog; later entries replace earlier ones with the same id
    pub fn new(
        definitions: impl IntoIterator<Item = Definition>,
        data_types: impl IntoIterator<Item = DataType>,
    ) -> Self {
        Self {
            definitions: definitions.into_iter().map(|d| (d.id, d)).collect(),
            data_types: data_types.into_iter().map(|dt| (dt.key, dt)).collect(),
        }
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn data_type_count(&self) -> usize {
        self.data_types.len()
    }
}

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        Self::new(file.definitions, file.data_types)
    }
}

impl DefinitionRepository for Catalog {
    fn get_by_id(&self, id: Uuid) -> Option<Definition> {
        self.definitions.get(&id).cloned()
    }
}

impl DataTypeService for Catalog {
    fn get_data_type(&self, key: Uuid) -> Option<DataType> {
        self.data_types.get(&key).cloned()
    }
}
