use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SCHEME: &str = "umb://";

/// Entity types that appear in references handled by the mappers
pub mod entity_types {
    pub const DATA_TYPE: &str = "data-type";
    pub const DOCUMENT: &str = "document";
    pub const MEDIA: &str = "media";
    pub const ELEMENT: &str = "element";
}

#[derive(Debug, thiserror::Error)]
pub enum UdiError {
    #[error("Missing umb:// scheme: {0}")]
    MissingScheme(String),
    #[error("Missing entity type: {0}")]
    MissingEntityType(String),
    #[error("Invalid identifier in {input}: {source}")]
    InvalidId { input: String, source: uuid::Error },
}

/// Stable external reference to a CMS entity, e.g. `umb://data-type/<32 hex>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Udi {
    entity_type: String,
    id: Uuid,
}

impl Udi {
    pub fn new(entity_type: impl Into<String>, id: Uuid) -> Self {
        Self {
            entity_type: entity_type.into(),
            id,
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl fmt::Display for Udi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}/{}", self.entity_type, self.id.as_simple())
    }
}

impl FromStr for Udi {
    type Err = UdiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SCHEME)
            .ok_or_else(|| UdiError::MissingScheme(s.to_string()))?;
        let (entity_type, id) = rest
            .split_once('/')
            .filter(|(entity_type, _)| !entity_type.is_empty())
            .ok_or_else(|| UdiError::MissingEntityType(s.to_string()))?;
        let id = Uuid::parse_str(id).map_err(|source| UdiError::InvalidId {
            input: s.to_string(),
            source,
        })?;
        Ok(Self::new(entity_type, id))
    }
}

impl TryFrom<String> for Udi {
    type Error = UdiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Udi> for String {
    fn from(udi: Udi) -> Self {
        udi.to_string()
    }
}
