//! Read-only collaborators the mappers query while walking a value.
//!
//! The host CMS owns the real stores; the mappers only ever see them through
//! these traits. [`Catalog`] is an in-memory implementation of both.

pub mod catalog;

use uuid::Uuid;

use crate::models::{DataType, Definition};

pub use catalog::{Catalog, CatalogFile};

/// Lookup of block-type definitions by their identifier
pub trait DefinitionRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> Option<Definition>;
}

/// Lookup of data-types by key
pub trait DataTypeService: Send + Sync {
    fn get_data_type(&self, key: Uuid) -> Option<DataType>;
}
