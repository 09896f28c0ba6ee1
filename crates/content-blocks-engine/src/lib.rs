pub mod document;
pub mod mapping;
pub mod models;
pub mod services;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use document::{Block, BlockDocument, BlockMut, Ingest, OpaqueReason};
pub use mapping::{
    CONTENT_BLOCKS_EDITOR, ContentBlocksMapper, MapperError, NESTED_CONTENT_EDITOR,
    NestedContentMapper, ValueMapper,
};
pub use models::{DataType, Definition, DependencyFlags, DependencyRef, Udi, UdiError};
pub use services::{Catalog, CatalogFile, DataTypeService, DefinitionRepository};
