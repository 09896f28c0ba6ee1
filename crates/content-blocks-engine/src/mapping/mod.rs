//! Value mappers: the contract the host sync framework calls per property
//! value, and the mappers that implement it.

pub mod content_blocks;
pub mod nested_content;

use serde_json::Value;

use crate::models::{DependencyFlags, DependencyRef};

pub use content_blocks::ContentBlocksMapper;
pub use nested_content::NestedContentMapper;

/// Editor alias of the content-blocks property editor
pub const CONTENT_BLOCKS_EDITOR: &str = "Perplex.ContentBlocks";
/// Editor alias of the nested-content property editor
pub const NESTED_CONTENT_EDITOR: &str = "Umbraco.NestedContent";

#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error("{mapper} does not handle editor {editor}")]
    UnsupportedEditor { mapper: String, editor: String },
    #[error("Mapper for {editor} returned invalid JSON: {source}")]
    InvalidDelegateOutput {
        editor: String,
        source: serde_json::Error,
    },
    #[error("Mapper for {editor} returned no value")]
    MissingDelegateOutput { editor: String },
    #[error("Failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Export and dependency mapping for the values of one or more property editors
pub trait ValueMapper: Send + Sync {
    fn name(&self) -> &str;

    /// Editor aliases this mapper is registered for
    fn editors(&self) -> &[&str];

    /// Text to write to the export for `value`, `None` for a null value
    fn export_value(
        &self,
        value: &Value,
        editor_alias: &str,
    ) -> Result<Option<String>, MapperError>;

    /// Entities `value` relies on, each tagged with `flags`
    fn dependencies(
        &self,
        value: &Value,
        editor_alias: &str,
        flags: DependencyFlags,
    ) -> Result<Vec<DependencyRef>, MapperError>;

    fn handles(&self, editor_alias: &str) -> bool {
        self.editors()
            .iter()
            .any(|editor| editor.eq_ignore_ascii_case(editor_alias))
    }

    fn ensure_handles(&self, editor_alias: &str) -> Result<(), MapperError> {
        if self.handles(editor_alias) {
            Ok(())
        } else {
            Err(MapperError::UnsupportedEditor {
                mapper: self.name().to_string(),
                editor: editor_alias.to_string(),
            })
        }
    }
}
