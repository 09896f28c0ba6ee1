//! Mapper for content-blocks values.
//!
//! Each block carries nested content items, so mapping and dependency checks
//! for anything inside a block have to go through the nested-content mapper.
//! Export rarely changes much (most values are GUIDs) but it keeps nested
//! values such as dates in their export format. Dependencies matter more: the
//! block's data-type plus whatever the nested items link to (media, documents)
//! make up the full dependency tree of the value.

use std::sync::Arc;

use log::{debug, trace};
use serde_json::Value;

use crate::document::{Block, BlockDocument, BlockMut, Ingest};
use crate::mapping::{CONTENT_BLOCKS_EDITOR, MapperError, NESTED_CONTENT_EDITOR, ValueMapper};
use crate::models::{DependencyFlags, DependencyRef};
use crate::services::{DataTypeService, DefinitionRepository};

pub struct ContentBlocksMapper {
    definitions: Arc<dyn DefinitionRepository>,
    data_types: Arc<dyn DataTypeService>,
    nested: Arc<dyn ValueMapper>,
}

impl ContentBlocksMapper {
    pub const NAME: &'static str = "Content Blocks Mapper";

    /// `nested` is called with the nested-content editor alias for every
    /// block `content` found.
    pub fn new(
        definitions: Arc<dyn DefinitionRepository>,
        data_types: Arc<dyn DataTypeService>,
        nested: Arc<dyn ValueMapper>,
    ) -> Self {
        Self {
            definitions,
            data_types,
            nested,
        }
    }

    /// Rewrite the nested content of every block and re-serialize, indented.
    ///
    /// Values that are not version 2 documents come back as their original text.
    pub fn export_document(&self, value: &Value) -> Result<Option<String>, MapperError> {
        let mut doc = match BlockDocument::ingest(value) {
            Ingest::Null => return Ok(None),
            Ingest::Opaque { text, reason } => {
                debug!("Passing content blocks value through unchanged: {reason:?}");
                return Ok(Some(text));
            }
            Ingest::Supported(doc) => doc,
        };

        if let Some(mut header) = doc.header_mut() {
            trace!("Exporting header block");
            self.export_block(&mut header)?;
        }
        for (index, mut block) in doc.blocks_mut().enumerate() {
            trace!("Exporting block {index}");
            self.export_block(&mut block)?;
        }

        doc.to_pretty_string()
            .map(Some)
            .map_err(MapperError::Serialize)
    }

    /// Dependencies of the header followed by those of each block, in order
    pub fn document_dependencies(
        &self,
        value: &Value,
        flags: DependencyFlags,
    ) -> Result<Vec<DependencyRef>, MapperError> {
        let doc = match BlockDocument::ingest(value) {
            Ingest::Null => return Ok(Vec::new()),
            Ingest::Opaque { reason, .. } => {
                debug!("No dependencies for opaque content blocks value: {reason:?}");
                return Ok(Vec::new());
            }
            Ingest::Supported(doc) => doc,
        };

        let mut dependencies = Vec::new();
        if let Some(header) = doc.header() {
            dependencies.extend(self.block_dependencies(header, flags)?);
        }
        for block in doc.blocks() {
            dependencies.extend(self.block_dependencies(block, flags)?);
        }
        Ok(dependencies)
    }

    fn export_block(&self, block: &mut BlockMut<'_>) -> Result<(), MapperError> {
        let Some(content) = block.content() else {
            return Ok(());
        };

        let mapped = self
            .nested
            .export_value(content, NESTED_CONTENT_EDITOR)?
            .ok_or_else(|| MapperError::MissingDelegateOutput {
                editor: NESTED_CONTENT_EDITOR.to_string(),
            })?;
        let content = serde_json::from_str(&mapped).map_err(|source| {
            MapperError::InvalidDelegateOutput {
                editor: NESTED_CONTENT_EDITOR.to_string(),
                source,
            }
        })?;

        block.replace_content(content);
        Ok(())
    }

    fn block_dependencies(
        &self,
        block: Block<'_>,
        flags: DependencyFlags,
    ) -> Result<Vec<DependencyRef>, MapperError> {
        let mut dependencies = Vec::new();

        if let Some(dependency) = self.definition_dependency(block, flags) {
            dependencies.push(dependency);
        }

        if let Some(content) = block.content() {
            dependencies.extend(
                self.nested
                    .dependencies(content, NESTED_CONTENT_EDITOR, flags)?,
            );
        }

        Ok(dependencies)
    }

    /// The data-type behind the block's definition. Any miss yields nothing.
    fn definition_dependency(
        &self,
        block: Block<'_>,
        flags: DependencyFlags,
    ) -> Option<DependencyRef> {
        let raw_id = block.raw_definition_id()?;
        let Some(id) = block.definition_id() else {
            debug!("Ignoring malformed definition id {raw_id:?}");
            return None;
        };

        let Some(definition) = self.definitions.get_by_id(id) else {
            debug!("No block definition found for {id}");
            return None;
        };
        let key = definition.data_type_key?;
        let Some(data_type) = self.data_types.get_data_type(key) else {
            debug!("Data type {key} of definition {id} not found");
            return None;
        };

        Some(DependencyRef::new(data_type.udi(), data_type.name, flags))
    }
}

impl ValueMapper for ContentBlocksMapper {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn editors(&self) -> &[&str] {
        &[CONTENT_BLOCKS_EDITOR]
    }

    fn export_value(
        &self,
        value: &Value,
        editor_alias: &str,
    ) -> Result<Option<String>, MapperError> {
        self.ensure_handles(editor_alias)?;
        self.export_document(value)
    }

    fn dependencies(
        &self,
        value: &Value,
        editor_alias: &str,
        flags: DependencyFlags,
    ) -> Result<Vec<DependencyRef>, MapperError> {
        self.ensure_handles(editor_alias)?;
        self.document_dependencies(value, flags)
    }
}
