//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use uuid::Uuid;

use crate::mapping::{ContentBlocksMapper, MapperError, NESTED_CONTENT_EDITOR, ValueMapper};
use crate::models::{DataType, Definition, DependencyFlags, DependencyRef, Udi, entity_types};
use crate::services::Catalog;

pub const HERO_DEFINITION: &str = "3cffc1a4-1359-4f99-8a23-9b61b4f9e969";
pub const HERO_DATA_TYPE: &str = "de6adecf-2950-4fe6-b817-c3fd619f2fff";
/// Definition whose data-type is missing from the catalog
pub const ORPHAN_DEFINITION: &str = "11111111-2222-3333-4444-555555555555";
/// Definition without a data-type
pub const BARE_DEFINITION: &str = "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";

pub fn uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap()
}

pub fn hero_data_type_udi() -> Udi {
    Udi::new(entity_types::DATA_TYPE, uuid(HERO_DATA_TYPE))
}

pub fn test_catalog() -> Catalog {
    Catalog::new(
        [
            Definition {
                id: uuid(HERO_DEFINITION),
                name: "Hero".into(),
                data_type_key: Some(uuid(HERO_DATA_TYPE)),
            },
            Definition {
                id: uuid(ORPHAN_DEFINITION),
                name: "Orphan".into(),
                data_type_key: Some(Uuid::nil()),
            },
            Definition {
                id: uuid(BARE_DEFINITION),
                name: "Bare".into(),
                data_type_key: None,
            },
        ],
        [DataType {
            key: uuid(HERO_DATA_TYPE),
            name: "Hero blocks".into(),
        }],
    )
}

/// Scripted nested-content mapper that records what it was given
#[derive(Default)]
pub struct FakeNestedMapper {
    pub export_output: Option<String>,
    pub export_nothing: bool,
    pub dependency_output: Vec<DependencyRef>,
    pub seen: Mutex<Vec<(Value, DependencyFlags)>>,
}

impl FakeNestedMapper {
    /// Exports the content it is given unchanged, finds nothing
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn exporting(output: &str) -> Self {
        Self {
            export_output: Some(output.to_string()),
            ..Self::default()
        }
    }

    /// Exports `None`, as a mapper does for a null value
    pub fn exporting_nothing() -> Self {
        Self {
            export_nothing: true,
            ..Self::default()
        }
    }

    pub fn finding(dependencies: Vec<DependencyRef>) -> Self {
        Self {
            dependency_output: dependencies,
            ..Self::default()
        }
    }

    pub fn seen(&self) -> Vec<(Value, DependencyFlags)> {
        self.seen.lock().unwrap().clone()
    }
}

impl ValueMapper for FakeNestedMapper {
    fn name(&self) -> &str {
        "Fake Nested Mapper"
    }

    fn editors(&self) -> &[&str] {
        &[NESTED_CONTENT_EDITOR]
    }

    fn export_value(
        &self,
        value: &Value,
        editor_alias: &str,
    ) -> Result<Option<String>, MapperError> {
        self.ensure_handles(editor_alias)?;
        self.seen
            .lock()
            .unwrap()
            .push((value.clone(), DependencyFlags::NONE));
        if self.export_nothing {
            return Ok(None);
        }
        Ok(Some(
            self.export_output
                .clone()
                .unwrap_or_else(|| value.to_string()),
        ))
    }

    fn dependencies(
        &self,
        value: &Value,
        editor_alias: &str,
        flags: DependencyFlags,
    ) -> Result<Vec<DependencyRef>, MapperError> {
        self.ensure_handles(editor_alias)?;
        self.seen.lock().unwrap().push((value.clone(), flags));
        Ok(self
            .dependency_output
            .iter()
            .cloned()
            .map(|d| DependencyRef { flags, ..d })
            .collect())
    }
}

pub fn mapper_with(nested: Arc<FakeNestedMapper>) -> ContentBlocksMapper {
    let catalog = Arc::new(test_catalog());
    ContentBlocksMapper::new(catalog.clone(), catalog, nested)
}
