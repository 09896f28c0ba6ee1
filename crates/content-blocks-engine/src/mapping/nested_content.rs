use std::collections::HashSet;

use log::trace;
use serde_json::Value;

use crate::mapping::{MapperError, NESTED_CONTENT_EDITOR, ValueMapper};
use crate::models::{DependencyFlags, DependencyRef, Udi};

/// Mapper for nested-content item lists.
///
/// Export re-emits the items as indented JSON. Dependencies are every
/// `umb://` reference found anywhere inside the items, including inside
/// property values that are themselves JSON-encoded strings and
/// comma-separated picker values.
#[derive(Debug, Default, Clone, Copy)]
pub struct NestedContentMapper;

impl NestedContentMapper {
    pub const NAME: &'static str = "Nested Content Mapper";

    pub fn new() -> Self {
        Self
    }
}

impl ValueMapper for NestedContentMapper {
    fn name(&self) -> &str {
        Self::NAME
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
        match value {
            Value::Null => Ok(None),
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(items) => serde_json::to_string_pretty(&items)
                    .map(Some)
                    .map_err(MapperError::Serialize),
                Err(_) => Ok(Some(text.clone())),
            },
            items => serde_json::to_string_pretty(items)
                .map(Some)
                .map_err(MapperError::Serialize),
        }
    }

    fn dependencies(
        &self,
        value: &Value,
        editor_alias: &str,
        flags: DependencyFlags,
    ) -> Result<Vec<DependencyRef>, MapperError> {
        self.ensure_handles(editor_alias)?;

        let mut found = Vec::new();
        collect_udis(value, &mut found);

        let mut seen = HashSet::new();
        let dependencies = found
            .into_iter()
            .filter(|udi| seen.insert(udi.clone()))
            .map(|udi| {
                let name = udi.to_string();
                DependencyRef::new(udi, name, flags)
            })
            .collect::<Vec<_>>();
        trace!("Found {} nested content dependencies", dependencies.len());
        Ok(dependencies)
    }
}

fn collect_udis(value: &Value, found: &mut Vec<Udi>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_udis(item, found)),
        Value::Object(fields) => fields.values().for_each(|field| collect_udis(field, found)),
        Value::String(text) => collect_from_text(text, found),
        _ => {}
    }
}

fn collect_from_text(text: &str, found: &mut Vec<Udi>) {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(inner) = serde_json::from_str::<Value>(trimmed) {
            collect_udis(&inner, found);
        }
        return;
    }

    // Pickers store several references as one comma-separated string
    found.extend(
        trimmed
            .split(',')
            .filter_map(|part| part.trim().parse::<Udi>().ok()),
    );
}
