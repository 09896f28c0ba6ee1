use serde_json::{Map, Value};
use uuid::Uuid;

pub(crate) const DEFINITION_ID: &str = "definitionId";
pub(crate) const CONTENT: &str = "content";

/// Read view over one block object.
///
/// Only `definitionId` and `content` are understood; every other key is
/// carried along untouched.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Block<'a> {
    /// `None` when the value is not block-shaped (not an object)
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    pub fn raw_definition_id(&self) -> Option<&'a str> {
        self.fields.get(DEFINITION_ID).and_then(Value::as_str)
    }

    /// The definition id, if present and a valid UUID
    pub fn definition_id(&self) -> Option<Uuid> {
        self.raw_definition_id()
            .and_then(|id| Uuid::parse_str(id.trim()).ok())
    }

    /// The nested content, passed whole to the nested-content mapper.
    /// A `null` content field counts as absent.
    pub fn content(&self) -> Option<&'a Value> {
        self.fields.get(CONTENT).filter(|content| !content.is_null())
    }
}

/// Mutable view over one block object, used when rewriting content
#[derive(Debug)]
pub struct BlockMut<'a> {
    fields: &'a mut Map<String, Value>,
}

impl<'a> BlockMut<'a> {
    pub fn from_value(value: &'a mut Value) -> Option<Self> {
        value.as_object_mut().map(|fields| Self { fields })
    }

    pub fn as_block(&self) -> Block<'_> {
        Block {
            fields: &*self.fields,
        }
    }

    pub fn content(&self) -> Option<&Value> {
        self.as_block().content()
    }

    /// Replace `content` in place, keeping its position among the keys
    pub fn replace_content(&mut self, content: Value) {
        match self.fields.get_mut(CONTENT) {
            Some(slot) => *slot = content,
            None => {
                self.fields.insert(CONTENT.to_string(), content);
            }
        }
    }
}
