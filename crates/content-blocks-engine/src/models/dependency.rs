use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::models::udi::Udi;

bitflags! {
    /// Options the host attaches to a dependency request.
    ///
    /// Mappers never interpret these: whatever the caller passes is copied
    /// onto every reference produced and handed on to delegate mappers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct DependencyFlags: u32 {
        const NONE = 0;
        const INCLUDE_CHILDREN = 1 << 1;
        const INCLUDE_ANCESTORS = 1 << 2;
        const INCLUDE_DEPENDENCIES = 1 << 3;
        const INCLUDE_VIEWS = 1 << 4;
        const INCLUDE_MEDIA = 1 << 5;
        const INCLUDE_LINKED = 1 << 6;
        const INCLUDE_MEDIA_FILES = 1 << 7;
        const INCLUDE_CONFIG = 1 << 8;

        // Bits the host may define later still pass through
        const _ = !0;
    }
}

impl Default for DependencyFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// A reference from a value to another entity it relies on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRef {
    pub udi: Udi,
    pub name: String,
    pub flags: DependencyFlags,
}

impl DependencyRef {
    pub fn new(udi: Udi, name: impl Into<String>, flags: DependencyFlags) -> Self {
        Self {
            udi,
            name: name.into(),
            flags,
        }
    }
}
