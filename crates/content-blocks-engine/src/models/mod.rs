pub mod definition;
pub mod dependency;
pub mod udi;

pub use definition::{DataType, Definition};
pub use dependency::{DependencyFlags, DependencyRef};
pub use udi::{Udi, UdiError, entity_types};
