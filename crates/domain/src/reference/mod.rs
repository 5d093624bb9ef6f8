//! Reference types for `{{...}}` syntax

mod command;
mod part;

pub use command::{Namespace, ReferenceCommand};
pub use part::{CLOSE, OPEN, Part, Reference, SECTION_SUFFIX};
