//! Application use cases (compilation orchestration).

mod compile_configuration;
mod inspect_references;

pub use compile_configuration::*;
pub use inspect_references::*;
