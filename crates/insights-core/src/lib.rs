//! Core building blocks for the archive insights tool.
//!
//! Domain-free pieces shared by the data layer and the binary: the error
//! taxonomy, the ordered stats report model, strict timestamp parsing, `@tag`
//! extraction, first-seen frequency counting, display formatting and CLI
//! settings with last-used persistence.

pub mod error;
pub mod formatting;
pub mod models;
pub mod processors;
pub mod settings;
