//! Error types for the crate.
//!
//! - `Error` wraps failures from grammar construction and the CLI
//!   (invalid rule patterns, IO, JSON output)
//! - `RenderError` covers the render dispatcher; it is `Clone` so every
//!   caller sharing one in-flight render observes the same failure

pub mod errors;
