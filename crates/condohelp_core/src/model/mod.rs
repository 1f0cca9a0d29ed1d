//! Help-center domain model.
//!
//! # Responsibility
//! - Define the FAQ and article records searched by the keyword engine.
//! - Keep the two table shapes separate; only search results share a shape.

pub mod help;
