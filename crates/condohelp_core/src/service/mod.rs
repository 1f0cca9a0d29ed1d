//! Core use-case services.
//!
//! # Responsibility
//! - Compose search queries into caller-facing help payloads.
//! - Keep HTTP/CLI layers decoupled from query construction.

pub mod help_search;
