//! Help-center keyword search entry points.
//!
//! # Responsibility
//! - Expose `LIKE`-based keyword queries over FAQ and article tables.
//! - Keep query construction and parameter binding inside core.

pub mod keyword;
