//! Audit policy configuration consumed by the audit-logging subsystem.
//!
//! # Responsibility
//! - Answer whether changes to a table are audited.
//! - Provide the field names that must be masked before a change is logged.
//!
//! # Invariants
//! - Policy state is owned by an explicit `AuditPolicy` handle, never a global.
//! - Lookups are total: unknown tables are simply not audited and have no fields.

pub mod policy;
pub mod seed;

pub use policy::{AuditPolicy, REDACTED_PLACEHOLDER};
pub use seed::{AuditSeed, DEFAULT_AUDITED_TABLES, DEFAULT_SENSITIVE_FIELDS};
