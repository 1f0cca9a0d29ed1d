//! Lock-guarded audit policy table.
//!
//! # Invariants
//! - Table names match exactly (case-sensitive, no wildcards).
//! - The audited table list stays densely indexed after removals.
//! - A table's sensitive field list never holds duplicates.
//! - Readers never observe a half-applied mutation.

use super::seed::AuditSeed;
use log::info;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Replacement value written over sensitive fields.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

#[derive(Debug, Default, Clone)]
struct PolicyState {
    audited_tables: Vec<String>,
    sensitive_fields: BTreeMap<String, Vec<String>>,
}

/// Process-owned audit policy, shared by handle (`Arc<AuditPolicy>`).
#[derive(Debug, Default)]
pub struct AuditPolicy {
    state: RwLock<PolicyState>,
}

impl AuditPolicy {
    /// Creates a policy with no audited tables and no sensitive fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a policy from a static seed.
    pub fn from_seed(seed: &AuditSeed) -> Self {
        let policy = Self::empty();
        for table in seed.audited_tables {
            policy.add_audited_table(table);
        }
        for (table, fields) in seed.sensitive_fields {
            policy.add_sensitive_fields(table, fields.iter().copied());
        }
        info!(
            "event=audit_policy_load module=audit status=ok audited_tables={} sensitive_tables={}",
            seed.audited_tables.len(),
            seed.sensitive_fields.len()
        );
        policy
    }

    /// Builds a policy from the built-in condominium seed.
    pub fn with_defaults() -> Self {
        Self::from_seed(&AuditSeed::default())
    }

    pub fn is_audited(&self, table: &str) -> bool {
        self.read()
            .audited_tables
            .iter()
            .any(|audited| audited == table)
    }

    /// Returns the redaction list, empty for tables without one.
    pub fn sensitive_fields_for(&self, table: &str) -> Vec<String> {
        self.read()
            .sensitive_fields
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of the audited tables in insertion order.
    pub fn audited_tables(&self) -> Vec<String> {
        self.read().audited_tables.clone()
    }

    /// Appends `table` unless it is already audited.
    pub fn add_audited_table(&self, table: &str) {
        let mut state = self.write();
        if state.audited_tables.iter().any(|audited| audited == table) {
            return;
        }
        state.audited_tables.push(table.to_string());
    }

    /// Removes `table` if present; later entries shift down.
    pub fn remove_audited_table(&self, table: &str) {
        let mut state = self.write();
        if let Some(index) = state
            .audited_tables
            .iter()
            .position(|audited| audited == table)
        {
            state.audited_tables.remove(index);
        }
    }

    /// Unions `fields` into the table's redaction list, creating it when absent.
    pub fn add_sensitive_fields<I, S>(&self, table: &str, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.write();
        let entry = state.sensitive_fields.entry(table.to_string()).or_default();
        for field in fields {
            let field = field.as_ref();
            if !entry.iter().any(|existing| existing == field) {
                entry.push(field.to_string());
            }
        }
    }

    /// Replaces sensitive top-level values of a change payload with [`REDACTED_PLACEHOLDER`].
    ///
    /// Non-object payloads and tables without a redaction list pass through unchanged.
    pub fn redact_fields(&self, table: &str, mut payload: Value) -> Value {
        let state = self.read();
        let Some(fields) = state.sensitive_fields.get(table) else {
            return payload;
        };
        if let Value::Object(map) = &mut payload {
            for field in fields {
                if let Some(value) = map.get_mut(field.as_str()) {
                    *value = Value::String(REDACTED_PLACEHOLDER.to_string());
                }
            }
        }
        payload
    }

    fn read(&self) -> RwLockReadGuard<'_, PolicyState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PolicyState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
