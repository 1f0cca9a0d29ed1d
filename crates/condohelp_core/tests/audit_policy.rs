use condohelp_core::audit::{AuditPolicy, AuditSeed, DEFAULT_AUDITED_TABLES};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

#[test]
fn seeded_table_round_trips_through_remove_and_add() {
    let policy = AuditPolicy::with_defaults();
    assert!(policy.is_audited("users"));

    policy.remove_audited_table("users");
    assert!(!policy.is_audited("users"));

    policy.add_audited_table("users");
    policy.add_audited_table("users");
    assert!(policy.is_audited("users"));
    assert_eq!(
        policy
            .audited_tables()
            .iter()
            .filter(|table| table.as_str() == "users")
            .count(),
        1
    );
}

#[test]
fn sensitive_fields_union_without_duplicates() {
    let policy = AuditPolicy::empty();
    policy.add_sensitive_fields("users", ["password"]);
    policy.add_sensitive_fields("users", ["password", "two_factor_secret"]);

    let fields: BTreeSet<_> = policy.sensitive_fields_for("users").into_iter().collect();
    assert_eq!(
        fields,
        BTreeSet::from(["password".to_string(), "two_factor_secret".to_string()])
    );
    assert_eq!(policy.sensitive_fields_for("users").len(), 2);
}

#[test]
fn sensitive_fields_union_is_order_independent() {
    let forward = AuditPolicy::empty();
    forward.add_sensitive_fields("users", ["password"]);
    forward.add_sensitive_fields("users", ["password", "two_factor_secret"]);

    let reverse = AuditPolicy::empty();
    reverse.add_sensitive_fields("users", ["password", "two_factor_secret"]);
    reverse.add_sensitive_fields("users", ["password"]);

    let as_set = |policy: &AuditPolicy| -> BTreeSet<String> {
        policy.sensitive_fields_for("users").into_iter().collect()
    };
    assert_eq!(as_set(&forward), as_set(&reverse));
}

#[test]
fn seeded_users_redaction_list_is_exact() {
    let policy = AuditPolicy::with_defaults();
    policy.add_sensitive_fields("users", ["password", "two_factor_secret"]);
    let mut fields = policy.sensitive_fields_for("users");
    fields.sort();
    assert_eq!(fields, vec!["password", "two_factor_secret"]);
}

#[test]
fn unregistered_tables_have_no_fields_and_are_not_audited() {
    let policy = AuditPolicy::with_defaults();
    assert!(policy.sensitive_fields_for("not_a_table").is_empty());
    assert!(!policy.is_audited("not_a_table"));

    // Audited but without a redaction list.
    assert!(policy.is_audited("units"));
    assert!(policy.sensitive_fields_for("units").is_empty());
}

#[test]
fn custom_seed_is_loaded_verbatim() {
    const TABLES: &[&str] = &["tickets"];
    const FIELDS: &[(&str, &[&str])] = &[("tickets", &["attachment_path"])];
    let policy = AuditPolicy::from_seed(&AuditSeed::new(TABLES, FIELDS));

    assert_eq!(policy.audited_tables(), vec!["tickets"]);
    assert_eq!(policy.sensitive_fields_for("tickets"), vec!["attachment_path"]);
    assert!(!policy.is_audited("users"));
}

#[test]
fn default_seed_lists_every_table_once() {
    let policy = AuditPolicy::with_defaults();
    assert_eq!(policy.audited_tables().len(), DEFAULT_AUDITED_TABLES.len());
}

#[test]
fn redaction_uses_seeded_fields() {
    let policy = AuditPolicy::with_defaults();
    let change = json!({
        "id": 7,
        "email": "sindico@condo.example",
        "password": "hash",
        "two_factor_secret": "otp"
    });

    let redacted = policy.redact_fields("users", change);
    assert_eq!(redacted["password"], "[REDACTED]");
    assert_eq!(redacted["two_factor_secret"], "[REDACTED]");
    assert_eq!(redacted["email"], "sindico@condo.example");
    assert_eq!(redacted["id"], 7);
}

#[test]
fn concurrent_mutations_and_reads_stay_consistent() {
    let policy = Arc::new(AuditPolicy::with_defaults());
    let mut handles = Vec::new();

    for worker in 0..8 {
        let policy = Arc::clone(&policy);
        handles.push(thread::spawn(move || {
            let table = format!("table_{worker}");
            for _ in 0..200 {
                policy.add_audited_table(&table);
                policy.add_sensitive_fields(&table, ["secret"]);
                assert!(policy.is_audited("users"));
                policy.remove_audited_table(&table);
            }
            policy.add_audited_table(&table);
        }));
    }
    for handle in handles {
        handle.join().expect("worker should not panic");
    }

    let tables = policy.audited_tables();
    let unique: BTreeSet<_> = tables.iter().collect();
    assert_eq!(unique.len(), tables.len());
    assert_eq!(tables.len(), DEFAULT_AUDITED_TABLES.len() + 8);
    for worker in 0..8 {
        assert_eq!(
            policy.sensitive_fields_for(&format!("table_{worker}")),
            vec!["secret"]
        );
    }
}
