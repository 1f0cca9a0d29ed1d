//! Built-in audit seed for the condominium domain.

/// Tables whose row-level changes are captured at process start.
pub const DEFAULT_AUDITED_TABLES: &[&str] = &[
    "users",
    "condominiums",
    "units",
    "residents",
    "condo_fees",
    "payments",
    "subscriptions",
    "plans",
    "support_tickets",
    "help_faqs",
    "help_articles",
];

/// Field names masked per table before a change record is persisted.
pub const DEFAULT_SENSITIVE_FIELDS: &[(&str, &[&str])] = &[
    ("users", &["password", "two_factor_secret"]),
    ("residents", &["document_number", "phone"]),
    ("payments", &["card_last_digits", "gateway_token"]),
    ("subscriptions", &["gateway_customer_id"]),
];

/// Static seed used to build an [`AuditPolicy`](super::AuditPolicy).
#[derive(Debug, Clone, Copy)]
pub struct AuditSeed {
    pub audited_tables: &'static [&'static str],
    pub sensitive_fields: &'static [(&'static str, &'static [&'static str])],
}

impl AuditSeed {
    pub const fn new(
        audited_tables: &'static [&'static str],
        sensitive_fields: &'static [(&'static str, &'static [&'static str])],
    ) -> Self {
        Self {
            audited_tables,
            sensitive_fields,
        }
    }
}

impl Default for AuditSeed {
    fn default() -> Self {
        Self::new(DEFAULT_AUDITED_TABLES, DEFAULT_SENSITIVE_FIELDS)
    }
}
