//! Core domain logic for the condominium help center.
//!
//! Keyword search over FAQ and article tables, search result presentation,
//! and the audit policy table consulted by the audit logger.

pub mod api;
pub mod audit;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use audit::{AuditPolicy, AuditSeed};
pub use config::{ConfigError, HelpdeskConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::help::{
    ArticleDraft, ArticleId, ArticleRecord, FaqDraft, FaqId, FaqRecord, HelpValidationError,
};
pub use repo::article_repo::{ArticleRepository, SqliteArticleRepository};
pub use repo::faq_repo::{FaqRepository, SqliteFaqRepository};
pub use repo::{RepoError, RepoResult};
pub use search::keyword::{
    all_faqs_ordered, search_articles, search_faqs, tokenize, KeywordQuery, SearchError,
    SearchResult,
};
pub use service::help_search::{
    HelpResultKind, HelpSearchOptions, HelpSearchResponse, HelpSearchResult, HelpSearchService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
