//! Search endpoint boundary for the web layer.
//!
//! # Responsibility
//! - Resolve the `q` parameter from query string or form body.
//! - Render the `{results, faq, articles}` JSON payload.
//!
//! # Invariants
//! - Never panics and never returns an error; failures render as empty lists.
//! - Blank queries short-circuit without touching the database.

use crate::service::help_search::{HelpSearchResponse, HelpSearchService};
use log::error;
use rusqlite::Connection;
use serde_json::{json, Value};

/// Picks the search text, preferring the query string over the form body.
pub fn resolve_query(query_string_q: Option<&str>, form_body_q: Option<&str>) -> String {
    query_string_q
        .or(form_body_q)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Runs the merged help search and renders the endpoint payload.
pub fn search_endpoint(conn: &Connection, service: &HelpSearchService, q: &str) -> Value {
    if q.trim().is_empty() {
        return empty_payload();
    }
    render_payload(&service.search(conn, q))
}

pub fn render_payload(response: &HelpSearchResponse) -> Value {
    match serde_json::to_value(response) {
        Ok(value) => value,
        Err(err) => {
            error!("event=help_search_render module=api status=error error={err}");
            empty_payload()
        }
    }
}

fn empty_payload() -> Value {
    json!({ "results": [], "faq": [], "articles": [] })
}

#[cfg(test)]
mod tests {
    use super::resolve_query;

    #[test]
    fn query_string_wins_over_form_body() {
        assert_eq!(resolve_query(Some(" fees "), Some("pool")), "fees");
        assert_eq!(resolve_query(None, Some("pool")), "pool");
        assert_eq!(resolve_query(None, None), "");
    }
}
