//! Help search aggregation and presentation.
//!
//! # Responsibility
//! - Run FAQ and article keyword searches for one raw query.
//! - Map rows into uniform `HelpSearchResult` items (FAQ entries first).
//!
//! # Invariants
//! - Snippets are tag-stripped and cut at `SNIPPET_MAX_CHARS` characters,
//!   never inside a multi-byte character.
//! - A failing store yields empty lists, never an error; `degraded` records it.

use crate::model::help::{ArticleRecord, FaqRecord};
use crate::search::keyword::{
    search_articles, search_faqs, KeywordQuery, SearchError, SearchResult,
};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use serde::Serialize;

pub const SNIPPET_MAX_CHARS: usize = 300;
pub const SNIPPET_ELLIPSIS: &str = "...";
pub const DEFAULT_FAQ_LIMIT: i64 = 15;
pub const DEFAULT_ARTICLE_LIMIT: i64 = 10;
const ARTICLE_URL_PREFIX: &str = "help/";

static HTML_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^<>]*>").expect("valid tag regex"));

/// Source table of a presented result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpResultKind {
    Faq,
    Article,
}

/// One presented search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpSearchResult {
    #[serde(rename = "type")]
    pub kind: HelpResultKind,
    pub title: String,
    pub snippet: String,
    /// `None` for FAQ entries, which are not independently addressable.
    pub url: Option<String>,
}

/// Presented results plus the raw rows they were built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HelpSearchResponse {
    pub results: Vec<HelpSearchResult>,
    pub faq: Vec<FaqRecord>,
    pub articles: Vec<ArticleRecord>,
    /// Set when a table search hit a store failure and was replaced by an empty list.
    #[serde(skip)]
    pub degraded: bool,
}

/// Options for the merged help search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSearchOptions {
    /// Public base URL; always stored with a trailing `/`.
    pub base_url: String,
    pub faq_limit: i64,
    pub article_limit: i64,
}

impl HelpSearchOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into().trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            faq_limit: DEFAULT_FAQ_LIMIT,
            article_limit: DEFAULT_ARTICLE_LIMIT,
        }
    }
}

/// Merges FAQ and article searches into one presentation payload.
#[derive(Debug, Clone)]
pub struct HelpSearchService {
    options: HelpSearchOptions,
}

impl HelpSearchService {
    pub fn new(options: HelpSearchOptions) -> Self {
        Self { options }
    }

    /// Searches both tables with the same raw query.
    ///
    /// Blank queries return an empty response without touching `conn`.
    pub fn search(&self, conn: &Connection, raw_query: &str) -> HelpSearchResponse {
        let text = raw_query.trim();
        if text.is_empty() {
            return HelpSearchResponse::default();
        }

        let mut degraded = false;
        let faq = or_empty(
            search_faqs(conn, &KeywordQuery::new(text, self.options.faq_limit)),
            "faq",
            &mut degraded,
        );
        let articles = or_empty(
            search_articles(conn, &KeywordQuery::new(text, self.options.article_limit)),
            "article",
            &mut degraded,
        );

        let results = faq
            .iter()
            .map(present_faq)
            .chain(
                articles
                    .iter()
                    .map(|article| present_article(article, &self.options.base_url)),
            )
            .collect();

        HelpSearchResponse {
            results,
            faq,
            articles,
            degraded,
        }
    }
}

fn or_empty<T>(result: SearchResult<Vec<T>>, table: &str, degraded: &mut bool) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(err @ SearchError::QueryTooLarge { .. }) => {
            warn!("event=help_search module=service status=rejected table={table} error={err}");
            Vec::new()
        }
        Err(err) => {
            warn!(
                "event=help_search module=service status=degraded table={table} unavailable={} error={err}",
                err.is_unavailable()
            );
            *degraded = true;
            Vec::new()
        }
    }
}

/// Presents an FAQ row: question as title, stripped answer as snippet.
pub fn present_faq(faq: &FaqRecord) -> HelpSearchResult {
    HelpSearchResult {
        kind: HelpResultKind::Faq,
        title: faq.question.clone(),
        snippet: make_snippet(&faq.answer),
        url: None,
    }
}

/// Presents an article row; the snippet falls back to the title for empty bodies.
pub fn present_article(article: &ArticleRecord, base_url: &str) -> HelpSearchResult {
    let snippet = make_snippet(&article.body_text);
    HelpSearchResult {
        kind: HelpResultKind::Article,
        title: article.title.clone(),
        snippet: if snippet.is_empty() {
            article.title.clone()
        } else {
            snippet
        },
        url: Some(article_url(base_url, &article.url_path)),
    }
}

/// Joins `base_url` and the article path under the help prefix without doubling slashes.
pub fn article_url(base_url: &str, url_path: &str) -> String {
    let relative = url_path.trim().trim_start_matches('/');
    if base_url.ends_with('/') {
        format!("{base_url}{ARTICLE_URL_PREFIX}{relative}")
    } else {
        format!("{base_url}/{ARTICLE_URL_PREFIX}{relative}")
    }
}

fn make_snippet(markup: &str) -> String {
    truncate_snippet(&strip_html(markup), SNIPPET_MAX_CHARS)
}

/// Best-effort plain-text extraction: drops anything shaped like `<...>`.
pub fn strip_html(markup: &str) -> String {
    HTML_TAG_RE.replace_all(markup, "").trim().to_string()
}

/// Keeps the first `max_chars` characters, appending `...` only when cut.
pub fn truncate_snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{SNIPPET_ELLIPSIS}", &text[..byte_index]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{article_url, strip_html, truncate_snippet, HelpSearchOptions};

    #[test]
    fn strip_html_removes_tags_and_trims() {
        assert_eq!(strip_html("<p>Use the <b>portal</b></p>\n"), "Use the portal");
        assert_eq!(strip_html("no markup"), "no markup");
    }

    #[test]
    fn strip_html_is_best_effort_on_unbalanced_markup() {
        assert_eq!(strip_html("a < b and <i>c"), "a < b and c");
    }

    #[test]
    fn truncate_keeps_short_text_verbatim() {
        let text = "x".repeat(300);
        assert_eq!(truncate_snippet(&text, 300), text);
    }

    #[test]
    fn truncate_cuts_long_text_on_char_boundaries() {
        let text = "ção".repeat(150);
        let snippet = truncate_snippet(&text, 300);
        assert!(snippet.ends_with("..."));
        let body = snippet.trim_end_matches("...");
        assert_eq!(body.chars().count(), 300);
        assert!(text.starts_with(body));
    }

    #[test]
    fn article_url_strips_leading_slash() {
        assert_eq!(
            article_url("https://condo.example/", "/fees"),
            "https://condo.example/help/fees"
        );
        assert_eq!(
            article_url("https://condo.example", "fees/late"),
            "https://condo.example/help/fees/late"
        );
    }

    #[test]
    fn options_normalize_base_url_and_use_default_limits() {
        let options = HelpSearchOptions::new(" https://condo.example ");
        assert_eq!(options.base_url, "https://condo.example/");
        assert_eq!(options.faq_limit, 15);
        assert_eq!(options.article_limit, 10);
    }
}
