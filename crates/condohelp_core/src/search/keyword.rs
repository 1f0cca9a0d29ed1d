//! Keyword search over the FAQ and article tables.
//!
//! # Responsibility
//! - Turn free text into a conjunctive, parameter-bound `LIKE` filter.
//! - Return source-table rows in deterministic order, bounded at the query level.
//!
//! # Invariants
//! - A row matches only if every token appears in at least one searchable column.
//! - Token text is never interpolated into SQL; each token/column pair gets its own `?`.
//! - Blank queries and zero limits return early without touching the connection.
//! - Repeated tokens share one filter group; at most `MAX_DISTINCT_TOKENS` groups are built.
//! - A stored row that fails validation is skipped, not allowed to sink the whole search.

use crate::db::DbError;
use crate::model::help::{ArticleRecord, FaqRecord};
use crate::repo::article_repo::{parse_article_row, ARTICLE_ORDER_SQL, ARTICLE_SELECT_SQL};
use crate::repo::faq_repo::{
    parse_faq_row, FaqRepository, SqliteFaqRepository, FAQ_ORDER_SQL, FAQ_SELECT_SQL,
};
use crate::repo::RepoError;
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error.
#[derive(Debug)]
pub enum SearchError {
    /// Backing store could not answer (closed, missing tables, I/O failure).
    Unavailable(DbError),
    InvalidData(String),
    /// More distinct tokens than one filter may carry.
    QueryTooLarge { distinct_tokens: usize, max: usize },
}

impl SearchError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "help store unavailable: {err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
            Self::QueryTooLarge {
                distinct_tokens,
                max,
            } => write!(
                f,
                "search query has {distinct_tokens} distinct terms; at most {max} are allowed"
            ),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) => Some(err),
            Self::InvalidData(_) | Self::QueryTooLarge { .. } => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Unavailable(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Unavailable(DbError::Sqlite(value))
    }
}

impl From<RepoError> for SearchError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Unavailable(err),
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Free-text keyword query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    pub text: String,
    /// Negative values are treated as zero.
    pub limit: i64,
}

impl KeywordQuery {
    pub fn new(text: impl Into<String>, limit: i64) -> Self {
        Self {
            text: text.into(),
            limit,
        }
    }

    fn effective_limit(&self) -> i64 {
        self.limit.max(0)
    }
}

/// Static description of one searchable table.
struct KeywordTable {
    name: &'static str,
    select_sql: &'static str,
    order_sql: &'static str,
    search_columns: &'static [&'static str],
}

const FAQ_TABLE: KeywordTable = KeywordTable {
    name: "help_faqs",
    select_sql: FAQ_SELECT_SQL,
    order_sql: FAQ_ORDER_SQL,
    search_columns: &["question", "answer", "keywords"],
};

const ARTICLE_TABLE: KeywordTable = KeywordTable {
    name: "help_articles",
    select_sql: ARTICLE_SELECT_SQL,
    order_sql: ARTICLE_ORDER_SQL,
    search_columns: &["title", "body_text"],
};

const LIKE_ESCAPE: char = '\\';
/// Keeps the generated `AND` chain far below SQLite's expression depth limit.
pub const MAX_DISTINCT_TOKENS: usize = 32;

/// Splits trimmed text on whitespace runs, keeping order and duplicates.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|token| !token.is_empty())
        .collect()
}

/// Searches FAQs whose question, answer or keywords contain every token.
///
/// Ordered by `sort_order ASC, id ASC`.
pub fn search_faqs(conn: &Connection, query: &KeywordQuery) -> SearchResult<Vec<FaqRecord>> {
    run_keyword_query(conn, &FAQ_TABLE, query, |row| Ok(parse_faq_row(row)?))
}

/// Searches articles whose title or body contains every token.
///
/// Ordered by `id ASC`.
pub fn search_articles(
    conn: &Connection,
    query: &KeywordQuery,
) -> SearchResult<Vec<ArticleRecord>> {
    run_keyword_query(conn, &ARTICLE_TABLE, query, |row| {
        Ok(parse_article_row(row)?)
    })
}

/// Returns every FAQ ordered by `sort_order ASC, id ASC`, without filtering.
pub fn all_faqs_ordered(conn: &Connection) -> SearchResult<Vec<FaqRecord>> {
    Ok(SqliteFaqRepository::new(conn).list_ordered()?)
}

fn run_keyword_query<T>(
    conn: &Connection,
    table: &KeywordTable,
    query: &KeywordQuery,
    parse: impl Fn(&Row<'_>) -> SearchResult<T>,
) -> SearchResult<Vec<T>> {
    let tokens = distinct_tokens(tokenize(query.text.trim()));
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    if tokens.len() > MAX_DISTINCT_TOKENS {
        return Err(SearchError::QueryTooLarge {
            distinct_tokens: tokens.len(),
            max: MAX_DISTINCT_TOKENS,
        });
    }

    let limit = query.effective_limit();
    if limit == 0 {
        return Ok(Vec::new());
    }

    let started_at = Instant::now();
    let (filter_sql, mut bind_values) = build_keyword_filter(&tokens, table.search_columns);
    let sql = format!(
        "{} WHERE {filter_sql} {} LIMIT ?;",
        table.select_sql, table.order_sql
    );
    bind_values.push(Value::Integer(limit));

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut records = Vec::new();
    let mut skipped = 0usize;
    while let Some(row) = rows.next()? {
        match parse(row) {
            Ok(record) => records.push(record),
            Err(SearchError::InvalidData(message)) => {
                warn!(
                    "event=keyword_search module=search status=row_skipped table={} error={message}",
                    table.name
                );
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        "event=keyword_search module=search status=ok table={} tokens={} limit={} rows={} skipped={} duration_ms={}",
        table.name,
        tokens.len(),
        limit,
        records.len(),
        skipped,
        started_at.elapsed().as_millis()
    );
    Ok(records)
}

/// Drops repeated tokens, keeping first-occurrence order; the `AND` result is unchanged.
fn distinct_tokens(tokens: Vec<&str>) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(tokens.len());
    tokens.into_iter().filter(|token| seen.insert(*token)).collect()
}

/// Builds `(col LIKE ? OR ...) AND (...)` with one bound pattern per token/column.
fn build_keyword_filter(tokens: &[&str], columns: &[&str]) -> (String, Vec<Value>) {
    let mut groups = Vec::with_capacity(tokens.len());
    let mut bind_values = Vec::with_capacity(tokens.len() * columns.len());

    for token in tokens {
        let pattern = format!("%{}%", escape_like(token));
        let clauses = columns
            .iter()
            .map(|column| {
                bind_values.push(Value::Text(pattern.clone()));
                format!("{column} LIKE ? ESCAPE '{LIKE_ESCAPE}'")
            })
            .collect::<Vec<_>>();
        groups.push(format!("({})", clauses.join(" OR ")));
    }

    (groups.join(" AND "), bind_values)
}

/// Escapes `LIKE` wildcards so the token matches as a literal substring.
fn escape_like(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for ch in token.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{build_keyword_filter, distinct_tokens, escape_like, tokenize, KeywordQuery};
    use rusqlite::types::Value;

    #[test]
    fn tokenize_splits_on_whitespace_runs_and_keeps_duplicates() {
        assert_eq!(
            tokenize("  pay \t fees\n\npay "),
            vec!["pay", "fees", "pay"]
        );
        assert!(tokenize(" \t\n").is_empty());
    }

    #[test]
    fn distinct_tokens_keeps_first_occurrence_order() {
        assert_eq!(
            distinct_tokens(tokenize("pay fees pay PAY fees")),
            vec!["pay", "fees", "PAY"]
        );
    }

    #[test]
    fn escape_like_marks_wildcards_literal() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn filter_binds_one_parameter_per_token_and_column() {
        let (sql, values) = build_keyword_filter(&["pay", "fees"], &["title", "body_text"]);
        assert_eq!(
            sql,
            "(title LIKE ? ESCAPE '\\' OR body_text LIKE ? ESCAPE '\\') AND \
             (title LIKE ? ESCAPE '\\' OR body_text LIKE ? ESCAPE '\\')"
        );
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], Value::Text("%pay%".to_string()));
        assert_eq!(values[3], Value::Text("%fees%".to_string()));
        assert!(!sql.contains("pay"));
    }

    #[test]
    fn negative_limit_is_coerced_to_zero() {
        assert_eq!(KeywordQuery::new("x", -5).effective_limit(), 0);
        assert_eq!(KeywordQuery::new("x", 7).effective_limit(), 7);
    }
}
