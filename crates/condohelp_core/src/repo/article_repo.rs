//! Help article repository contract and SQLite implementation.

use crate::model::help::{ArticleDraft, ArticleId, ArticleRecord};
use crate::repo::{HelpTable, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub(crate) const ARTICLE_SELECT_SQL: &str = "SELECT
    id,
    section_key,
    title,
    body_text,
    url_path
FROM help_articles";

pub(crate) const ARTICLE_ORDER_SQL: &str = "ORDER BY id ASC";

/// Repository interface for help article administration.
pub trait ArticleRepository {
    fn create_article(&self, draft: &ArticleDraft) -> RepoResult<ArticleId>;
    fn get_article(&self, id: ArticleId) -> RepoResult<Option<ArticleRecord>>;
    /// Lists articles in insertion order, optionally restricted to one section.
    fn list_articles(&self, section_key: Option<&str>) -> RepoResult<Vec<ArticleRecord>>;
    fn delete_article(&self, id: ArticleId) -> RepoResult<()>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn create_article(&self, draft: &ArticleDraft) -> RepoResult<ArticleId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO help_articles (section_key, title, body_text, url_path)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.section_key.trim(),
                draft.title.trim(),
                draft.body_text.as_deref(),
                draft.url_path.trim(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_article(&self, id: ArticleId) -> RepoResult<Option<ArticleRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTICLE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_article_row(row)?));
        }
        Ok(None)
    }

    fn list_articles(&self, section_key: Option<&str>) -> RepoResult<Vec<ArticleRecord>> {
        let mut articles = Vec::new();
        match section_key {
            Some(section_key) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{ARTICLE_SELECT_SQL} WHERE section_key = ?1 {ARTICLE_ORDER_SQL};"
                ))?;
                let mut rows = stmt.query([section_key])?;
                while let Some(row) = rows.next()? {
                    articles.push(parse_article_row(row)?);
                }
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{ARTICLE_SELECT_SQL} {ARTICLE_ORDER_SQL};"))?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    articles.push(parse_article_row(row)?);
                }
            }
        }
        Ok(articles)
    }

    fn delete_article(&self, id: ArticleId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM help_articles WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: HelpTable::Article,
                id,
            });
        }
        Ok(())
    }
}

pub(crate) fn parse_article_row(row: &Row<'_>) -> RepoResult<ArticleRecord> {
    let id: ArticleId = row.get("id")?;
    let title: String = row.get("title")?;
    if title.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty title in help_articles.id={id}"
        )));
    }

    Ok(ArticleRecord {
        id,
        section_key: row.get("section_key")?,
        title,
        body_text: row
            .get::<_, Option<String>>("body_text")?
            .unwrap_or_default(),
        url_path: row.get("url_path")?,
    })
}
