//! FAQ repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing order is always `sort_order ASC, id ASC`.
//! - `update_faq` replaces every editable column.

use crate::model::help::{FaqDraft, FaqId, FaqRecord};
use crate::repo::{HelpTable, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub(crate) const FAQ_SELECT_SQL: &str = "SELECT
    id,
    question,
    answer,
    keywords,
    sort_order
FROM help_faqs";

pub(crate) const FAQ_ORDER_SQL: &str = "ORDER BY sort_order ASC, id ASC";

/// Repository interface for FAQ administration.
pub trait FaqRepository {
    fn create_faq(&self, draft: &FaqDraft) -> RepoResult<FaqId>;
    fn update_faq(&self, id: FaqId, draft: &FaqDraft) -> RepoResult<()>;
    fn get_faq(&self, id: FaqId) -> RepoResult<Option<FaqRecord>>;
    /// Returns every FAQ ordered by `(sort_order, id)`.
    fn list_ordered(&self) -> RepoResult<Vec<FaqRecord>>;
    fn delete_faq(&self, id: FaqId) -> RepoResult<()>;
}

/// SQLite-backed FAQ repository.
pub struct SqliteFaqRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFaqRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FaqRepository for SqliteFaqRepository<'_> {
    fn create_faq(&self, draft: &FaqDraft) -> RepoResult<FaqId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO help_faqs (question, answer, keywords, sort_order)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.question.trim(),
                draft.answer.as_str(),
                draft.keywords.as_deref(),
                draft.sort_order,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_faq(&self, id: FaqId, draft: &FaqDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE help_faqs
             SET
                question = ?1,
                answer = ?2,
                keywords = ?3,
                sort_order = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                draft.question.trim(),
                draft.answer.as_str(),
                draft.keywords.as_deref(),
                draft.sort_order,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: HelpTable::Faq,
                id,
            });
        }
        Ok(())
    }

    fn get_faq(&self, id: FaqId) -> RepoResult<Option<FaqRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FAQ_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_faq_row(row)?));
        }
        Ok(None)
    }

    fn list_ordered(&self) -> RepoResult<Vec<FaqRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FAQ_SELECT_SQL} {FAQ_ORDER_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut faqs = Vec::new();
        while let Some(row) = rows.next()? {
            faqs.push(parse_faq_row(row)?);
        }
        Ok(faqs)
    }

    fn delete_faq(&self, id: FaqId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM help_faqs WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: HelpTable::Faq,
                id,
            });
        }
        Ok(())
    }
}

pub(crate) fn parse_faq_row(row: &Row<'_>) -> RepoResult<FaqRecord> {
    let id: FaqId = row.get("id")?;
    let question: String = row.get("question")?;
    if question.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty question in help_faqs.id={id}"
        )));
    }

    Ok(FaqRecord {
        id,
        question,
        answer: row.get("answer")?,
        keywords: row.get("keywords")?,
        sort_order: row.get("sort_order")?,
    })
}
