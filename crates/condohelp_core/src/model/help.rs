//! FAQ and article records.
//!
//! # Invariants
//! - A record belongs to exactly one shape; schemas are never merged.
//! - Drafts must pass `validate()` before they are persisted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row identifier of `help_faqs`.
pub type FaqId = i64;
/// Row identifier of `help_articles`.
pub type ArticleId = i64;

/// Persisted FAQ entry with a manual sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub id: FaqId,
    pub question: String,
    /// May contain HTML markup authored in the admin screens.
    pub answer: String,
    pub keywords: Option<String>,
    pub sort_order: i64,
}

/// Persisted help article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: ArticleId,
    pub section_key: String,
    pub title: String,
    /// Empty when the stored body is NULL.
    pub body_text: String,
    /// Relative path under the public help prefix, with or without a leading slash.
    pub url_path: String,
}

/// Insert/update payload for an FAQ entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
    pub keywords: Option<String>,
    pub sort_order: i64,
}

impl FaqDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            keywords: None,
            sort_order: 0,
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Validates invariants required before persistence.
    pub fn validate(&self) -> Result<(), HelpValidationError> {
        if self.question.trim().is_empty() {
            return Err(HelpValidationError::EmptyQuestion);
        }
        Ok(())
    }
}

/// Insert payload for a help article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    pub section_key: String,
    pub title: String,
    pub body_text: Option<String>,
    pub url_path: String,
}

impl ArticleDraft {
    pub fn new(
        section_key: impl Into<String>,
        title: impl Into<String>,
        url_path: impl Into<String>,
    ) -> Self {
        Self {
            section_key: section_key.into(),
            title: title.into(),
            body_text: None,
            url_path: url_path.into(),
        }
    }

    pub fn with_body(mut self, body_text: impl Into<String>) -> Self {
        self.body_text = Some(body_text.into());
        self
    }

    pub fn validate(&self) -> Result<(), HelpValidationError> {
        if self.section_key.trim().is_empty() {
            return Err(HelpValidationError::EmptySectionKey);
        }
        if self.title.trim().is_empty() {
            return Err(HelpValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Validation failures for help drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpValidationError {
    EmptyQuestion,
    EmptyTitle,
    EmptySectionKey,
}

impl Display for HelpValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuestion => write!(f, "faq question cannot be empty"),
            Self::EmptyTitle => write!(f, "article title cannot be empty"),
            Self::EmptySectionKey => write!(f, "article section_key cannot be empty"),
        }
    }
}

impl Error for HelpValidationError {}
