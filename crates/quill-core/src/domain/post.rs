use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, FieldError, FieldReason};

/// Surrogate key assigned by the store.
pub type PostId = i32;

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Post entity - a published blog post.
///
/// A plain snapshot: holding a `Post` never keeps a store session alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw editor input for a create or update, before validation.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: String,
    pub body: String,
}

impl PostInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Validated post content. Title and body are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    body: String,
}

impl PostDraft {
    /// Validate editor input, collecting every offending field.
    pub fn parse(input: PostInput) -> Result<Self, DomainError> {
        let title = input.title.trim();
        let body = input.body.trim();

        let mut fields = Vec::new();
        if title.is_empty() {
            fields.push(FieldError {
                field: "title",
                reason: FieldReason::Required,
            });
        } else if title.chars().count() > MAX_TITLE_LEN {
            fields.push(FieldError {
                field: "title",
                reason: FieldReason::TooLong { max: MAX_TITLE_LEN },
            });
        }
        if body.is_empty() {
            fields.push(FieldError {
                field: "body",
                reason: FieldReason::Required,
            });
        }

        if !fields.is_empty() {
            return Err(DomainError::Validation { fields });
        }

        Ok(Self {
            title: title.to_owned(),
            body: body.to_owned(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_parts(self) -> (String, String) {
        (self.title, self.body)
    }
}

impl Post {
    /// Build a freshly created post; both timestamps share one instant.
    pub fn create(id: PostId, draft: PostDraft) -> Self {
        let now = current_timestamp();
        let (title, body) = draft.into_parts();
        Self {
            id,
            title,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply new content and refresh `updated_at`.
    pub fn revise(&mut self, draft: PostDraft) {
        let (title, body) = draft.into_parts();
        self.title = title;
        self.body = body;
        self.updated_at = revision_timestamp(self.created_at);
    }

    /// Case-insensitive substring match over title and body.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.body.to_lowercase().contains(&needle)
    }
}

/// Current time truncated to microseconds, the finest precision every store keeps.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for an update; never earlier than the creation time.
pub fn revision_timestamp(created_at: DateTime<Utc>) -> DateTime<Utc> {
    current_timestamp().max(created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn assert_rejected(input: PostInput, expected: &[&str]) {
        match PostDraft::parse(input) {
            Err(DomainError::Validation { fields }) => {
                let names: Vec<_> = fields.iter().map(|f| f.field).collect();
                assert_eq!(names, expected);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_trims_content() {
        let draft = PostDraft::parse(PostInput::new("  Hello ", "\tWorld\n")).unwrap();
        assert_eq!(draft.title(), "Hello");
        assert_eq!(draft.body(), "World");
    }

    #[test]
    fn test_parse_rejects_empty_fields() {
        assert_rejected(PostInput::new("", "x"), &["title"]);
        assert_rejected(PostInput::new("x", ""), &["body"]);
        assert_rejected(PostInput::new("  ", "  "), &["title", "body"]);
    }

    #[test]
    fn test_parse_rejects_long_title() {
        let title = "a".repeat(MAX_TITLE_LEN + 1);
        assert_rejected(PostInput::new(title, "body"), &["title"]);

        let title = "é".repeat(MAX_TITLE_LEN);
        assert!(PostDraft::parse(PostInput::new(title, "body")).is_ok());
    }

    #[test]
    fn test_validation_message_names_fields() {
        let err = PostDraft::parse(PostInput::new("", "")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: title is required; body is required"
        );
    }

    #[test]
    fn test_create_sets_equal_timestamps() {
        let draft = PostDraft::parse(PostInput::new("Hello", "World")).unwrap();
        let post = Post::create(1, draft);
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_revise_keeps_created_at() {
        let draft = PostDraft::parse(PostInput::new("Hello", "World")).unwrap();
        let mut post = Post::create(1, draft);
        let created_at = post.created_at;

        post.revise(PostDraft::parse(PostInput::new("Hi", "World")).unwrap());

        assert_eq!(post.title, "Hi");
        assert_eq!(post.created_at, created_at);
        assert!(post.updated_at >= post.created_at);
    }

    #[test]
    fn test_revision_timestamp_never_precedes_creation() {
        let future = current_timestamp() + TimeDelta::hours(1);
        assert_eq!(revision_timestamp(future), future);
    }

    #[test]
    fn test_matches_ignores_case() {
        let draft = PostDraft::parse(PostInput::new("Learning Rust", "ownership")).unwrap();
        let post = Post::create(1, draft);
        assert!(post.matches("rust"));
        assert!(post.matches("OWNER"));
        assert!(!post.matches("python"));
    }
}
