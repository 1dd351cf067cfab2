//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Create or update form. Accepted as JSON or url-encoded.
///
/// Missing fields deserialize as empty strings and are rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// `?token=` on mutating requests, or a body carrying only the token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenParams {
    pub token: Option<String>,
}

impl TokenParams {
    /// The query token wins; the body token is the fallback. Empty values count as absent.
    pub fn or_body(&self, body_token: Option<&str>) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(body_token.filter(|t| !t.is_empty()))
            .map(str::to_owned)
    }
}

/// `?q=` on the post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Post listing, echoing the effective search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_defaults_missing_fields() {
        let form: PostForm = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(form.title, "Hi");
        assert_eq!(form.body, "");
        assert!(form.token.is_none());
    }

    #[test]
    fn test_query_token_takes_precedence() {
        let params = TokenParams {
            token: Some("from-query".to_string()),
        };
        assert_eq!(params.or_body(Some("from-body")).as_deref(), Some("from-query"));
    }

    #[test]
    fn test_empty_query_token_falls_back_to_body() {
        let params = TokenParams {
            token: Some(String::new()),
        };
        assert_eq!(params.or_body(Some("from-body")).as_deref(), Some("from-body"));
        assert_eq!(TokenParams::default().or_body(Some("")), None);
    }
}
