//! Post lifecycle operations.

use std::sync::Arc;

use crate::domain::{Post, PostDraft, PostId, PostInput};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// The post store: create, read, update, delete and search over posts.
///
/// Authorization is not checked here; callers consult an
/// [`AccessGate`](crate::ports::AccessGate) before any mutating call.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Posts newest first. A blank query returns everything.
    pub async fn list_posts(&self, query: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let search = query.map(str::trim).filter(|q| !q.is_empty());
        tracing::debug!(search = ?search, "Listing posts");

        self.repo.list(search).await.map_err(internal)
    }

    pub async fn get_post(&self, id: PostId) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create_post(&self, input: PostInput) -> Result<Post, DomainError> {
        let draft = PostDraft::parse(input)?;
        let post = self.repo.insert(draft).await.map_err(internal)?;

        tracing::debug!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Existence is checked before the input is validated.
    pub async fn update_post(&self, id: PostId, input: PostInput) -> Result<Post, DomainError> {
        self.get_post(id).await?;
        let draft = PostDraft::parse(input)?;

        let post = self.repo.update(id, draft).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => internal(other),
        })?;

        tracing::debug!(post_id = id, "Post updated");
        Ok(post)
    }

    pub async fn delete_post(&self, id: PostId) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => internal(other),
        })?;

        tracing::debug!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn internal(err: RepoError) -> DomainError {
    tracing::error!(error = %err, "Post store failure");
    DomainError::Internal(err.to_string())
}
