use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId};
use crate::error::RepoError;

/// Generic repository trait for keyed lookups and removal.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts, newest first, optionally narrowed to a case-insensitive
    /// substring match on title or body.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError>;

    /// Persist a new post, assigning its id and timestamps.
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Overwrite title and body and refresh `updated_at`.
    /// Fails with `RepoError::NotFound` if the id does not exist.
    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError>;
}
