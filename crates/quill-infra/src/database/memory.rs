//! In-memory post repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{Post, PostDraft, PostId};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

#[derive(Default)]
struct Store {
    posts: BTreeMap<PostId, Post>,
    last_id: PostId,
}

/// In-memory post repository using a `BTreeMap` behind an async `RwLock`.
///
/// Ids come from a counter that only moves forward, so deleted ids are never
/// handed out again. Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts: Vec<Post> = store
            .posts
            .values()
            .filter(|post| search.is_none_or(|needle| post.matches(needle)))
            .cloned()
            .collect();

        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(posts)
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepoError::Constraint("post id space exhausted".to_string()))?;
        store.last_id = id;

        let post = Post::create(id, draft);
        store.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        post.revise(draft);
        Ok(post.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::PostInput;

    fn draft(title: &str, body: &str) -> PostDraft {
        PostDraft::parse(PostInput::new(title, body)).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryPostRepository::new();
        let first = repo.insert(draft("One", "1")).await.unwrap();
        let second = repo.insert(draft("Two", "2")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(draft("One", "1")).await.unwrap();
        repo.delete(post.id).await.unwrap();

        let next = repo.insert(draft("Two", "2")).await.unwrap();
        assert_eq!(next.id, post.id + 1);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        assert!(matches!(repo.delete(7).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryPostRepository::new();
        repo.insert(draft("One", "1")).await.unwrap();
        repo.insert(draft("Two", "2")).await.unwrap();
        repo.insert(draft("Three", "3")).await.unwrap();

        let ids: Vec<_> = repo.list(None).await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let result = repo.update(1, draft("Hi", "there")).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
