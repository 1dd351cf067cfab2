#[cfg(test)]
mod tests {
    use crate::database::entity::post;
    use crate::database::sql_repo::SqlPostRepository;
    use migration::{Migrator, MigratorTrait};
    use quill_core::domain::{Post, PostDraft, PostInput};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, PostRepository};
    use sea_orm::{ConnectOptions, Database, DatabaseBackend, DbConn, MockDatabase};

    async fn sqlite() -> DbConn {
        // One connection: every new `:memory:` connection is a separate database.
        let opts = ConnectOptions::new("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false)
            .to_owned();
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn draft(title: &str, body: &str) -> PostDraft {
        PostDraft::parse(PostInput::new(title, body)).unwrap()
    }

    #[tokio::test]
    async fn test_find_post_by_id_mock() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 42,
                title: "Test Post".to_owned(),
                body: "Content".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = SqlPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(42).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, 42);
        assert_eq!(post.created_at, now);
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = SqlPostRepository::new(sqlite().await);

        let created = repo.insert(draft("Hello", "World")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.created_at, created.updated_at);

        let found: Post = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = SqlPostRepository::new(sqlite().await);
        let found: Option<Post> = repo.find_by_id(99).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = SqlPostRepository::new(sqlite().await);
        let created = repo.insert(draft("Hello", "World")).await.unwrap();

        let updated = repo.update(created.id, draft("Hi", "World")).await.unwrap();

        assert_eq!(updated.title, "Hi");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = SqlPostRepository::new(sqlite().await);
        let result = repo.update(5, draft("Hi", "there")).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let repo = SqlPostRepository::new(sqlite().await);
        let created = repo.insert(draft("Hello", "World")).await.unwrap();

        BaseRepository::<Post, _>::delete(&repo, created.id).await.unwrap();
        let second = BaseRepository::<Post, _>::delete(&repo, created.id).await;
        assert!(matches!(second, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = SqlPostRepository::new(sqlite().await);
        let first = repo.insert(draft("One", "1")).await.unwrap();
        let second = repo.insert(draft("Two", "2")).await.unwrap();
        BaseRepository::<Post, _>::delete(&repo, second.id).await.unwrap();

        let third = repo.insert(draft("Three", "3")).await.unwrap();
        assert!(third.id > second.id);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let repo = SqlPostRepository::new(sqlite().await);
        for n in 1..=3 {
            repo.insert(draft(&format!("Post {n}"), "body")).await.unwrap();
        }

        let titles: Vec<_> = repo
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Post 3", "Post 2", "Post 1"]);
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive() {
        let repo = SqlPostRepository::new(sqlite().await);
        repo.insert(draft("ABC in title", "nothing")).await.unwrap();
        repo.insert(draft("Plain", "has xAbCx inside")).await.unwrap();
        repo.insert(draft("Other", "unrelated")).await.unwrap();

        let mut titles: Vec<_> = repo
            .list(Some("abc"))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        titles.sort();
        assert_eq!(titles, vec!["ABC in title", "Plain"]);
    }

    #[tokio::test]
    async fn test_list_search_matches_non_ascii_text() {
        let repo = SqlPostRepository::new(sqlite().await);
        repo.insert(draft("Élan vital", "Über alles")).await.unwrap();
        repo.insert(draft("Plain", "ascii only")).await.unwrap();

        for query in ["Élan", "Über", "ÉLAN VITAL"] {
            let found = repo.list(Some(query)).await.unwrap();
            assert_eq!(found.len(), 1, "query {query:?}");
            assert_eq!(found[0].title, "Élan vital");
        }
    }

    #[tokio::test]
    async fn test_list_search_matches_wildcards_literally() {
        let repo = SqlPostRepository::new(sqlite().await);
        repo.insert(draft("Save 100% now", "sale")).await.unwrap();
        repo.insert(draft("Save 1000 now", "sale")).await.unwrap();

        let found = repo.list(Some("100%")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Save 100% now");

        assert!(repo.list(Some("_")).await.unwrap().is_empty());
    }
}
