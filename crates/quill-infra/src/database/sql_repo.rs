//! SQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, IntoActiveModel, NotSet, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use quill_core::domain::{Post, PostDraft, PostId, current_timestamp, revision_timestamp};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::sql_base::{SqlBaseRepository, query_error};

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let mut select = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id);

        if let Some(needle) = search {
            select = select.filter(title_or_body_contains(needle));
        }

        let result = select.all(&self.db).await.map_err(query_error)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let now = current_timestamp();
        let (title, body) = draft.into_parts();

        let model = post::ActiveModel {
            id: NotSet,
            title: Set(title),
            body: Set(body),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(query_error)?;

        Ok(model.into())
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        let existing = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)?;

        let updated_at = revision_timestamp(existing.created_at.into());
        let (title, body) = draft.into_parts();

        let mut active = existing.into_active_model();
        active.title = Set(title);
        active.body = Set(body);
        active.updated_at = Set(updated_at.into());

        let model = active.update(&txn).await.map_err(query_error)?;
        txn.commit().await.map_err(query_error)?;

        Ok(model.into())
    }
}

/// `lower(title) LIKE lower(%needle%) OR lower(body) LIKE lower(%needle%)`.
///
/// Both sides are folded by the database so the comparison stays consistent
/// for non-ASCII text. Wildcards in the needle are matched literally.
fn title_or_body_contains(needle: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(needle));

    Condition::any()
        .add(lower_like(post::Column::Title, &pattern))
        .add(lower_like(post::Column::Body, &pattern))
}

fn lower_like(column: post::Column, pattern: &str) -> SimpleExpr {
    Expr::cust_with_exprs(
        "$1 LIKE $2 ESCAPE '\\'",
        [
            Func::lower(Expr::col(column)).into(),
            Func::lower(Expr::val(pattern)).into(),
        ],
    )
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
