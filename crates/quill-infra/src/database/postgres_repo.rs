//! PostgreSQL repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, Condition, DbConn, EntityTrait, IntoActiveModel, QueryFilter,
};

use quill_core::domain::{Post, PostDraft, PostPatch};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository backed by a pooled SeaORM connection.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

/// Escape LIKE wildcards so a literal search term cannot act as a pattern.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let now = Utc::now();
        let active = post::ActiveModel {
            id: NotSet,
            title: Set(draft.title),
            content: Set(draft.content),
            category: Set(draft.category),
            tags: Set(post::tags_to_json(draft.tags)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, term: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();

        if let Some(term) = term {
            tracing::debug!(term = %term, "Filtering posts by search term");
            let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
            query = query.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(post::Column::Title))).like(pattern.as_str()))
                    .add(Expr::expr(Func::lower(Expr::col(post::Column::Content))).like(pattern.as_str()))
                    .add(
                        Expr::expr(Func::lower(Expr::col(post::Column::Category)))
                            .like(pattern.as_str()),
                    ),
            );
        }

        let result = query
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        else {
            return Ok(None);
        };

        // Only the supplied fields become Set columns; everything else is
        // left out of the UPDATE statement.
        let mut active = model.into_active_model();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(tags) = patch.tags {
            active.tags = Set(post::tags_to_json(tags));
        }
        active.updated_at = Set(Utc::now().into());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
