use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostPatch};
use crate::error::RepoError;

/// Post repository - translation layer between domain operations and store
/// rows. Absence of a row is a valid outcome, never an error.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a draft under a fresh id; created_at and updated_at are both
    /// set to the time of insertion.
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// List all posts, or only those where `term` appears as a
    /// case-insensitive substring of title, content, or category.
    /// Store-native order, no pagination.
    async fn list(&self, term: Option<&str>) -> Result<Vec<Post>, RepoError>;

    /// Apply a partial update. Fields absent from the patch are left
    /// untouched; updated_at is always refreshed. Returns `None` when no
    /// row exists for `id`.
    async fn update(&self, id: i32, patch: PostPatch) -> Result<Option<Post>, RepoError>;

    /// Delete the post if present. Returns whether a row was removed;
    /// deleting an absent id is a no-op, not an error.
    async fn delete(&self, id: i32) -> Result<bool, RepoError>;
}
