//! In-memory post repository - used as fallback when no database is
//! configured, and as an isolated store for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{Post, PostDraft, PostPatch};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

struct Store {
    next_id: i32,
    posts: HashMap<i32, Post>,
}

/// In-memory repository using a HashMap with an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                posts: HashMap::new(),
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;

        let post = Post::from_draft(id, draft);
        store.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn list(&self, term: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let posts = store
            .posts
            .values()
            .filter(|post| term.map(|t| post.matches_term(t)).unwrap_or(true))
            .cloned()
            .collect();
        Ok(posts)
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(post) = store.posts.get_mut(&id) else {
            return Ok(None);
        };

        post.apply(patch);
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.posts.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str, category: &str) -> PostDraft {
        PostDraft {
            title: title.to_owned(),
            content: content.to_owned(),
            category: category.to_owned(),
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryPostRepository::new();
        let first = repo.insert(draft("A", "B", "C")).await.unwrap();
        let second = repo.insert(draft("D", "E", "F")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn find_by_id_returns_the_created_post() {
        let repo = InMemoryPostRepository::new();
        let created = repo.insert(draft("A", "B", "C")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields() {
        let repo = InMemoryPostRepository::new();
        let created = repo.insert(draft("A", "B", "C")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                PostPatch {
                    title: Some("A2".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("post exists");

        assert_eq!(updated.title, "A2");
        assert_eq!(updated.content, "B");
        assert_eq!(updated.category, "C");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_missing_post_returns_none() {
        let repo = InMemoryPostRepository::new();
        let result = repo.update(42, PostPatch::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryPostRepository::new();
        let created = repo.insert(draft("A", "B", "C")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_filters_by_case_insensitive_term() {
        let repo = InMemoryPostRepository::new();
        repo.insert(draft("Hello World", "foo", "bar")).await.unwrap();
        repo.insert(draft("Other", "body", "misc")).await.unwrap();

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let hits = repo.list(Some("hello")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Hello World");

        let none = repo.list(Some("zzz")).await.unwrap();
        assert!(none.is_empty());
    }
}
