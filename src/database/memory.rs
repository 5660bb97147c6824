use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::Post;
use crate::database::repository::PostRepository;

#[derive(Debug, Default)]
struct Inner {
    posts: BTreeMap<i64, Post>,
    last_id: i64,
}

/// In-process post store. Ids come from a counter that only grows, so a
/// deleted id never resolves again.
#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    inner: RwLock<Inner>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.posts.is_empty()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, title: &str) -> Result<Post, DatabaseError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let post = Post::new(inner.last_id, title);
        inner.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DatabaseError> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn update(&self, id: i64, title: &str) -> Result<Option<Post>, DatabaseError> {
        let mut inner = self.inner.write().await;
        Ok(inner.posts.get_mut(&id).map(|post| {
            post.retitle(title);
            post.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.inner.write().await.posts.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Post>, DatabaseError> {
        Ok(self.inner.read().await.posts.values().cloned().collect())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = MemoryPostRepository::new();
        let a = repo.create("first").await.unwrap();
        let b = repo.create("second").await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let repo = MemoryPostRepository::new();
        let a = repo.create("first").await.unwrap();
        assert!(repo.delete(a.id).await.unwrap());
        assert!(repo.find_by_id(a.id).await.unwrap().is_none());

        let b = repo.create("second").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn update_keeps_identity_and_creation_time() {
        let repo = MemoryPostRepository::new();
        let created = repo.create("before").await.unwrap();

        let updated = repo.update(created.id, "after").await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "after");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn missing_ids_report_absence() {
        let repo = MemoryPostRepository::new();
        assert!(repo.find_by_id(99).await.unwrap().is_none());
        assert!(repo.update(99, "nope").await.unwrap().is_none());
        assert!(!repo.delete(99).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let repo = MemoryPostRepository::new();
        for title in ["c", "a", "b"] {
            repo.create(title).await.unwrap();
        }
        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
