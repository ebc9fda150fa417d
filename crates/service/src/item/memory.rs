use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ServiceError;
use crate::item::{repository::ItemStore, Fields, Item};

struct Inner {
    items: Vec<Item>,
    next_id: i64,
}

/// Process-lifetime item store.
///
/// The ordered sequence and the id counter sit behind one lock, so each
/// operation is seen whole by concurrent requests. Ids are never reused.
pub struct MemoryItemStore {
    inner: RwLock<Inner>,
}

impl MemoryItemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(Inner { items: Vec::new(), next_id: 1 }),
        })
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn list(&self) -> Vec<Item> {
        self.inner.read().await.items.clone()
    }

    pub async fn get(&self, id: i64) -> Option<Item> {
        let inner = self.inner.read().await;
        inner.items.iter().find(|item| item.matches(id)).cloned()
    }

    pub async fn create(&self, fields: Fields) -> Result<Item, ServiceError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| ServiceError::Internal("item id counter exhausted".into()))?;
        let item = Item::with_id(id, fields);
        inner.items.push(item.clone());
        debug!(id, "item created");
        Ok(item)
    }

    pub async fn update(&self, id: i64, patch: Fields) -> Result<Item, ServiceError> {
        let mut inner = self.inner.write().await;
        let item = inner
            .items
            .iter_mut()
            .find(|item| item.matches(id))
            .ok_or_else(|| ServiceError::not_found("item"))?;
        item.overlay(patch);
        debug!(id, "item updated");
        Ok(item.clone())
    }

    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.items.iter().position(|item| item.matches(id)) else {
            return Ok(false);
        };
        inner.items.remove(pos);
        debug!(id, "item deleted");
        Ok(true)
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list(&self) -> Vec<Item> { self.list().await }
    async fn get(&self, id: i64) -> Option<Item> { self.get(id).await }
    async fn create(&self, fields: Fields) -> Result<Item, ServiceError> { self.create(fields).await }
    async fn update(&self, id: i64, patch: Fields) -> Result<Item, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: i64) -> Result<bool, ServiceError> { self.delete(id).await }
}
