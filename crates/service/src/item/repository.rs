use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::item::{Fields, Item};

/// Trait abstraction for item storage.
/// Handlers only depend on this; the in-process store is [`super::MemoryItemStore`].
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items in insertion order.
    async fn list(&self) -> Vec<Item>;
    async fn get(&self, id: i64) -> Option<Item>;
    /// Assign the next id and append.
    async fn create(&self, fields: Fields) -> Result<Item, ServiceError>;
    /// Overlay `patch` onto the stored item in place; `NotFound` when absent.
    async fn update(&self, id: i64, patch: Fields) -> Result<Item, ServiceError>;
    /// Remove the item; returns whether it existed.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}
