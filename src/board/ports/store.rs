//! Store ports for task and config row persistence.
//!
//! The remote store is an external collaborator exposing row-oriented CRUD
//! per table and returning full rows on every write. These contracts cover
//! the `tasks` table and the four config collections plus the `app_config`
//! singleton.

use crate::board::domain::{
    AppConfig, AppConfigChanges, ConfigItem, ConfigItemChanges, ConfigItemId, ConfigKind,
    NewConfigItem, NewTask, Task, TaskChanges, TaskId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Task row persistence contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns all task rows ordered by `(position asc, criado_em asc)`.
    async fn select_tasks(&self) -> StoreResult<Vec<Task>>;

    /// Inserts a task row, returning the stored row with its assigned
    /// identifier and timestamps.
    async fn insert_task(&self, new_task: NewTask) -> StoreResult<Task>;

    /// Applies a partial update to a task row, returning the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] when the row does not exist.
    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Task>;

    /// Deletes a task row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] when the row does not exist.
    async fn delete_task(&self, id: TaskId) -> StoreResult<()>;
}

/// Config row persistence contract for the four config collections and the
/// app-config singleton.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Returns all rows of one config collection.
    async fn select_items(&self, kind: ConfigKind) -> StoreResult<Vec<ConfigItem>>;

    /// Inserts a config item, returning the stored row.
    async fn insert_item(&self, kind: ConfigKind, item: NewConfigItem) -> StoreResult<ConfigItem>;

    /// Applies a partial update to a config item, returning the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConfigItemNotFound`] when the row does not
    /// exist in the collection.
    async fn update_item(
        &self,
        kind: ConfigKind,
        id: ConfigItemId,
        changes: ConfigItemChanges,
    ) -> StoreResult<ConfigItem>;

    /// Deletes a config item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConfigItemNotFound`] when the row does not
    /// exist in the collection.
    async fn delete_item(&self, kind: ConfigKind, id: ConfigItemId) -> StoreResult<()>;

    /// Returns the app-config singleton row.
    async fn app_config(&self) -> StoreResult<AppConfig>;

    /// Applies a partial update to the singleton row, returning it.
    async fn update_app_config(&self, changes: AppConfigChanges) -> StoreResult<AppConfig>;

    /// Replaces the singleton row, creating it when missing.
    async fn upsert_app_config(&self, config: AppConfig) -> StoreResult<AppConfig>;
}

/// Errors returned by store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The task row was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The config item row was not found in its collection.
    #[error("{kind} item not found: {id}")]
    ConfigItemNotFound {
        /// Collection searched.
        kind: ConfigKind,
        /// Identifier looked up.
        id: ConfigItemId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
