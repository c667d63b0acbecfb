//! Board service: cached task/config state synchronised with the remote
//! store.
//!
//! The service owns the single in-process cache. All store operations are
//! plain request/response calls with no queueing or cancellation; two rapid
//! writes race at the network layer and the last response wins. The reorder
//! path is the only operation with rollback: it applies the new position to
//! the cache optimistically and restores a snapshot when the persist fails.

use crate::board::{
    domain::{
        AppConfig, AppConfigChanges, BoardDomainError, ConfigData, ConfigItem, ConfigItemChanges,
        ConfigItemId, ConfigKind, NewConfigItem, Position, Task, TaskChanges, TaskDraft, TaskId,
    },
    ports::{ConfigStore, StoreError, TaskStore},
};
use mockable::Clock;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The cache lock was poisoned by a panicking thread.
    #[error("board cache lock poisoned")]
    CachePoisoned,
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Cache lifecycle state.
///
/// There is no error terminal state: a failed bulk load still transitions
/// to [`LoadState::Loaded`] with empty defaults so the caller's view never
/// hangs. [`BoardService::last_load_failed`] exposes the degraded case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No load has been attempted.
    #[default]
    Uninitialized,
    /// A bulk load is in flight.
    Loading,
    /// A bulk load finished, successfully or not.
    Loaded,
}

#[derive(Debug, Default)]
struct BoardCache {
    tasks: Vec<Task>,
    config: ConfigData,
    load: LoadState,
    last_load_failed: bool,
}

/// Cached board state synchronised with the remote store.
#[derive(Debug)]
pub struct BoardService<S, C>
where
    S: TaskStore + ConfigStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    cache: RwLock<BoardCache>,
}

impl<S, C> BoardService<S, C>
where
    S: TaskStore + ConfigStore,
    C: Clock + Send + Sync,
{
    /// Creates a board service over the given store.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            cache: RwLock::new(BoardCache::default()),
        }
    }

    fn cache(&self) -> BoardResult<RwLockReadGuard<'_, BoardCache>> {
        self.cache.read().map_err(|_| BoardError::CachePoisoned)
    }

    fn cache_mut(&self) -> BoardResult<RwLockWriteGuard<'_, BoardCache>> {
        self.cache.write().map_err(|_| BoardError::CachePoisoned)
    }

    /// Loads tasks, the four config collections, and the app-config
    /// singleton concurrently.
    ///
    /// Any individual failure degrades the whole load to empty defaults
    /// (logged, not surfaced) and the cache still reports
    /// [`LoadState::Loaded`], so the caller's view never hangs on a broken
    /// backend.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CachePoisoned`] only; store failures are
    /// swallowed by design.
    pub async fn fetch_all(&self) -> BoardResult<()> {
        self.cache_mut()?.load = LoadState::Loading;

        let (tasks, clients, task_types, requesters, statuses, app_config) = tokio::join!(
            self.store.select_tasks(),
            self.store.select_items(ConfigKind::Clients),
            self.store.select_items(ConfigKind::TaskTypes),
            self.store.select_items(ConfigKind::Requesters),
            self.store.select_items(ConfigKind::Statuses),
            self.store.app_config(),
        );
        let snapshot =
            assemble_snapshot(tasks, clients, task_types, requesters, statuses, app_config);

        let mut cache = self.cache_mut()?;
        match snapshot {
            Ok((tasks, config)) => {
                cache.tasks = tasks;
                cache.config = config;
                cache.last_load_failed = false;
            }
            Err(err) => {
                tracing::error!(error = %err, "bulk load failed, serving empty defaults");
                cache.tasks = Vec::new();
                cache.config = ConfigData::default();
                cache.last_load_failed = true;
            }
        }
        cache.load = LoadState::Loaded;
        Ok(())
    }

    /// Validates a draft, assigns it an append position, and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Domain`] when the draft is invalid (no store
    /// call is made) or [`BoardError::Store`] when the insert is rejected.
    pub async fn add_task(&self, draft: TaskDraft) -> BoardResult<Task> {
        let position = {
            let cache = self.cache()?;
            Position::append_after(cache.tasks.iter().map(Task::position).max())
        };
        let new_task = draft.into_new_task(position)?;

        let stored = self.store.insert_task(new_task).await?;
        self.cache_mut()?.tasks.push(stored.clone());
        Ok(stored)
    }

    /// Applies a partial update to a task, stamping `updated_at`.
    ///
    /// The cache entry is replaced with the server-returned row; when the
    /// update touched the sort key the whole cache is re-sorted to restore
    /// order consistency after concurrent edits.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the update is rejected.
    pub async fn update_task(&self, id: TaskId, changes: TaskChanges) -> BoardResult<Task> {
        let touches_position = changes.touches_position();
        let changes = changes.with_updated_at(self.clock.utc());

        let stored = self.store.update_task(id, changes).await?;
        let mut cache = self.cache_mut()?;
        if let Some(slot) = cache.tasks.iter_mut().find(|task| task.id() == id) {
            *slot = stored.clone();
        }
        if touches_position {
            cache.tasks.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        }
        Ok(stored)
    }

    /// Deletes a task. Not reversible.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the deletion is rejected; the
    /// cache is left unchanged in that case.
    pub async fn delete_task(&self, id: TaskId) -> BoardResult<()> {
        self.store.delete_task(id).await?;
        self.cache_mut()?.tasks.retain(|task| task.id() != id);
        Ok(())
    }

    /// Moves `active` to the slot currently occupied by `over`, assigning
    /// it the midpoint of its new neighbours' positions.
    ///
    /// The move is applied to the cache immediately and persisted
    /// asynchronously; when the persist fails the entire pre-reorder
    /// snapshot is restored and the error returned. Unknown ids or
    /// `active == over` are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the persist fails (after
    /// rollback).
    pub async fn reorder_task(&self, active: TaskId, over: TaskId) -> BoardResult<()> {
        let Some((snapshot, new_position)) = self.apply_reorder(active, over)? else {
            return Ok(());
        };

        let changes = TaskChanges::default()
            .with_position(new_position)
            .with_updated_at(self.clock.utc());
        if let Err(err) = self.store.update_task(active, changes).await {
            tracing::warn!(error = %err, task = %active, "reorder persist failed, rolling back");
            self.cache_mut()?.tasks = snapshot;
            return Err(err.into());
        }
        Ok(())
    }

    /// Splices the cached list and applies the midpoint position.
    ///
    /// Returns the pre-reorder snapshot and the assigned position, or
    /// `None` when the reorder is a no-op.
    fn apply_reorder(
        &self,
        active: TaskId,
        over: TaskId,
    ) -> BoardResult<Option<(Vec<Task>, Position)>> {
        let mut cache = self.cache_mut()?;
        let Some(old_index) = cache.tasks.iter().position(|task| task.id() == active) else {
            return Ok(None);
        };
        let Some(new_index) = cache.tasks.iter().position(|task| task.id() == over) else {
            return Ok(None);
        };
        if old_index == new_index {
            return Ok(None);
        }

        let snapshot = cache.tasks.clone();
        let moved = cache.tasks.remove(old_index);
        cache.tasks.insert(new_index, moved);

        let prev = new_index
            .checked_sub(1)
            .and_then(|index| cache.tasks.get(index))
            .map(Task::position);
        let next = cache.tasks.get(new_index + 1).map(Task::position);
        let new_position = Position::between(prev, next);
        if let Some(task) = cache.tasks.get_mut(new_index) {
            task.set_position(new_position);
        }
        Ok(Some((snapshot, new_position)))
    }

    /// Applies a partial update to the app-config singleton.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the persist fails; the cached
    /// config is only replaced on success.
    pub async fn update_app_config(&self, changes: AppConfigChanges) -> BoardResult<AppConfig> {
        let stored = self.store.update_app_config(changes).await?;
        self.cache_mut()?.config.app_config = stored.clone();
        Ok(stored)
    }

    /// Inserts a config item into one collection.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the insert is rejected.
    pub async fn add_config_item(
        &self,
        kind: ConfigKind,
        item: NewConfigItem,
    ) -> BoardResult<ConfigItem> {
        let stored = self.store.insert_item(kind, item).await?;
        self.cache_mut()?
            .config
            .items_mut(kind)
            .push(stored.clone());
        Ok(stored)
    }

    /// Applies a partial update to a config item.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the update is rejected.
    pub async fn update_config_item(
        &self,
        kind: ConfigKind,
        id: ConfigItemId,
        changes: ConfigItemChanges,
    ) -> BoardResult<ConfigItem> {
        let stored = self.store.update_item(kind, id, changes).await?;
        let mut cache = self.cache_mut()?;
        if let Some(slot) = cache
            .config
            .items_mut(kind)
            .iter_mut()
            .find(|item| item.id == id)
        {
            *slot = stored.clone();
        }
        Ok(stored)
    }

    /// Deletes a config item from one collection.
    ///
    /// Deleting a status still referenced by an app-config role pointer or
    /// by any cached task is rejected before any store call.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Domain`] when the referential guard rejects
    /// the deletion, or [`BoardError::Store`] when the store does.
    pub async fn delete_config_item(&self, kind: ConfigKind, id: ConfigItemId) -> BoardResult<()> {
        if kind == ConfigKind::Statuses {
            self.guard_status_deletion(id)?;
        }
        self.store.delete_item(kind, id).await?;
        self.cache_mut()?
            .config
            .items_mut(kind)
            .retain(|item| item.id != id);
        Ok(())
    }

    fn guard_status_deletion(&self, id: ConfigItemId) -> BoardResult<()> {
        let cache = self.cache()?;
        if cache.config.app_config.designates_status(id) {
            return Err(BoardDomainError::StatusPinned(id).into());
        }
        let tasks = cache
            .tasks
            .iter()
            .filter(|task| task.status_id() == id)
            .count();
        if tasks > 0 {
            return Err(BoardDomainError::StatusInUse { id, tasks }.into());
        }
        Ok(())
    }

    /// Returns a snapshot of the cached task list, in view order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CachePoisoned`] when the cache lock is
    /// poisoned.
    pub fn tasks(&self) -> BoardResult<Vec<Task>> {
        Ok(self.cache()?.tasks.clone())
    }

    /// Returns a snapshot of the cached config collections.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CachePoisoned`] when the cache lock is
    /// poisoned.
    pub fn config(&self) -> BoardResult<ConfigData> {
        Ok(self.cache()?.config.clone())
    }

    /// Looks up a cached config item by kind and identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CachePoisoned`] when the cache lock is
    /// poisoned.
    pub fn config_item(
        &self,
        kind: ConfigKind,
        id: ConfigItemId,
    ) -> BoardResult<Option<ConfigItem>> {
        Ok(self.cache()?.config.find(kind, id).cloned())
    }

    /// Returns the cache lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CachePoisoned`] when the cache lock is
    /// poisoned.
    pub fn load_state(&self) -> BoardResult<LoadState> {
        Ok(self.cache()?.load)
    }

    /// Returns true once a bulk load has finished, successfully or not.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CachePoisoned`] when the cache lock is
    /// poisoned.
    pub fn is_loaded(&self) -> BoardResult<bool> {
        Ok(self.cache()?.load == LoadState::Loaded)
    }

    /// Returns true when the most recent bulk load degraded to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CachePoisoned`] when the cache lock is
    /// poisoned.
    pub fn last_load_failed(&self) -> BoardResult<bool> {
        Ok(self.cache()?.last_load_failed)
    }
}

type Snapshot = (Vec<Task>, ConfigData);

fn assemble_snapshot(
    tasks: Result<Vec<Task>, StoreError>,
    clients: Result<Vec<ConfigItem>, StoreError>,
    task_types: Result<Vec<ConfigItem>, StoreError>,
    requesters: Result<Vec<ConfigItem>, StoreError>,
    statuses: Result<Vec<ConfigItem>, StoreError>,
    app_config: Result<AppConfig, StoreError>,
) -> Result<Snapshot, StoreError> {
    Ok((
        tasks?,
        ConfigData {
            clients: clients?,
            task_types: task_types?,
            requesters: requesters?,
            statuses: statuses?,
            app_config: app_config?,
        },
    ))
}
