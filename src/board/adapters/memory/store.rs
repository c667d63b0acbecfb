//! In-memory store adapter for board tests and local mode.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{
        AppConfig, AppConfigChanges, ConfigItem, ConfigItemChanges, ConfigItemId, ConfigKind,
        NewConfigItem, NewTask, PersistedTaskData, Task, TaskChanges, TaskId,
    },
    ports::{ConfigStore, StoreError, StoreResult, TaskStore},
};

/// Thread-safe in-memory row store covering the task table, the four config
/// collections, and the app-config singleton.
///
/// Supports write/read failure injection so service rollback and
/// degraded-load paths can be exercised without a network.
#[derive(Debug, Clone)]
pub struct InMemoryStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    tasks: HashMap<TaskId, Task>,
    collections: HashMap<ConfigKind, Vec<ConfigItem>>,
    app_config: AppConfig,
    fail_next_write: bool,
    fail_reads: bool,
}

impl InMemoryStore<DefaultClock> {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemoryStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store using the given clock for row timestamps.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState::default())),
            clock: Arc::new(clock),
        }
    }

    /// Arms a one-shot failure on the next write operation.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn fail_next_write(&self) -> StoreResult<()> {
        let mut state = write_state(&self.state)?;
        state.fail_next_write = true;
        Ok(())
    }

    /// Toggles failure of all read operations.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn fail_reads(&self, fail: bool) -> StoreResult<()> {
        let mut state = write_state(&self.state)?;
        state.fail_reads = fail;
        Ok(())
    }
}

fn write_state(
    state: &Arc<RwLock<InMemoryState>>,
) -> StoreResult<std::sync::RwLockWriteGuard<'_, InMemoryState>> {
    state
        .write()
        .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
}

fn read_state(
    state: &Arc<RwLock<InMemoryState>>,
) -> StoreResult<std::sync::RwLockReadGuard<'_, InMemoryState>> {
    state
        .read()
        .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
}

fn injected_failure(reason: &str) -> StoreError {
    StoreError::persistence(std::io::Error::other(reason.to_owned()))
}

/// Consumes an armed one-shot write failure, erroring when one was set.
fn take_write_failure(state: &mut InMemoryState) -> StoreResult<()> {
    if state.fail_next_write {
        state.fail_next_write = false;
        return Err(injected_failure("injected write failure"));
    }
    Ok(())
}

fn check_read_failure(state: &InMemoryState) -> StoreResult<()> {
    if state.fail_reads {
        return Err(injected_failure("injected read failure"));
    }
    Ok(())
}

#[async_trait]
impl<C> TaskStore for InMemoryStore<C>
where
    C: Clock + Send + Sync,
{
    async fn select_tasks(&self) -> StoreResult<Vec<Task>> {
        let state = read_state(&self.state)?;
        check_read_failure(&state)?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(tasks)
    }

    async fn insert_task(&self, new_task: NewTask) -> StoreResult<Task> {
        let now = self.clock.utc();
        let mut state = write_state(&self.state)?;
        take_write_failure(&mut state)?;

        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            description: new_task.description,
            client_id: new_task.client_id,
            task_type_id: new_task.task_type_id,
            requester_id: new_task.requester_id,
            status_id: new_task.status_id,
            external_link: new_task.external_link,
            position: new_task.position,
            created_at: now,
            updated_at: now,
        });
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Task> {
        let mut state = write_state(&self.state)?;
        take_write_failure(&mut state)?;

        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(StoreError::TaskNotFound(id))?;
        changes.apply_to(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> StoreResult<()> {
        let mut state = write_state(&self.state)?;
        take_write_failure(&mut state)?;

        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::TaskNotFound(id))
    }
}

#[async_trait]
impl<C> ConfigStore for InMemoryStore<C>
where
    C: Clock + Send + Sync,
{
    async fn select_items(&self, kind: ConfigKind) -> StoreResult<Vec<ConfigItem>> {
        let state = read_state(&self.state)?;
        check_read_failure(&state)?;
        Ok(state.collections.get(&kind).cloned().unwrap_or_default())
    }

    async fn insert_item(&self, kind: ConfigKind, item: NewConfigItem) -> StoreResult<ConfigItem> {
        let mut state = write_state(&self.state)?;
        take_write_failure(&mut state)?;

        let stored = ConfigItem {
            id: ConfigItemId::new(),
            name: item.name,
            color: item.color,
        };
        state
            .collections
            .entry(kind)
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn update_item(
        &self,
        kind: ConfigKind,
        id: ConfigItemId,
        changes: ConfigItemChanges,
    ) -> StoreResult<ConfigItem> {
        let mut state = write_state(&self.state)?;
        take_write_failure(&mut state)?;

        let item = state
            .collections
            .entry(kind)
            .or_default()
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::ConfigItemNotFound { kind, id })?;
        changes.apply_to(item);
        Ok(item.clone())
    }

    async fn delete_item(&self, kind: ConfigKind, id: ConfigItemId) -> StoreResult<()> {
        let mut state = write_state(&self.state)?;
        take_write_failure(&mut state)?;

        let collection = state.collections.entry(kind).or_default();
        let before = collection.len();
        collection.retain(|item| item.id != id);
        if collection.len() == before {
            return Err(StoreError::ConfigItemNotFound { kind, id });
        }
        Ok(())
    }

    async fn app_config(&self) -> StoreResult<AppConfig> {
        let state = read_state(&self.state)?;
        check_read_failure(&state)?;
        Ok(state.app_config.clone())
    }

    async fn update_app_config(&self, changes: AppConfigChanges) -> StoreResult<AppConfig> {
        let mut state = write_state(&self.state)?;
        take_write_failure(&mut state)?;

        changes.apply_to(&mut state.app_config);
        Ok(state.app_config.clone())
    }

    async fn upsert_app_config(&self, config: AppConfig) -> StoreResult<AppConfig> {
        let mut state = write_state(&self.state)?;
        take_write_failure(&mut state)?;

        state.app_config = config;
        Ok(state.app_config.clone())
    }
}
