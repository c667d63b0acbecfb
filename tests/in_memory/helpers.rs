//! Shared fixtures for in-memory integration tests.
#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use mockable::DefaultClock;
use quadro::board::{
    adapters::memory::InMemoryStore,
    domain::{ConfigItem, ConfigItemId, ConfigKind, NewConfigItem, Task, TaskDraft, TaskId},
    services::BoardService,
};
use std::sync::Arc;

/// A board service wired to an in-memory store, with direct store access
/// for seeding and failure injection.
pub struct BoardHarness {
    /// The backing store.
    pub store: Arc<InMemoryStore>,
    /// The service under test.
    pub service: BoardService<InMemoryStore, DefaultClock>,
}

/// Creates a fresh board harness.
#[must_use]
pub fn board_harness() -> BoardHarness {
    let store = Arc::new(InMemoryStore::new());
    let service = BoardService::new(Arc::clone(&store), Arc::new(DefaultClock));
    BoardHarness { store, service }
}

/// Creates a harness whose service has already completed a bulk load.
pub async fn loaded_board() -> BoardHarness {
    let harness = board_harness();
    harness
        .service
        .fetch_all()
        .await
        .expect("initial fetch should run");
    harness
}

/// Seeds one config item into each of the four collections, returning the
/// created status.
pub async fn seed_config(harness: &BoardHarness) -> ConfigItem {
    for (kind, name) in [
        (ConfigKind::Clients, "Acme"),
        (ConfigKind::TaskTypes, "Feature"),
        (ConfigKind::Requesters, "Marcos"),
    ] {
        harness
            .service
            .add_config_item(kind, NewConfigItem::new(name, "#808080"))
            .await
            .expect("config item should insert");
    }
    harness
        .service
        .add_config_item(ConfigKind::Statuses, NewConfigItem::new("Backlog", "#888"))
        .await
        .expect("status should insert")
}

/// Builds a complete draft referencing the given status.
#[must_use]
pub fn draft(description: &str, status_id: ConfigItemId) -> TaskDraft {
    TaskDraft::new(description)
        .with_client(ConfigItemId::new())
        .with_task_type(ConfigItemId::new())
        .with_requester(ConfigItemId::new())
        .with_status(status_id)
}

/// Returns the task ids in list order.
#[must_use]
pub fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(Task::id).collect()
}
