//! Behavioural tests for the board service over the in-memory store.
//!
//! These exercise realistic multi-step flows through the public API:
//! loading, task lifecycle, drag-and-drop reordering, and the rollback
//! path when a reorder fails to persist.
#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use super::helpers::{board_harness, draft, ids, loaded_board, seed_config};
use mockable::DefaultClock;
use quadro::board::{
    domain::{Position, Task, TaskChanges},
    services::{BoardError, BoardService},
};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread")]
async fn board_lifecycle_from_empty_store_to_ordered_list() {
    let harness = loaded_board().await;
    let status = seed_config(&harness).await;

    let first = harness
        .service
        .add_task(draft("prepare campaign assets", status.id))
        .await
        .expect("first task should insert");
    let second = harness
        .service
        .add_task(draft("review copy", status.id))
        .await
        .expect("second task should insert");

    let tasks = harness.service.tasks().expect("tasks readable");
    assert_eq!(ids(&tasks), vec![first.id(), second.id()]);
    assert!(first.position() < second.position());

    // A second service over the same store sees the same ordering.
    let fresh = BoardService::new(Arc::clone(&harness.store), Arc::new(DefaultClock));
    fresh.fetch_all().await.expect("fetch should run");
    assert_eq!(ids(&fresh.tasks().expect("tasks readable")), vec![
        first.id(),
        second.id()
    ]);
}

#[tokio::test(flavor = "multi_thread")]
async fn drag_reorder_persists_and_survives_a_reload() {
    let harness = loaded_board().await;
    let status = seed_config(&harness).await;
    let mut created = Vec::new();
    for name in ["a", "b", "c", "d"] {
        let task = harness
            .service
            .add_task(draft(name, status.id))
            .await
            .expect("task should insert");
        created.push(task.id());
    }

    // Drag the last task into the second slot.
    let (a, b, _, d) = (created[0], created[1], created[2], created[3]);
    harness
        .service
        .reorder_task(d, b)
        .await
        .expect("reorder should persist");

    let tasks = harness.service.tasks().expect("tasks readable");
    assert_eq!(tasks.first().map(Task::id), Some(a));
    assert_eq!(tasks.get(1).map(Task::id), Some(d));

    let fresh = BoardService::new(Arc::clone(&harness.store), Arc::new(DefaultClock));
    fresh.fetch_all().await.expect("fetch should run");
    assert_eq!(
        ids(&fresh.tasks().expect("tasks readable")),
        ids(&tasks),
        "persisted positions must reproduce the optimistic order"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_reorder_leaves_no_trace_in_cache_or_store() {
    let harness = loaded_board().await;
    let status = seed_config(&harness).await;
    let first = harness
        .service
        .add_task(draft("a", status.id))
        .await
        .expect("task should insert");
    let second = harness
        .service
        .add_task(draft("b", status.id))
        .await
        .expect("task should insert");

    let before = harness.service.tasks().expect("tasks readable");
    harness.store.fail_next_write().expect("arm write failure");

    let result = harness.service.reorder_task(second.id(), first.id()).await;

    assert!(matches!(result, Err(BoardError::Store(_))));
    assert_eq!(harness.service.tasks().expect("tasks readable"), before);

    let fresh = BoardService::new(Arc::clone(&harness.store), Arc::new(DefaultClock));
    fresh.fetch_all().await.expect("fetch should run");
    assert_eq!(fresh.tasks().expect("tasks readable"), before);
}

#[tokio::test(flavor = "multi_thread")]
async fn status_change_routes_a_task_without_moving_it() {
    let harness = loaded_board().await;
    let backlog = seed_config(&harness).await;
    let done = harness
        .service
        .add_config_item(
            quadro::board::domain::ConfigKind::Statuses,
            quadro::board::domain::NewConfigItem::new("Entregue", "#0a0"),
        )
        .await
        .expect("status should insert");

    let first = harness
        .service
        .add_task(draft("a", backlog.id))
        .await
        .expect("task should insert");
    let second = harness
        .service
        .add_task(draft("b", backlog.id))
        .await
        .expect("task should insert");

    let delivered = harness
        .service
        .update_task(first.id(), TaskChanges::default().with_status(done.id))
        .await
        .expect("update should persist");

    assert_eq!(delivered.status_id(), done.id);
    assert_eq!(delivered.position(), first.position());
    let tasks = harness.service.tasks().expect("tasks readable");
    assert_eq!(ids(&tasks), vec![first.id(), second.id()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn broken_backend_degrades_to_an_empty_loaded_board_and_recovers() {
    let harness = board_harness();
    let status = seed_config(&harness).await;
    harness
        .service
        .add_task(draft("a", status.id))
        .await
        .expect("task should insert");

    harness.store.fail_reads(true).expect("arm read failures");
    harness.service.fetch_all().await.expect("fetch should run");

    assert!(harness.service.is_loaded().expect("flag readable"));
    assert!(harness.service.last_load_failed().expect("flag readable"));
    assert!(harness.service.tasks().expect("tasks readable").is_empty());

    harness.store.fail_reads(false).expect("disarm failures");
    harness.service.fetch_all().await.expect("fetch should run");

    assert!(!harness.service.last_load_failed().expect("flag readable"));
    assert_eq!(harness.service.tasks().expect("tasks readable").len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_reorders_into_the_same_gap_keep_the_list_sorted() {
    let harness = loaded_board().await;
    let status = seed_config(&harness).await;
    for name in ["a", "b", "c", "d", "e"] {
        harness
            .service
            .add_task(draft(name, status.id))
            .await
            .expect("task should insert");
    }

    // Repeatedly drag the last task into the second slot; each midpoint
    // halves the gap but order must stay consistent.
    for _ in 0..6 {
        let tasks = harness.service.tasks().expect("tasks readable");
        let last = tasks.last().expect("list is non-empty").id();
        let over = tasks.get(1).expect("second slot exists").id();
        harness
            .service
            .reorder_task(last, over)
            .await
            .expect("reorder should persist");

        let after = harness.service.tasks().expect("tasks readable");
        let mut sorted = after.clone();
        sorted.sort_by(|x, y| x.sort_key().cmp(&y.sort_key()));
        assert_eq!(ids(&sorted), ids(&after));
        let positions: Vec<Position> = after.iter().map(Task::position).collect();
        let mut deduped = positions.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), positions.len(), "positions must stay unique");
    }
}
