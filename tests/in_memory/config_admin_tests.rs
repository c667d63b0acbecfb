//! Behavioural tests for config collection administration.
#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use super::helpers::{draft, loaded_board, seed_config};
use quadro::board::{
    domain::{AppConfigChanges, ConfigItemChanges, ConfigKind, NewConfigItem},
    services::BoardError,
};

#[tokio::test(flavor = "multi_thread")]
async fn collections_are_administered_independently() {
    let harness = loaded_board().await;
    seed_config(&harness).await;

    let second_client = harness
        .service
        .add_config_item(ConfigKind::Clients, NewConfigItem::new("Globex", "#00c"))
        .await
        .expect("client should insert");
    harness
        .service
        .update_config_item(
            ConfigKind::Clients,
            second_client.id,
            ConfigItemChanges::default().with_name("Globex Corp"),
        )
        .await
        .expect("client should update");

    let config = harness.service.config().expect("config readable");
    assert_eq!(config.clients.len(), 2);
    assert_eq!(config.task_types.len(), 1);
    assert_eq!(config.requesters.len(), 1);
    assert_eq!(config.statuses.len(), 1);
    assert_eq!(
        harness
            .service
            .config_item(ConfigKind::Clients, second_client.id)
            .expect("lookup readable")
            .expect("client cached")
            .name,
        "Globex Corp"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn special_status_pointers_protect_their_status_until_cleared() {
    let harness = loaded_board().await;
    let status = seed_config(&harness).await;

    harness
        .service
        .update_app_config(AppConfigChanges::default().with_in_progress_status(Some(status.id)))
        .await
        .expect("pointer should persist");

    let rejected = harness
        .service
        .delete_config_item(ConfigKind::Statuses, status.id)
        .await;
    assert!(matches!(rejected, Err(BoardError::Domain(_))));

    harness
        .service
        .update_app_config(AppConfigChanges::default().with_in_progress_status(None))
        .await
        .expect("pointer should clear");
    harness
        .service
        .delete_config_item(ConfigKind::Statuses, status.id)
        .await
        .expect("unreferenced status should delete");

    let config = harness.service.config().expect("config readable");
    assert!(config.statuses.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn a_status_with_tasks_cannot_be_deleted_until_they_move() {
    let harness = loaded_board().await;
    let backlog = seed_config(&harness).await;
    let doing = harness
        .service
        .add_config_item(ConfigKind::Statuses, NewConfigItem::new("Doing", "#00f"))
        .await
        .expect("status should insert");
    let task = harness
        .service
        .add_task(draft("migrate database", backlog.id))
        .await
        .expect("task should insert");

    let rejected = harness
        .service
        .delete_config_item(ConfigKind::Statuses, backlog.id)
        .await;
    assert!(matches!(rejected, Err(BoardError::Domain(_))));

    harness
        .service
        .update_task(
            task.id(),
            quadro::board::domain::TaskChanges::default().with_status(doing.id),
        )
        .await
        .expect("status change should persist");
    harness
        .service
        .delete_config_item(ConfigKind::Statuses, backlog.id)
        .await
        .expect("vacated status should delete");
}

#[tokio::test(flavor = "multi_thread")]
async fn view_ordering_preferences_round_trip_through_the_singleton() {
    let harness = loaded_board().await;
    let status = seed_config(&harness).await;

    harness
        .service
        .update_app_config(
            AppConfigChanges::default()
                .with_table_column_order(Some(vec!["status".to_owned(), "tarefa".to_owned()]))
                .with_kanban_status_order(Some(vec![status.id])),
        )
        .await
        .expect("preferences should persist");

    let config = harness.service.config().expect("config readable");
    assert_eq!(
        config.app_config.table_column_order,
        Some(vec!["status".to_owned(), "tarefa".to_owned()])
    );
    assert_eq!(config.app_config.kanban_status_order, Some(vec![status.id]));
}
