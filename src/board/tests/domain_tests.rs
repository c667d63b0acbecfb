//! Domain-focused tests for task drafts and config collections.

use crate::board::domain::{
    AppConfig, AppConfigChanges, BoardDomainError, ConfigItem, ConfigItemChanges, ConfigItemId,
    ConfigKind, ParseConfigKindError, Position, TaskDraft,
};
use eyre::ensure;
use rstest::rstest;

fn full_draft() -> TaskDraft {
    TaskDraft::new("Ship the quarterly report")
        .with_client(ConfigItemId::new())
        .with_task_type(ConfigItemId::new())
        .with_requester(ConfigItemId::new())
        .with_status(ConfigItemId::new())
}

#[rstest]
fn draft_with_all_fields_validates() -> eyre::Result<()> {
    let new_task = full_draft()
        .with_external_link("https://tracker.example/t/99")
        .into_new_task(Position::new(65536.0))?;

    ensure!(new_task.description == "Ship the quarterly report");
    ensure!(new_task.external_link.as_deref() == Some("https://tracker.example/t/99"));
    ensure!(new_task.position == Position::new(65536.0));
    Ok(())
}

#[rstest]
fn draft_trims_and_rejects_blank_description() {
    let draft = TaskDraft::new("   ").with_client(ConfigItemId::new());
    let result = draft.into_new_task(Position::new(65536.0));
    assert_eq!(result, Err(BoardDomainError::EmptyDescription));
}

#[rstest]
#[case::client(TaskDraft::new("x"), ConfigKind::Clients)]
#[case::status(
    TaskDraft::new("x")
        .with_client(ConfigItemId::new())
        .with_task_type(ConfigItemId::new())
        .with_requester(ConfigItemId::new()),
    ConfigKind::Statuses
)]
fn draft_names_the_first_missing_classification(
    #[case] draft: TaskDraft,
    #[case] expected: ConfigKind,
) {
    let result = draft.into_new_task(Position::new(65536.0));
    assert_eq!(result, Err(BoardDomainError::MissingClassification(expected)));
}

#[rstest]
#[case("clientes", ConfigKind::Clients)]
#[case("tipos", ConfigKind::TaskTypes)]
#[case("solicitantes", ConfigKind::Requesters)]
#[case(" Statuses ", ConfigKind::Statuses)]
fn config_kind_parses_table_names(#[case] input: &str, #[case] expected: ConfigKind) {
    assert_eq!(ConfigKind::try_from(input), Ok(expected));
}

#[rstest]
fn config_kind_rejects_unknown_table_names() {
    assert_eq!(
        ConfigKind::try_from("projetos"),
        Err(ParseConfigKindError("projetos".to_owned()))
    );
}

#[rstest]
fn config_item_changes_apply_only_set_fields() {
    let mut item = ConfigItem {
        id: ConfigItemId::new(),
        name: "Acme".to_owned(),
        color: "#ff0000".to_owned(),
    };
    ConfigItemChanges::default()
        .with_color("#00ff00")
        .apply_to(&mut item);

    assert_eq!(item.name, "Acme");
    assert_eq!(item.color, "#00ff00");
}

#[rstest]
fn app_config_changes_can_clear_a_pointer() {
    let status = ConfigItemId::new();
    let mut config = AppConfig {
        in_progress_status_id: Some(status),
        entregue_status_id: Some(status),
        ..AppConfig::default()
    };

    AppConfigChanges::default()
        .with_in_progress_status(None)
        .apply_to(&mut config);

    assert_eq!(config.in_progress_status_id, None);
    assert_eq!(config.entregue_status_id, Some(status));
}

#[rstest]
fn app_config_designates_either_pointer() {
    let in_progress = ConfigItemId::new();
    let entregue = ConfigItemId::new();
    let config = AppConfig {
        in_progress_status_id: Some(in_progress),
        entregue_status_id: Some(entregue),
        ..AppConfig::default()
    };

    assert!(config.designates_status(in_progress));
    assert!(config.designates_status(entregue));
    assert!(!config.designates_status(ConfigItemId::new()));
}
