//! Diesel row models for board persistence.

use super::schema::{app_config, tasks};
use crate::board::domain::{
    AppConfig, AppConfigChanges, ConfigItemId, NewTask, PersistedTaskData, Position, Task,
    TaskChanges, TaskId,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Free-text description.
    pub tarefa: String,
    /// Client reference.
    pub nome_cliente_id: Uuid,
    /// Task-type reference.
    pub tipo_id: Uuid,
    /// Requester reference.
    pub solicitado_por_id: Uuid,
    /// Status reference.
    pub status_id: Uuid,
    /// Optional external tracker link.
    pub runrunit_task: Option<String>,
    /// Fractional sort key.
    pub position: f64,
    /// Creation timestamp.
    pub criado_em: DateTime<Utc>,
    /// Last update timestamp.
    pub atualizado_em: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(row.id),
            description: row.tarefa,
            client_id: ConfigItemId::from_uuid(row.nome_cliente_id),
            task_type_id: ConfigItemId::from_uuid(row.tipo_id),
            requester_id: ConfigItemId::from_uuid(row.solicitado_por_id),
            status_id: ConfigItemId::from_uuid(row.status_id),
            external_link: row.runrunit_task,
            position: Position::new(row.position),
            created_at: row.criado_em,
            updated_at: row.atualizado_em,
        })
    }
}

/// Insert model for task records; id and timestamps use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Free-text description.
    pub tarefa: String,
    /// Client reference.
    pub nome_cliente_id: Uuid,
    /// Task-type reference.
    pub tipo_id: Uuid,
    /// Requester reference.
    pub solicitado_por_id: Uuid,
    /// Status reference.
    pub status_id: Uuid,
    /// Optional external tracker link.
    pub runrunit_task: Option<String>,
    /// Fractional sort key.
    pub position: f64,
}

impl From<NewTask> for NewTaskRow {
    fn from(new_task: NewTask) -> Self {
        Self {
            tarefa: new_task.description,
            nome_cliente_id: new_task.client_id.into_inner(),
            tipo_id: new_task.task_type_id.into_inner(),
            solicitado_por_id: new_task.requester_id.into_inner(),
            status_id: new_task.status_id.into_inner(),
            runrunit_task: new_task.external_link,
            position: new_task.position.value(),
        }
    }
}

/// Partial-update changeset for task records.
///
/// `None` fields are skipped; the doubly wrapped link column sets NULL when
/// the inner value is `None`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangesRow {
    /// Replacement description.
    pub tarefa: Option<String>,
    /// Replacement client reference.
    pub nome_cliente_id: Option<Uuid>,
    /// Replacement task-type reference.
    pub tipo_id: Option<Uuid>,
    /// Replacement requester reference.
    pub solicitado_por_id: Option<Uuid>,
    /// Replacement status reference.
    pub status_id: Option<Uuid>,
    /// Replacement or cleared external link.
    pub runrunit_task: Option<Option<String>>,
    /// Replacement sort key.
    pub position: Option<f64>,
    /// Replacement last-update timestamp.
    pub atualizado_em: Option<DateTime<Utc>>,
}

impl TaskChangesRow {
    /// Returns true when no column would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tarefa.is_none()
            && self.nome_cliente_id.is_none()
            && self.tipo_id.is_none()
            && self.solicitado_por_id.is_none()
            && self.status_id.is_none()
            && self.runrunit_task.is_none()
            && self.position.is_none()
            && self.atualizado_em.is_none()
    }
}

impl From<TaskChanges> for TaskChangesRow {
    fn from(changes: TaskChanges) -> Self {
        Self {
            tarefa: changes.description,
            nome_cliente_id: changes.client_id.map(ConfigItemId::into_inner),
            tipo_id: changes.task_type_id.map(ConfigItemId::into_inner),
            solicitado_por_id: changes.requester_id.map(ConfigItemId::into_inner),
            status_id: changes.status_id.map(ConfigItemId::into_inner),
            runrunit_task: changes.external_link,
            position: changes.position.map(Position::value),
            atualizado_em: changes.updated_at,
        }
    }
}

/// Query and upsert model for the app-config singleton row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = app_config)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct AppConfigRow {
    /// Singleton row identifier.
    pub id: i32,
    /// Status counted as active work.
    pub in_progress_status_id: Option<Uuid>,
    /// Status routing tasks into history.
    pub entregue_status_id: Option<Uuid>,
    /// Persisted table-view column order.
    pub table_column_order: Option<Vec<String>>,
    /// Persisted kanban status column order.
    pub kanban_status_order: Option<Vec<Uuid>>,
}

impl AppConfigRow {
    /// Builds the singleton row from a domain config.
    #[must_use]
    pub fn from_config(id: i32, config: AppConfig) -> Self {
        Self {
            id,
            in_progress_status_id: config.in_progress_status_id.map(ConfigItemId::into_inner),
            entregue_status_id: config.entregue_status_id.map(ConfigItemId::into_inner),
            table_column_order: config.table_column_order,
            kanban_status_order: config
                .kanban_status_order
                .map(|order| order.into_iter().map(ConfigItemId::into_inner).collect()),
        }
    }
}

impl From<AppConfigRow> for AppConfig {
    fn from(row: AppConfigRow) -> Self {
        Self {
            in_progress_status_id: row.in_progress_status_id.map(ConfigItemId::from_uuid),
            entregue_status_id: row.entregue_status_id.map(ConfigItemId::from_uuid),
            table_column_order: row.table_column_order,
            kanban_status_order: row
                .kanban_status_order
                .map(|order| order.into_iter().map(ConfigItemId::from_uuid).collect()),
        }
    }
}

/// Partial-update changeset for the app-config singleton.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = app_config)]
pub struct AppConfigChangesRow {
    /// Replacement in-progress pointer.
    pub in_progress_status_id: Option<Option<Uuid>>,
    /// Replacement delivered pointer.
    pub entregue_status_id: Option<Option<Uuid>>,
    /// Replacement table column order.
    pub table_column_order: Option<Option<Vec<String>>>,
    /// Replacement kanban status order.
    pub kanban_status_order: Option<Option<Vec<Uuid>>>,
}

impl AppConfigChangesRow {
    /// Returns true when no column would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.in_progress_status_id.is_none()
            && self.entregue_status_id.is_none()
            && self.table_column_order.is_none()
            && self.kanban_status_order.is_none()
    }
}

impl From<AppConfigChanges> for AppConfigChangesRow {
    fn from(changes: AppConfigChanges) -> Self {
        Self {
            in_progress_status_id: changes
                .in_progress_status_id
                .map(|pointer| pointer.map(ConfigItemId::into_inner)),
            entregue_status_id: changes
                .entregue_status_id
                .map(|pointer| pointer.map(ConfigItemId::into_inner)),
            table_column_order: changes.table_column_order,
            kanban_status_order: changes.kanban_status_order.map(|order| {
                order.map(|ids| ids.into_iter().map(ConfigItemId::into_inner).collect())
            }),
        }
    }
}
