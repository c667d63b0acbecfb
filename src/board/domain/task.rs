//! Task aggregate and its draft/update payloads.

use super::{BoardDomainError, ConfigItemId, ConfigKind, Position, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of work classified by client, type, requester, and status.
///
/// Ordering within a view is by `(position, created_at)` ascending; the
/// creation timestamp breaks position ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    #[serde(rename = "tarefa")]
    description: String,
    #[serde(rename = "nome_cliente_id")]
    client_id: ConfigItemId,
    #[serde(rename = "tipo_id")]
    task_type_id: ConfigItemId,
    #[serde(rename = "solicitado_por_id")]
    requester_id: ConfigItemId,
    status_id: ConfigItemId,
    #[serde(rename = "runrunit_task")]
    external_link: Option<String>,
    position: Position,
    #[serde(rename = "criado_em")]
    created_at: DateTime<Utc>,
    #[serde(rename = "atualizado_em")]
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted free-text description.
    pub description: String,
    /// Persisted client reference.
    pub client_id: ConfigItemId,
    /// Persisted task-type reference.
    pub task_type_id: ConfigItemId,
    /// Persisted requester reference.
    pub requester_id: ConfigItemId,
    /// Persisted status reference.
    pub status_id: ConfigItemId,
    /// Persisted external tracker link, if any.
    pub external_link: Option<String>,
    /// Persisted sort key.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            description: data.description,
            client_id: data.client_id,
            task_type_id: data.task_type_id,
            requester_id: data.requester_id,
            status_id: data.status_id,
            external_link: data.external_link,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the client reference.
    #[must_use]
    pub const fn client_id(&self) -> ConfigItemId {
        self.client_id
    }

    /// Returns the task-type reference.
    #[must_use]
    pub const fn task_type_id(&self) -> ConfigItemId {
        self.task_type_id
    }

    /// Returns the requester reference.
    #[must_use]
    pub const fn requester_id(&self) -> ConfigItemId {
        self.requester_id
    }

    /// Returns the status reference.
    #[must_use]
    pub const fn status_id(&self) -> ConfigItemId {
        self.status_id
    }

    /// Returns the external tracker link, if any.
    #[must_use]
    pub fn external_link(&self) -> Option<&str> {
        self.external_link.as_deref()
    }

    /// Returns the sort key.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the view ordering key: position, ties broken by creation
    /// time ascending.
    #[must_use]
    pub const fn sort_key(&self) -> (Position, DateTime<Utc>) {
        (self.position, self.created_at)
    }

    /// Overwrites the sort key in place.
    ///
    /// Used by the optimistic reorder path; persistence happens separately.
    pub const fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

/// Validated insert payload; the store assigns identifier and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Free-text description.
    #[serde(rename = "tarefa")]
    pub description: String,
    /// Client reference.
    #[serde(rename = "nome_cliente_id")]
    pub client_id: ConfigItemId,
    /// Task-type reference.
    #[serde(rename = "tipo_id")]
    pub task_type_id: ConfigItemId,
    /// Requester reference.
    #[serde(rename = "solicitado_por_id")]
    pub requester_id: ConfigItemId,
    /// Status reference.
    pub status_id: ConfigItemId,
    /// External tracker link, if any.
    #[serde(rename = "runrunit_task")]
    pub external_link: Option<String>,
    /// Assigned sort key.
    pub position: Position,
}

/// Unvalidated task form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    description: String,
    client_id: Option<ConfigItemId>,
    task_type_id: Option<ConfigItemId>,
    requester_id: Option<ConfigItemId>,
    status_id: Option<ConfigItemId>,
    external_link: Option<String>,
}

impl TaskDraft {
    /// Creates a draft with the given description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Sets the client selection.
    #[must_use]
    pub const fn with_client(mut self, id: ConfigItemId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the task-type selection.
    #[must_use]
    pub const fn with_task_type(mut self, id: ConfigItemId) -> Self {
        self.task_type_id = Some(id);
        self
    }

    /// Sets the requester selection.
    #[must_use]
    pub const fn with_requester(mut self, id: ConfigItemId) -> Self {
        self.requester_id = Some(id);
        self
    }

    /// Sets the status selection.
    #[must_use]
    pub const fn with_status(mut self, id: ConfigItemId) -> Self {
        self.status_id = Some(id);
        self
    }

    /// Sets the external tracker link.
    #[must_use]
    pub fn with_external_link(mut self, link: impl Into<String>) -> Self {
        self.external_link = Some(link.into());
        self
    }

    /// Validates the draft into an insert payload at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyDescription`] when the description
    /// is blank, or [`BoardDomainError::MissingClassification`] naming the
    /// first unselected classification field.
    pub fn into_new_task(self, position: Position) -> Result<NewTask, BoardDomainError> {
        let description = self.description.trim().to_owned();
        if description.is_empty() {
            return Err(BoardDomainError::EmptyDescription);
        }

        Ok(NewTask {
            description,
            client_id: require(self.client_id, ConfigKind::Clients)?,
            task_type_id: require(self.task_type_id, ConfigKind::TaskTypes)?,
            requester_id: require(self.requester_id, ConfigKind::Requesters)?,
            status_id: require(self.status_id, ConfigKind::Statuses)?,
            external_link: self.external_link,
            position,
        })
    }
}

const fn require(
    field: Option<ConfigItemId>,
    kind: ConfigKind,
) -> Result<ConfigItemId, BoardDomainError> {
    match field {
        Some(id) => Ok(id),
        None => Err(BoardDomainError::MissingClassification(kind)),
    }
}

/// Partial update for a task; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement description, if any.
    pub description: Option<String>,
    /// Replacement client reference, if any.
    pub client_id: Option<ConfigItemId>,
    /// Replacement task-type reference, if any.
    pub task_type_id: Option<ConfigItemId>,
    /// Replacement requester reference, if any.
    pub requester_id: Option<ConfigItemId>,
    /// Replacement status reference, if any.
    pub status_id: Option<ConfigItemId>,
    /// Replacement external link; the inner `Option` can clear it.
    pub external_link: Option<Option<String>>,
    /// Replacement sort key, if any.
    pub position: Option<Position>,
    /// Replacement last-update timestamp; stamped by the service layer.
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskChanges {
    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a replacement client reference.
    #[must_use]
    pub const fn with_client(mut self, id: ConfigItemId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets a replacement task-type reference.
    #[must_use]
    pub const fn with_task_type(mut self, id: ConfigItemId) -> Self {
        self.task_type_id = Some(id);
        self
    }

    /// Sets a replacement requester reference.
    #[must_use]
    pub const fn with_requester(mut self, id: ConfigItemId) -> Self {
        self.requester_id = Some(id);
        self
    }

    /// Sets a replacement status reference.
    #[must_use]
    pub const fn with_status(mut self, id: ConfigItemId) -> Self {
        self.status_id = Some(id);
        self
    }

    /// Sets or clears the external link.
    #[must_use]
    pub fn with_external_link(mut self, link: Option<String>) -> Self {
        self.external_link = Some(link);
        self
    }

    /// Sets a replacement sort key.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the last-update timestamp.
    #[must_use]
    pub const fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Returns true when the update touches the sort key.
    #[must_use]
    pub const fn touches_position(&self) -> bool {
        self.position.is_some()
    }

    /// Applies the changes to an existing task.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(description) = &self.description {
            task.description.clone_from(description);
        }
        if let Some(id) = self.client_id {
            task.client_id = id;
        }
        if let Some(id) = self.task_type_id {
            task.task_type_id = id;
        }
        if let Some(id) = self.requester_id {
            task.requester_id = id;
        }
        if let Some(id) = self.status_id {
            task.status_id = id;
        }
        if let Some(link) = &self.external_link {
            task.external_link.clone_from(link);
        }
        if let Some(position) = self.position {
            task.position = position;
        }
        if let Some(at) = self.updated_at {
            task.updated_at = at;
        }
    }
}
