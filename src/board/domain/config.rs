//! Config collections: named, coloured category values and the app-level
//! singleton configuration.

use super::{ConfigItemId, ParseConfigKindError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four config collections a task is classified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKind {
    /// Clients work is done for.
    Clients,
    /// Kinds of work item.
    TaskTypes,
    /// People who requested the work.
    Requesters,
    /// Workflow statuses.
    Statuses,
}

impl ConfigKind {
    /// All collections, in display order.
    pub const ALL: [Self; 4] = [
        Self::Clients,
        Self::TaskTypes,
        Self::Requesters,
        Self::Statuses,
    ];

    /// Returns the store table name for this collection.
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Clients => "clientes",
            Self::TaskTypes => "tipos",
            Self::Requesters => "solicitantes",
            Self::Statuses => "statuses",
        }
    }
}

impl TryFrom<&str> for ConfigKind {
    type Error = ParseConfigKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "clientes" => Ok(Self::Clients),
            "tipos" => Ok(Self::TaskTypes),
            "solicitantes" => Ok(Self::Requesters),
            "statuses" => Ok(Self::Statuses),
            _ => Err(ParseConfigKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A named, coloured category value (client, type, requester, or status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    /// Item identifier.
    pub id: ConfigItemId,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Display colour.
    #[serde(rename = "cor")]
    pub color: String,
}

/// Insert payload for a config item; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConfigItem {
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Display colour.
    #[serde(rename = "cor")]
    pub color: String,
}

impl NewConfigItem {
    /// Creates an insert payload.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Partial update for a config item; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigItemChanges {
    /// Replacement display name, if any.
    pub name: Option<String>,
    /// Replacement display colour, if any.
    pub color: Option<String>,
}

impl ConfigItemChanges {
    /// Sets a replacement name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a replacement colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Applies the changes to an existing item.
    pub fn apply_to(&self, item: &mut ConfigItem) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(color) = &self.color {
            item.color.clone_from(color);
        }
    }
}

/// App-level singleton configuration row.
///
/// Holds the two special status role pointers plus persisted UI ordering
/// state for the table and kanban views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Status counted as "active work" for statistics.
    pub in_progress_status_id: Option<ConfigItemId>,
    /// Status routing a task into the history view.
    pub entregue_status_id: Option<ConfigItemId>,
    /// Persisted column order for the table view.
    pub table_column_order: Option<Vec<String>>,
    /// Persisted status column order for the kanban view.
    pub kanban_status_order: Option<Vec<ConfigItemId>>,
}

impl AppConfig {
    /// Returns true when either role pointer designates the given status.
    #[must_use]
    pub fn designates_status(&self, id: ConfigItemId) -> bool {
        self.in_progress_status_id == Some(id) || self.entregue_status_id == Some(id)
    }
}

/// Partial update for the app-config singleton.
///
/// The role pointers are themselves optional, so each change slot is doubly
/// wrapped: the outer `Option` says whether to touch the field, the inner
/// one is the new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfigChanges {
    /// Replacement in-progress pointer, if the field is being changed.
    pub in_progress_status_id: Option<Option<ConfigItemId>>,
    /// Replacement delivered pointer, if the field is being changed.
    pub entregue_status_id: Option<Option<ConfigItemId>>,
    /// Replacement table column order, if the field is being changed.
    pub table_column_order: Option<Option<Vec<String>>>,
    /// Replacement kanban status order, if the field is being changed.
    pub kanban_status_order: Option<Option<Vec<ConfigItemId>>>,
}

impl AppConfigChanges {
    /// Sets the in-progress status pointer.
    #[must_use]
    pub const fn with_in_progress_status(mut self, id: Option<ConfigItemId>) -> Self {
        self.in_progress_status_id = Some(id);
        self
    }

    /// Sets the delivered status pointer.
    #[must_use]
    pub const fn with_entregue_status(mut self, id: Option<ConfigItemId>) -> Self {
        self.entregue_status_id = Some(id);
        self
    }

    /// Sets the table column order.
    #[must_use]
    pub fn with_table_column_order(mut self, order: Option<Vec<String>>) -> Self {
        self.table_column_order = Some(order);
        self
    }

    /// Sets the kanban status order.
    #[must_use]
    pub fn with_kanban_status_order(mut self, order: Option<Vec<ConfigItemId>>) -> Self {
        self.kanban_status_order = Some(order);
        self
    }

    /// Applies the changes to an existing config.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(pointer) = self.in_progress_status_id {
            config.in_progress_status_id = pointer;
        }
        if let Some(pointer) = self.entregue_status_id {
            config.entregue_status_id = pointer;
        }
        if let Some(order) = &self.table_column_order {
            config.table_column_order.clone_from(order);
        }
        if let Some(order) = &self.kanban_status_order {
            config.kanban_status_order.clone_from(order);
        }
    }
}

/// Snapshot of all config collections plus the app-config singleton.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigData {
    /// Client collection.
    #[serde(rename = "clientes")]
    pub clients: Vec<ConfigItem>,
    /// Task-type collection.
    #[serde(rename = "tipos")]
    pub task_types: Vec<ConfigItem>,
    /// Requester collection.
    #[serde(rename = "solicitantes")]
    pub requesters: Vec<ConfigItem>,
    /// Status collection.
    pub statuses: Vec<ConfigItem>,
    /// App-config singleton.
    pub app_config: AppConfig,
}

impl ConfigData {
    /// Returns the collection for the given kind.
    #[must_use]
    pub const fn items(&self, kind: ConfigKind) -> &Vec<ConfigItem> {
        match kind {
            ConfigKind::Clients => &self.clients,
            ConfigKind::TaskTypes => &self.task_types,
            ConfigKind::Requesters => &self.requesters,
            ConfigKind::Statuses => &self.statuses,
        }
    }

    /// Returns the mutable collection for the given kind.
    pub const fn items_mut(&mut self, kind: ConfigKind) -> &mut Vec<ConfigItem> {
        match kind {
            ConfigKind::Clients => &mut self.clients,
            ConfigKind::TaskTypes => &mut self.task_types,
            ConfigKind::Requesters => &mut self.requesters,
            ConfigKind::Statuses => &mut self.statuses,
        }
    }

    /// Finds a config item by kind and identifier.
    #[must_use]
    pub fn find(&self, kind: ConfigKind, id: ConfigItemId) -> Option<&ConfigItem> {
        self.items(kind).iter().find(|item| item.id == id)
    }
}
