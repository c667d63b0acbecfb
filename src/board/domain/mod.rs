//! Domain model for board task tracking.
//!
//! The board domain models tasks classified against four config
//! collections, the fractional sort key that orders them, and the app-level
//! singleton configuration, while keeping all infrastructure concerns
//! outside of the domain boundary.

mod config;
mod error;
mod ids;
mod position;
mod task;

pub use config::{
    AppConfig, AppConfigChanges, ConfigData, ConfigItem, ConfigItemChanges, ConfigKind,
    NewConfigItem,
};
pub use error::{BoardDomainError, ParseConfigKindError};
pub use ids::{ConfigItemId, TaskId, UserId};
pub use position::Position;
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskDraft};
