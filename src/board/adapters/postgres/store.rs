//! `PostgreSQL` store adapter for board persistence.

use super::{
    models::{AppConfigChangesRow, AppConfigRow, NewTaskRow, TaskChangesRow, TaskRow},
    schema::{app_config, tasks},
};
use crate::board::{
    domain::{
        AppConfig, AppConfigChanges, ConfigItem, ConfigItemChanges, ConfigItemId, ConfigKind,
        NewConfigItem, NewTask, Task, TaskChanges, TaskId,
    },
    ports::{ConfigStore, StoreError, StoreResult, TaskStore},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Fixed identifier of the app-config singleton row.
const SINGLETON_CONFIG_ID: i32 = 1;

/// `PostgreSQL`-backed board store.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: BoardPgPool,
}

impl PostgresStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::persistence)?
    }
}

fn task_not_found(err: DieselError, id: TaskId) -> StoreError {
    match err {
        DieselError::NotFound => StoreError::TaskNotFound(id),
        other => StoreError::persistence(other),
    }
}

fn item_not_found(err: DieselError, kind: ConfigKind, id: ConfigItemId) -> StoreError {
    match err {
        DieselError::NotFound => StoreError::ConfigItemNotFound { kind, id },
        other => StoreError::persistence(other),
    }
}

type ConfigItemTuple = (Uuid, String, String);

fn item_from_tuple((id, name, color): ConfigItemTuple) -> ConfigItem {
    ConfigItem {
        id: ConfigItemId::from_uuid(id),
        name,
        color,
    }
}

/// Generates per-table CRUD helpers for one config collection.
///
/// The four collections share a row shape but are distinct Diesel tables,
/// so each gets its own monomorphic helper module.
macro_rules! config_collection {
    ($helper:ident, $table:ident) => {
        mod $helper {
            use super::ConfigItemTuple;
            use crate::board::adapters::postgres::schema::$table::dsl;
            use diesel::pg::PgConnection;
            use diesel::prelude::*;
            use uuid::Uuid;

            pub fn select(conn: &mut PgConnection) -> QueryResult<Vec<ConfigItemTuple>> {
                dsl::$table
                    .select((dsl::id, dsl::nome, dsl::cor))
                    .order(dsl::nome.asc())
                    .load(conn)
            }

            pub fn insert(
                conn: &mut PgConnection,
                name: String,
                color: String,
            ) -> QueryResult<ConfigItemTuple> {
                diesel::insert_into(dsl::$table)
                    .values((dsl::nome.eq(name), dsl::cor.eq(color)))
                    .returning((dsl::id, dsl::nome, dsl::cor))
                    .get_result(conn)
            }

            pub fn update(
                conn: &mut PgConnection,
                id: Uuid,
                name: Option<String>,
                color: Option<String>,
            ) -> QueryResult<ConfigItemTuple> {
                if name.is_none() && color.is_none() {
                    return find(conn, id);
                }
                diesel::update(dsl::$table.find(id))
                    .set((
                        name.map(|value| dsl::nome.eq(value)),
                        color.map(|value| dsl::cor.eq(value)),
                    ))
                    .returning((dsl::id, dsl::nome, dsl::cor))
                    .get_result(conn)
            }

            pub fn find(conn: &mut PgConnection, id: Uuid) -> QueryResult<ConfigItemTuple> {
                dsl::$table
                    .find(id)
                    .select((dsl::id, dsl::nome, dsl::cor))
                    .first(conn)
            }

            pub fn delete(conn: &mut PgConnection, id: Uuid) -> QueryResult<usize> {
                diesel::delete(dsl::$table.find(id)).execute(conn)
            }
        }
    };
}

config_collection!(clientes_crud, clientes);
config_collection!(tipos_crud, tipos);
config_collection!(solicitantes_crud, solicitantes);
config_collection!(statuses_crud, statuses);

/// Ensures the singleton row exists before a partial update touches it.
fn ensure_config_row(conn: &mut PgConnection) -> QueryResult<()> {
    diesel::insert_into(app_config::table)
        .values(app_config::id.eq(SINGLETON_CONFIG_ID))
        .on_conflict_do_nothing()
        .execute(conn)
        .map(|_| ())
}

fn load_config_row(conn: &mut PgConnection) -> QueryResult<AppConfig> {
    let row = app_config::table
        .find(SINGLETON_CONFIG_ID)
        .select(AppConfigRow::as_select())
        .first::<AppConfigRow>(conn)
        .optional()?;
    Ok(row.map(AppConfig::from).unwrap_or_default())
}

#[async_trait]
impl TaskStore for PostgresStore {
    async fn select_tasks(&self) -> StoreResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((tasks::position.asc(), tasks::criado_em.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(StoreError::persistence)?;
            Ok(rows.into_iter().map(Task::from).collect())
        })
        .await
    }

    async fn insert_task(&self, new_task: NewTask) -> StoreResult<Task> {
        let row = NewTaskRow::from(new_task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map(Task::from)
                .map_err(StoreError::persistence)
        })
        .await
    }

    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Task> {
        let row = TaskChangesRow::from(changes);
        self.run_blocking(move |connection| {
            if row.is_empty() {
                return tasks::table
                    .find(id.into_inner())
                    .select(TaskRow::as_select())
                    .first::<TaskRow>(connection)
                    .map(Task::from)
                    .map_err(|err| task_not_found(err, id));
            }
            diesel::update(tasks::table.find(id.into_inner()))
                .set(&row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map(Task::from)
                .map_err(|err| task_not_found(err, id))
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(StoreError::persistence)?;
            if deleted == 0 {
                return Err(StoreError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ConfigStore for PostgresStore {
    async fn select_items(&self, kind: ConfigKind) -> StoreResult<Vec<ConfigItem>> {
        self.run_blocking(move |connection| {
            let rows = match kind {
                ConfigKind::Clients => clientes_crud::select(connection),
                ConfigKind::TaskTypes => tipos_crud::select(connection),
                ConfigKind::Requesters => solicitantes_crud::select(connection),
                ConfigKind::Statuses => statuses_crud::select(connection),
            }
            .map_err(StoreError::persistence)?;
            Ok(rows.into_iter().map(item_from_tuple).collect())
        })
        .await
    }

    async fn insert_item(&self, kind: ConfigKind, item: NewConfigItem) -> StoreResult<ConfigItem> {
        self.run_blocking(move |connection| {
            let row = match kind {
                ConfigKind::Clients => clientes_crud::insert(connection, item.name, item.color),
                ConfigKind::TaskTypes => tipos_crud::insert(connection, item.name, item.color),
                ConfigKind::Requesters => {
                    solicitantes_crud::insert(connection, item.name, item.color)
                }
                ConfigKind::Statuses => statuses_crud::insert(connection, item.name, item.color),
            }
            .map_err(StoreError::persistence)?;
            Ok(item_from_tuple(row))
        })
        .await
    }

    async fn update_item(
        &self,
        kind: ConfigKind,
        id: ConfigItemId,
        changes: ConfigItemChanges,
    ) -> StoreResult<ConfigItem> {
        self.run_blocking(move |connection| {
            let raw = id.into_inner();
            let row = match kind {
                ConfigKind::Clients => {
                    clientes_crud::update(connection, raw, changes.name, changes.color)
                }
                ConfigKind::TaskTypes => {
                    tipos_crud::update(connection, raw, changes.name, changes.color)
                }
                ConfigKind::Requesters => {
                    solicitantes_crud::update(connection, raw, changes.name, changes.color)
                }
                ConfigKind::Statuses => {
                    statuses_crud::update(connection, raw, changes.name, changes.color)
                }
            }
            .map_err(|err| item_not_found(err, kind, id))?;
            Ok(item_from_tuple(row))
        })
        .await
    }

    async fn delete_item(&self, kind: ConfigKind, id: ConfigItemId) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            let raw = id.into_inner();
            let deleted = match kind {
                ConfigKind::Clients => clientes_crud::delete(connection, raw),
                ConfigKind::TaskTypes => tipos_crud::delete(connection, raw),
                ConfigKind::Requesters => solicitantes_crud::delete(connection, raw),
                ConfigKind::Statuses => statuses_crud::delete(connection, raw),
            }
            .map_err(StoreError::persistence)?;
            if deleted == 0 {
                return Err(StoreError::ConfigItemNotFound { kind, id });
            }
            Ok(())
        })
        .await
    }

    async fn app_config(&self) -> StoreResult<AppConfig> {
        self.run_blocking(|connection| load_config_row(connection).map_err(StoreError::persistence))
            .await
    }

    async fn update_app_config(&self, changes: AppConfigChanges) -> StoreResult<AppConfig> {
        let row = AppConfigChangesRow::from(changes);
        self.run_blocking(move |connection| {
            ensure_config_row(connection).map_err(StoreError::persistence)?;
            if row.is_empty() {
                return load_config_row(connection).map_err(StoreError::persistence);
            }
            diesel::update(app_config::table.find(SINGLETON_CONFIG_ID))
                .set(&row)
                .returning(AppConfigRow::as_returning())
                .get_result::<AppConfigRow>(connection)
                .map(AppConfig::from)
                .map_err(StoreError::persistence)
        })
        .await
    }

    async fn upsert_app_config(&self, config: AppConfig) -> StoreResult<AppConfig> {
        let row = AppConfigRow::from_config(SINGLETON_CONFIG_ID, config);
        self.run_blocking(move |connection| {
            diesel::insert_into(app_config::table)
                .values(&row)
                .on_conflict(app_config::id)
                .do_update()
                .set(&row)
                .returning(AppConfigRow::as_returning())
                .get_result::<AppConfigRow>(connection)
                .map(AppConfig::from)
                .map_err(StoreError::persistence)
        })
        .await
    }
}
