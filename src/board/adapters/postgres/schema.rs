//! Diesel schema for board persistence.

diesel::table! {
    /// Task rows ordered by fractional position.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Free-text description.
        tarefa -> Text,
        /// Client reference.
        nome_cliente_id -> Uuid,
        /// Task-type reference.
        tipo_id -> Uuid,
        /// Requester reference.
        solicitado_por_id -> Uuid,
        /// Status reference.
        status_id -> Uuid,
        /// Optional external tracker link.
        runrunit_task -> Nullable<Text>,
        /// Fractional sort key.
        position -> Float8,
        /// Creation timestamp.
        criado_em -> Timestamptz,
        /// Last update timestamp.
        atualizado_em -> Timestamptz,
    }
}

diesel::table! {
    /// Client collection.
    clientes (id) {
        /// Item identifier.
        id -> Uuid,
        /// Display name.
        nome -> Text,
        /// Display colour.
        cor -> Text,
    }
}

diesel::table! {
    /// Task-type collection.
    tipos (id) {
        /// Item identifier.
        id -> Uuid,
        /// Display name.
        nome -> Text,
        /// Display colour.
        cor -> Text,
    }
}

diesel::table! {
    /// Requester collection.
    solicitantes (id) {
        /// Item identifier.
        id -> Uuid,
        /// Display name.
        nome -> Text,
        /// Display colour.
        cor -> Text,
    }
}

diesel::table! {
    /// Status collection.
    statuses (id) {
        /// Item identifier.
        id -> Uuid,
        /// Display name.
        nome -> Text,
        /// Display colour.
        cor -> Text,
    }
}

diesel::table! {
    /// App-config singleton (single row, fixed id).
    app_config (id) {
        /// Singleton row identifier, always 1.
        id -> Int4,
        /// Status counted as active work.
        in_progress_status_id -> Nullable<Uuid>,
        /// Status routing tasks into history.
        entregue_status_id -> Nullable<Uuid>,
        /// Persisted table-view column order.
        table_column_order -> Nullable<Array<Text>>,
        /// Persisted kanban status column order.
        kanban_status_order -> Nullable<Array<Uuid>>,
    }
}
