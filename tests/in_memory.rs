//! In-memory adapter integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `board_flow_tests`: bulk load, task lifecycle, reordering, rollback
//! - `config_admin_tests`: config collections and the app-config singleton
//! - `profile_flow_tests`: sessions, profiles, avatars

mod in_memory {
    pub mod helpers;

    mod board_flow_tests;
    mod config_admin_tests;
    mod profile_flow_tests;
}
