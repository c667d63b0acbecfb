//! Port contracts for board task tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod auth;
pub mod blobs;
pub mod store;

pub use auth::{AuthError, AuthGateway, AuthResult, Credentials, Profile, Session};
pub use blobs::{BlobError, BlobResult, BlobStorage};
pub use store::{ConfigStore, StoreError, StoreResult, TaskStore};
