//! In-memory adapter implementations of the board ports.

mod auth;
mod blobs;
mod store;

pub use auth::InMemoryAuthGateway;
pub use blobs::InMemoryBlobStorage;
pub use store::InMemoryStore;
