//! Task board tracking: classification, ordering, and store sync.
//!
//! Tasks carry a fractional `position` sort key so a drag-and-drop move
//! only rewrites the moved row; the board service keeps an in-process cache
//! synchronised with the remote store, applying reorders optimistically and
//! rolling back on persist failure. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
