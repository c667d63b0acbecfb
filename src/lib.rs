//! Quadro: kanban task tracker backend.
//!
//! This crate provides the domain and service layer of a task tracker:
//! tasks classified by client, type, requester, and status, ordered by a
//! fractional position key, cached in-process and synchronised with a
//! remote row store.
//!
//! # Architecture
//!
//! Quadro follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`board`]: Task classification, fractional ordering, and store sync

pub mod board;
