//! Application services for board state and profile orchestration.

mod board;
mod profile;

pub use board::{BoardError, BoardResult, BoardService, LoadState};
pub use profile::{LoadedProfile, ProfileError, ProfileResult, ProfileService};
