//! Unit tests for the board module.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for assertion clarity"
)]

mod domain_tests;
mod profile_service_tests;
