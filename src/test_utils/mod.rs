//! Test utilities shared by unit and route tests.
//!
//! This module provides:
//! - Test data factories with sensible defaults
//! - In-memory implementations of the persistence and email ports
//! - A builder for `AppState` backed by those mocks

mod app_state_builder;
mod factories;
mod mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use mocks::*;
