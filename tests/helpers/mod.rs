//! Test helpers module
//!
//! This module provides utilities and helpers for testing the ModBuddy application.
//! It includes a recording chat gateway, a mock Bot API server, and test context setup.

#![allow(dead_code)]

pub mod recording_gateway;
pub mod telegram_mock;
pub mod test_context;
pub mod test_data;

pub use recording_gateway::*;
pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
