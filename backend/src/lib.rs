//! Agent Chat Backend Library
//!
//! This library exposes modules for testing and for the dashboard, which
//! shares the request type and model catalog.
//! The main binary is in `src/main.rs`.

pub mod agent;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
/// Shared router state
pub mod state;
pub mod supervisor;
