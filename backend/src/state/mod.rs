//! State management module
//!
//! Holds the shared router state

/// Router state shared by request handlers
pub mod app_state;

pub use app_state::AppState;
