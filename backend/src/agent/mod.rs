//! Agent module
//!
//! Everything that turns a validated chat request into a response payload:
//! the `AgentResponder` seam, the bundled provider-backed agent, and the
//! upstream HTTP clients it uses.

pub mod completion;
pub mod error;
pub mod responder;
pub mod search;
pub mod types;

pub use error::AgentError;
pub use responder::{AgentResponder, ProviderAgent};
