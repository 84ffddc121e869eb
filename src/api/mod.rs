//! API Lambda handler and request processing

pub mod applicants_handler;
pub mod auth_handler;
pub mod context;
pub mod handler;
pub mod helpers;
pub mod interactions_handler;
pub mod parsing;

// Re-export the main handler for convenience
pub use context::AppContext;
pub use handler::{handler, route};
