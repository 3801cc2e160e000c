//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates the user aggregate's engines against the repository and
//! clock ports. Command handlers write, query handlers read.

pub mod handlers;

pub use handlers::*;
