//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, IDs, errors, state machine trait)
//! - `user` - User aggregate with the subscription lifecycle and workout streak engines
//!
//! Nothing in here performs I/O or reads the clock.

pub mod foundation;
pub mod user;
