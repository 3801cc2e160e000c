//! Fitrkr Athena - Fitness tracking core
//!
//! The user aggregate and its two temporal engines: the subscription
//! lifecycle (plan tier, billing period, trial, renewal, expiry) and the
//! workout streak tracker. Engines are pure functions of state plus an
//! explicit timestamp; handlers wire them to a repository and a clock.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
