//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UserRepository` - Load/store user snapshots by id
//! - `Clock` - Injected wall-clock time

mod clock;
mod user_repository;

pub use clock::Clock;
pub use user_repository::UserRepository;
