//! In-memory adapters - implementations of persistence ports without a database.
//!
//! - `InMemoryUserRepository` - HashMap-backed `UserRepository`

mod user_repository;

pub use user_repository::InMemoryUserRepository;
