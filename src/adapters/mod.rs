//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory persistence
//! - `clock` - System and fixed clocks

pub mod clock;
pub mod memory;

pub use clock::{FixedClock, SystemClock};
pub use memory::InMemoryUserRepository;
