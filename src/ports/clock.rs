//! Clock port - the source of "now" for application handlers.
//!
//! Domain operations take time as a parameter; handlers sample it here once
//! per command so tests can pin it.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
