//! Shared provider traits for dependency injection.
//!
//! External state the pipeline reads (currently only the wall clock) sits
//! behind these traits so tests can pin it.

use chrono::{DateTime, Utc};

/// Trait for providing timestamps.
///
/// # Example
///
/// ```
/// use codeforge::providers::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// assert!(clock.now().timestamp() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Default clock backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
