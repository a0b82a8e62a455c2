//! Platform-agnostic trait abstractions
//!
//! Traits that decouple control logic from platform services so the
//! whole crate can be exercised on host.

mod time;

pub use time::{MockTime, TimeSource};
