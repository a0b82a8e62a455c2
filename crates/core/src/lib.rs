//! catapult_core - Pure no_std control logic for the catapult launcher
//!
//! This crate contains platform-agnostic control algorithms and types
//! that can be tested on host without any feature flags or hardware.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Platform services injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)
//! - [`actuator`]: Motor abstraction and the ganged four-motor drive
//! - [`parameters`]: Parameter store and launcher tuning block
//! - [`launcher`]: Mode state machine, launch sequencing, arbitration core
//! - [`input`]: Operator control mapping (mode select, manual nudge, launch)
//! - [`telemetry`]: Write-only observability sink
//! - [`scheduler`]: Control-task metadata and runtime statistics

#![no_std]

pub mod actuator;
pub mod input;
pub mod launcher;
pub mod parameters;
pub mod scheduler;
pub mod telemetry;
pub mod traits;
