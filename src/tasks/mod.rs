//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Sweep: evicts expired cache entries and idle rate-limit clients

mod sweep;

pub use sweep::{spawn_sweeper, Sweep, SweepTask};
