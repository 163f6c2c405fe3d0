//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry Sweep: Removes expired cache entries that are never read again

mod sweep;

pub use sweep::spawn_sweep_task;
