//! Health tracking
//!
//! This module provides:
//! - **HealthTracker**: Current/max health, invulnerability, the monotonic
//!   break-threshold pointer, and the latched (deferred) death notification

mod tracker;


pub use tracker::HealthTracker;
