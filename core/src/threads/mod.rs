//! Thread registry and QTE gate
//!
//! This module provides:
//! - **ThreadRegistry**: The boss's N intact/broken thread slots
//! - **QteGate / QteSession**: The single timed thread-break window
//! - **QteOutcome**: First-class success/failure resolution

mod qte;
mod registry;


pub use qte::{QteGate, QteOutcome, QteSession};
pub use registry::{Thread, ThreadRegistry};
