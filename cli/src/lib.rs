//! Headless driver for sever-core encounters
//!
//! Loads an encounter definition, runs a scripted fight against it, and
//! prints the signal stream. Useful for balance passes and for smoke-testing
//! definitions without the game client.

pub mod commands;
pub mod script;
