//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod command_runner;
pub mod instance_launcher;
pub mod json_fetcher;
pub mod price_source;
pub mod progress;
