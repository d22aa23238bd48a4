//! Core domain concepts shared across the pricing and provisioning subdomains.
//!
//! - [`error::DomainError`]: domain-level errors

pub mod error;
