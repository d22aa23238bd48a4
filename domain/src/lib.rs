//! Domain layer for cloudcorp
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Pricing
//!
//! - **PriceQuote**: one provider's unit price for one [`ResourceCategory`],
//!   possibly absent when the source could not produce one
//! - **PriceTable**: every collected quote, keyed by category then provider
//! - **Ranking**: the cheapest provider per category, ties going to the
//!   earlier provider in [`Provider`] order
//!
//! ## Provisioning
//!
//! - **Resolver**: merges raw user answers with [`ProvisioningDefaults`]
//! - **ProvisioningRequest**: the resolved EC2 launch request, validated
//!   before anything is sent to the provider

pub mod config;
pub mod core;
pub mod pricing;
pub mod provisioning;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use pricing::{
    PriceQuote, PriceRow, PriceTable, PriceUnit, Provider, RankingResult, ResourceCategory, rank,
    rank_table,
};
pub use provisioning::{
    ProvisioningDefaults, ProvisioningInput, ProvisioningOutcome, ProvisioningRequest,
    RegionImage, resolve,
};
