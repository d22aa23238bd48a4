//! Progress notification port
//!
//! Defines the interface for reporting progress and source failures during
//! price aggregation. This is the diagnostic channel: primary output never
//! goes through it.

use crate::ports::price_source::SourceError;
use cloudcorp_domain::{PriceQuote, Provider, ResourceCategory};

/// Callback for progress updates during price aggregation
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called once before any lookup starts
    fn on_aggregation_start(&self, total_lookups: usize);

    /// Called as each quote is stored in the table
    fn on_quote(&self, quote: &PriceQuote);

    /// Called when a source failed and its quote was recorded as absent
    fn on_source_unavailable(
        &self,
        _provider: Provider,
        _category: ResourceCategory,
        _error: &SourceError,
    ) {
    }

    /// Called once aggregation ends, including when it is cancelled
    fn on_aggregation_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_aggregation_start(&self, _total_lookups: usize) {}
    fn on_quote(&self, _quote: &PriceQuote) {}
    fn on_aggregation_complete(&self) {}
}
