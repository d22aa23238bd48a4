//! Compare Prices use case
//!
//! Queries every configured price source concurrently, collects one quote
//! per (category, provider) cell and ranks each category.

use crate::config::PricingParams;
use crate::ports::price_source::{PriceSource, SourceError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use chrono::{DateTime, Utc};
use cloudcorp_domain::{
    PriceQuote, PriceTable, Provider, RankingResult, ResourceCategory, rank_table,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during price comparison
#[derive(Error, Debug)]
pub enum ComparePricesError {
    #[error("No resource categories selected")]
    NoCategories,

    /// Aggregation was cancelled; `partial` holds only the cells collected
    /// before cancellation.
    #[error("Price comparison cancelled with {} quotes collected", .partial.len())]
    Cancelled { partial: PriceTable },
}

/// Input for the ComparePrices use case
#[derive(Debug, Clone)]
pub struct ComparePricesInput {
    pub categories: BTreeSet<ResourceCategory>,
}

impl ComparePricesInput {
    pub fn new(categories: impl IntoIterator<Item = ResourceCategory>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
        }
    }
}

/// Aggregated table plus the cheapest provider per category
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub providers: Vec<Provider>,
    pub table: PriceTable,
    pub rankings: Vec<RankingResult>,
}

impl ComparisonReport {
    /// Rank `table` and stamp the report with the current time
    pub fn new(providers: Vec<Provider>, table: PriceTable) -> Self {
        Self {
            generated_at: Utc::now(),
            providers,
            rankings: rank_table(&table),
            table,
        }
    }
}

/// Use case for comparing unit prices across providers
pub struct ComparePricesUseCase {
    sources: BTreeMap<(ResourceCategory, Provider), Arc<dyn PriceSource>>,
    params: PricingParams,
}

impl ComparePricesUseCase {
    /// Create the use case from one source per (provider, category) pair.
    ///
    /// If two sources claim the same pair, the later one is used.
    pub fn new(sources: Vec<Arc<dyn PriceSource>>) -> Self {
        let mut by_cell = BTreeMap::new();
        for source in sources {
            let key = (source.category(), source.provider());
            if let Some(replaced) = by_cell.insert(key, source) {
                debug!(
                    "Price source {} replaced for {} / {}",
                    replaced.describe(),
                    key.0,
                    key.1
                );
            }
        }
        Self {
            sources: by_cell,
            params: PricingParams::default(),
        }
    }

    pub fn with_params(mut self, params: PricingParams) -> Self {
        self.params = params;
        self
    }

    /// Providers compared for each category, in column order
    pub fn providers(&self) -> &[Provider] {
        &self.params.providers
    }

    /// Execute the use case with default (no-op) progress and no cancellation
    pub async fn execute(
        &self,
        input: ComparePricesInput,
    ) -> Result<ComparisonReport, ComparePricesError> {
        self.execute_with_progress(input, &NoProgress, &CancellationToken::new())
            .await
    }

    /// Execute the use case with progress callbacks and cancellation
    pub async fn execute_with_progress(
        &self,
        input: ComparePricesInput,
        progress: &dyn ProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<ComparisonReport, ComparePricesError> {
        let table = self.aggregate(&input.categories, progress, cancel).await?;
        let report = ComparisonReport::new(self.params.providers.clone(), table);

        for ranking in &report.rankings {
            match (ranking.winner, ranking.price) {
                (Some(winner), Some(price)) => {
                    info!("Cheapest {}: {} @ {}", ranking.category, winner, price)
                }
                _ => info!("No valid price for {}", ranking.category),
            }
        }

        Ok(report)
    }

    /// Collect one quote per (requested category, provider) cell.
    ///
    /// Every lookup runs as its own task; a failed, missing or timed-out
    /// source yields an absent quote rather than an error.
    pub async fn aggregate(
        &self,
        categories: &BTreeSet<ResourceCategory>,
        progress: &dyn ProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<PriceTable, ComparePricesError> {
        if categories.is_empty() {
            return Err(ComparePricesError::NoCategories);
        }

        let providers = &self.params.providers;
        let total = categories.len() * providers.len();
        info!(
            "Collecting {} quotes for {} categories",
            total,
            categories.len()
        );
        progress.on_aggregation_start(total);

        let mut join_set = JoinSet::new();

        for &category in categories {
            for &provider in providers {
                let source = self.sources.get(&(category, provider)).cloned();
                let timeout = self.params.lookup_timeout;

                join_set.spawn(async move {
                    let result = match source {
                        Some(source) => lookup_with_timeout(source.as_ref(), timeout).await,
                        None => Err(SourceError::NotConfigured),
                    };
                    (category, provider, result)
                });
            }
        }

        let mut table = PriceTable::new();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                next = join_set.join_next() => Some(next),
            };

            let Some(next) = next else {
                join_set.abort_all();
                progress.on_aggregation_complete();
                warn!(
                    "Price comparison cancelled with {}/{} quotes collected",
                    table.len(),
                    total
                );
                return Err(ComparePricesError::Cancelled { partial: table });
            };

            let Some(joined) = next else {
                break;
            };

            match joined {
                Ok((category, provider, Ok(price))) => {
                    debug!("{} {} quoted {}", provider, category, price);
                    let quote = PriceQuote::available(provider, category, price);
                    progress.on_quote(&quote);
                    table.insert(quote);
                }
                Ok((category, provider, Err(e))) => {
                    info!("{} {} price unavailable: {}", provider, category, e);
                    progress.on_source_unavailable(provider, category, &e);
                    let quote = PriceQuote::unavailable(provider, category);
                    progress.on_quote(&quote);
                    table.insert(quote);
                }
                Err(e) => {
                    warn!("Price lookup task failed: {}", e);
                }
            }
        }

        // A panicked lookup task leaves its cell empty; it still counts as unavailable.
        for &category in categories {
            for &provider in providers {
                if table.get(category, provider).is_none() {
                    let quote = PriceQuote::unavailable(provider, category);
                    progress.on_quote(&quote);
                    table.insert(quote);
                }
            }
        }

        progress.on_aggregation_complete();
        Ok(table)
    }
}

async fn lookup_with_timeout(
    source: &dyn PriceSource,
    timeout: Option<Duration>,
) -> Result<f64, SourceError> {
    debug!("Looking up {}", source.describe());
    match timeout {
        Some(limit) => tokio::time::timeout(limit, source.lookup())
            .await
            .unwrap_or(Err(SourceError::Timeout(limit))),
        None => source.lookup().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ResourceCategory::{Compute, Storage, Vpn};

    enum Behavior {
        Price(f64),
        Fail,
        Hang,
        Panic,
    }

    struct StubSource {
        provider: Provider,
        category: ResourceCategory,
        behavior: Behavior,
        calls: Arc<AtomicUsize>,
    }

    impl StubSource {
        fn arc(
            provider: Provider,
            category: ResourceCategory,
            behavior: Behavior,
        ) -> Arc<dyn PriceSource> {
            Arc::new(Self {
                provider,
                category,
                behavior,
                calls: Arc::new(AtomicUsize::new(0)),
            })
        }
    }

    #[async_trait]
    impl PriceSource for StubSource {
        fn provider(&self) -> Provider {
            self.provider
        }

        fn category(&self) -> ResourceCategory {
            self.category
        }

        fn describe(&self) -> String {
            format!("stub({}, {})", self.provider, self.category)
        }

        async fn lookup(&self) -> Result<f64, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Price(p) => Ok(p),
                Behavior::Fail => Err(SourceError::NoMatchingRecord),
                Behavior::Hang => std::future::pending().await,
                Behavior::Panic => panic!("source exploded"),
            }
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        started: Mutex<Option<usize>>,
        quotes: Mutex<Vec<PriceQuote>>,
        failures: Mutex<Vec<(Provider, ResourceCategory)>>,
        completed: AtomicUsize,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_aggregation_start(&self, total_lookups: usize) {
            *self.started.lock().unwrap() = Some(total_lookups);
        }

        fn on_quote(&self, quote: &PriceQuote) {
            self.quotes.lock().unwrap().push(quote.clone());
        }

        fn on_source_unavailable(
            &self,
            provider: Provider,
            category: ResourceCategory,
            _error: &SourceError,
        ) {
            self.failures.lock().unwrap().push((provider, category));
        }

        fn on_aggregation_complete(&self) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn fixed_vpn_and_storage() -> Vec<Arc<dyn PriceSource>> {
        vec![
            StubSource::arc(Provider::Aws, Vpn, Behavior::Price(0.05)),
            StubSource::arc(Provider::Azure, Vpn, Behavior::Price(0.04)),
            StubSource::arc(Provider::Gcp, Vpn, Behavior::Price(0.05)),
            StubSource::arc(Provider::Aws, Storage, Behavior::Price(0.023)),
            StubSource::arc(Provider::Azure, Storage, Behavior::Price(0.0184)),
            StubSource::arc(Provider::Gcp, Storage, Behavior::Price(0.020)),
        ]
    }

    #[tokio::test]
    async fn test_compute_with_one_failed_provider() {
        let use_case = ComparePricesUseCase::new(vec![
            StubSource::arc(Provider::Aws, Compute, Behavior::Price(0.0116)),
            StubSource::arc(Provider::Azure, Compute, Behavior::Fail),
            StubSource::arc(Provider::Gcp, Compute, Behavior::Price(0.0076)),
        ]);

        let report = use_case
            .execute(ComparePricesInput::new([Compute]))
            .await
            .unwrap();

        assert_eq!(report.table.len(), 3);
        let azure = report.table.get(Compute, Provider::Azure).unwrap();
        assert!(!azure.is_available());
        assert_eq!(report.rankings.len(), 1);
        assert_eq!(report.rankings[0].winner, Some(Provider::Gcp));
        assert_eq!(report.rankings[0].price, Some(0.0076));
    }

    #[tokio::test]
    async fn test_vpn_and_storage_fixed_prices() {
        let use_case = ComparePricesUseCase::new(fixed_vpn_and_storage());

        let report = use_case
            .execute(ComparePricesInput::new([
                Vpn,
                Storage,
            ]))
            .await
            .unwrap();

        let winners: Vec<_> = report
            .rankings
            .iter()
            .map(|r| (r.category, r.winner, r.price))
            .collect();
        assert_eq!(
            winners,
            vec![
                (Vpn, Some(Provider::Azure), Some(0.04)),
                (Storage, Some(Provider::Azure), Some(0.0184)),
            ]
        );
    }

    #[tokio::test]
    async fn test_table_has_every_cell_even_when_sources_missing_or_failing() {
        let use_case = ComparePricesUseCase::new(vec![
            StubSource::arc(Provider::Aws, Vpn, Behavior::Fail),
            StubSource::arc(Provider::Gcp, Storage, Behavior::Panic),
        ]);
        let categories: BTreeSet<_> = ResourceCategory::ALL.into_iter().collect();
        let progress = RecordingProgress::default();

        let table = use_case
            .aggregate(&categories, &progress, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(table.len(), categories.len() * Provider::ALL.len());
        for category in &categories {
            for provider in Provider::ALL {
                assert!(table.get(*category, provider).is_some());
            }
        }
        for (_, row) in table.rows() {
            assert!(row.values().all(|q| !q.is_available()));
        }

        assert_eq!(*progress.started.lock().unwrap(), Some(9));
        assert_eq!(progress.quotes.lock().unwrap().len(), 9);
        // The panicked task reports no error; the other eight cells do.
        assert_eq!(progress.failures.lock().unwrap().len(), 8);
        assert_eq!(progress.completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unrequested_categories_are_not_queried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let compute: Arc<dyn PriceSource> = Arc::new(StubSource {
            provider: Provider::Aws,
            category: Compute,
            behavior: Behavior::Price(0.1),
            calls: Arc::clone(&calls),
        });
        let mut sources = fixed_vpn_and_storage();
        sources.push(compute);
        let use_case = ComparePricesUseCase::new(sources);

        let report = use_case
            .execute(ComparePricesInput::new([Vpn]))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(report.table.row(Compute).is_none());
        assert!(report.table.row(Storage).is_none());
        assert_eq!(report.table.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_selection_is_rejected() {
        let use_case = ComparePricesUseCase::new(fixed_vpn_and_storage());
        let err = use_case
            .execute(ComparePricesInput::new([]))
            .await
            .unwrap_err();
        assert!(matches!(err, ComparePricesError::NoCategories));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_source_times_out_as_absent() {
        let timeout = Some(Duration::from_secs(5));
        let use_case = ComparePricesUseCase::new(vec![
            StubSource::arc(Provider::Aws, Vpn, Behavior::Hang),
            StubSource::arc(Provider::Azure, Vpn, Behavior::Price(0.04)),
            StubSource::arc(Provider::Gcp, Vpn, Behavior::Price(0.05)),
        ])
        .with_params(PricingParams::default().with_lookup_timeout(timeout));
        let progress = RecordingProgress::default();

        let report = use_case
            .execute_with_progress(
                ComparePricesInput::new([Vpn]),
                &progress,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let aws = report.table.get(Vpn, Provider::Aws).unwrap();
        assert!(!aws.is_available());
        assert_eq!(report.rankings[0].winner, Some(Provider::Azure));
        assert_eq!(
            *progress.failures.lock().unwrap(),
            vec![(Provider::Aws, Vpn)]
        );
    }

    #[tokio::test]
    async fn test_cancellation_returns_partial_table() {
        let use_case = ComparePricesUseCase::new(vec![
            StubSource::arc(Provider::Aws, Vpn, Behavior::Price(0.05)),
            StubSource::arc(Provider::Azure, Vpn, Behavior::Price(0.04)),
            StubSource::arc(Provider::Gcp, Vpn, Behavior::Hang),
        ])
        .with_params(PricingParams::default().with_lookup_timeout(None));

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let categories: BTreeSet<_> = [Vpn].into_iter().collect();
        let err = use_case
            .aggregate(&categories, &NoProgress, &cancel)
            .await
            .unwrap_err();

        let ComparePricesError::Cancelled { partial } = err else {
            panic!("expected cancellation");
        };
        assert_eq!(partial.len(), 2);
        assert!(partial.get(Vpn, Provider::Aws).is_some());
        assert!(partial.get(Vpn, Provider::Gcp).is_none());
    }

    #[tokio::test]
    async fn test_provider_subset_limits_columns() {
        let use_case = ComparePricesUseCase::new(fixed_vpn_and_storage()).with_params(
            PricingParams::default().with_providers(vec![Provider::Aws, Provider::Gcp]),
        );

        let report = use_case
            .execute(ComparePricesInput::new([Vpn]))
            .await
            .unwrap();

        assert_eq!(report.table.len(), 2);
        // 0.05 tie between the two remaining providers goes to AWS
        assert_eq!(report.rankings[0].winner, Some(Provider::Aws));
    }
}
