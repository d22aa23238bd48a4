//! Progress reporting for price aggregation
//!
//! Both reporters write to stderr so JSON or table output on stdout stays
//! clean.

use cloudcorp_application::{ProgressNotifier, SourceError};
use cloudcorp_domain::{PriceQuote, Provider, ResourceCategory};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

const BAR_TEMPLATE: &str =
    "{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Reports progress with an indicatif progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap()
            .progress_chars("=>-")
    }

    fn quote_label(quote: &PriceQuote) -> String {
        let provider = quote.provider.display_name();
        format!("{} {}", provider, quote.category.display_name())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_aggregation_start(&self, total_lookups: usize) {
        let pb = ProgressBar::new(total_lookups as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Fetching prices");
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_quote(&self, quote: &PriceQuote) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if quote.is_available() {
                format!("{} {}", "v".green(), Self::quote_label(quote))
            } else {
                format!("{} {}", "x".red(), Self::quote_label(quote))
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_source_unavailable(
        &self,
        provider: Provider,
        category: ResourceCategory,
        error: &SourceError,
    ) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.println(format!(
                "  {} {} {}: {}",
                "!".yellow(),
                provider.display_name(),
                category.display_name(),
                error
            ));
        }
    }

    fn on_aggregation_complete(&self) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_aggregation_start(&self, total_lookups: usize) {
        eprintln!(
            "{} {} ({} lookups)",
            "->".cyan(),
            "Fetching prices".bold(),
            total_lookups
        );
    }

    fn on_quote(&self, quote: &PriceQuote) {
        if quote.is_available() {
            eprintln!("  {} {}", "v".green(), ProgressReporter::quote_label(quote));
        } else {
            eprintln!(
                "  {} {} (unavailable)",
                "x".red(),
                ProgressReporter::quote_label(quote)
            );
        }
    }

    fn on_aggregation_complete(&self) {
        eprintln!();
    }
}
