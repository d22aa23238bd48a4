//! Console output formatter for comparison and deploy results

use cloudcorp_application::ComparisonReport;
use cloudcorp_domain::{
    PriceQuote, ProvisioningDefaults, ProvisioningOutcome, ProvisioningRequest, RankingResult,
    ResourceCategory,
};
use colored::Colorize;

/// Width of the category column
const LABEL_WIDTH: usize = 18;
/// Width of each provider column
const CELL_WIDTH: usize = 20;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Table followed by the per-category winners
    pub fn format_report(report: &ComparisonReport) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Cloud Price Comparison"));
        output.push('\n');
        output.push_str(&Self::format_table(report));
        output.push('\n');
        output.push_str(&Self::section_header("Cheapest Provider"));
        output.push_str(&Self::format_rankings(&report.rankings));
        output.push_str(&Self::footer());
        output
    }

    /// Price table: one row per category, one column per provider.
    ///
    /// Missing prices are shown as `-`; each row's winner is highlighted.
    pub fn format_table(report: &ComparisonReport) -> String {
        let mut output = String::new();

        output.push_str(
            &format!("{:<width$}", "Category", width = LABEL_WIDTH)
                .bold()
                .to_string(),
        );
        for provider in &report.providers {
            output.push_str(
                &format!("{:>width$}", provider.display_name(), width = CELL_WIDTH)
                    .bold()
                    .to_string(),
            );
        }
        output.push('\n');

        for (category, row) in report.table.rows() {
            let winner = report
                .rankings
                .iter()
                .find(|r| r.category == category)
                .and_then(|r| r.winner);

            output.push_str(&format!(
                "{:<width$}",
                category.display_name(),
                width = LABEL_WIDTH
            ));
            for provider in &report.providers {
                let cell = format!(
                    "{:>width$}",
                    Self::price_cell(row.get(provider)),
                    width = CELL_WIDTH
                );
                if winner == Some(*provider) {
                    output.push_str(&cell.green().bold().to_string());
                } else if row.get(provider).is_some_and(PriceQuote::is_available) {
                    output.push_str(&cell);
                } else {
                    output.push_str(&cell.dimmed().to_string());
                }
            }
            output.push('\n');
        }

        output
    }

    /// One line per category naming the cheapest provider
    pub fn format_rankings(rankings: &[RankingResult]) -> String {
        let mut output = String::new();
        for ranking in rankings {
            output.push_str(&format!("{}\n", Self::ranking_line(ranking)));
        }
        output
    }

    fn ranking_line(ranking: &RankingResult) -> String {
        let label = format!("{}:", ranking.category.display_name());
        match (ranking.winner, ranking.price) {
            (Some(winner), Some(price)) => format!(
                "  {:<width$} {} @ {}",
                label,
                winner.display_name().green().bold(),
                Self::price(price, ranking.category),
                width = LABEL_WIDTH
            ),
            _ => format!(
                "  {:<width$} {}",
                label,
                "No valid data found".yellow(),
                width = LABEL_WIDTH
            ),
        }
    }

    fn price_cell(quote: Option<&PriceQuote>) -> String {
        match quote.and_then(|q| q.unit_price.map(|p| (p, q.category))) {
            Some((price, category)) => Self::price(price, category),
            None => "-".to_string(),
        }
    }

    fn price(price: f64, category: ResourceCategory) -> String {
        format!("${}/{}", price, category.unit().suffix())
    }

    /// Format as JSON
    pub fn format_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Region menu shown by the deploy wizard
    pub fn format_region_menu(defaults: &ProvisioningDefaults) -> String {
        let mut output = format!("{}\n", "Regions:".cyan().bold());
        for (index, region) in defaults.regions.iter().enumerate() {
            let marker = if region.region == defaults.default_region {
                " (default)"
            } else {
                ""
            };
            output.push_str(&format!(
                "  {}. {} [{}]{}\n",
                index + 1,
                region.region,
                region.image_id,
                marker
            ));
        }
        output
    }

    /// Resolved request, shown before the confirmation gate
    pub fn format_request(request: &ProvisioningRequest) -> String {
        let mut output = Self::section_header("Launch Request");
        let fields = [
            ("Instance type", request.instance_type.clone()),
            ("Region", request.region.clone()),
            ("Image", request.image_id.clone()),
            ("Storage", format!("{} GB", request.storage_gb)),
            ("Key pair", request.key_name.clone()),
            ("Security group", request.security_group_id.clone()),
        ];
        for (name, value) in fields {
            let value = if value.trim().is_empty() {
                "(missing)".red().to_string()
            } else {
                value
            };
            let name = format!("{:<16}", format!("{}:", name));
            output.push_str(&format!("  {}{}\n", name.cyan(), value));
        }
        output
    }

    /// Launch result: raw provider output on success, the error otherwise
    pub fn format_outcome(outcome: &ProvisioningOutcome) -> String {
        if outcome.succeeded {
            format!(
                "{}\n{}\n",
                "Instance launch accepted.".green().bold(),
                outcome.raw_output.trim_end()
            )
        } else {
            format!(
                "{} {}\n",
                "Launch failed:".red().bold(),
                outcome.error_message.as_deref().unwrap_or("unknown error")
            )
        }
    }

    /// Cancellation notice listing how many quotes were collected
    pub fn format_cancelled(collected: usize) -> String {
        format!(
            "{} ({} quotes collected)\n",
            "Comparison cancelled.".yellow().bold(),
            collected
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60).cyan();
        format!("{}\n{:^60}\n{}\n", line, title.cyan().bold(), line)
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("[ {} ]", title).blue().bold())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
