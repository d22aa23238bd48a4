//! CLI entrypoint for cloudcorp
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow};
use clap::Parser;
use cloudcorp_application::{
    ComparePricesError, ComparePricesInput, ComparePricesUseCase, ComparisonReport,
    InstanceLauncher, NoProgress, PricingParams, ProgressNotifier, ProvisionInstanceUseCase,
};
use cloudcorp_domain::{OutputFormat, ProvisioningInput, ResourceCategory};
use cloudcorp_infrastructure::{
    AwsCliInstanceLauncher, ConfigLoader, FileConfig, PriceSourceRegistry, ProcessCommandRunner,
    ReqwestJsonFetcher,
};
use cloudcorp_presentation::{
    Cli, Command, ConsoleFormatter, ProgressReporter, Prompter, SimpleProgress,
};
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Exit status after Ctrl-C, as a shell reports SIGINT
const EXIT_CANCELLED: u8 = 130;

/// How a comparison ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Finished,
    Cancelled,
}

impl From<Completion> for ExitCode {
    fn from(completion: Completion) -> Self {
        match completion {
            Completion::Finished => ExitCode::SUCCESS,
            Completion::Cancelled => ExitCode::from(EXIT_CANCELLED),
        }
    }
}

/// What a Ctrl-C should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterruptAction {
    /// Abandon the comparison in flight and print what was collected
    Cancel,
    /// Leave the process, as the default SIGINT handler would
    Exit,
}

/// Routes Ctrl-C to the comparison in flight, if any.
///
/// Once the signal is being listened for, the default handler no longer
/// ends the process, so every signal outside a comparison (and a repeated
/// one during it) exits explicitly.
#[derive(Clone, Default)]
struct Interrupts {
    active: Arc<Mutex<Option<CancellationToken>>>,
}

impl Interrupts {
    /// Listen for Ctrl-C for the rest of the process
    fn watch(&self) {
        let interrupts = self.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                match interrupts.interrupt() {
                    InterruptAction::Cancel => warn!("Interrupted, abandoning outstanding lookups"),
                    InterruptAction::Exit => std::process::exit(i32::from(EXIT_CANCELLED)),
                }
            }
        });
    }

    /// Start a comparison; its token is cancelled by the next Ctrl-C
    fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Ok(mut active) = self.active.lock() {
            *active = Some(token.clone());
        }
        token
    }

    /// The comparison is over; Ctrl-C exits again
    fn end(&self) {
        if let Ok(mut active) = self.active.lock() {
            *active = None;
        }
    }

    fn interrupt(&self) -> InterruptAction {
        let Ok(active) = self.active.lock() else {
            return InterruptAction::Exit;
        };
        match active.as_ref() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                InterruptAction::Cancel
            }
            _ => InterruptAction::Exit,
        }
    }
}

/// Settings that shape what gets printed
#[derive(Debug, Clone, Copy)]
struct OutputSettings {
    format: OutputFormat,
    show_progress: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; keep the guard so the
    // file writer flushes on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting cloudcorp");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    if !config.output.color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let output = OutputSettings {
        format,
        show_progress: !cli.quiet && config.output.show_progress,
    };

    for tool in [&config.tools.aws, &config.tools.gcloud] {
        if !ProcessCommandRunner::is_command_available(tool) {
            info!("{} not found; prices it provides will be unavailable", tool);
        }
    }

    // === Dependency Injection ===
    let compare = build_compare_use_case(&config)?;
    let provision = build_provision_use_case(&config);

    let interrupts = Interrupts::default();
    interrupts.watch();

    match cli.command {
        Some(Command::Compare(args)) => {
            let completion = run_compare(&compare, args.selected(), output, &interrupts).await?;
            Ok(completion.into())
        }
        Some(Command::Deploy(args)) => {
            let mut prompter = Prompter::stdio();
            run_deploy(&provision, &mut prompter, args.to_input(), args.yes, output).await
        }
        None => {
            let mut prompter = Prompter::stdio();
            let categories = prompter.prompt_categories()?;
            let completion = run_compare(&compare, categories, output, &interrupts).await?;
            if completion == Completion::Cancelled {
                return Ok(completion.into());
            }

            if prompter.confirm("Deploy an EC2 instance now?")? {
                run_deploy(
                    &provision,
                    &mut prompter,
                    ProvisioningInput::default(),
                    false,
                    output,
                )
                .await
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "cloudcorp.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn build_compare_use_case(config: &FileConfig) -> Result<ComparePricesUseCase> {
    // Lookups are bounded by the use case's per-call timeout
    let runner = Arc::new(ProcessCommandRunner::new());
    let fetcher = Arc::new(ReqwestJsonFetcher::new(Some(config.pricing.timeout()))?);

    let sources = PriceSourceRegistry::new(runner, fetcher)
        .with_tools(&config.tools)
        .build(&config.pricing.sources)?;

    let params = PricingParams::default()
        .with_lookup_timeout(Some(config.pricing.timeout()))
        .with_providers(config.pricing.providers.clone());

    Ok(ComparePricesUseCase::new(sources).with_params(params))
}

fn build_provision_use_case(
    config: &FileConfig,
) -> ProvisionInstanceUseCase<AwsCliInstanceLauncher> {
    let runner = Arc::new(
        ProcessCommandRunner::new().with_timeout(Some(config.provisioning.launch_timeout())),
    );
    let launcher = AwsCliInstanceLauncher::new(runner).with_program(&config.tools.aws);

    ProvisionInstanceUseCase::new(Arc::new(launcher), config.provisioning.to_defaults())
}

async fn run_compare(
    use_case: &ComparePricesUseCase,
    categories: impl IntoIterator<Item = ResourceCategory>,
    output: OutputSettings,
    interrupts: &Interrupts,
) -> Result<Completion> {
    let input = ComparePricesInput::new(categories);

    let progress: Box<dyn ProgressNotifier> = if !output.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let cancel = interrupts.begin();
    let result = use_case
        .execute_with_progress(input, progress.as_ref(), &cancel)
        .await;
    interrupts.end();

    match result {
        Ok(report) => {
            print_report(&report, output.format);
            Ok(Completion::Finished)
        }
        Err(ComparePricesError::Cancelled { partial }) => {
            eprint!("{}", ConsoleFormatter::format_cancelled(partial.len()));
            let report = ComparisonReport::new(use_case.providers().to_vec(), partial);
            print_report(&report, output.format);
            Ok(Completion::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(report: &ComparisonReport, format: OutputFormat) {
    match format {
        OutputFormat::Table => print!("{}", ConsoleFormatter::format_report(report)),
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(report)),
    }
}

async fn run_deploy<L, R, W>(
    use_case: &ProvisionInstanceUseCase<L>,
    prompter: &mut Prompter<R, W>,
    prefilled: ProvisioningInput,
    assume_yes: bool,
    output: OutputSettings,
) -> Result<ExitCode>
where
    L: InstanceLauncher + 'static,
    R: BufRead,
    W: Write,
{
    let answers = prompter.prompt_provisioning_input(use_case.defaults(), prefilled)?;
    let request = use_case.resolve(&answers);

    if !assume_yes {
        let summary = ConsoleFormatter::format_request(&request);
        write!(prompter.output(), "{}", summary)?;
        if !prompter.confirm("Launch this instance?")? {
            writeln!(prompter.output(), "Aborted.")?;
            return Ok(ExitCode::SUCCESS);
        }
    }

    let outcome = use_case.execute(&request).await;
    match output.format {
        OutputFormat::Table => print!("{}", ConsoleFormatter::format_outcome(&outcome)),
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&outcome)),
    }

    Ok(if outcome.succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
