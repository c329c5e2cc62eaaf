//! Color Family Classifier - command line front end.

use clap::{Parser, Subcommand};
use colorfamily::cli::{
    AnalyzeArgs, BatchArgs, ClassifyArgs, CliResult, ConfigArgs, ExitCode, FamiliesArgs,
};
use colorfamily::constants::APP_BINARY_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Classify colors into named families and sub-families
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one or more colors
    Classify(ClassifyArgs),
    /// Show a detailed breakdown of one color
    Analyze(AnalyzeArgs),
    /// Classify every color in a CSV or spreadsheet file
    Batch(BatchArgs),
    /// List main families and their sub-families
    Families(FamiliesArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Classify(args) => args.execute(),
            Self::Analyze(args) => args.execute(),
            Self::Batch(args) => args.execute(),
            Self::Families(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e}");
        std::process::exit(e.code.code());
    }

    std::process::exit(ExitCode::Success.code());
}
