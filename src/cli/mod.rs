//! CLI command handlers.
//!
//! Each subcommand is a clap `Args` struct with an `execute` method that
//! returns a [`CliResult`]. Results go to stdout; logs and progress go to
//! stderr.

pub mod analyze;
pub mod batch;
pub mod classify;
pub mod common;
pub mod config;
pub mod families;

pub use analyze::AnalyzeArgs;
pub use batch::BatchArgs;
pub use classify::ClassifyArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use families::FamiliesArgs;
