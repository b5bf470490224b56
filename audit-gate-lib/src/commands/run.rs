//! Command dispatch logic for audit-gate

use super::{ResolveArgs, ValidateArgs, process_resolve, validate_config};
use crate::{Host, Result};
use chrono::Utc;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "audit-gate", author, version, long_about = None)]
#[command(about = "Prepare `npm audit` runs with an exception list")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the audit command, level, exceptions, ignored modules, and columns
    Resolve(Box<ResolveArgs>),
    /// Check an exception configuration and report the state of each entry
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let now = Utc::now();

    match &Cli::parse_from(args).command {
        Command::Resolve(resolve_args) => process_resolve(host, resolve_args, now).await,
        Command::Validate(validate_args) => validate_config(host, validate_args, now).await,
    }
}
