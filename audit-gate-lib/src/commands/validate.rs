use super::Host;
use super::common::{LogLevel, init_logging};
use crate::Result;
use crate::config::{ConfigSource, DEFAULT_CONFIG_PATH};
use crate::exceptions::{ExceptionStatus, ExceptionValue};
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use core::fmt::Write as _;
use std::io::Write;

#[derive(Parser, Debug, Default)]
pub struct ValidateArgs {
    /// Path to the exception configuration (default is `.nsprc`)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub config_file: Option<String>,

    /// Exit with status code 1 if any exception has expired or has an unreadable expiry
    #[arg(long)]
    pub error_if_expired: bool,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Load an exception configuration and report the state of every entry.
///
/// # Errors
///
/// Returns an error if the configuration cannot be used, or if `--error-if-expired` is set and
/// some entry has lapsed.
pub async fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs, now: DateTime<Utc>) -> Result<()> {
    init_logging(args.log_level);

    let path = Utf8PathBuf::from(
        args.config_file
            .as_deref()
            .filter(|path| !path.is_empty())
            .unwrap_or(DEFAULT_CONFIG_PATH),
    );

    let loaded = match ConfigSource::select(&path) {
        Ok(source) => source.load(&*host, &path).await.map(|config| (source, config)),
        Err(e) => Err(e),
    };

    let (source, config) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            return Err(ohno::AppError::new(e));
        }
    };

    let Some(config) = config else {
        let _ = writeln!(host.output(), "No exception configuration found at '{path}'");
        return Ok(());
    };

    let mut report = String::new();
    let mut suppressing = 0;
    let mut lapsed = 0;

    let _ = writeln!(report, "Loaded {source} '{path}'");
    for (id, value) in config.iter() {
        let status = value.status(now);
        if status.suppresses() {
            suppressing += 1;
        }
        if matches!(status, ExceptionStatus::Expired | ExceptionStatus::InvalidExpiry) {
            lapsed += 1;
        }
        let _ = writeln!(report, "  {}", describe(id, value, status));
    }
    let noun = if config.len() == 1 { "entry" } else { "entries" };
    let _ = writeln!(report, "{} {noun}, {suppressing} suppressing", config.len());

    let _ = write!(host.output(), "{report}");

    if args.error_if_expired && lapsed > 0 {
        let _ = writeln!(host.error(), "❌ {lapsed} exception(s) have expired or have an invalid expiry");
        host.exit(1);
        return Err(ohno::app_err!("{lapsed} exception(s) have expired or have an invalid expiry"));
    }

    Ok(())
}

fn describe(id: &str, value: &ExceptionValue, status: ExceptionStatus) -> String {
    let mut line = format!("{id}: {status}");

    if let Some(expiry) = value.expiry() {
        let _ = write!(line, " (expiry {expiry})");
    }

    if let Some(notes) = value.notes().filter(|notes| !notes.is_empty()) {
        let _ = write!(line, " - {notes}");
    }

    line
}
