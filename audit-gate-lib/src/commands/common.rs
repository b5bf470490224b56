//! Arguments and setup shared between commands.

use crate::resolve::AuditOptions;
use clap::{Args, ValueEnum};

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    /// No logging output
    #[default]
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Minimum severity that fails the audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AuditLevel {
    /// Fail on any finding
    Info,

    /// Fail on low severity findings and above
    Low,

    /// Fail on moderate severity findings and above
    Moderate,

    /// Fail on high severity findings and above
    High,

    /// Fail on critical findings only
    Critical,
}

/// Audit flags shared by every command that resolves audit input
#[derive(Args, Debug, Default)]
pub struct AuditArgs {
    /// Audit production dependencies only
    #[arg(long, short = 'p')]
    pub production: bool,

    /// Registry URL passed to `npm audit`
    #[arg(long, short = 'r', value_name = "URL")]
    pub registry: Option<String>,

    /// Minimum severity that fails the audit (defaults to `NPM_CONFIG_AUDIT_LEVEL`, then `info`)
    #[arg(long, short = 'l', value_name = "LEVEL")]
    pub level: Option<AuditLevel>,

    /// Path to the exception configuration (default is `.nsprc`)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub config_file: Option<String>,

    /// Comma-separated finding IDs to suppress
    #[arg(long, short = 'x', value_name = "IDS", allow_hyphen_values = true)]
    pub exclude: Option<String>,

    /// Comma-separated modules whose findings are ignored
    #[arg(long, short = 'm', value_name = "MODULES")]
    pub module_ignore: Option<String>,

    /// Comma-separated result columns to show
    #[arg(long, short = 'i', value_name = "COLUMNS")]
    pub include_columns: Option<String>,
}

impl From<&AuditArgs> for AuditOptions {
    fn from(args: &AuditArgs) -> Self {
        Self {
            production: args.production,
            registry: args.registry.clone(),
            level: args.level.map(|level| level.to_string()),
            config_file: args.config_file.clone(),
            exclude: args.exclude.clone(),
            module_ignore: args.module_ignore.clone(),
            include_columns: args.include_columns.clone(),
        }
    }
}

/// Set up `env_logger` at the requested level. `RUST_LOG` takes precedence when set.
///
/// Only the first call in a process has any effect.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
