use super::Host;
use super::common::{AuditArgs, LogLevel, init_logging};
use crate::Result;
use crate::resolve::{AuditOptions, ResolvedInput, resolve_input};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use core::fmt::Write as _;
use ohno::IntoAppError;
use std::io::Write;

/// How resolved input is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One labelled line per setting
    #[default]
    Text,

    /// A JSON object
    Json,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub audit: AuditArgs,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Resolve the audit input described by `args` and write it to the host's output.
///
/// # Errors
///
/// Returns an error if the exception configuration cannot be used or the output cannot be rendered.
pub async fn process_resolve<H: Host>(host: &mut H, args: &ResolveArgs, now: DateTime<Utc>) -> Result<()> {
    init_logging(args.log_level);

    let options = AuditOptions::from(&args.audit);
    let rendered = match resolve_input(&*host, &options, now, |resolved| render(&resolved, args.format)).await {
        Ok(rendered) => rendered?,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ {e}");
            host.exit(1);
            return Err(ohno::AppError::new(e));
        }
    };

    let _ = write!(host.output(), "{rendered}");
    Ok(())
}

fn render(resolved: &ResolvedInput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(resolved)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(resolved).into_app_err("serializing resolved input")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn render_text(resolved: &ResolvedInput) -> String {
    let mut s = String::new();

    let _ = writeln!(s, "Audit command:    {}", resolved.audit_command);
    let _ = writeln!(s, "Audit level:      {}", resolved.audit_level);
    let _ = writeln!(s, "Exception IDs:    {}", list(&resolved.exception_ids));
    let _ = writeln!(s, "Ignored modules:  {}", list(&resolved.ignored_modules));
    let _ = writeln!(s, "Included columns: {}", list(&resolved.included_columns));

    s
}

fn list(items: &[String]) -> String {
    if items.iter().all(String::is_empty) {
        "(none)".to_owned()
    } else {
        items.join(", ")
    }
}
