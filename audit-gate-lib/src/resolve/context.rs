use super::{AuditOptions, PRODUCTION_FLAG, ResolvedInput, build_audit_command, production_flag};
use crate::Host;
use crate::config::{ConfigError, ConfigSource, DEFAULT_CONFIG_PATH};
use crate::exceptions::resolve_exception_ids;
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};

const LOG_TARGET: &str = "   resolve";

/// Environment variable consulted when no audit level is given on the command line.
pub const AUDIT_LEVEL_ENV_VAR: &str = "NPM_CONFIG_AUDIT_LEVEL";

/// Audit level used when neither the command line nor the environment provides one.
pub const DEFAULT_AUDIT_LEVEL: &str = "info";

/// Turn command-line options into a [`ResolvedInput`] and hand it to `continuation`.
///
/// Steps, in order:
///
/// 1. Build the audit command. The npm version is only probed when `production` is set.
/// 2. Pick the audit level: command line, then `NPM_CONFIG_AUDIT_LEVEL`, then `info`.
/// 3. Pick the configuration path: command line, then `.nsprc`.
/// 4. Load the exception configuration and merge it with `exclude`.
/// 5. Split `module_ignore` on commas verbatim; an absent value yields a single empty entry.
/// 6. Split `include_columns` on commas, trimming and dropping empty entries.
///
/// `continuation` runs exactly once, and only if resolution succeeds. Nothing is cached, so
/// every call reads the configuration afresh.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedConfigType`] if the configuration path has an unknown
/// extension and [`ConfigError::ConfigLoadFailure`] if a configuration module cannot be run.
/// A missing or malformed exception file is not an error.
pub async fn resolve_input<H, F, R>(host: &H, options: &AuditOptions, now: DateTime<Utc>, continuation: F) -> Result<R, ConfigError>
where
    H: Host,
    F: FnOnce(ResolvedInput) -> R,
{
    let production = if options.production {
        Some(detect_production_flag(host).await)
    } else {
        None
    };
    let audit_command = build_audit_command(production, options.registry.as_deref());

    let audit_level = resolve_audit_level(options.level.as_deref(), host.env_var(AUDIT_LEVEL_ENV_VAR));

    let config_path = resolve_config_path(options.config_file.as_deref());
    let source = ConfigSource::select(&config_path)?;
    let config = source.load(host, &config_path).await?;

    let cmd_exceptions = split_trimmed(options.exclude.as_deref());
    let exception_ids = resolve_exception_ids(config.as_ref(), &cmd_exceptions, now);

    let ignored_modules = split_verbatim(options.module_ignore.as_deref());
    let included_columns = split_trimmed(options.include_columns.as_deref());

    log::debug!(target: LOG_TARGET, "Audit command '{audit_command}' at level '{audit_level}'");

    Ok(continuation(ResolvedInput {
        audit_command,
        audit_level,
        exception_ids,
        ignored_modules,
        included_columns,
    }))
}

async fn detect_production_flag<H: Host>(host: &H) -> &'static str {
    match host.npm_version().await {
        Ok(version) => production_flag(&version),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not determine the npm version, assuming '{PRODUCTION_FLAG}' is supported: {e:#}");
            PRODUCTION_FLAG
        }
    }
}

fn resolve_audit_level(cmd_level: Option<&str>, env_level: Option<String>) -> String {
    cmd_level
        .map(ToOwned::to_owned)
        .or(env_level)
        .filter(|level| !level.is_empty())
        .unwrap_or_else(|| DEFAULT_AUDIT_LEVEL.to_owned())
}

fn resolve_config_path(cmd_path: Option<&str>) -> Utf8PathBuf {
    Utf8PathBuf::from(cmd_path.filter(|path| !path.is_empty()).unwrap_or(DEFAULT_CONFIG_PATH))
}

fn split_trimmed(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn split_verbatim(value: Option<&str>) -> Vec<String> {
    value.unwrap_or_default().split(',').map(ToOwned::to_owned).collect()
}
