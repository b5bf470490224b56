//! Running JavaScript or TypeScript configuration modules.
//!
//! # Security boundary
//!
//! A configuration module is arbitrary code. It is only ever run when the user names it
//! explicitly with `--config-file`; modules are never discovered. The module is evaluated by the
//! Node.js runtime in a child process with the user's privileges, so it can do anything the user
//! can. What crosses back into this process is deliberately narrow: a single JSON document
//! written to the child's stdout, holding whether the module exports `requestNsprcFile` and, if
//! so, what that function returned. Output the module itself produces goes to the child's
//! stderr and is only surfaced when the module fails. The child exits as soon as the document
//! is written, whatever the module left running.

use super::ConfigError;
use camino::Utf8Path;
use core::time::Duration;
use serde::Deserialize;
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;

const LOG_TARGET: &str = "    config";

/// Upper bound on how long a configuration module may run.
const MODULE_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable through which the child process learns which module to load.
const MODULE_PATH_ENV_VAR: &str = "AUDIT_GATE_CONFIG_MODULE";

/// Loader evaluated by Node.js.
///
/// Keeps the real stdout for the envelope and points `process.stdout.write` at stderr before
/// the module is imported, so anything the module prints (including `console.log`) lands on
/// stderr. Accepts `requestNsprcFile` as a named export or as a property of the default export,
/// awaits its result, writes the envelope, and exits once it is flushed so timers or sockets
/// left open by the module cannot keep the child alive.
const LOADER_SCRIPT: &str = "
import { pathToFileURL } from 'node:url';
const writeEnvelope = process.stdout.write.bind(process.stdout);
process.stdout.write = process.stderr.write.bind(process.stderr);
const mod = await import(pathToFileURL(process.env.AUDIT_GATE_CONFIG_MODULE).href);
const request = typeof mod.requestNsprcFile === 'function'
  ? mod.requestNsprcFile
  : typeof mod.default?.requestNsprcFile === 'function' ? mod.default.requestNsprcFile : undefined;
const envelope = request === undefined
  ? { exported: false }
  : { exported: true, result: (await request()) ?? false };
writeEnvelope(JSON.stringify(envelope), () => process.exit(0));
";

/// What a configuration module handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOutput {
    /// The module does not export `requestNsprcFile`.
    NoExport,

    /// The value returned (or resolved) by `requestNsprcFile`.
    Returned(Value),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    exported: bool,
    #[serde(default)]
    result: Value,
}

/// Evaluate the configuration module at `path` and call its `requestNsprcFile` export.
///
/// # Errors
///
/// Returns [`ConfigError::ConfigLoadFailure`] if the module does not exist, Node.js cannot be
/// started, the module throws while loading or running, or it does not finish in time.
pub async fn run_config_module(path: &Utf8Path) -> Result<ModuleOutput, ConfigError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(ConfigError::load_failure(path, "file not found"));
    }

    log::info!(target: LOG_TARGET, "Running configuration module '{path}'");

    let child = Command::new("node")
        .args(node_args(path))
        .env(MODULE_PATH_ENV_VAR, path.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ConfigError::load_failure(path, format!("could not start node: {e}")))?;

    let output = match tokio::time::timeout(MODULE_TIMEOUT, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(ConfigError::load_failure(path, format!("node failed to run: {e}"))),
        Err(_) => {
            return Err(ConfigError::load_failure(
                path,
                format!("timed out after {} seconds", MODULE_TIMEOUT.as_secs()),
            ));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ConfigError::load_failure(path, format!("node exited with {}: {}", output.status, stderr.trim())));
    }

    parse_envelope(path, &output.stdout)
}

fn node_args(path: &Utf8Path) -> Vec<&'static str> {
    let mut args = vec!["--no-warnings"];
    if path.extension() == Some("ts") {
        args.push("--experimental-strip-types");
    }

    args.extend(["--input-type=module", "--eval", LOADER_SCRIPT]);
    args
}

fn parse_envelope(path: &Utf8Path, stdout: &[u8]) -> Result<ModuleOutput, ConfigError> {
    let envelope: Envelope = serde_json::from_slice(stdout)
        .map_err(|e| ConfigError::load_failure(path, format!("unexpected output from module loader: {e}")))?;

    if envelope.exported {
        Ok(ModuleOutput::Returned(envelope.result))
    } else {
        log::debug!(target: LOG_TARGET, "'{path}' does not export requestNsprcFile");
        Ok(ModuleOutput::NoExport)
    }
}
