use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use semver::Version;
use std::process::Stdio;
use tokio::process::Command;

const LOG_TARGET: &str = "       npm";

const NPM_TIMEOUT: Duration = Duration::from_secs(10);

#[cfg(windows)]
const NPM_PROGRAM: &str = "npm.cmd";

#[cfg(not(windows))]
const NPM_PROGRAM: &str = "npm";

/// Ask the installed npm for its version.
///
/// # Errors
///
/// Returns an error if npm cannot be run, fails, times out, or prints something that is not a version.
pub async fn probe_npm_version() -> Result<Version> {
    let child = Command::new(NPM_PROGRAM)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .into_app_err("could not spawn npm")?;

    let output = match tokio::time::timeout(NPM_TIMEOUT, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(e).into_app_err("'npm --version' failed to run"),
        Err(_) => bail!("'npm --version' timed out after {} seconds", NPM_TIMEOUT.as_secs()),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("'npm --version' failed: {}", stderr.trim());
    }

    let version = parse_npm_version(&String::from_utf8_lossy(&output.stdout))?;
    log::debug!(target: LOG_TARGET, "Detected npm {version}");
    Ok(version)
}

fn parse_npm_version(text: &str) -> Result<Version> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(trimmed).into_app_err_with(|| format!("unexpected npm version '{trimmed}'"))
}
