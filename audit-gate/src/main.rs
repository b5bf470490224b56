//! Prepare `npm audit` runs from command-line flags and an exception list.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use audit_gate_lib::config::{ConfigError, ModuleOutput, read_nsprc_file, run_config_module};
use audit_gate_lib::exceptions::ExceptionConfig;
use audit_gate_lib::resolve::probe_npm_version;
use audit_gate_lib::{Host, run};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use semver::Version;
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that runs real OS commands.
#[derive(Debug, Clone)]
pub struct RealHost {
    working_dir: Utf8PathBuf,
}

impl RealHost {
    fn new() -> Result<Self, ohno::AppError> {
        let current_dir = std::env::current_dir().into_app_err("unable to determine the current directory")?;
        let working_dir = Utf8PathBuf::try_from(current_dir).into_app_err("the current directory is not valid UTF-8")?;
        Ok(Self { working_dir })
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }

    fn env_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn working_dir(&self) -> &Utf8Path {
        &self.working_dir
    }

    fn npm_version(&self) -> impl Future<Output = Result<Version, ohno::AppError>> + Send {
        probe_npm_version()
    }

    fn read_nsprc_file(&self, path: &Utf8Path) -> impl Future<Output = Option<ExceptionConfig>> + Send {
        read_nsprc_file(path)
    }

    fn run_config_module(&self, path: &Utf8Path) -> impl Future<Output = Result<ModuleOutput, ConfigError>> + Send {
        run_config_module(path)
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost::new()?, std::env::args()).await
}
