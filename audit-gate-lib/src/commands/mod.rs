//! Command-line interface and orchestration for audit-gate
//!
//! # Commands
//!
//! - **resolve**: Turn the audit flags into the `npm audit` command line, the audit level, the
//!   exception IDs, the ignored modules, and the included columns, and print them
//! - **validate**: Load an exception configuration and report which entries still apply
//!
//! The `run` function parses command-line arguments using clap and routes to the handler.
//! All interaction with the outside world goes through the [`Host`] trait so commands can be
//! driven from tests.

mod common;
mod host;
mod resolve;
mod run;
mod validate;

pub use common::{AuditArgs, AuditLevel, LogLevel};
pub use host::Host;
#[cfg(test)]
pub use host::TestHost;
pub use resolve::{OutputFormat, ResolveArgs, process_resolve};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
