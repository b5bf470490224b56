//! Turning command-line options into the inputs of an audit run.
//!
//! [`resolve_input`] is the entry point. It builds the `npm audit` command line, picks the
//! audit level, loads the exception configuration, and splits the list-valued options, then
//! hands the result to a caller-supplied continuation.

mod audit_command;
mod audit_options;
mod context;
mod npm_version;
mod resolved_input;

pub use audit_command::{AUDIT_BASE_COMMAND, LEGACY_PRODUCTION_FLAG, PRODUCTION_FLAG, build_audit_command, production_flag};
pub use audit_options::AuditOptions;
pub use context::{AUDIT_LEVEL_ENV_VAR, DEFAULT_AUDIT_LEVEL, resolve_input};
pub use npm_version::probe_npm_version;
pub use resolved_input::ResolvedInput;
