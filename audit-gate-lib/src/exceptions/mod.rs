//! Exception configuration data model and resolution.
//!
//! An exception configuration maps finding identifiers to records saying whether, and until
//! when, the finding should be suppressed. The configuration is decoded leniently: any JSON
//! object is accepted, and fields of unexpected types follow truthiness rules rather than
//! causing errors.
//!
//! [`resolve_exception_ids`] combines a configuration with identifiers given on the command line
//! into the final list of identifiers to suppress.

mod exception_config;
mod exception_entry;
mod expiry;
mod resolver;

pub use exception_config::ExceptionConfig;
pub use exception_entry::{ExceptionEntry, ExceptionStatus, ExceptionValue};
pub use expiry::Expiry;
pub use resolver::resolve_exception_ids;
