//! Locating and loading exception configurations.
//!
//! A configuration path is mapped to a [`ConfigSource`] purely from its extension: `.nsprc`
//! files are read as JSON, `.js`/`.ts` files are configuration modules run through Node.js
//! (see [`run_config_module`] for the trust boundary this implies). Anything else is rejected.
//!
//! Absence of a configuration is never an error. A missing or malformed exception file simply
//! yields no configuration; only a configuration module that cannot be run is fatal.

mod config_error;
mod config_source;
mod module_runner;
mod nsprc_file;

pub use config_error::ConfigError;
pub use config_source::{ConfigSource, DEFAULT_CONFIG_PATH};
pub use module_runner::{ModuleOutput, run_config_module};
pub use nsprc_file::read_nsprc_file;
