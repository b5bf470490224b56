use camino::Utf8PathBuf;
use thiserror::Error;

/// Fatal problems obtaining the exception configuration.
///
/// A missing or malformed `.nsprc` file is not an error; it simply means there is no
/// configuration. These variants only arise when the user named a source that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration path has an extension other than `nsprc`, `js`, or `ts`.
    #[error("unsupported configuration file type '{extension}' for '{path}' (expected .nsprc, .js, or .ts)")]
    UnsupportedConfigType { path: Utf8PathBuf, extension: String },

    /// A configuration module could not be loaded or run.
    #[error("unable to load configuration module '{path}': {reason}")]
    ConfigLoadFailure { path: Utf8PathBuf, reason: String },
}

impl ConfigError {
    pub(crate) fn load_failure(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigLoadFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
