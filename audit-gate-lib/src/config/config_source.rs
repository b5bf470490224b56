use super::{ConfigError, ModuleOutput};
use crate::Host;
use crate::exceptions::ExceptionConfig;
use camino::{Utf8Path, Utf8PathBuf};

const LOG_TARGET: &str = "    config";

/// Configuration path used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = ".nsprc";

/// How an exception configuration is obtained, chosen from the configuration path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ConfigSource {
    /// A JSON file read from disk.
    #[strum(serialize = "exception file")]
    NsprcFile,

    /// A JavaScript or TypeScript module whose `requestNsprcFile` export produces the configuration.
    #[strum(serialize = "configuration module")]
    ConfigModule,
}

impl ConfigSource {
    /// Pick the source for `path`.
    ///
    /// The extension is whatever follows the last `.` of the file name, so `.nsprc` itself has
    /// the extension `nsprc`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedConfigType`] for any extension other than `nsprc`, `js`, or `ts`.
    pub fn select(path: &Utf8Path) -> Result<Self, ConfigError> {
        let file_name = path.file_name().unwrap_or_else(|| path.as_str());
        let extension = file_name.rsplit('.').next().unwrap_or(file_name);

        match extension {
            "nsprc" => Ok(Self::NsprcFile),
            "js" | "ts" => Ok(Self::ConfigModule),
            _ => Err(ConfigError::UnsupportedConfigType {
                path: path.to_path_buf(),
                extension: extension.to_owned(),
            }),
        }
    }

    /// Obtain the configuration at `path`, resolved against the host's working directory.
    ///
    /// `None` means there is no configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigLoadFailure`] when a configuration module cannot be run.
    /// Reading an exception file never fails.
    pub async fn load<H: Host>(self, host: &H, path: &Utf8Path) -> Result<Option<ExceptionConfig>, ConfigError> {
        let full_path = resolve_path(host.working_dir(), path);
        log::debug!(target: LOG_TARGET, "Loading exceptions from {self} '{full_path}'");

        match self {
            Self::NsprcFile => Ok(host.read_nsprc_file(&full_path).await),
            Self::ConfigModule => match host.run_config_module(&full_path).await? {
                ModuleOutput::NoExport => Ok(None),
                ModuleOutput::Returned(document) => Ok(ExceptionConfig::from_json(&document)),
            },
        }
    }
}

fn resolve_path(working_dir: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_nsprc() {
        assert_eq!(ConfigSource::select(Utf8Path::new(".nsprc")).unwrap(), ConfigSource::NsprcFile);
        assert_eq!(ConfigSource::select(Utf8Path::new("path/to/.nsprc")).unwrap(), ConfigSource::NsprcFile);
        assert_eq!(ConfigSource::select(Utf8Path::new("audit.nsprc")).unwrap(), ConfigSource::NsprcFile);
    }

    #[test]
    fn test_select_module() {
        assert_eq!(ConfigSource::select(Utf8Path::new("test/mocks/configFile.ts")).unwrap(), ConfigSource::ConfigModule);
        assert_eq!(ConfigSource::select(Utf8Path::new("path/to/config.js")).unwrap(), ConfigSource::ConfigModule);
        assert_eq!(ConfigSource::select(Utf8Path::new("config.ts")).unwrap(), ConfigSource::ConfigModule);
    }

    #[test]
    fn test_select_unsupported() {
        let err = ConfigSource::select(Utf8Path::new("path/to/config.txt")).unwrap_err();
        match err {
            ConfigError::UnsupportedConfigType { path, extension } => {
                assert_eq!(path, "path/to/config.txt");
                assert_eq!(extension, "txt");
            }
            ConfigError::ConfigLoadFailure { .. } => panic!("expected an unsupported type error"),
        }
    }

    #[test]
    fn test_select_is_case_sensitive() {
        assert!(ConfigSource::select(Utf8Path::new("config.JS")).is_err());
        assert!(ConfigSource::select(Utf8Path::new("config.json")).is_err());
        assert!(ConfigSource::select(Utf8Path::new("config.mjs")).is_err());
    }

    #[test]
    fn test_unsupported_error_message() {
        let err = ConfigSource::select(Utf8Path::new("audit.yml")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported configuration file type 'yml' for 'audit.yml' (expected .nsprc, .js, or .ts)"
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_resolve_path() {
        let root = Utf8Path::new("/work/project");
        assert_eq!(resolve_path(root, Utf8Path::new(".nsprc")), "/work/project/.nsprc");
        assert_eq!(resolve_path(root, Utf8Path::new("/etc/audit/.nsprc")), "/etc/audit/.nsprc");
    }
}
