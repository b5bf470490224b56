use crate::Result;
use crate::config::{ConfigError, ModuleOutput};
use crate::exceptions::ExceptionConfig;
use camino::Utf8Path;
use semver::Version;
use std::io::Write;

/// Abstract the host environment to enable testing
pub trait Host: Send + Sync {
    // where to send normal output (e.g., stdout)
    fn output(&mut self) -> impl Write;

    // where to send error output (e.g., stderr)
    fn error(&mut self) -> impl Write;

    /// Terminate the process (although in a test environment this might just set a flag and return).
    fn exit(&mut self, code: i32);

    /// Read an environment variable, `None` if it is unset or not valid Unicode.
    fn env_var(&self, key: &str) -> Option<String>;

    /// Directory that relative configuration paths are resolved against.
    fn working_dir(&self) -> &Utf8Path;

    /// Version of the installed npm.
    fn npm_version(&self) -> impl Future<Output = Result<Version>> + Send;

    /// Read a JSON exception file, `None` if there is no usable configuration at `path`.
    fn read_nsprc_file(&self, path: &Utf8Path) -> impl Future<Output = Option<ExceptionConfig>> + Send;

    /// Evaluate a configuration module and call its `requestNsprcFile` export.
    fn run_config_module(&self, path: &Utf8Path) -> impl Future<Output = Result<ModuleOutput, ConfigError>> + Send;
}

#[cfg(test)]
pub use test_host::TestHost;

#[cfg(test)]
mod test_host {
    use super::*;
    use camino::Utf8PathBuf;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Test host that captures output to in-memory buffers and runs inside a scratch directory
    #[derive(Debug)]
    pub struct TestHost {
        pub output_buf: Vec<u8>,
        pub error_buf: Vec<u8>,
        pub exit_code: Option<i32>,
        env: HashMap<String, String>,
        npm_version: Option<Version>,
        modules: HashMap<Utf8PathBuf, ModuleOutput>,
        npm_probes: AtomicUsize,
        config_reads: AtomicUsize,
        working_dir: Utf8PathBuf,
        _temp_dir: TempDir,
    }

    impl TestHost {
        pub fn new() -> Self {
            let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
            let working_dir = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("temp dir should be UTF-8");

            Self {
                output_buf: Vec::new(),
                error_buf: Vec::new(),
                exit_code: None,
                env: HashMap::new(),
                npm_version: Some(Version::new(10, 9, 2)),
                modules: HashMap::new(),
                npm_probes: AtomicUsize::new(0),
                config_reads: AtomicUsize::new(0),
                working_dir,
                _temp_dir: temp_dir,
            }
        }

        pub fn with_env(mut self, key: &str, value: &str) -> Self {
            let _ = self.env.insert(key.to_owned(), value.to_owned());
            self
        }

        pub fn with_npm_version(mut self, version: Version) -> Self {
            self.npm_version = Some(version);
            self
        }

        pub fn without_npm(mut self) -> Self {
            self.npm_version = None;
            self
        }

        /// Register the output of a configuration module, relative to the working directory.
        pub fn with_module(mut self, path: &str, output: ModuleOutput) -> Self {
            let _ = self.modules.insert(self.working_dir.join(path), output);
            self
        }

        pub fn npm_probes(&self) -> usize {
            self.npm_probes.load(Ordering::SeqCst)
        }

        pub fn config_reads(&self) -> usize {
            self.config_reads.load(Ordering::SeqCst)
        }

        pub fn output_text(&self) -> String {
            String::from_utf8_lossy(&self.output_buf).into_owned()
        }

        pub fn error_text(&self) -> String {
            String::from_utf8_lossy(&self.error_buf).into_owned()
        }
    }

    impl Host for TestHost {
        fn output(&mut self) -> impl Write {
            &mut self.output_buf
        }

        fn error(&mut self) -> impl Write {
            &mut self.error_buf
        }

        fn exit(&mut self, code: i32) {
            self.exit_code = Some(code);
        }

        fn env_var(&self, key: &str) -> Option<String> {
            self.env.get(key).cloned()
        }

        fn working_dir(&self) -> &Utf8Path {
            &self.working_dir
        }

        fn npm_version(&self) -> impl Future<Output = Result<Version>> + Send {
            let _ = self.npm_probes.fetch_add(1, Ordering::SeqCst);
            let version = self.npm_version.clone();
            async move { version.ok_or_else(|| ohno::app_err!("npm is not installed")) }
        }

        fn read_nsprc_file(&self, path: &Utf8Path) -> impl Future<Output = Option<ExceptionConfig>> + Send {
            let _ = self.config_reads.fetch_add(1, Ordering::SeqCst);
            crate::config::read_nsprc_file(path)
        }

        fn run_config_module(&self, path: &Utf8Path) -> impl Future<Output = Result<ModuleOutput, ConfigError>> + Send {
            let output = self
                .modules
                .get(path)
                .cloned()
                .ok_or_else(|| ConfigError::load_failure(path, "file not found"));
            async move { output }
        }
    }
}
