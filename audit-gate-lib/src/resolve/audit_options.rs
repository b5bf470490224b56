/// Flags as they arrive from the command line, before any defaults are applied.
///
/// List-valued fields hold the raw comma-separated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditOptions {
    /// Audit production dependencies only.
    pub production: bool,

    /// Registry URL handed to `npm audit`.
    pub registry: Option<String>,

    /// Minimum severity that should fail the audit.
    pub level: Option<String>,

    /// Path of the exception configuration.
    pub config_file: Option<String>,

    /// Comma-separated finding identifiers to suppress.
    pub exclude: Option<String>,

    /// Comma-separated module names whose findings are ignored.
    pub module_ignore: Option<String>,

    /// Comma-separated result columns to show.
    pub include_columns: Option<String>,
}
