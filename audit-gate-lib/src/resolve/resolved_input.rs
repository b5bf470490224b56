use serde::Serialize;

/// Everything needed to run the audit and filter its findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedInput {
    /// The full `npm audit` command line.
    pub audit_command: String,

    /// Minimum severity that should fail the audit. Passed through as given.
    pub audit_level: String,

    /// Finding identifiers to suppress.
    pub exception_ids: Vec<String>,

    /// Modules whose findings are ignored.
    pub ignored_modules: Vec<String>,

    /// Result columns to show.
    pub included_columns: Vec<String>,
}

impl ResolvedInput {
    /// Split into `(command, level, exception ids, ignored modules, included columns)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String, Vec<String>, Vec<String>, Vec<String>) {
        (
            self.audit_command,
            self.audit_level,
            self.exception_ids,
            self.ignored_modules,
            self.included_columns,
        )
    }
}
