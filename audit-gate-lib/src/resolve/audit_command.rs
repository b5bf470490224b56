use semver::{Comparator, Op, Prerelease, Version, VersionReq};

/// The audit invocation every command line starts with.
pub const AUDIT_BASE_COMMAND: &str = "npm audit";

/// Production-only flag understood by npm up to and including 8.13.2.
pub const LEGACY_PRODUCTION_FLAG: &str = "--production";

/// Production-only flag understood by newer npm releases.
pub const PRODUCTION_FLAG: &str = "--omit=dev";

/// npm releases that only understand [`LEGACY_PRODUCTION_FLAG`].
fn legacy_npm() -> VersionReq {
    VersionReq {
        comparators: vec![Comparator {
            op: Op::LessEq,
            major: 8,
            minor: Some(13),
            patch: Some(2),
            pre: Prerelease::EMPTY,
        }],
    }
}

/// The flag that restricts `npm audit` to production dependencies for the given npm version.
#[must_use]
pub fn production_flag(npm_version: &Version) -> &'static str {
    if legacy_npm().matches(npm_version) {
        LEGACY_PRODUCTION_FLAG
    } else {
        PRODUCTION_FLAG
    }
}

/// Assemble the audit command line.
///
/// Tokens are separated by single spaces. A missing or empty registry adds nothing.
#[must_use]
pub fn build_audit_command(production_flag: Option<&str>, registry: Option<&str>) -> String {
    let registry = registry.filter(|url| !url.is_empty()).map(|url| format!("--registry={url}"));

    [Some(AUDIT_BASE_COMMAND), production_flag, registry.as_deref()]
        .into_iter()
        .flatten()
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
