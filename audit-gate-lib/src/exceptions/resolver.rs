use super::ExceptionConfig;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

const LOG_TARGET: &str = "exceptions";

/// Compute the finding identifiers to suppress.
///
/// Command-line identifiers come first, trimmed and with empty ones dropped, in the order the
/// user gave them. They are followed by every configuration entry that still suppresses its
/// finding at `now`, in file order. Each identifier appears once.
pub fn resolve_exception_ids<I, S>(config: Option<&ExceptionConfig>, cmd_exceptions: I, now: DateTime<Utc>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let from_cmd = cmd_exceptions
        .into_iter()
        .map(|id| id.as_ref().trim().to_owned())
        .filter(|id| !id.is_empty());

    let from_config = config
        .into_iter()
        .flat_map(|config| config.iter())
        .filter(|(_, value)| value.suppresses(now))
        .map(|(id, _)| id.to_owned());

    let mut seen = HashSet::new();
    let ids: Vec<String> = from_cmd.chain(from_config).filter(|id| seen.insert(id.clone())).collect();

    if !ids.is_empty() {
        log::info!(target: LOG_TARGET, "Exception IDs: {}", ids.join(", "));
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn config(document: &serde_json::Value) -> ExceptionConfig {
        ExceptionConfig::from_json(document).unwrap()
    }

    #[test]
    fn test_no_config_no_cmd() {
        let ids = resolve_exception_ids(None, Vec::<String>::new(), now());
        assert!(ids.is_empty());
    }

    #[test]
    fn test_cmd_only_trimmed_and_filtered() {
        let ids = resolve_exception_ids(None, ["1567", " 1902 ", "", "  "], now());
        assert_eq!(ids, ["1567", "1902"]);
    }

    #[test]
    fn test_config_only() {
        let config = config(&json!({
            "1001": {"active": true},
            "1002": {"active": false},
            "1003": "note",
            "1004": {},
        }));

        let ids = resolve_exception_ids(Some(&config), Vec::<&str>::new(), now());
        assert_eq!(ids, ["1001", "1003", "1004"]);
    }

    #[test]
    fn test_cmd_before_config_without_duplicates() {
        let config = config(&json!({"1001": {}, "1567": {}}));
        let ids = resolve_exception_ids(Some(&config), ["1567", "919", "1567"], now());
        assert_eq!(ids, ["1567", "919", "1001"]);
    }

    #[test]
    fn test_inactive_never_present_even_if_expiry_in_future() {
        let config = config(&json!({"1002": {"active": false, "expiry": "2999-12-31"}}));
        let ids = resolve_exception_ids(Some(&config), Vec::<&str>::new(), now());
        assert!(ids.is_empty());
    }

    #[test]
    fn test_expiry_rules() {
        let config = config(&json!({
            "past": {"expiry": "2024-05-31"},
            "exact": {"expiry": "2024-06-01"},
            "future": {"expiry": "2024-06-02"},
            "future-epoch": {"expiry": 4_102_444_800_000_i64},
            "invalid": {"expiry": "someday"},
        }));

        let ids = resolve_exception_ids(Some(&config), Vec::<&str>::new(), now());
        assert_eq!(ids, ["exact", "future", "future-epoch"]);
    }

    #[test]
    fn test_cmd_id_kept_even_if_config_entry_inactive() {
        let config = config(&json!({"1567": {"active": false}}));
        let ids = resolve_exception_ids(Some(&config), ["1567"], now());
        assert_eq!(ids, ["1567"]);
    }
}
