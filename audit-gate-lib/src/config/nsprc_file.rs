use crate::exceptions::ExceptionConfig;
use camino::Utf8Path;
use serde_json::Value;

const LOG_TARGET: &str = "    config";

/// Read a JSON exception file.
///
/// Every failure (missing file, unreadable file, invalid UTF-8, malformed JSON, a document
/// that is not an object) yields `None`. Nothing is ever reported as an error because the
/// file is optional.
pub async fn read_nsprc_file(path: &Utf8Path) -> Option<ExceptionConfig> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "No exception file at '{path}': {e}");
            return None;
        }
    };

    parse_nsprc(path, &text)
}

fn parse_nsprc(path: &Utf8Path, text: &str) -> Option<ExceptionConfig> {
    let document: Value = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Ignoring '{path}', not valid JSON: {e}");
            return None;
        }
    };

    let config = ExceptionConfig::from_json(&document);
    if config.is_none() {
        log::debug!(target: LOG_TARGET, "Ignoring '{path}', the document is not a JSON object");
    }

    config
}
