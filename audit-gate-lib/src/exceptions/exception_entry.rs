use super::Expiry;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A structured exception record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionEntry {
    /// Entries with `active = false` never suppress anything.
    pub active: bool,

    /// When present, the entry stops suppressing once this point in time has passed.
    pub expiry: Option<Expiry>,

    /// Free text for humans, ignored by the resolver.
    pub notes: Option<String>,
}

impl Default for ExceptionEntry {
    fn default() -> Self {
        Self {
            active: true,
            expiry: None,
            notes: None,
        }
    }
}

/// The value stored under one finding identifier in an exception configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionValue {
    /// An object with optional `active`, `expiry`, and `notes` fields.
    Entry(ExceptionEntry),

    /// A bare string; always active and never expiring.
    Note(String),
}

/// Where an exception stands at a given point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ExceptionStatus {
    #[strum(serialize = "active")]
    Active,

    #[strum(serialize = "inactive")]
    Inactive,

    #[strum(serialize = "expired")]
    Expired,

    #[strum(serialize = "invalid expiry")]
    InvalidExpiry,

    #[strum(serialize = "note")]
    Note,
}

impl ExceptionStatus {
    /// Whether an exception in this state suppresses its finding.
    #[must_use]
    pub const fn suppresses(self) -> bool {
        matches!(self, Self::Active | Self::Note)
    }
}

impl ExceptionValue {
    /// Interpret one raw configuration value without rejecting anything.
    ///
    /// Fields of the wrong type follow truthiness rules instead of failing, and values that are
    /// neither strings nor objects behave as an entry with every field absent.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Note(text.clone()),
            Value::Object(fields) => Self::Entry(ExceptionEntry {
                active: fields.get("active").is_none_or(is_truthy),
                expiry: fields.get("expiry").and_then(Expiry::from_value),
                notes: fields.get("notes").and_then(Value::as_str).map(ToOwned::to_owned),
            }),
            _ => Self::Entry(ExceptionEntry::default()),
        }
    }

    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> ExceptionStatus {
        match self {
            Self::Note(_) => ExceptionStatus::Note,
            Self::Entry(entry) if !entry.active => ExceptionStatus::Inactive,
            Self::Entry(entry) => match &entry.expiry {
                None => ExceptionStatus::Active,
                Some(expiry) if expiry.holds_at(now) => ExceptionStatus::Active,
                Some(expiry) if expiry.is_valid() => ExceptionStatus::Expired,
                Some(_) => ExceptionStatus::InvalidExpiry,
            },
        }
    }

    #[must_use]
    pub fn suppresses(&self, now: DateTime<Utc>) -> bool {
        self.status(now).suppresses()
    }

    #[must_use]
    pub const fn expiry(&self) -> Option<&Expiry> {
        match self {
            Self::Entry(entry) => entry.expiry.as_ref(),
            Self::Note(_) => None,
        }
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        match self {
            Self::Entry(entry) => entry.notes.as_deref(),
            Self::Note(text) => Some(text),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
