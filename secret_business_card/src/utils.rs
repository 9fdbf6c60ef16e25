use uuid::Uuid;

use crate::types::tx::LogEntry;

/// Returns the value of the first entry matching both `event_type` and `key`.
///
/// Later entries with the same type and key are ignored.
pub fn find_log_value<'a>(entries: &'a [LogEntry], event_type: &str, key: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.event_type == event_type && entry.key == key)
        .map(|entry| entry.value.as_str())
}

/// Contract labels must be unique chain-wide, so each instantiation gets a fresh suffix.
pub fn random_label(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4().simple())
}

pub fn random_entropy() -> String {
    Uuid::new_v4().to_string()
}
