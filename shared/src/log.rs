//! Streaming log entries shown in the transcript pane.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the client's streaming log.
///
/// `kind` is the dotted tag the connection emits (`client.open`,
/// `client.send`, `server.content`, ...). `count` is present only after
/// consecutive duplicates have been collapsed into this entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingLog {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl StreamingLog {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            date: Utc::now(),
            kind: kind.into(),
            message: message.into(),
            count: None,
        }
    }
}

/// Append a log entry, collapsing runs of identical notifications.
///
/// If the incoming entry has the same `(kind, message)` as the last one,
/// the last entry is updated in place: its timestamp moves forward and its
/// count becomes the number of repeats seen so far. Otherwise the entry is
/// appended fresh, with no count. The list therefore never holds two
/// adjacent entries with identical `(kind, message)`.
pub fn push_log(entries: &mut Vec<StreamingLog>, entry: StreamingLog) {
    if let Some(last) = entries.last_mut() {
        if last.kind == entry.kind && last.message == entry.message {
            last.count = Some(last.count.unwrap_or(0) + 1);
            last.date = entry.date;
            return;
        }
    }
    entries.push(StreamingLog {
        count: None,
        ..entry
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_collapse_into_one_entry() {
        let mut entries = Vec::new();
        for _ in 0..4 {
            push_log(&mut entries, StreamingLog::new("server.audio", "buffer (11250)"));
        }
        assert_eq!(entries.len(), 1);
        // Four notifications: one original plus three repeats.
        assert_eq!(entries[0].count, Some(3));
    }

    #[test]
    fn test_single_entry_has_no_count() {
        let mut entries = Vec::new();
        push_log(&mut entries, StreamingLog::new("client.open", "connected"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].count, None);
    }

    #[test]
    fn test_different_message_starts_new_entry() {
        let mut entries = Vec::new();
        push_log(&mut entries, StreamingLog::new("client.send", "hello"));
        push_log(&mut entries, StreamingLog::new("client.send", "world"));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].count, None);
    }

    #[test]
    fn test_different_kind_starts_new_entry() {
        let mut entries = Vec::new();
        push_log(&mut entries, StreamingLog::new("client.send", "ping"));
        push_log(&mut entries, StreamingLog::new("server.content", "ping"));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_collapse_only_applies_to_adjacent_runs() {
        let mut entries = Vec::new();
        push_log(&mut entries, StreamingLog::new("server.audio", "chunk"));
        push_log(&mut entries, StreamingLog::new("server.content", "text"));
        push_log(&mut entries, StreamingLog::new("server.audio", "chunk"));
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].count, None);
    }

    #[test]
    fn test_collapsed_entry_keeps_latest_timestamp() {
        let mut entries = Vec::new();
        let first = StreamingLog::new("server.audio", "chunk");
        push_log(&mut entries, first.clone());
        let mut second = StreamingLog::new("server.audio", "chunk");
        second.date = first.date + chrono::Duration::seconds(5);
        push_log(&mut entries, second.clone());
        assert_eq!(entries[0].date, second.date);
    }
}
