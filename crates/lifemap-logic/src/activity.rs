//! Activity log.
//!
//! An append-only list of free-text entries, newest first. An entry may be
//! linked to the node that was selected when it was written; linked entries
//! are what drive fog relief on that node (see [`crate::session`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LifeMapError;
use crate::layout::{MapNode, Sector};

/// Node and sector an entry was written against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogContext {
    pub node_id: String,
    pub node_label: String,
    pub sector_label: Option<String>,
}

impl LogContext {
    pub fn for_node(node: &MapNode, sector: Option<&Sector>) -> Self {
        Self {
            node_id: node.id.clone(),
            node_label: node.label.clone(),
            sector_label: sector.map(|s| s.label.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    pub context: Option<LogContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Newest first.
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Whitespace-only content is rejected.
    ///
    /// Content is stored as typed; only the emptiness check trims.
    pub fn record(
        &mut self,
        content: &str,
        context: Option<LogContext>,
        timestamp: DateTime<Utc>,
    ) -> Result<&LogEntry, LifeMapError> {
        if content.trim().is_empty() {
            return Err(LifeMapError::EmptyLogEntry);
        }

        self.next_id += 1;
        self.entries.insert(
            0,
            LogEntry {
                id: self.next_id,
                timestamp,
                content: content.to_string(),
                context,
            },
        );
        Ok(&self.entries[0])
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries linked to a node, newest first.
    pub fn for_node<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a LogEntry> {
        self.entries
            .iter()
            .filter(move |e| e.context.as_ref().is_some_and(|c| c.node_id == node_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn ctx(node_id: &str) -> LogContext {
        LogContext {
            node_id: node_id.into(),
            node_label: "Sleep".into(),
            sector_label: Some("Vitals".into()),
        }
    }

    #[test]
    fn newest_first() {
        let mut log = ActivityLog::new();
        log.record("first", None, at(0)).unwrap();
        log.record("second", None, at(1)).unwrap();
        let contents: Vec<_> = log.entries().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);
        assert_eq!(log.latest().unwrap().content, "second");
    }

    #[test]
    fn ids_increase() {
        let mut log = ActivityLog::new();
        let a = log.record("a", None, at(0)).unwrap().id;
        let b = log.record("b", None, at(0)).unwrap().id;
        assert!(b > a);
    }

    #[test]
    fn blank_entries_rejected() {
        let mut log = ActivityLog::new();
        assert_eq!(log.record("   \t", None, at(0)), Err(LifeMapError::EmptyLogEntry));
        assert_eq!(log.record("", None, at(0)), Err(LifeMapError::EmptyLogEntry));
        assert!(log.is_empty());
    }

    #[test]
    fn content_kept_verbatim() {
        let mut log = ActivityLog::new();
        let entry = log.record("  slept 8h ", Some(ctx("vitals-0")), at(5)).unwrap();
        assert_eq!(entry.content, "  slept 8h ");
        assert_eq!(entry.timestamp, at(5));
    }

    #[test]
    fn filter_by_node() {
        let mut log = ActivityLog::new();
        log.record("a", Some(ctx("vitals-0")), at(0)).unwrap();
        log.record("b", None, at(1)).unwrap();
        log.record("c", Some(ctx("vitals-1")), at(2)).unwrap();
        log.record("d", Some(ctx("vitals-0")), at(3)).unwrap();
        let hits: Vec<_> = log.for_node("vitals-0").map(|e| e.content.as_str()).collect();
        assert_eq!(hits, vec!["d", "a"]);
        assert_eq!(log.len(), 4);
    }
}
