//! Cast log storage and export.
//!
//! The log keeps at most a fixed number of entries; once full, the oldest
//! entry is dropped for each new one. Indices keep counting across drops.

use std::collections::VecDeque;

use bagua_core::{HexagramCatalog, HexagramNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::caster::{Cast, CastQuality};

/// Entries kept when no limit is configured.
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 1000;

/// One recorded cast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastLogEntry {
    /// 1-based position in the session.
    pub index: u32,
    /// The cast.
    pub cast: Cast,
    /// When it was cast.
    pub timestamp: DateTime<Utc>,
}

/// A bounded, chronological log of a session's casts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastLog {
    entries: VecDeque<CastLogEntry>,
    max_entries: usize,
    next_index: u32,
    dropped: u64,
}

impl Default for CastLog {
    fn default() -> Self {
        Self::bounded(DEFAULT_MAX_LOG_ENTRIES)
    }
}

impl CastLog {
    /// Create an empty log with the default limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log keeping at most `max_entries` (at least 1).
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
            next_index: 1,
            dropped: 0,
        }
    }

    /// Record a cast now, dropping the oldest entry if the log is full.
    pub fn append(&mut self, cast: Cast) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        self.entries.push_back(CastLogEntry {
            index: self.next_index,
            cast,
            timestamp: Utc::now(),
        });
        self.next_index = self.next_index.saturating_add(1);
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> &VecDeque<CastLogEntry> {
        &self.entries
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&CastLogEntry> {
        self.entries.back()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most entries the log keeps.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Entries dropped to stay within the limit.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Drop every entry and restart numbering at 1.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_index = 1;
        self.dropped = 0;
    }

    /// Export the log as markdown.
    pub fn export_markdown(&self, catalog: &HexagramCatalog) -> String {
        let mut out = String::from("# Divination Log\n\n");
        if self.dropped > 0 {
            out.push_str(&format!("*{} earlier casts not kept*\n\n", self.dropped));
        }
        for entry in &self.entries {
            let cast = &entry.cast;
            out.push_str(&format!("## Cast {} ({})\n\n", entry.index, cast.mode));
            out.push_str(&format!("*{}*\n\n", entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC")));
            out.push_str(&format!("**Base**: {}\n", describe(catalog, cast.base)));
            out.push_str(&format!("**Result**: {}\n", describe(catalog, cast.result)));
            out.push_str(&format!("**Changing lines**: {}\n", cast.changing));
            out.push_str(&format!("**Guideline**: {}\n", cast.guideline()));
            if cast.quality != CastQuality::Clean {
                out.push_str(&format!("> {}\n", cast.quality.description()));
            }
            out.push('\n');
        }
        out
    }

    /// Export the log as plain text.
    pub fn export_text(&self, catalog: &HexagramCatalog) -> String {
        let mut out = String::from("Divination Log\n==============\n\n");
        if self.dropped > 0 {
            out.push_str(&format!("({} earlier casts not kept)\n\n", self.dropped));
        }
        for entry in &self.entries {
            let cast = &entry.cast;
            out.push_str(&format!(
                "Cast {} ({}) at {}\n",
                entry.index,
                cast.mode,
                entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            out.push_str(&format!("  Base: {}\n", describe(catalog, cast.base)));
            out.push_str(&format!("  Result: {}\n", describe(catalog, cast.result)));
            out.push_str(&format!("  Changing lines: {}\n", cast.changing));
            out.push_str(&format!("  Guideline: {}\n", cast.guideline()));
            if cast.quality != CastQuality::Clean {
                out.push_str(&format!("  Note: {}\n", cast.quality.description()));
            }
            out.push('\n');
        }
        out
    }
}

fn describe(catalog: &HexagramCatalog, number: HexagramNumber) -> String {
    let hexagram = catalog.get(number);
    format!("{} {}", hexagram.symbol(), hexagram.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caster::CastMode;
    use bagua_core::ChangingLines;

    fn n(value: u8) -> HexagramNumber {
        HexagramNumber::new(value).unwrap()
    }

    fn cast(base: u8, result: u8, changing: &[u8], quality: CastQuality) -> Cast {
        Cast {
            base: n(base),
            result: n(result),
            changing: ChangingLines::from_values(changing).unwrap(),
            mode: CastMode::Chained,
            quality,
            draws: None,
        }
    }

    fn sample_log() -> CastLog {
        let mut log = CastLog::new();
        log.append(cast(1, 44, &[1], CastQuality::Clean));
        log.append(cast(44, 1, &[1], CastQuality::Degraded));
        log
    }

    #[test]
    fn append_numbers_entries() {
        let log = sample_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].index, 1);
        assert_eq!(log.last().map(|e| e.index), Some(2));
    }

    #[test]
    fn clear_empties_log() {
        let mut log = sample_log();
        log.clear();
        assert!(log.is_empty());
        log.append(cast(2, 24, &[1], CastQuality::Clean));
        assert_eq!(log.entries()[0].index, 1);
    }

    #[test]
    fn full_log_drops_oldest_and_keeps_counting() {
        let mut log = CastLog::bounded(3);
        for _ in 0..10 {
            log.append(cast(1, 44, &[1], CastQuality::Clean));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.dropped(), 7);
        let indices: Vec<u32> = log.entries().iter().map(|e| e.index).collect();
        assert_eq!(indices, [8, 9, 10]);

        let catalog = HexagramCatalog::standard().unwrap();
        assert!(log.export_markdown(catalog).contains("*7 earlier casts not kept*"));
        assert!(!log.export_text(catalog).contains("Cast 7 "));

        log.clear();
        log.append(cast(2, 24, &[1], CastQuality::Clean));
        assert_eq!(log.last().map(|e| e.index), Some(1));
        assert_eq!(log.dropped(), 0);
    }

    #[test]
    fn zero_limit_still_keeps_the_latest() {
        let mut log = CastLog::bounded(0);
        log.append(cast(1, 44, &[1], CastQuality::Clean));
        log.append(cast(44, 1, &[1], CastQuality::Clean));
        assert_eq!(log.max_entries(), 1);
        assert_eq!(log.last().map(|e| e.index), Some(2));
    }

    #[test]
    fn markdown_export() {
        let catalog = HexagramCatalog::standard().unwrap();
        let md = sample_log().export_markdown(catalog);
        assert!(md.starts_with("# Divination Log"));
        assert!(md.contains("## Cast 1 (chained)"));
        assert!(md.contains("**Base**: ䷀ 1 Qian (The Creative)"));
        assert!(md.contains("**Changing lines**: 1"));
        assert!(md.contains("**Guideline**: single_line"));
        assert!(md.contains("> "));
    }

    #[test]
    fn text_export() {
        let catalog = HexagramCatalog::standard().unwrap();
        let text = sample_log().export_text(catalog);
        assert!(text.starts_with("Divination Log\n"));
        assert!(text.contains("Cast 2 (chained) at "));
        assert!(text.contains("  Result: ䷀ 1 Qian (The Creative)"));
        assert!(text.contains("  Note: "));
    }
}
