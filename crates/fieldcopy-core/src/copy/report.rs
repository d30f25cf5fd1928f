//! Per-call copy report
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use crate::error::AccessError;

/// One resolved entry, identified by its target and source slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEntry {
    /// Index of the list element, `None` for single copies
    pub element: Option<usize>,
    pub target: String,
    pub source: String,
}

/// An entry skipped because its slot could not be read or written
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSlot {
    pub entry: SlotEntry,
    pub error: AccessError,
}

/// What happened to every name table entry during a copy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopyReport {
    /// Entries whose value was written
    pub copied: Vec<SlotEntry>,
    /// Entries with nothing to write: absent source value or no conversion
    pub declined: Vec<SlotEntry>,
    /// Entries dropped on an access failure
    pub skipped: Vec<SkippedSlot>,
}

impl CopyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no entry was skipped
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Target names written, in copy order
    pub fn copied_targets(&self) -> Vec<&str> {
        self.copied.iter().map(|e| e.target.as_str()).collect()
    }

    pub(crate) fn merge(&mut self, other: CopyReport) {
        self.copied.extend(other.copied);
        self.declined.extend(other.declined);
        self.skipped.extend(other.skipped);
    }

    pub(crate) fn record_copied(&mut self, element: Option<usize>, target: &str, source: &str) {
        self.copied.push(entry(element, target, source));
    }

    pub(crate) fn record_declined(&mut self, element: Option<usize>, target: &str, source: &str) {
        self.declined.push(entry(element, target, source));
    }

    pub(crate) fn record_skipped(
        &mut self,
        element: Option<usize>,
        target: &str,
        source: &str,
        error: AccessError,
    ) {
        match element {
            Some(index) => log::warn!(
                "Skipping `{}` -> `{}` in element {}: {}",
                source,
                target,
                index,
                error
            ),
            None => log::warn!("Skipping `{}` -> `{}`: {}", source, target, error),
        }
        self.skipped.push(SkippedSlot {
            entry: entry(element, target, source),
            error,
        });
    }
}

fn entry(element: Option<usize>, target: &str, source: &str) -> SlotEntry {
    SlotEntry {
        element,
        target: target.to_string(),
        source: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accumulates() {
        let mut report = CopyReport::new();
        report.record_copied(None, "name", "name");
        report.record_declined(None, "birth", "birth");
        assert!(report.is_clean());

        report.record_skipped(
            Some(1),
            "created",
            "created",
            AccessError::ReadOnly {
                owner: "Audit".to_string(),
                slot: "created".to_string(),
            },
        );
        assert!(!report.is_clean());
        assert_eq!(report.copied_targets(), vec!["name"]);
        assert_eq!(report.skipped[0].entry.element, Some(1));
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut first = CopyReport::new();
        first.record_copied(Some(0), "a", "a");
        let mut second = CopyReport::new();
        second.record_copied(Some(1), "a", "a");
        second.record_declined(Some(1), "b", "b");

        first.merge(second);
        assert_eq!(first.copied.len(), 2);
        assert_eq!(first.copied[1].element, Some(1));
        assert_eq!(first.declined.len(), 1);
    }
}
