//! Fingerprint-based duplicate grouping.
//!
//! # Overview
//!
//! Grouping partitions fingerprinted files into duplicate sets. Two
//! orderings matter and both follow discovery order: sets appear in the
//! order their first member was discovered, and members within a set keep
//! the order they were discovered in. The first member of a set is the
//! one the delete action preserves.
//!
//! # Example
//!
//! ```
//! use duplicate_finder::scanner::FileRecord;
//! use duplicate_finder::duplicates::group_by_fingerprint;
//! use std::path::PathBuf;
//!
//! let records = vec![
//!     FileRecord::new(PathBuf::from("/a.txt"), 5, [1u8; 32]),
//!     FileRecord::new(PathBuf::from("/b.txt"), 5, [1u8; 32]),
//!     FileRecord::new(PathBuf::from("/c.txt"), 9, [2u8; 32]),
//! ];
//!
//! let (sets, stats) = group_by_fingerprint(records);
//!
//! assert_eq!(sets.len(), 1); // only the [1u8; 32] pair survives
//! assert_eq!(stats.total_records, 3);
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::scanner::{fingerprint_to_hex, FileRecord, Fingerprint};

/// A group of two or more files sharing a content fingerprint.
///
/// Members are in discovery order; the first member is the one preserved
/// by the delete action.
#[derive(Debug, Clone)]
pub struct DuplicateSet {
    /// BLAKE3 content fingerprint shared by every member
    pub fingerprint: Fingerprint,
    /// Member files in discovery order
    pub members: Vec<FileRecord>,
}

impl DuplicateSet {
    /// Create a new duplicate set.
    #[must_use]
    pub fn new(fingerprint: Fingerprint, members: Vec<FileRecord>) -> Self {
        Self {
            fingerprint,
            members,
        }
    }

    /// Number of files in this set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if this set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Size in bytes of the files in this set (all members are identical).
    #[must_use]
    pub fn file_size(&self) -> u64 {
        self.members.first().map_or(0, |m| m.size)
    }

    /// Number of redundant copies (total minus the kept original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }

    /// Space reclaimed by deleting every member but the first.
    #[must_use]
    pub fn reclaimable_space(&self) -> u64 {
        self.members.iter().skip(1).map(|m| m.size).sum()
    }

    /// The member that survives a delete action, if any.
    #[must_use]
    pub fn keeper(&self) -> Option<&FileRecord> {
        self.members.first()
    }

    /// The members a delete action would remove.
    #[must_use]
    pub fn redundant_members(&self) -> &[FileRecord] {
        self.members.get(1..).unwrap_or(&[])
    }

    /// Fingerprint as a lowercase hexadecimal string.
    #[must_use]
    pub fn fingerprint_hex(&self) -> String {
        fingerprint_to_hex(&self.fingerprint)
    }

    /// Get just the paths of files in this set.
    #[must_use]
    pub fn paths(&self) -> Vec<std::path::PathBuf> {
        self.members.iter().map(|m| m.path.clone()).collect()
    }
}

/// Statistics from the grouping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of records processed
    pub total_records: usize,
    /// Number of distinct fingerprints seen
    pub unique_fingerprints: usize,
    /// Number of duplicate sets retained (2+ members)
    pub duplicate_sets: usize,
    /// Number of redundant files across all sets (excluding keepers)
    pub duplicate_files: usize,
    /// Space reclaimable by removing all redundant files
    pub reclaimable_space: u64,
}

/// Partition file records into duplicate sets keyed by fingerprint.
///
/// Sets preserve the first-seen order of their fingerprints and members
/// preserve discovery order within each set. Singleton groups are
/// discarded; only sets with two or more members are returned.
///
/// # Arguments
///
/// * `records` - Fingerprinted files in discovery order
///
/// # Returns
///
/// A tuple of:
/// - `Vec<DuplicateSet>` - duplicate sets in first-seen order
/// - `GroupingStats` - statistics about the grouping pass
#[must_use]
pub fn group_by_fingerprint(
    records: impl IntoIterator<Item = FileRecord>,
) -> (Vec<DuplicateSet>, GroupingStats) {
    let mut stats = GroupingStats::default();

    // Insertion-ordered groups: the index map points into `ordered`
    let mut ordered: Vec<(Fingerprint, Vec<FileRecord>)> = Vec::new();
    let mut index: HashMap<Fingerprint, usize> = HashMap::new();

    for record in records {
        stats.total_records += 1;
        match index.entry(record.fingerprint) {
            Entry::Occupied(slot) => ordered[*slot.get()].1.push(record),
            Entry::Vacant(slot) => {
                slot.insert(ordered.len());
                let fingerprint = record.fingerprint;
                ordered.push((fingerprint, vec![record]));
            }
        }
    }

    stats.unique_fingerprints = ordered.len();

    let sets: Vec<DuplicateSet> = ordered
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(fingerprint, members)| {
            log::debug!(
                "Duplicate set {}: {} files, {} bytes each",
                fingerprint_to_hex(&fingerprint),
                members.len(),
                members.first().map_or(0, |m| m.size)
            );
            DuplicateSet::new(fingerprint, members)
        })
        .collect();

    stats.duplicate_sets = sets.len();
    stats.duplicate_files = sets.iter().map(DuplicateSet::duplicate_count).sum();
    stats.reclaimable_space = sets.iter().map(DuplicateSet::reclaimable_space).sum();

    log::info!(
        "Grouping complete: {} files, {} duplicate sets, {} redundant copies",
        stats.total_records,
        stats.duplicate_sets,
        stats.duplicate_files
    );

    (sets, stats)
}
