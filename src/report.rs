//! Console report rendering.
//!
//! All rendering is pure: functions take duplicate sets and return
//! strings, leaving printing to the caller. The report layout is the
//! tool's stable output contract:
//!
//! ```text
//! Found 2 sets of duplicates:
//! ------------------------------------------------------------
//!
//! Set 1 - Hash: 9f86d081... (16.0 B)
//! Files:
//!   [KEEP]    /data/a/x.txt
//!   [DUPLICATE] /data/b/y.txt
//! ...
//! Total reclaimable space: 16.0 B
//! ```

use crate::actions::BatchDeleteResult;
use crate::duplicates::DuplicateSet;

/// Width of the rule under the report header.
const RULE_WIDTH: usize = 60;

/// Hex digits of the fingerprint shown per set.
const HASH_PREVIEW_LEN: usize = 8;

/// Format a byte count as a human-readable string.
///
/// Uses 1024-based units with one decimal place: `512.0 B`, `1.5 KB`,
/// `2.0 MB`, ...
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

/// Total space reclaimable across all sets.
fn total_reclaimable(sets: &[DuplicateSet]) -> u64 {
    sets.iter().map(DuplicateSet::reclaimable_space).sum()
}

/// Render the duplicate report.
///
/// Each set lists its members in discovery order, tagging the first
/// member `[KEEP]` and the rest `[DUPLICATE]`. With `show_size`, the
/// per-set file size is appended to the set header.
#[must_use]
pub fn render_report(sets: &[DuplicateSet], show_size: bool) -> String {
    if sets.is_empty() {
        return "No duplicate files found!\n".to_string();
    }

    let mut lines = Vec::new();
    lines.push(format!("Found {} sets of duplicates:", sets.len()));
    lines.push("-".repeat(RULE_WIDTH));

    for (i, set) in sets.iter().enumerate() {
        let size_info = if show_size {
            format!(" ({})", format_size(set.file_size()))
        } else {
            String::new()
        };

        lines.push(String::new());
        lines.push(format!(
            "Set {} - Hash: {}...{}",
            i + 1,
            &set.fingerprint_hex()[..HASH_PREVIEW_LEN],
            size_info
        ));
        lines.push("Files:".to_string());

        for (j, member) in set.members.iter().enumerate() {
            let prefix = if j == 0 { "[KEEP]   " } else { "[DUPLICATE]" };
            lines.push(format!("  {} {}", prefix, member.path.display()));
        }
    }

    let total = total_reclaimable(sets);
    if total > 0 {
        lines.push(String::new());
        lines.push(format!("Total reclaimable space: {}", format_size(total)));
    }

    lines.join("\n")
}

/// Render the dry-run deletion preview.
///
/// Lists every member that a delete run would remove, followed by the
/// set count and the approximate space that would be freed. Nothing on
/// the filesystem is touched.
#[must_use]
pub fn render_dry_run(sets: &[DuplicateSet]) -> String {
    let mut lines = Vec::new();
    lines.push(String::new());

    for set in sets {
        for member in set.redundant_members() {
            lines.push(format!("Would delete: {}", member.path.display()));
        }
    }

    lines.push(format!(
        "Dry run: Would delete {} duplicate sets",
        sets.len()
    ));
    lines.push(format!(
        "Would free approximately {}",
        format_size(total_reclaimable(sets))
    ));

    lines.join("\n")
}

/// One-line summary for a completed delete run.
#[must_use]
pub fn delete_summary(result: &BatchDeleteResult) -> String {
    format!(
        "Deleted {} files, freed {}",
        result.success_count(),
        format_size(result.bytes_freed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::DeleteResult;
    use crate::scanner::FileRecord;
    use std::path::PathBuf;

    fn make_set(tag: u8, paths: &[&str], size: u64) -> DuplicateSet {
        let members = paths
            .iter()
            .map(|p| FileRecord::new(PathBuf::from(p), size, [tag; 32]))
            .collect();
        DuplicateSet::new([tag; 32], members)
    }

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(500), "500.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
        assert_eq!(format_size(1_099_511_627_776), "1.0 TB");
    }

    #[test]
    fn test_render_report_empty() {
        assert_eq!(render_report(&[], false), "No duplicate files found!\n");
    }

    #[test]
    fn test_render_report_basic() {
        let sets = vec![make_set(1, &["/a/x.txt", "/b/y.txt"], 16)];
        let report = render_report(&sets, false);

        assert!(report.contains("Found 1 sets of duplicates:"));
        assert!(report.contains(&"-".repeat(60)));
        assert!(report.contains("Set 1 - Hash: 01010101..."));
        assert!(report.contains("Files:"));
        assert!(report.contains("[KEEP]    /a/x.txt"));
        assert!(report.contains("[DUPLICATE] /b/y.txt"));
        assert!(report.contains("Total reclaimable space: 16.0 B"));
    }

    #[test]
    fn test_render_report_no_size_by_default() {
        let sets = vec![make_set(1, &["/a.txt", "/b.txt"], 2048)];
        let report = render_report(&sets, false);

        assert!(!report.contains("(2.0 KB)"));
    }

    #[test]
    fn test_render_report_show_size() {
        let sets = vec![make_set(1, &["/a.txt", "/b.txt"], 2048)];
        let report = render_report(&sets, true);

        assert!(report.contains("Set 1 - Hash: 01010101... (2.0 KB)"));
    }

    #[test]
    fn test_render_report_numbers_sets() {
        let sets = vec![
            make_set(1, &["/a1.txt", "/a2.txt"], 10),
            make_set(2, &["/b1.txt", "/b2.txt", "/b3.txt"], 20),
        ];
        let report = render_report(&sets, false);

        assert!(report.contains("Found 2 sets of duplicates:"));
        assert!(report.contains("Set 1 - Hash: 01010101..."));
        assert!(report.contains("Set 2 - Hash: 02020202..."));
        // 10 + 2 * 20 reclaimable
        assert!(report.contains("Total reclaimable space: 50.0 B"));
    }

    #[test]
    fn test_render_dry_run_lists_victims() {
        let sets = vec![make_set(1, &["/keep.txt", "/dup1.txt", "/dup2.txt"], 100)];
        let preview = render_dry_run(&sets);

        assert!(!preview.contains("Would delete: /keep.txt"));
        assert!(preview.contains("Would delete: /dup1.txt"));
        assert!(preview.contains("Would delete: /dup2.txt"));
        assert!(preview.contains("Dry run: Would delete 1 duplicate sets"));
        assert!(preview.contains("Would free approximately 200.0 B"));
    }

    #[test]
    fn test_delete_summary() {
        let mut result = BatchDeleteResult::default();
        result
            .successes
            .push(DeleteResult::new(PathBuf::from("/a.txt"), 1024));
        result.bytes_freed = 1024;

        assert_eq!(delete_summary(&result), "Deleted 1 files, freed 1.0 KB");
    }
}
