// LinkSphere - core/scanner.rs
//
// Application discovery: walk the well-known installation directories of the
// host OS and collect every entry whose name ends with the OS application
// suffix (.exe, .app, .desktop).
//
// Two passes over the same roots:
//   1. Pre-pass counts every file so progress can be reported as a percentage.
//   2. Main pass revisits the tree in the same order, collecting matches and
//      reporting progress after every file.
//
// Traversal policy:
//   - Roots are walked in listed order; entries within a directory are sorted
//     by file name so repeated scans of an unchanged tree are identical.
//   - Symlinks are never followed, so symlink cycles cannot loop the walk.
//   - Missing roots contribute zero files. Unreadable entries are logged at
//     debug level, counted in `ScanReport::skipped`, and the walk continues.
//   - Cancellation is cooperative: `should_cancel` is polled after every file
//     and every directory, in both passes.
//
// This module runs on whatever thread calls it. The GUI calls it from the
// background worker in `app::scan`.

use crate::core::model::{OsKind, ScanProgress, ScanReport, ScanTarget};
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::path::Path;
use walkdir::WalkDir;

/// Discover applications for `os_kind`.
///
/// `on_progress` receives the recomputed percentage after each visited file
/// and a final 100 on natural completion. `should_cancel` returning true stops
/// the scan and returns the matches collected so far.
///
/// Unsupported platforms return an empty result without calling `on_progress`.
pub fn scan<P, C>(os_kind: OsKind, on_progress: P, should_cancel: C) -> Vec<String>
where
    P: FnMut(u8),
    C: FnMut() -> bool,
{
    match ScanTarget::for_os(os_kind) {
        Some(target) => scan_target(&target, on_progress, should_cancel).paths,
        None => {
            tracing::info!(os = %os_kind, "No application directories known for this platform");
            Vec::new()
        }
    }
}

/// Run the two-pass scan over an explicit target.
pub fn scan_target<P, C>(
    target: &ScanTarget,
    mut on_progress: P,
    mut should_cancel: C,
) -> ScanReport
where
    P: FnMut(u8),
    C: FnMut() -> bool,
{
    tracing::info!(
        os = %target.os_kind,
        roots = ?target.search_roots,
        suffix = %target.match_suffix,
        "Application scan starting"
    );

    let mut report = ScanReport::default();

    // -------------------------------------------------------------------------
    // Pre-pass: count files
    // -------------------------------------------------------------------------
    let mut files_total: u64 = 0;
    for root in &target.search_roots {
        let flow = walk_root(root, target, |step| {
            if let Step::Entry(_) = step {
                files_total += 1;
            }
            if should_cancel() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        if flow.is_break() {
            tracing::info!(counted = files_total, "Application scan cancelled during pre-pass");
            report.files_total = files_total;
            report.cancelled = true;
            return report;
        }
    }

    tracing::debug!(files_total, "Pre-pass complete");

    // -------------------------------------------------------------------------
    // Main pass: collect matches
    // -------------------------------------------------------------------------
    let mut progress = ScanProgress {
        files_scanned: 0,
        files_total,
    };
    let mut seen: HashSet<String> = HashSet::new();
    let mut last_reported: Option<u8> = None;

    for root in &target.search_roots {
        let flow = walk_root(root, target, |step| {
            match step {
                Step::Directory => {}
                Step::Inaccessible(err) => {
                    let path = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    tracing::debug!(path = %path, error = %err, "Skipping inaccessible entry");
                    report.skipped += 1;
                }
                Step::Entry(entry) => {
                    progress.files_scanned += 1;
                    // The tree may have grown since the pre-pass.
                    progress.files_total = progress.files_total.max(progress.files_scanned);

                    if target.matches(&entry.file_name().to_string_lossy()) {
                        // Reported paths must name the file exactly.
                        match entry.path().to_str() {
                            Some(path) => {
                                if seen.insert(path.to_string()) {
                                    tracing::trace!(path, "Application found");
                                    report.paths.push(path.to_string());
                                }
                            }
                            None => {
                                tracing::debug!(
                                    path = %entry.path().display(),
                                    "Skipping application with a non UTF-8 path"
                                );
                                report.skipped += 1;
                            }
                        }
                    }

                    let pct = progress.percent();
                    on_progress(pct);
                    last_reported = Some(pct);
                }
            }
            if should_cancel() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        if flow.is_break() {
            report.cancelled = true;
            break;
        }
    }

    report.files_scanned = progress.files_scanned;
    report.files_total = progress.files_total;

    if report.cancelled {
        tracing::info!(
            found = report.paths.len(),
            scanned = report.files_scanned,
            total = report.files_total,
            "Application scan cancelled"
        );
        return report;
    }

    if last_reported != Some(100) {
        on_progress(100);
    }

    tracing::info!(
        found = report.paths.len(),
        scanned = report.files_scanned,
        skipped = report.skipped,
        "Application scan complete"
    );
    report
}

// =============================================================================
// Traversal
// =============================================================================

/// One traversal step handed to a pass.
enum Step<'a> {
    /// A directory that is descended into (including the root itself).
    Directory,
    /// A file, symlink, or opaque application bundle.
    Entry(&'a walkdir::DirEntry),
    /// An entry that could not be read.
    Inaccessible(&'a walkdir::Error),
}

/// Walk one root, feeding every step to `visit` until it breaks.
///
/// Both passes go through this function so they count exactly the same
/// entries in exactly the same order.
fn walk_root<F>(root: &Path, target: &ScanTarget, mut visit: F) -> ControlFlow<()>
where
    F: FnMut(Step<'_>) -> ControlFlow<()>,
{
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "Scan root missing or not a directory; skipping");
        return ControlFlow::Continue(());
    }

    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(result) = walker.next() {
        let flow = match &result {
            Err(err) => visit(Step::Inaccessible(err)),
            Ok(entry) if entry.file_type().is_dir() => {
                if entry.depth() > 0 && is_bundle(entry, target) {
                    walker.skip_current_dir();
                    visit(Step::Entry(entry))
                } else {
                    visit(Step::Directory)
                }
            }
            Ok(entry) => visit(Step::Entry(entry)),
        };
        if flow.is_break() {
            return flow;
        }
    }
    ControlFlow::Continue(())
}

fn is_bundle(entry: &walkdir::DirEntry, target: &ScanTarget) -> bool {
    target.bundles_are_entries && target.matches(&entry.file_name().to_string_lossy())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn linux_target(roots: Vec<PathBuf>) -> ScanTarget {
        ScanTarget {
            os_kind: OsKind::Linux,
            search_roots: roots,
            match_suffix: ".desktop".to_string(),
            bundles_are_entries: false,
        }
    }

    fn make_tree() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        fs::write(root.join("a.desktop"), "[Desktop Entry]\nName=A\n").unwrap();
        fs::write(root.join("b.txt"), "not an app").unwrap();
        fs::write(root.join("c.desktop"), "[Desktop Entry]\nName=C\n").unwrap();
        let sub = root.join("kde");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("d.desktop"), "").unwrap();
        fs::write(sub.join("readme"), "").unwrap();
        dir
    }

    fn run(target: &ScanTarget) -> (ScanReport, Vec<u8>) {
        let mut calls = Vec::new();
        let report = scan_target(target, |p| calls.push(p), || false);
        (report, calls)
    }

    #[test]
    fn test_flat_linux_example() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.desktop", "b.txt", "c.desktop"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let target = linux_target(vec![dir.path().to_path_buf()]);
        let (report, calls) = run(&target);

        let expected: Vec<String> = ["a.desktop", "c.desktop"]
            .iter()
            .map(|n| dir.path().join(n).to_string_lossy().into_owned())
            .collect();
        assert_eq!(report.paths, expected);
        assert_eq!(calls, vec![33, 66, 100], "one call per file, ending at 100");
        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.files_total, 3);
        assert!(!report.cancelled);
    }

    #[test]
    fn test_unsupported_platform_is_silent_no_op() {
        let mut calls = 0usize;
        let result = scan(OsKind::Other, |_| calls += 1, || false);
        assert!(result.is_empty());
        assert_eq!(calls, 0, "on_progress must never fire for Other");
    }

    #[test]
    fn test_empty_tree_reports_completion_without_dividing_by_zero() {
        let dir = tempfile::tempdir().unwrap();
        let (report, calls) = run(&linux_target(vec![dir.path().to_path_buf()]));
        assert!(report.paths.is_empty());
        assert_eq!(report.files_total, 0);
        assert_eq!(calls, vec![100]);
    }

    #[test]
    fn test_missing_root_contributes_nothing() {
        let dir = make_tree();
        let target = linux_target(vec![
            PathBuf::from("/nonexistent/linksphere/apps"),
            dir.path().to_path_buf(),
        ]);
        let (report, _) = run(&target);
        assert_eq!(report.paths.len(), 3);
        assert_eq!(report.skipped, 0, "a missing root is not an inaccessible entry");
    }

    #[test]
    fn test_every_path_has_suffix_and_subdirs_are_walked() {
        let dir = make_tree();
        let (report, _) = run(&linux_target(vec![dir.path().to_path_buf()]));
        assert!(report.paths.iter().all(|p| p.ends_with(".desktop")));
        assert!(
            report.paths.iter().any(|p| p.ends_with("d.desktop")),
            "nested entries must be found: {:?}",
            report.paths
        );
        assert_eq!(report.files_scanned, 5);
    }

    #[test]
    fn test_repeat_scan_is_identical() {
        let dir = make_tree();
        let target = linux_target(vec![dir.path().to_path_buf()]);
        let (first, first_calls) = run(&target);
        let (second, second_calls) = run(&target);
        assert_eq!(first.paths, second.paths);
        assert_eq!(first_calls, second_calls);
    }

    #[test]
    fn test_cancellation_yields_prefix_of_full_result() {
        let dir = make_tree();
        let target = linux_target(vec![dir.path().to_path_buf()]);
        let (full, _) = run(&target);

        for k in 1..=full.files_scanned {
            let visited = Cell::new(0u64);
            let partial = scan_target(
                &target,
                |_| visited.set(visited.get() + 1),
                || visited.get() >= k,
            );
            assert!(partial.cancelled, "k={k} should cancel");
            assert_eq!(partial.files_scanned, k);
            assert!(
                full.paths.starts_with(&partial.paths),
                "k={k}: {:?} is not a prefix of {:?}",
                partial.paths,
                full.paths
            );
        }
    }

    #[test]
    fn test_cancel_during_pre_pass_returns_empty() {
        let dir = make_tree();
        let mut calls = 0usize;
        let report = scan_target(
            &linux_target(vec![dir.path().to_path_buf()]),
            |_| calls += 1,
            || true,
        );
        assert!(report.cancelled);
        assert!(report.paths.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let dir = make_tree();
        let (_, calls) = run(&linux_target(vec![dir.path().to_path_buf()]));
        assert!(calls.windows(2).all(|w| w[0] <= w[1]), "{calls:?}");
        assert_eq!(calls.last(), Some(&100));
    }

    #[test]
    fn test_roots_walked_in_listed_order_without_duplicates() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(first.path().join("z.desktop"), "").unwrap();
        fs::write(second.path().join("a.desktop"), "").unwrap();

        let target = linux_target(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
            first.path().to_path_buf(),
        ]);
        let (report, _) = run(&target);
        assert_eq!(report.paths.len(), 2, "{:?}", report.paths);
        assert!(report.paths[0].ends_with("z.desktop"));
        assert!(report.paths[1].ends_with("a.desktop"));
    }

    #[test]
    fn test_bundles_are_matched_but_not_descended() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("Editor.app");
        fs::create_dir_all(bundle.join("Contents").join("MacOS")).unwrap();
        fs::write(bundle.join("Contents").join("MacOS").join("editor"), "").unwrap();
        fs::write(bundle.join("Contents").join("Info.plist"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let target = ScanTarget {
            os_kind: OsKind::Darwin,
            search_roots: vec![dir.path().to_path_buf()],
            match_suffix: ".app".to_string(),
            bundles_are_entries: true,
        };
        let (report, calls) = run(&target);
        assert_eq!(
            report.paths,
            vec![bundle.to_string_lossy().into_owned()]
        );
        assert_eq!(report.files_total, 2, "bundle counts as one entry");
        assert_eq!(calls, vec![50, 100]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let dir = make_tree();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("kde").join("loop")).unwrap();
        let (report, _) = run(&linux_target(vec![dir.path().to_path_buf()]));
        assert_eq!(report.paths.len(), 3);
    }

    #[test]
    fn test_cancel_on_main_pass_directory_step() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let target = linux_target(vec![dir.path().to_path_buf()]);

        // The pre-pass polls once per directory (root and "empty").
        let polls = Cell::new(0u32);
        let mut calls = Vec::new();
        let report = scan_target(
            &target,
            |p| calls.push(p),
            || {
                polls.set(polls.get() + 1);
                polls.get() > 2
            },
        );
        assert!(report.cancelled);
        assert_eq!(polls.get(), 3, "stopped at the first main-pass step");
        assert_eq!(report.files_scanned, 0);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_tree_growing_between_passes_keeps_percent_in_range() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.desktop"), "").unwrap();
        let late_dir = dir.path().join("z");
        fs::create_dir(&late_dir).unwrap();
        let target = linux_target(vec![dir.path().to_path_buf()]);

        // "z" is listed after "a.desktop", so a file added once the main pass
        // has reported progress is still picked up by that pass.
        let progressed = Cell::new(false);
        let created = Cell::new(false);
        let mut calls = Vec::new();
        let report = scan_target(
            &target,
            |p| {
                progressed.set(true);
                calls.push(p);
            },
            || {
                if progressed.get() && !created.get() {
                    fs::write(late_dir.join("b.desktop"), "").unwrap();
                    created.set(true);
                }
                false
            },
        );

        assert!(created.get());
        assert!(!report.cancelled);
        assert_eq!(report.files_scanned, 2);
        assert!(report.files_scanned <= report.files_total);
        assert_eq!(report.paths.len(), 2, "{:?}", report.paths);
        assert!(calls.iter().all(|p| *p <= 100), "{calls:?}");
        assert_eq!(calls.last(), Some(&100));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_skipped_not_mangled() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.desktop"), "").unwrap();
        for raw in [&b"a\xff.desktop"[..], &b"a\xfe.desktop"[..]] {
            fs::write(dir.path().join(OsStr::from_bytes(raw)), "").unwrap();
        }

        let (report, calls) = run(&linux_target(vec![dir.path().to_path_buf()]));
        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(
            report.paths,
            vec![dir.path().join("ok.desktop").to_string_lossy().into_owned()]
        );
        assert!(report.paths.iter().all(|p| Path::new(p).exists()));
        assert_eq!(calls.last(), Some(&100));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = make_tree();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.desktop"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read the directory anyway; nothing to assert then.
        let readable = fs::read_dir(&locked).is_ok();
        let (report, _) = run(&linux_target(vec![dir.path().to_path_buf()]));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert_eq!(report.paths.len(), 3);
            assert!(report.skipped >= 1);
            assert!(!report.cancelled);
        }
    }
}
