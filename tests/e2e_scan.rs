// LinkSphere - tests/e2e_scan.rs
//
// End-to-end tests for the scan -> import -> persist pipeline.
//
// These tests use the real filesystem, real walkdir traversal, real desktop
// entry parsing, and real JSON persistence. Nothing is mocked.

use linksphere::app::store;
use linksphere::core::library::Library;
use linksphere::core::model::{Category, OsKind, ScanTarget, ShortcutKind, ShortcutOrigin};
use linksphere::core::scanner::scan_target;
use linksphere::platform;
use std::fs;
use std::path::Path;

// =============================================================================
// Helpers
// =============================================================================

fn linux_target(root: &Path) -> ScanTarget {
    ScanTarget {
        os_kind: OsKind::Linux,
        search_roots: vec![root.to_path_buf()],
        match_suffix: ".desktop".to_string(),
        bundles_are_entries: false,
    }
}

fn write_entry(dir: &Path, file: &str, name: &str) {
    fs::write(
        dir.join(file),
        format!("[Desktop Entry]\nType=Application\nName={name}\nExec={file}\n"),
    )
    .unwrap();
}

/// A small application tree: two entries at the top, one nested, plus noise.
fn populate(root: &Path) {
    write_entry(root, "firefox.desktop", "Firefox Web Browser");
    write_entry(root, "gimp.desktop", "GNU Image Manipulation Program");
    fs::write(root.join("mimeinfo.cache"), "[MIME Cache]\n").unwrap();
    let nested = root.join("kde4");
    fs::create_dir(&nested).unwrap();
    write_entry(&nested, "konsole.desktop", "Konsole");
}

// =============================================================================
// Scan E2E
// =============================================================================

#[test]
fn e2e_scan_finds_nested_desktop_entries() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());

    let mut percents = Vec::new();
    let report = scan_target(&linux_target(dir.path()), |p| percents.push(p), || false);

    assert!(!report.cancelled);
    assert_eq!(report.files_scanned, 4);
    assert_eq!(report.files_total, 4);
    assert_eq!(report.paths.len(), 3, "{:?}", report.paths);
    assert!(report.paths.iter().all(|p| p.ends_with(".desktop")));
    assert!(report.paths.iter().any(|p| p.ends_with("konsole.desktop")));
    assert_eq!(percents.last(), Some(&100));
    assert!(percents.windows(2).all(|w| w[0] <= w[1]), "{percents:?}");
}

#[test]
fn e2e_scan_with_extra_root_covers_both_trees() {
    let builtin = tempfile::tempdir().unwrap();
    let extra = tempfile::tempdir().unwrap();
    write_entry(builtin.path(), "a.desktop", "A");
    write_entry(extra.path(), "b.desktop", "B");

    let target = linux_target(builtin.path()).with_extra_roots([
        extra.path().to_path_buf(),
        builtin.path().to_path_buf(),
    ]);
    assert_eq!(target.search_roots.len(), 2);

    let report = scan_target(&target, |_| {}, || false);
    assert_eq!(report.paths.len(), 2);
    // Built-in root is walked first.
    assert!(report.paths[0].ends_with("a.desktop"));
    assert!(report.paths[1].ends_with("b.desktop"));
}

// =============================================================================
// Import + persistence E2E
// =============================================================================

#[test]
fn e2e_import_uses_desktop_entry_names_and_survives_restart() {
    let apps = tempfile::tempdir().unwrap();
    populate(apps.path());
    let report = scan_target(&linux_target(apps.path()), |_| {}, || false);

    let mut library = Library::new();
    let added = library.import_scanned(
        report.paths.iter().map(String::as_str),
        platform::fs::application_display_name,
    );
    assert_eq!(added, 3);

    let mut names: Vec<&str> = library.shortcuts().iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        ["Firefox Web Browser", "GNU Image Manipulation Program", "Konsole"]
    );
    assert!(library
        .shortcuts()
        .iter()
        .all(|s| s.kind == ShortcutKind::Application && s.origin == ShortcutOrigin::Scan));

    // A second import of the same scan adds nothing.
    let again = library.import_scanned(
        report.paths.iter().map(String::as_str),
        platform::fs::application_display_name,
    );
    assert_eq!(again, 0);

    let data = tempfile::tempdir().unwrap();
    let library_file = data.path().join("nested").join("library.json");
    store::save(&library, &library_file).unwrap();

    let restored = store::load(&library_file).expect("library should load");
    assert_eq!(restored.shortcuts().len(), 3);
    assert_eq!(restored.items_in(Category::Applications).count(), 3);
    assert_eq!(restored.items_in(Category::Folders).count(), 0);
}

#[test]
fn e2e_manual_shortcuts_and_notes_round_trip() {
    let data = tempfile::tempdir().unwrap();
    let library_file = data.path().join("library.json");

    let mut library = Library::new();
    library
        .add_shortcut(
            data.path(),
            "Data",
            ShortcutKind::Folder,
            ShortcutOrigin::Manual,
        )
        .unwrap();
    library.add_note("Todo", "Back up the projects folder").unwrap();
    store::save(&library, &library_file).unwrap();

    let mut restored = store::load(&library_file).unwrap();
    assert_eq!(restored.shortcuts()[0].name, "Data");
    assert_eq!(restored.notes()[0].body, "Back up the projects folder");

    // Ids keep increasing after a restart.
    let old_max = restored.notes()[0].id.max(restored.shortcuts()[0].id);
    let new_id = restored.add_note("Later", "").unwrap().id;
    assert!(new_id > old_max);
}

// =============================================================================
// Config E2E
// =============================================================================

#[test]
fn e2e_config_extra_roots_feed_the_scan() {
    let apps = tempfile::tempdir().unwrap();
    write_entry(apps.path(), "tool.desktop", "Tool");

    let cfg_dir = tempfile::tempdir().unwrap();
    let cfg_path = cfg_dir.path().join("config.toml");
    let root = apps.path().display().to_string().replace('\\', "\\\\");
    fs::write(
        &cfg_path,
        format!("[ui]\ntheme = \"dark\"\n\n[scan]\nextra_roots = [\"{root}\"]\n"),
    )
    .unwrap();

    let (config, warnings) = platform::config::load_config(&cfg_path);
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(config.extra_scan_roots, vec![apps.path().to_path_buf()]);

    let target = ScanTarget {
        search_roots: Vec::new(),
        ..linux_target(apps.path())
    }
    .with_extra_roots(config.extra_scan_roots.clone());
    let report = scan_target(&target, |_| {}, || false);
    assert_eq!(report.paths.len(), 1);
}

#[test]
fn e2e_broken_config_still_starts_with_defaults() {
    let cfg_dir = tempfile::tempdir().unwrap();
    let cfg_path = cfg_dir.path().join("config.toml");
    fs::write(&cfg_path, "[ui\ntheme = ").unwrap();

    let (config, warnings) = platform::config::load_config(&cfg_path);
    assert_eq!(config, platform::config::AppConfig::default());
    assert_eq!(warnings.len(), 1);
}
