// LinkSphere - app/state.rs
//
// Application state management. Holds the shortcut library, sidebar and
// table selection, theme, dialog drafts, and the scan dialog.
// Owned by the eframe::App implementation.
//
// UI panels never perform I/O or touch the ScanManager. They set the
// `request_*` / `pending_*` fields and gui.rs consumes them each frame.

use crate::app::store;
use crate::core::library::Library;
use crate::core::model::{
    Category, OsKind, ScanEvent, ScanReport, Shortcut, ShortcutKind, ShortcutOrigin, Theme,
};
use crate::platform::config::AppConfig;
use std::path::{Path, PathBuf};

/// Contents of the Add Shortcut dialog while it is open.
#[derive(Debug, Clone, Default)]
pub struct ShortcutDraft {
    /// Folder or application path typed or picked via Browse.
    pub path: String,
    /// Optional display name; blank uses the file stem.
    pub name: String,
    /// Validation message from the last OK press.
    pub error: Option<String>,
}

/// Contents of the Add Note dialog while it is open.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
    pub error: Option<String>,
}

/// Scan dialog: progress while running, then a checklist of results.
#[derive(Debug, Clone, Default)]
pub struct ScanDialog {
    pub open: bool,
    pub running: bool,
    pub percent: u8,
    /// Discovered paths (complete or partial).
    pub results: Vec<String>,
    /// Checkbox state per entry of `results`.
    pub selected: Vec<bool>,
    /// Last report, for the summary line.
    pub report: Option<ScanReport>,
    /// Message shown instead of results (e.g. unsupported platform).
    pub notice: Option<String>,
}

impl ScanDialog {
    fn reset_for_new_scan(&mut self) {
        *self = Self {
            open: true,
            running: true,
            ..Default::default()
        };
    }

    fn finish(&mut self, report: ScanReport, selectable: impl Fn(&str) -> bool) {
        self.running = false;
        self.percent = if report.cancelled { self.percent } else { 100 };
        self.selected = report.paths.iter().map(|p| selectable(p)).collect();
        self.results = report.paths.clone();
        self.report = Some(report);
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// All shortcuts and notes.
    pub library: Library,

    /// Where the library is persisted. `None` disables persistence.
    pub library_path: Option<PathBuf>,

    /// Current colour scheme. Passed explicitly into view construction.
    pub theme: Theme,

    /// Body font size in points.
    pub font_size: f32,

    /// Host OS, resolved once at startup.
    pub os_kind: OsKind,

    /// Extra directories to scan after the built-in ones.
    pub extra_scan_roots: Vec<PathBuf>,

    /// Sidebar selection.
    pub selected_category: Category,

    /// Selected row in the shortcut table.
    pub selected_shortcut: Option<u64>,

    /// Selected note in the notes view.
    pub selected_note: Option<u64>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems, failed saves).
    pub warnings: Vec<String>,

    /// Open Add Shortcut dialog.
    pub shortcut_dialog: Option<ShortcutDraft>,

    /// Open Add Note dialog.
    pub note_dialog: Option<NoteDraft>,

    pub scan_dialog: ScanDialog,

    pub show_about: bool,

    /// Set by a panel: start an application scan.
    pub request_scan: bool,

    /// Set by a panel: cancel the running scan.
    pub request_cancel: bool,

    /// Set by a panel: the Add Shortcut dialog's OK was pressed.
    pub request_submit_shortcut: bool,

    /// Set by a panel: open this target with the platform opener.
    pub pending_open: Option<PathBuf>,

    /// Set by a panel: show this target in the file manager.
    pub pending_reveal: Option<PathBuf>,

    /// Set by a panel: import the checked scan results.
    pub request_import: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state from a loaded library and validated config.
    pub fn new(
        library: Library,
        config: &AppConfig,
        library_path: Option<PathBuf>,
        debug_mode: bool,
    ) -> Self {
        Self {
            library,
            library_path,
            theme: config.theme,
            font_size: config.font_size,
            os_kind: OsKind::current(),
            extra_scan_roots: config.extra_scan_roots.clone(),
            selected_category: Category::All,
            selected_shortcut: None,
            selected_note: None,
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            shortcut_dialog: None,
            note_dialog: None,
            scan_dialog: ScanDialog::default(),
            show_about: false,
            request_scan: false,
            request_cancel: false,
            request_submit_shortcut: false,
            pending_open: None,
            pending_reveal: None,
            request_import: false,
            debug_mode,
        }
    }

    // -------------------------------------------------------------------------
    // Selection and view helpers
    // -------------------------------------------------------------------------

    /// Shortcuts shown in the central table for the current sidebar category.
    pub fn visible_shortcuts(&self) -> Vec<&Shortcut> {
        self.library.items_in(self.selected_category).collect()
    }

    pub fn selected_shortcut(&self) -> Option<&Shortcut> {
        self.selected_shortcut
            .and_then(|id| self.library.shortcut(id))
    }

    /// Switch sidebar category, dropping a selection that is no longer visible.
    pub fn select_category(&mut self, category: Category) {
        self.selected_category = category;
        if let Some(sel) = self.selected_shortcut() {
            if !category.includes(sel.kind) {
                self.selected_shortcut = None;
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            tracing::info!(theme = theme.menu_label(), "Theme changed");
        }
        self.theme = theme;
    }

    // -------------------------------------------------------------------------
    // Dialog submission
    // -------------------------------------------------------------------------

    pub fn open_shortcut_dialog(&mut self) {
        self.shortcut_dialog = Some(ShortcutDraft::default());
    }

    pub fn open_note_dialog(&mut self) {
        self.note_dialog = Some(NoteDraft::default());
    }

    /// Add the shortcut described by the open dialog.
    ///
    /// `is_dir` is supplied by the caller (gui.rs asks the platform layer).
    /// On a validation error the dialog stays open with the message shown.
    pub fn submit_shortcut_dialog(&mut self, is_dir: bool) -> bool {
        let Some(draft) = self.shortcut_dialog.as_mut() else {
            return false;
        };
        let path = PathBuf::from(draft.path.trim());
        let kind = ShortcutKind::classify(&path, is_dir);

        match self
            .library
            .add_shortcut(&path, &draft.name, kind, ShortcutOrigin::Manual)
        {
            Ok(shortcut) => {
                let id = shortcut.id;
                self.status_message = format!("Added shortcut '{}'.", shortcut.name);
                self.shortcut_dialog = None;
                self.selected_shortcut = Some(id);
                self.save_library();
                true
            }
            Err(e) => {
                draft.error = Some(e.to_string());
                false
            }
        }
    }

    /// Add the note described by the open dialog.
    pub fn submit_note_dialog(&mut self) -> bool {
        let Some(draft) = self.note_dialog.as_mut() else {
            return false;
        };
        match self.library.add_note(&draft.title, &draft.body) {
            Ok(note) => {
                let id = note.id;
                self.status_message = format!("Added note '{}'.", note.title);
                self.note_dialog = None;
                self.selected_note = Some(id);
                self.save_library();
                true
            }
            Err(e) => {
                draft.error = Some(e.to_string());
                false
            }
        }
    }

    /// True if the current view has a selection that Remove Selected acts on.
    pub fn has_removable_selection(&self) -> bool {
        if self.selected_category == Category::Notes {
            self.selected_note.is_some()
        } else {
            self.selected_shortcut.is_some()
        }
    }

    /// True while any dialog window is showing.
    pub fn dialog_open(&self) -> bool {
        self.shortcut_dialog.is_some() || self.note_dialog.is_some() || self.scan_dialog.open
    }

    /// Remove whichever shortcut or note is selected in the current view.
    pub fn remove_selected(&mut self) -> bool {
        let removed = if self.selected_category == Category::Notes {
            self.selected_note
                .take()
                .is_some_and(|id| self.library.remove_note(id))
        } else {
            self.selected_shortcut
                .take()
                .is_some_and(|id| self.library.remove(id))
        };
        if removed {
            self.status_message = "Removed.".to_string();
            self.save_library();
        }
        removed
    }

    // -------------------------------------------------------------------------
    // Scan dialog
    // -------------------------------------------------------------------------

    /// Show the scan dialog in its running state before the worker reports.
    pub fn begin_scan(&mut self) {
        self.scan_dialog.reset_for_new_scan();
        self.status_message = "Scanning for applications...".to_string();
    }

    /// Apply one event from the background scan.
    pub fn apply_scan_event(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Started { os_kind, roots } => {
                self.scan_dialog.reset_for_new_scan();
                self.status_message =
                    format!("Scanning {roots} {os_kind} application location(s)...");
            }
            ScanEvent::Progress { percent } => {
                self.scan_dialog.percent = percent;
                self.status_message = format!("Scanning for applications... {percent}%");
            }
            ScanEvent::Completed { report } => {
                self.status_message = format!(
                    "Scan complete: {} application(s) found in {} file(s).",
                    report.paths.len(),
                    report.files_scanned
                );
                self.finish_scan(report);
            }
            ScanEvent::Cancelled { report } => {
                self.status_message = format!(
                    "Scan cancelled: {} application(s) found before stopping.",
                    report.paths.len()
                );
                self.finish_scan(report);
            }
            ScanEvent::Unsupported { os_kind } => {
                self.scan_dialog.open = true;
                self.scan_dialog.running = false;
                let msg = format!("Application scanning is not available on {os_kind}.");
                self.scan_dialog.notice = Some(msg.clone());
                self.status_message = msg;
            }
        }
    }

    fn finish_scan(&mut self, report: ScanReport) {
        let library = &self.library;
        // Pre-check only paths that are not yet in the library.
        self.scan_dialog
            .finish(report, |p| !library.contains_target(Path::new(p)));
    }

    /// True while the background scan has not yet reported a result.
    pub fn scan_running(&self) -> bool {
        self.scan_dialog.running
    }

    /// Import every checked scan result. `name_for` supplies display names.
    pub fn import_selected_scan_results<F>(&mut self, name_for: F) -> usize
    where
        F: FnMut(&Path) -> String,
    {
        let chosen: Vec<&str> = self
            .scan_dialog
            .results
            .iter()
            .zip(&self.scan_dialog.selected)
            .filter(|(_, checked)| **checked)
            .map(|(p, _)| p.as_str())
            .collect();
        let added = self.library.import_scanned(chosen, name_for);

        self.status_message = format!("Imported {added} application(s).");
        self.scan_dialog.open = false;
        if added > 0 {
            self.save_library();
        }
        added
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Re-read the library from disk, discarding unsaved selection.
    ///
    /// A missing or unreadable file leaves the in-memory library untouched.
    pub fn reload_library(&mut self) -> bool {
        let Some(path) = self.library_path.as_deref() else {
            return false;
        };
        match store::load(path) {
            Some(library) => {
                self.library = library;
                self.selected_shortcut = None;
                self.selected_note = None;
                self.status_message = "Library reloaded.".to_string();
                true
            }
            None => {
                self.status_message = "No saved library to reload.".to_string();
                false
            }
        }
    }

    /// Persist the library if a path is configured. Failures become a
    /// warning and a status message; the in-memory library is unaffected.
    pub fn save_library(&mut self) {
        let Some(path) = self.library_path.as_deref() else {
            return;
        };
        if let Err(e) = store::save(&self.library, path) {
            tracing::warn!(error = %e, "Failed to save library");
            self.status_message = format!("Could not save library: {e}");
            self.warnings.push(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(Library::new(), &AppConfig::default(), None, false)
    }

    fn report(paths: &[&str], cancelled: bool) -> ScanReport {
        ScanReport {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            files_scanned: 10,
            files_total: 10,
            skipped: 0,
            cancelled,
        }
    }

    #[test]
    fn test_submit_shortcut_closes_dialog_and_selects() {
        let mut st = state();
        st.open_shortcut_dialog();
        st.shortcut_dialog.as_mut().unwrap().path = "/home/me/Music".to_string();

        assert!(st.submit_shortcut_dialog(true));
        assert!(st.shortcut_dialog.is_none());
        let sel = st.selected_shortcut().expect("new shortcut selected");
        assert_eq!(sel.kind, ShortcutKind::Folder);
        assert_eq!(sel.name, "Music");
    }

    #[test]
    fn test_submit_empty_shortcut_keeps_dialog_open() {
        let mut st = state();
        st.open_shortcut_dialog();
        assert!(!st.submit_shortcut_dialog(false));
        let draft = st.shortcut_dialog.as_ref().expect("still open");
        assert!(draft.error.is_some());
    }

    #[test]
    fn test_submit_note_and_remove() {
        let mut st = state();
        st.open_note_dialog();
        st.note_dialog.as_mut().unwrap().title = "Passwords go elsewhere".to_string();
        assert!(st.submit_note_dialog());

        st.select_category(Category::Notes);
        assert!(st.remove_selected());
        assert!(st.library.notes().is_empty());
    }

    #[test]
    fn test_category_switch_drops_hidden_selection() {
        let mut st = state();
        st.open_shortcut_dialog();
        st.shortcut_dialog.as_mut().unwrap().path = "/tmp/report.pdf".to_string();
        st.submit_shortcut_dialog(false);
        assert!(st.selected_shortcut.is_some());

        st.select_category(Category::Applications);
        assert!(st.selected_shortcut.is_none());
        assert!(st.visible_shortcuts().is_empty());
    }

    #[test]
    fn test_scan_events_drive_dialog() {
        let mut st = state();
        st.apply_scan_event(ScanEvent::Started {
            os_kind: OsKind::Linux,
            roots: 1,
        });
        assert!(st.scan_running());
        st.apply_scan_event(ScanEvent::Progress { percent: 40 });
        assert_eq!(st.scan_dialog.percent, 40);

        st.apply_scan_event(ScanEvent::Cancelled {
            report: report(&["/a.desktop"], true),
        });
        assert!(!st.scan_running());
        assert_eq!(st.scan_dialog.percent, 40, "cancelled scan keeps its percent");
        assert_eq!(st.scan_dialog.results, vec!["/a.desktop".to_string()]);
        assert_eq!(st.scan_dialog.selected, vec![true]);
    }

    #[test]
    fn test_import_only_checked_results() {
        let mut st = state();
        st.apply_scan_event(ScanEvent::Started {
            os_kind: OsKind::Linux,
            roots: 1,
        });
        st.apply_scan_event(ScanEvent::Completed {
            report: report(&["/apps/a.desktop", "/apps/b.desktop", "/apps/c.desktop"], false),
        });
        st.scan_dialog.selected[1] = false;

        let added = st.import_selected_scan_results(|p| {
            p.file_stem().unwrap().to_string_lossy().into_owned()
        });
        assert_eq!(added, 2);
        assert!(!st.scan_dialog.open);
        let names: Vec<_> = st.library.shortcuts().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_already_imported_results_start_unchecked() {
        let mut st = state();
        st.library.import_scanned(["/apps/a.desktop"], |_| "A".to_string());
        st.apply_scan_event(ScanEvent::Completed {
            report: report(&["/apps/a.desktop", "/apps/b.desktop"], false),
        });
        assert_eq!(st.scan_dialog.selected, vec![false, true]);
    }

    #[test]
    fn test_unsupported_event_sets_notice() {
        let mut st = state();
        st.apply_scan_event(ScanEvent::Unsupported {
            os_kind: OsKind::Other,
        });
        assert!(st.scan_dialog.open);
        assert!(!st.scan_running());
        assert!(st.scan_dialog.notice.is_some());
    }

    #[test]
    fn test_save_library_persists_when_path_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        let mut st = AppState::new(
            Library::new(),
            &AppConfig::default(),
            Some(path.clone()),
            false,
        );
        st.open_note_dialog();
        st.note_dialog.as_mut().unwrap().title = "Saved".to_string();
        st.submit_note_dialog();

        let loaded = store::load(&path).expect("library written on submit");
        assert_eq!(loaded.notes().len(), 1);

        st.library = Library::new();
        assert!(st.reload_library());
        assert_eq!(st.library.notes().len(), 1);
    }

    #[test]
    fn test_begin_scan_opens_running_dialog() {
        let mut st = state();
        st.scan_dialog.results = vec!["/old".to_string()];
        st.begin_scan();
        assert!(st.scan_dialog.open);
        assert!(st.scan_running());
        assert!(st.scan_dialog.results.is_empty());
    }

    #[test]
    fn test_removable_selection_follows_current_category() {
        let mut st = state();
        st.open_note_dialog();
        st.note_dialog.as_mut().unwrap().title = "Shopping".to_string();
        assert!(st.submit_note_dialog());
        assert!(st.selected_note.is_some());

        // A note selection does not count while shortcuts are shown.
        st.select_category(Category::All);
        assert!(!st.has_removable_selection());
        assert!(!st.remove_selected());
        assert_eq!(st.library.notes().len(), 1);

        st.select_category(Category::Notes);
        assert!(st.has_removable_selection());
    }

    #[test]
    fn test_dialog_open_covers_every_window() {
        let mut st = state();
        assert!(!st.dialog_open());
        st.open_note_dialog();
        assert!(st.dialog_open());
        st.note_dialog = None;
        st.open_shortcut_dialog();
        assert!(st.dialog_open());
        st.shortcut_dialog = None;
        st.begin_scan();
        assert!(st.dialog_open());
    }
}
