// LinkSphere - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// Operating system family
// =============================================================================

/// Host operating system family, as far as application discovery cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsKind {
    Windows,
    Darwin,
    Linux,
    Other,
}

impl OsKind {
    /// Map a `std::env::consts::OS` style name onto an OS family.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" => OsKind::Windows,
            "macos" | "darwin" => OsKind::Darwin,
            "linux" => OsKind::Linux,
            _ => OsKind::Other,
        }
    }

    /// The OS family this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OsKind::Windows => "Windows",
            OsKind::Darwin => "macOS",
            OsKind::Linux => "Linux",
            OsKind::Other => "Other",
        }
    }
}

impl std::fmt::Display for OsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Scan target / progress / report
// =============================================================================

/// Where to look for applications and what they look like.
///
/// Built once per scan from the detected OS via [`ScanTarget::for_os`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    pub os_kind: OsKind,

    /// Directories walked in listed order.
    pub search_roots: Vec<PathBuf>,

    /// File-name suffix that marks an application (e.g. ".desktop").
    pub match_suffix: String,

    /// When true, a directory whose name ends with `match_suffix` is an
    /// opaque application bundle: it counts as one visited entry, may be
    /// matched, and is never descended into. Set for macOS `.app` bundles.
    pub bundles_are_entries: bool,
}

impl ScanTarget {
    /// Resolve the fixed per-OS lookup table. `Other` has no target.
    pub fn for_os(os_kind: OsKind) -> Option<Self> {
        let (roots, suffix, bundles) = match os_kind {
            OsKind::Windows => (
                constants::WINDOWS_SCAN_ROOTS,
                constants::WINDOWS_APP_SUFFIX,
                false,
            ),
            OsKind::Darwin => (
                constants::DARWIN_SCAN_ROOTS,
                constants::DARWIN_APP_SUFFIX,
                true,
            ),
            OsKind::Linux => (
                constants::LINUX_SCAN_ROOTS,
                constants::LINUX_APP_SUFFIX,
                false,
            ),
            OsKind::Other => return None,
        };
        Some(Self {
            os_kind,
            search_roots: roots.iter().map(PathBuf::from).collect(),
            match_suffix: suffix.to_string(),
            bundles_are_entries: bundles,
        })
    }

    /// Append extra roots after the built-in ones, skipping any already listed.
    pub fn with_extra_roots<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for root in extra {
            if !self.search_roots.contains(&root) {
                self.search_roots.push(root);
            }
        }
        self
    }

    /// True if a file or bundle name marks an application for this target.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.match_suffix)
    }
}

/// Running scan counters. Recomputed after every visited file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanProgress {
    pub files_scanned: u64,
    pub files_total: u64,
}

impl ScanProgress {
    /// `floor(files_scanned / files_total * 100)`, clamped to 100.
    ///
    /// A zero total reports 0 rather than dividing by zero.
    pub fn percent(&self) -> u8 {
        if self.files_total == 0 {
            return 0;
        }
        let pct = self.files_scanned.saturating_mul(100) / self.files_total;
        pct.min(100) as u8
    }
}

/// Everything a finished (or cancelled) scan produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Matching paths in discovery order, without duplicates.
    pub paths: Vec<String>,

    pub files_scanned: u64,
    pub files_total: u64,

    /// Entries that could not be read (permission denied, vanished mid-walk).
    pub skipped: u64,

    /// True when `should_cancel` stopped the scan early.
    pub cancelled: bool,
}

/// Messages sent from the background scan thread to the UI thread.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// The worker has resolved its target and begun the pre-pass.
    Started { os_kind: OsKind, roots: usize },

    /// Percentage changed.
    Progress { percent: u8 },

    /// The scan ran to completion.
    Completed { report: ScanReport },

    /// The scan was cancelled; `report.paths` holds the partial result.
    Cancelled { report: ScanReport },

    /// The host OS has no scan target. Not an error.
    Unsupported { os_kind: OsKind },
}

// =============================================================================
// Library items
// =============================================================================

/// What a shortcut points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutKind {
    Application,
    Folder,
    File,
}

impl ShortcutKind {
    /// Classify a target path. `is_dir` comes from the caller so this stays
    /// free of filesystem access.
    ///
    /// Application suffixes win over the directory check because macOS
    /// `.app` bundles are directories.
    pub fn classify(path: &Path, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if constants::APPLICATION_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
        {
            ShortcutKind::Application
        } else if is_dir {
            ShortcutKind::Folder
        } else {
            ShortcutKind::File
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShortcutKind::Application => "Application",
            ShortcutKind::Folder => "Folder",
            ShortcutKind::File => "File",
        }
    }
}

/// How a shortcut entered the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutOrigin {
    #[default]
    Manual,
    Scan,
}

/// A saved link to an application, folder, or file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortcut {
    /// Unique within the library; never reused.
    pub id: u64,
    pub name: String,
    pub target: PathBuf,
    pub kind: ShortcutKind,
    #[serde(default)]
    pub origin: ShortcutOrigin,
    pub added: DateTime<Utc>,
}

/// A free-text note stored alongside the shortcuts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub created: DateTime<Utc>,
}

// =============================================================================
// Theme
// =============================================================================

/// Colour scheme selected from the Theme menu or config.toml.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a config/CLI value, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            Theme::Light => "Light Theme",
            Theme::Dark => "Dark Theme",
        }
    }
}

// =============================================================================
// Sidebar model
// =============================================================================

/// Sidebar selection. Filters the central table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Applications,
    Folders,
    Files,
    Notes,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All Shortcuts",
            Category::Applications => "Applications",
            Category::Folders => "Folders",
            Category::Files => "Files",
            Category::Notes => "Notes",
        }
    }

    /// True if a shortcut of `kind` is listed under this category.
    pub fn includes(&self, kind: ShortcutKind) -> bool {
        match self {
            Category::All => true,
            Category::Applications => kind == ShortcutKind::Application,
            Category::Folders => kind == ShortcutKind::Folder,
            Category::Files => kind == ShortcutKind::File,
            Category::Notes => false,
        }
    }
}

/// One node of the sidebar tree. Rebuilt from the library on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarNode {
    pub label: String,
    /// `None` for pure grouping nodes.
    pub category: Option<Category>,
    pub count: usize,
    pub children: Vec<SidebarNode>,
}
