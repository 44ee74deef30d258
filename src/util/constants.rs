// LinkSphere - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LinkSphere";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LinkSphere";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Scan roots (fixed per-OS lookup table)
// =============================================================================

/// Windows installation directories, searched in this order.
pub const WINDOWS_SCAN_ROOTS: &[&str] = &[r"C:\Program Files", r"C:\Program Files (x86)"];

/// macOS installation directories.
pub const DARWIN_SCAN_ROOTS: &[&str] = &["/Applications"];

/// Linux desktop-entry directories.
pub const LINUX_SCAN_ROOTS: &[&str] = &["/usr/share/applications"];

pub const WINDOWS_APP_SUFFIX: &str = ".exe";
pub const DARWIN_APP_SUFFIX: &str = ".app";
pub const LINUX_APP_SUFFIX: &str = ".desktop";

/// Every suffix that marks a path as an application when classifying a
/// manually added shortcut. Compared case-insensitively.
pub const APPLICATION_SUFFIXES: &[&str] = &[".exe", ".app", ".desktop", ".appimage"];

/// Maximum number of extra scan roots accepted from config.toml.
pub const MAX_EXTRA_SCAN_ROOTS: usize = 32;

// =============================================================================
// Per-frame UI message budgets
// =============================================================================

/// Maximum number of scan events processed by the UI update loop per frame.
/// Remaining events stay in the channel for the next frame.
pub const MAX_SCAN_MESSAGES_PER_FRAME: usize = 200;

// =============================================================================
// Library limits
// =============================================================================

/// Maximum length of a note title in characters.
pub const MAX_NOTE_TITLE_CHARS: usize = 200;

/// Maximum size of the persisted library file in bytes. Larger files are
/// refused on load rather than read into memory.
pub const MAX_LIBRARY_FILE_SIZE: u64 = 16 * 1024 * 1024; // 16 MB

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Initial main window size.
pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];

/// Minimum main window size.
pub const WINDOW_MIN_SIZE: [f32; 2] = [700.0, 400.0];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Library persistence file name (stored in the platform data directory).
pub const LIBRARY_FILE_NAME: &str = "library.json";
