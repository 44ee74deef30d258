// LinkSphere - platform/fs.rs
//
// Thin filesystem and shell helpers used by the app and UI layers.
// Everything here is best-effort: failures are logged, never propagated.

use crate::core::desktop_entry;
use std::path::Path;

/// Desktop entries larger than this are not read for a display name.
const MAX_DESKTOP_ENTRY_BYTES: u64 = 256 * 1024;

/// True if `path` currently resolves to a directory.
pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// Display name for a scanned application, reading the desktop entry on
/// Linux-style `.desktop` paths and falling back to the file stem.
pub fn application_display_name(path: &Path) -> String {
    let is_desktop_entry = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("desktop"));
    let content = if is_desktop_entry {
        read_small_text(path)
    } else {
        None
    };
    desktop_entry::display_name(path, content.as_deref())
}

fn read_small_text(path: &Path) -> Option<String> {
    let meta = std::fs::metadata(path).ok()?;
    if meta.len() > MAX_DESKTOP_ENTRY_BYTES {
        tracing::debug!(
            path = %path.display(),
            size = meta.len(),
            "Desktop entry too large to read"
        );
        return None;
    }
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Cannot read desktop entry");
            None
        }
    }
}

/// Open `path` with the platform's default handler (launch an application,
/// open a folder in the file manager, open a document in its editor).
///
/// Platform behaviour:
/// - **Windows**: `cmd /C start "" "<path>"`.
/// - **macOS**: `open "<path>"` (works for `.app` bundles too).
/// - **Linux**: `gio launch` for `.desktop` entries, `xdg-open` otherwise.
///
/// The subprocess is spawned detached; a launch failure is logged at WARN and
/// reported back as `false` so the status bar can say so.
pub fn open_target(path: &Path) -> bool {
    let result = spawn_opener(path);
    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Opened shortcut target");
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to open shortcut target");
            false
        }
    }
}

#[cfg(target_os = "windows")]
fn spawn_opener(path: &Path) -> std::io::Result<()> {
    std::process::Command::new("cmd")
        .arg("/C")
        .arg("start")
        .arg("")
        .arg(path)
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "macos")]
fn spawn_opener(path: &Path) -> std::io::Result<()> {
    std::process::Command::new("open").arg(path).spawn().map(|_| ())
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn spawn_opener(path: &Path) -> std::io::Result<()> {
    let is_desktop_entry = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("desktop"));
    if is_desktop_entry {
        std::process::Command::new("gio")
            .arg("launch")
            .arg(path)
            .spawn()
            .map(|_| ())
    } else {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .map(|_| ())
    }
}

/// Open the system file manager and highlight `path` within it.
///
/// Platform behaviour:
/// - **Windows**: `explorer.exe /select,"<path>"`.
/// - **macOS**: `open -R "<path>"`.
/// - **Linux**: `xdg-open "<parent>"` (no standard per-file selection API).
pub fn reveal_in_file_manager(path: &Path) {
    #[cfg(target_os = "windows")]
    {
        // `/select,<path>` must be a single argument; no space after the comma.
        let arg = format!("/select,{}", path.display());
        if let Err(e) = std::process::Command::new("explorer").arg(arg).spawn() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to reveal in Explorer");
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Err(e) = std::process::Command::new("open")
            .arg("-R")
            .arg(path)
            .spawn()
        {
            tracing::warn!(path = %path.display(), error = %e, "Failed to reveal in Finder");
        }
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let parent = path.parent().unwrap_or(path);
        if let Err(e) = std::process::Command::new("xdg-open").arg(parent).spawn() {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to open parent directory in file manager"
            );
        }
    }
}
