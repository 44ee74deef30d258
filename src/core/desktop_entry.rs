// LinkSphere - core/desktop_entry.rs
//
// Minimal reader for freedesktop.org `.desktop` files: just enough to give
// scanned Linux applications a human-readable name.

use std::path::Path;

const MAIN_GROUP: &str = "[Desktop Entry]";

/// Return the unlocalised `Name=` value from the `[Desktop Entry]` group.
///
/// Localised keys (`Name[de]=`) and keys in other groups (`[Desktop Action
/// new-window]`) are ignored. Blank values count as missing.
pub fn parse_name(content: &str) -> Option<String> {
    let mut in_main_group = false;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            in_main_group = line == MAIN_GROUP;
            continue;
        }
        if !in_main_group {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            if key.trim() == "Name" {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Display name for a scanned application path.
///
/// Prefers the desktop entry name when `content` is supplied and has one;
/// otherwise the file stem (so `Safari.app` shows as `Safari`).
pub fn display_name(path: &Path, content: Option<&str>) -> String {
    content
        .and_then(parse_name)
        .or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| path.display().to_string())
}
