// LinkSphere - app/store.rs
//
// Library persistence: save and restore shortcuts and notes between
// application restarts.
//
// - Saved atomically (write temp, rename into place) so a crash during save
//   never corrupts the previous good file.
// - Load problems are logged and treated as "start with an empty library"
//   rather than surfaced as errors.
// - The data directory is created on first save.

use crate::core::library::Library;
use crate::util::constants;
use crate::util::error::StoreError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version stamp for forward-compatibility checks.
///
/// Increment when the on-disk shape changes incompatibly. Mismatched files
/// are ignored on load.
pub const LIBRARY_VERSION: u32 = 1;

#[derive(Serialize)]
struct StoredLibrary<'a> {
    version: u32,
    library: &'a Library,
}

#[derive(Deserialize)]
struct LoadedLibrary {
    version: u32,
    library: Library,
}

/// Save `library` to `path` atomically (write temp, then rename).
pub fn save(library: &Library, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(&StoredLibrary {
        version: LIBRARY_VERSION,
        library,
    })
    .map_err(|source| StoreError::Serialise { source })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|source| StoreError::Write {
        path: tmp.clone(),
        source,
    })?;

    std::fs::rename(&tmp, path).map_err(|source| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        StoreError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::debug!(
        path = %path.display(),
        shortcuts = library.shortcuts().len(),
        notes = library.notes().len(),
        "Library saved"
    );
    Ok(())
}

/// Load a library from `path`.
///
/// Returns `None` when the file is missing, oversized, malformed, or has a
/// different version. The caller should start with an empty library.
pub fn load(path: &Path) -> Option<Library> {
    let meta = std::fs::metadata(path)
        .map_err(|e| {
            // "Not found" is the normal first run.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot stat library file");
            }
        })
        .ok()?;

    if meta.len() > constants::MAX_LIBRARY_FILE_SIZE {
        tracing::warn!(
            path = %path.display(),
            size = meta.len(),
            max = constants::MAX_LIBRARY_FILE_SIZE,
            "Library file too large; starting fresh"
        );
        return None;
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Cannot read library file");
        })
        .ok()?;

    let loaded: LoadedLibrary = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Library file is malformed; starting fresh"
            );
        })
        .ok()?;

    if loaded.version != LIBRARY_VERSION {
        tracing::warn!(
            found = loaded.version,
            expected = LIBRARY_VERSION,
            "Library file version mismatch; starting fresh"
        );
        return None;
    }

    tracing::info!(
        path = %path.display(),
        shortcuts = loaded.library.shortcuts().len(),
        "Library loaded"
    );
    Some(loaded.library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ShortcutKind, ShortcutOrigin};
    use tempfile::TempDir;

    fn sample() -> Library {
        let mut lib = Library::new();
        lib.add_shortcut(
            Path::new("/usr/share/applications/gimp.desktop"),
            "GIMP",
            ShortcutKind::Application,
            ShortcutOrigin::Scan,
        )
        .unwrap();
        lib.add_note("Backups", "Run on Fridays").unwrap();
        lib
    }

    #[test]
    fn test_save_then_load_restores_library() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("library.json");
        let original = sample();

        save(&original, &path).expect("save should create parent dirs");
        let loaded = load(&path).expect("load after save");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("library.json")).is_none());
    }

    #[test]
    fn test_load_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, b"{ not json").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_load_wrong_version_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, br#"{"version": 99, "library": {}}"#).unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_leftover_temp_file_does_not_break_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        save(&sample(), &path).unwrap();
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let mut updated = sample();
        updated.add_note("Second", "").unwrap();
        save(&updated, &path).unwrap();

        assert_eq!(load(&path).unwrap().notes().len(), 2);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
