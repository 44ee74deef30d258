// LinkSphere - core/library.rs
//
// The shortcut library: an ordered collection of shortcuts and notes that
// backs the sidebar tree and the central table.
//
// Pure data operations only. Filesystem questions (is this path a
// directory?) are answered by the caller and passed in.

use crate::core::model::{
    Category, Note, Shortcut, ShortcutKind, ShortcutOrigin, SidebarNode,
};
use crate::util::constants;
use crate::util::error::LibraryError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// All shortcuts and notes the user has collected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    shortcuts: Vec<Shortcut>,
    #[serde(default)]
    notes: Vec<Note>,
    /// Next id handed out. Ids are shared between shortcuts and notes and
    /// never reused, even after removal.
    #[serde(default = "first_id")]
    next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Library {
    pub fn new() -> Self {
        Self {
            shortcuts: Vec::new(),
            notes: Vec::new(),
            next_id: first_id(),
        }
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn shortcut(&self, id: u64) -> Option<&Shortcut> {
        self.shortcuts.iter().find(|s| s.id == id)
    }

    pub fn contains_target(&self, target: &Path) -> bool {
        self.shortcuts.iter().any(|s| s.target == target)
    }

    fn allocate_id(&mut self) -> u64 {
        // Repair a counter that fell behind existing ids (hand-edited file).
        let max_existing = self
            .shortcuts
            .iter()
            .map(|s| s.id)
            .chain(self.notes.iter().map(|n| n.id))
            .max()
            .unwrap_or(0);
        let id = self.next_id.max(max_existing + 1);
        self.next_id = id + 1;
        id
    }

    /// Add a shortcut to `target`.
    ///
    /// A blank `name` falls back to the target's file stem. Whitespace around
    /// the path is trimmed so values pasted into the dialog still match.
    pub fn add_shortcut(
        &mut self,
        target: &Path,
        name: &str,
        kind: ShortcutKind,
        origin: ShortcutOrigin,
    ) -> Result<&Shortcut, LibraryError> {
        let trimmed = target.to_string_lossy().trim().to_string();
        if trimmed.is_empty() {
            return Err(LibraryError::EmptyPath);
        }
        let target = PathBuf::from(trimmed);
        if self.contains_target(&target) {
            return Err(LibraryError::DuplicateTarget { target });
        }

        let name = match name.trim() {
            "" => default_name(&target),
            n => n.to_string(),
        };
        let id = self.allocate_id();
        tracing::debug!(id, name = %name, kind = kind.label(), "Shortcut added");

        self.shortcuts.push(Shortcut {
            id,
            name,
            target,
            kind,
            origin,
            added: Utc::now(),
        });
        let idx = self.shortcuts.len() - 1;
        Ok(&self.shortcuts[idx])
    }

    /// Add every scanned application not already in the library.
    ///
    /// `name_for` supplies a display name per path (e.g. the `Name=` key of a
    /// desktop entry). Returns the number of shortcuts added.
    pub fn import_scanned<'a, I, F>(&mut self, paths: I, mut name_for: F) -> usize
    where
        I: IntoIterator<Item = &'a str>,
        F: FnMut(&Path) -> String,
    {
        let mut added = 0usize;
        for raw in paths {
            let path = Path::new(raw);
            if self.contains_target(path) {
                tracing::trace!(path = raw, "Already in library; skipping import");
                continue;
            }
            let name = name_for(path);
            if self
                .add_shortcut(path, &name, ShortcutKind::Application, ShortcutOrigin::Scan)
                .is_ok()
            {
                added += 1;
            }
        }
        tracing::info!(added, "Imported scanned applications");
        added
    }

    /// Remove a shortcut. Returns false if the id was unknown.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.shortcuts.len();
        self.shortcuts.retain(|s| s.id != id);
        self.shortcuts.len() != before
    }

    pub fn add_note(&mut self, title: &str, body: &str) -> Result<&Note, LibraryError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LibraryError::EmptyTitle);
        }
        let length = title.chars().count();
        if length > constants::MAX_NOTE_TITLE_CHARS {
            return Err(LibraryError::TitleTooLong {
                length,
                max: constants::MAX_NOTE_TITLE_CHARS,
            });
        }
        let id = self.allocate_id();
        self.notes.push(Note {
            id,
            title: title.to_string(),
            body: body.to_string(),
            created: Utc::now(),
        });
        let idx = self.notes.len() - 1;
        Ok(&self.notes[idx])
    }

    pub fn remove_note(&mut self, id: u64) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }

    /// Shortcuts listed under `category`, in insertion order.
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &Shortcut> {
        self.shortcuts
            .iter()
            .filter(move |s| category.includes(s.kind))
    }

    fn count_kind(&self, kind: ShortcutKind) -> usize {
        self.shortcuts.iter().filter(|s| s.kind == kind).count()
    }

    /// Build the sidebar tree from the current contents.
    pub fn sidebar_tree(&self) -> Vec<SidebarNode> {
        let leaf = |category: Category, count: usize| SidebarNode {
            label: category.label().to_string(),
            category: Some(category),
            count,
            children: Vec::new(),
        };

        vec![
            SidebarNode {
                label: "Library".to_string(),
                category: None,
                count: self.shortcuts.len(),
                children: vec![
                    leaf(Category::All, self.shortcuts.len()),
                    leaf(
                        Category::Applications,
                        self.count_kind(ShortcutKind::Application),
                    ),
                    leaf(Category::Folders, self.count_kind(ShortcutKind::Folder)),
                    leaf(Category::Files, self.count_kind(ShortcutKind::File)),
                ],
            },
            leaf(Category::Notes, self.notes.len()),
        ]
    }
}

/// File stem of `target`, or the whole path when it has none.
fn default_name(target: &Path) -> String {
    target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| target.display().to_string())
}
