// LinkSphere - ui/panels/mod.rs

pub mod about;
pub mod note_dialog;
pub mod scan_dialog;
pub mod shortcut_dialog;
pub mod sidebar;
pub mod table;
