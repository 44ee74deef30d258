// LinkSphere - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, walkdir, chrono, serde.
// Must NOT depend on: ui, platform, app.

pub mod desktop_entry;
pub mod library;
pub mod model;
pub mod scanner;
