// LinkSphere - lib.rs
//
// Library entry point, exposing all non-GUI modules for integration testing
// and headless use (`linksphere --list-apps`).
//
// The eframe `App` implementation lives in `gui.rs`, which is part of the
// binary only.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
