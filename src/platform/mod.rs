// LinkSphere - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: standard library, directories crate, core models.
// Must NOT depend on: app, ui.

pub mod config;
pub mod fs;
