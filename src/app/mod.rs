// LinkSphere - app/mod.rs
//
// Application layer: orchestration, state management, persistence.
// Dependencies: core layer, platform config types.
// Must NOT depend on: ui.

pub mod scan;
pub mod state;
pub mod store;
