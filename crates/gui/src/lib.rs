// Library crate: exposes testable modules for integration tests and the command interface.
// GUI-specific modules (app, ui, viewport painting) remain in the binary crate.

pub mod anchor;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod helpers;
pub mod state;

/// Camera and picking math shared by the simulated feed and the viewport.
/// Painting stays in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod picking;
}
