//! Scene asset loading.
//!
//! Requests the glTF scene at startup and spawns it once it and its
//! dependencies are available, reporting progress to the host page.

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// glTF scene request, readiness polling and scene root spawning.
pub mod scene_loader;
