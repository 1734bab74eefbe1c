//! Runtime diagnostics.

/// FPS notifications for the host page and the native FPS overlay.
pub mod fps_tracking;
