//! Scene dressing around the loaded model: lights, the look target marker,
//! and click handling on the scene root.

/// Ambient and point light rig.
pub mod lighting;

/// Observer reporting the camera pose when the scene is clicked.
pub mod picking;

/// Small cube following the rig's smoothed look-at point.
pub mod target_marker;
