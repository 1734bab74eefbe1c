//! Camera presets and the two controllers that can own the viewer camera.
//!
//! In automatic mode the preset rig eases the camera toward the selected
//! viewpoint every frame; in manual mode the orbit controls take over. The rig
//! keeps its smoothed look target across mode switches.

/// Pure per-frame rig step and smoothing factors.
pub mod camera_rig;

/// Free orbit controls for manual mode.
pub mod orbit_camera;

/// Rig resources, run conditions and the per-frame rig system.
pub mod rig_controller;

/// Ordered camera preset table and validated selections.
pub mod viewpoint_table;
