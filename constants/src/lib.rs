//! Compile-time configuration shared across the scene viewer workspace.

/// Smoothing factors and orbit controller tuning.
pub mod camera_rig;

/// Asset paths and web canvas selector.
pub mod path;

/// Camera projection, light rig and marker styling.
pub mod render_settings;

/// Reference camera preset table.
pub mod viewpoints;
