use bevy::math::Vec3;

/// Fraction of the remaining distance the camera position covers each frame.
pub const POSITION_SMOOTHING: f32 = 0.1;

/// Fraction of the remaining distance the look-at point covers each frame.
pub const TARGET_SMOOTHING: f32 = 0.05;

/// Frame rate at which time-normalised smoothing matches the per-frame factors.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

// Manual orbit controls
pub const ORBIT_FOCUS_POINT: Vec3 = Vec3::new(0.0, 1.5, 0.0);
pub const ORBIT_ROTATE_SENSITIVITY: f32 = 0.005;
pub const ORBIT_PAN_SENSITIVITY: f32 = 0.0015;
pub const ORBIT_ZOOM_STEP: f32 = 0.9;
pub const ORBIT_PIXEL_SCROLL_SCALE: f32 = 0.05;
pub const ORBIT_MIN_RADIUS: f32 = 0.5;
pub const ORBIT_MAX_RADIUS: f32 = 200.0;
/// Pitch limit in radians, kept short of the poles so `look_at` stays defined.
pub const ORBIT_PITCH_LIMIT: f32 = 1.5;
/// Easing rate per second applied when moving the camera toward the orbit pose.
pub const ORBIT_EASE_RATE: f32 = 12.0;
