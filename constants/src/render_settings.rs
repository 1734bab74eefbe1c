use bevy::color::Color;
use bevy::math::Vec3;

/// Narrow vertical field of view, close to a telephoto lens.
pub const CAMERA_FOV_DEGREES: f32 = 10.0;

pub const AMBIENT_LIGHT_BRIGHTNESS: f32 = 40.0;

pub const POINT_LIGHT_POSITION: Vec3 = Vec3::new(2.0, 3.0, 3.0);
pub const POINT_LIGHT_INTENSITY: f32 = 400_000.0;
pub const POINT_LIGHT_COLOUR: Color = Color::WHITE;

/// Hot pink cube that tracks the smoothed look-at point.
pub const TARGET_MARKER_COLOUR: Color = Color::srgb(1.0, 0.412, 0.706);
pub const TARGET_MARKER_SCALE: f32 = 0.05;

pub const FPS_NOTIFICATION_INTERVAL_SECS: f32 = 0.5;

// Native overlay
pub const OVERLAY_FONT_SIZE: f32 = 14.0;
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.55);
pub const OVERLAY_BUTTON_IDLE: Color = Color::srgba(1.0, 1.0, 1.0, 0.05);
pub const OVERLAY_BUTTON_HOVERED: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
