use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera_rig::{
    ORBIT_EASE_RATE, ORBIT_FOCUS_POINT, ORBIT_MAX_RADIUS, ORBIT_MIN_RADIUS,
    ORBIT_PAN_SENSITIVITY, ORBIT_PITCH_LIMIT, ORBIT_PIXEL_SCROLL_SCALE, ORBIT_ROTATE_SENSITIVITY,
    ORBIT_ZOOM_STEP,
};

use super::rig_controller::ViewerCamera;

/// Free orbit controls used in manual mode.
///
/// The camera sits on a sphere of `radius` around `focus_point`; `yaw` turns
/// around +Y starting from +Z and `pitch` lifts the camera above the horizon.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub focus_point: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
}

impl OrbitCamera {
    /// Orbit state that places the eye exactly at `position`, clamped to the orbit limits.
    pub fn from_pose(position: Vec3, focus_point: Vec3) -> Self {
        let offset = position - focus_point;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return Self {
                focus_point,
                yaw: 0.0,
                pitch: 0.0,
                radius: ORBIT_MIN_RADIUS,
            };
        }

        Self {
            focus_point,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT),
            radius: distance.clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS),
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        let horizontal = self.pitch.cos();
        let direction = Vec3::new(
            horizontal * self.yaw.sin(),
            self.pitch.sin(),
            horizontal * self.yaw.cos(),
        );
        self.focus_point + direction * self.radius
    }

    pub fn rotate(&mut self, mouse_delta: Vec2) {
        self.yaw -= mouse_delta.x * ORBIT_ROTATE_SENSITIVITY;
        self.pitch = (self.pitch + mouse_delta.y * ORBIT_ROTATE_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Slide the focus point in the view plane; speed scales with distance.
    pub fn pan(&mut self, mouse_delta: Vec2) {
        let forward = (self.focus_point - self.eye_position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        let scale = self.radius * ORBIT_PAN_SENSITIVITY;
        self.focus_point += (right * -mouse_delta.x + up * mouse_delta.y) * scale;
    }

    /// Positive `scroll` moves closer. One unit scales the radius by the zoom step.
    pub fn zoom(&mut self, scroll: f32) {
        self.radius =
            (self.radius * ORBIT_ZOOM_STEP.powf(scroll)).clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus_point: ORBIT_FOCUS_POINT,
            yaw: 0.0,
            pitch: 0.3,
            radius: 20.0,
        }
    }
}

/// Manual camera control: left drag orbits, right or middle drag pans, wheel zooms.
/// Drags that belong to a pressed UI button are left to the UI.
pub fn orbit_camera_controller(
    mut camera_query: Query<&mut Transform, With<ViewerCamera>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    ui_interactions: Query<&Interaction>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    let ui_pressed = ui_interactions
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed);

    if mouse_delta != Vec2::ZERO && !ui_pressed {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(mouse_delta);
        } else if mouse_button.any_pressed([MouseButton::Right, MouseButton::Middle]) {
            orbit.pan(mouse_delta);
        }
    }

    let mut scroll_accum = 0.0;
    for event in scroll_events.read() {
        scroll_accum += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * ORBIT_PIXEL_SCROLL_SCALE,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    let ease = (ORBIT_EASE_RATE * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform
        .translation
        .lerp(orbit.eye_position(), ease);
    camera_transform.look_at(orbit.focus_point, Vec3::Y);
}
