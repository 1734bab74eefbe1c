use bevy::prelude::*;
use constants::camera_rig::REFERENCE_FRAME_RATE;
use constants::viewpoints::DEFAULT_SMOOTHED_TARGET;
use serde::{Deserialize, Serialize};

use super::camera_rig::{RigPose, SmoothingFactors, advance_rig};
use super::viewpoint_table::{ViewpointSelection, ViewpointTable};

/// Marker for the single camera driven by the rig and the orbit controls.
#[derive(Component)]
pub struct ViewerCamera;

/// Who owns the camera: the preset rig or the free orbit controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    #[default]
    Auto,
    Manual,
}

impl ControlMode {
    /// Map the "OrbitControls" checkbox onto a mode.
    pub fn from_orbit_controls(enabled: bool) -> Self {
        if enabled { Self::Manual } else { Self::Auto }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

/// How the per-frame factors relate to elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingMode {
    /// Factors applied once per rendered frame, whatever its duration.
    PerFrame,
    /// Factors rescaled by frame duration so convergence speed ignores frame rate.
    TimeNormalized { reference_fps: f32 },
}

impl SmoothingMode {
    pub fn time_normalized() -> Self {
        Self::TimeNormalized {
            reference_fps: REFERENCE_FRAME_RATE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerFrame => "per_frame",
            Self::TimeNormalized { .. } => "time_normalized",
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct CameraRigSettings {
    pub factors: SmoothingFactors,
    pub smoothing: SmoothingMode,
}

impl Default for CameraRigSettings {
    fn default() -> Self {
        Self {
            factors: SmoothingFactors::BASELINE,
            smoothing: SmoothingMode::PerFrame,
        }
    }
}

impl CameraRigSettings {
    pub fn factors_for_frame(&self, delta_secs: f32) -> SmoothingFactors {
        match self.smoothing {
            SmoothingMode::PerFrame => self.factors,
            SmoothingMode::TimeNormalized { reference_fps } => {
                self.factors.time_normalized(delta_secs, reference_fps)
            }
        }
    }
}

/// Selection surface state: active mode and selected preset.
#[derive(Resource, Debug, Clone)]
pub struct CameraRigState {
    pub mode: ControlMode,
    pub selection: ViewpointSelection,
}

impl CameraRigState {
    pub fn new(table: &ViewpointTable) -> Self {
        Self {
            mode: ControlMode::Auto,
            selection: table.first_selection(),
        }
    }
}

impl FromWorld for CameraRigState {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<ViewpointTable>() {
            Some(table) => Self::new(table),
            None => Self::new(&ViewpointTable::default()),
        }
    }
}

/// Smoothed look-at point the rig eases toward the selected preset.
/// Kept across mode switches so returning to the rig resumes without a jump.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SmoothedTarget(pub Vec3);

impl Default for SmoothedTarget {
    fn default() -> Self {
        Self(DEFAULT_SMOOTHED_TARGET)
    }
}

/// Run condition: the preset rig owns the camera.
pub fn rig_is_active(rig_state: Res<CameraRigState>) -> bool {
    rig_state.mode == ControlMode::Auto
}

/// Run condition: the orbit controls own the camera.
pub fn orbit_is_active(rig_state: Res<CameraRigState>) -> bool {
    rig_state.mode == ControlMode::Manual
}

/// Per-frame rig update: ease camera position and look target toward the selected preset.
pub fn camera_rig_system(
    mut camera_query: Query<&mut Transform, With<ViewerCamera>>,
    mut smoothed_target: ResMut<SmoothedTarget>,
    rig_state: Res<CameraRigState>,
    table: Res<ViewpointTable>,
    settings: Res<CameraRigSettings>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let viewpoint = table.viewpoint(rig_state.selection);
    let factors = settings.factors_for_frame(time.delta_secs());

    let pose = advance_rig(
        RigPose {
            position: camera_transform.translation,
            smoothed_target: smoothed_target.0,
        },
        viewpoint,
        factors,
    );

    camera_transform.translation = pose.position;
    camera_transform.look_at(pose.smoothed_target, Vec3::Y);
    smoothed_target.0 = pose.smoothed_target;
}
