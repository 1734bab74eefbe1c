use bevy::prelude::*;
use constants::camera_rig::ORBIT_FOCUS_POINT;
use serde_json::json;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::camera::rig_controller::{CameraRigState, ControlMode, ViewerCamera};
use crate::engine::camera::viewpoint_table::{ViewpointId, ViewpointTable};
use crate::rpc::web_rpc::WebRpcInterface;

/// Where a selection change came from, for logging and host notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Rpc,
    Keyboard,
    Overlay,
}

impl SelectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rpc => "rpc",
            Self::Keyboard => "keyboard",
            Self::Overlay => "overlay",
        }
    }
}

/// Request to make a preset the rig's target.
#[derive(Event, Debug, Clone, Copy)]
pub struct ViewpointSelectionEvent {
    pub id: ViewpointId,
    pub source: SelectionSource,
}

/// Request to hand the camera to the rig or to the orbit controls.
#[derive(Event, Debug, Clone, Copy)]
pub struct ControlModeEvent {
    pub mode: ControlMode,
    pub source: SelectionSource,
}

/// Systems applying selection events to the rig state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionSurfaceSet;

/// Selection events and their handlers. The handlers run in every app state,
/// so requests made while the scene is still loading are applied right away.
pub struct SelectionSurfacePlugin;

impl Plugin for SelectionSurfacePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ViewpointSelectionEvent>()
            .add_event::<ControlModeEvent>()
            .add_systems(
                Update,
                (handle_viewpoint_selection_events, handle_control_mode_events)
                    .chain()
                    .in_set(SelectionSurfaceSet),
            );
    }
}

/// Apply viewpoint selections. Unknown ids are ignored and the current selection kept.
pub fn handle_viewpoint_selection_events(
    mut events: EventReader<ViewpointSelectionEvent>,
    table: Res<ViewpointTable>,
    mut rig_state: ResMut<CameraRigState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let Some(selection) = table.select(event.id) else {
            warn!(
                "Ignoring selection of unknown viewpoint {} via {:?}",
                event.id, event.source
            );
            continue;
        };

        if rig_state.selection == selection {
            continue;
        }

        rig_state.selection = selection;
        info!("Viewpoint {} selected via {:?}", event.id, event.source);

        rpc_interface.send_notification(
            "viewpoint_changed",
            json!({
                "id": event.id.0,
                "source": event.source.as_str()
            }),
        );
    }
}

/// Apply mode switches. Entering manual mode seeds the orbit controls from the
/// current camera position so the camera does not jump.
pub fn handle_control_mode_events(
    mut events: EventReader<ControlModeEvent>,
    mut rig_state: ResMut<CameraRigState>,
    mut orbit: ResMut<OrbitCamera>,
    camera_query: Query<&Transform, With<ViewerCamera>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        if rig_state.mode == event.mode {
            continue;
        }

        if event.mode == ControlMode::Manual {
            if let Ok(camera_transform) = camera_query.single() {
                *orbit = OrbitCamera::from_pose(camera_transform.translation, ORBIT_FOCUS_POINT);
            }
        }

        rig_state.mode = event.mode;
        info!(
            "Camera control mode set to {} via {:?}",
            event.mode.as_str(),
            event.source
        );

        rpc_interface.send_notification(
            "control_mode_changed",
            json!({
                "mode": event.mode.as_str(),
                "orbit_controls": event.mode == ControlMode::Manual,
                "source": event.source.as_str()
            }),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
const VIEWPOINT_SHORTCUTS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Native shortcuts: number keys pick presets by position, `O` toggles orbit controls.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_selection_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    table: Res<ViewpointTable>,
    rig_state: Res<CameraRigState>,
    mut viewpoint_events: EventWriter<ViewpointSelectionEvent>,
    mut mode_events: EventWriter<ControlModeEvent>,
) {
    for (index, key) in VIEWPOINT_SHORTCUTS.iter().enumerate() {
        if !keyboard.just_pressed(*key) {
            continue;
        }
        if let Some(selection) = table.selection_at(index) {
            viewpoint_events.write(ViewpointSelectionEvent {
                id: selection.id(),
                source: SelectionSource::Keyboard,
            });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyO) {
        mode_events.write(ControlModeEvent {
            mode: rig_state.mode.toggled(),
            source: SelectionSource::Keyboard,
        });
    }
}
