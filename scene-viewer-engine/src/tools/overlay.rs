use bevy::prelude::*;
use constants::render_settings::{
    OVERLAY_BACKGROUND, OVERLAY_BUTTON_HOVERED, OVERLAY_BUTTON_IDLE, OVERLAY_FONT_SIZE,
};

use crate::engine::camera::rig_controller::{CameraRigState, ControlMode};
use crate::engine::camera::viewpoint_table::{ViewpointId, ViewpointTable};
use crate::engine::core::app_state::FpsText;

use super::selection_surface::{ControlModeEvent, SelectionSource, ViewpointSelectionEvent};

/// Control an overlay button (and its label) stands for.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayControl {
    OrbitToggle,
    Viewpoint(ViewpointId),
}

impl OverlayControl {
    /// Checkbox / radio style label reflecting the current state.
    pub fn label(&self, rig_state: &CameraRigState) -> String {
        match self {
            Self::OrbitToggle => {
                let mark = if rig_state.mode == ControlMode::Manual { "x" } else { " " };
                format!("[{mark}] OrbitControls (O)")
            }
            Self::Viewpoint(id) => {
                let mark = if rig_state.selection.id() == *id { "*" } else { " " };
                format!("({mark}) Position {id}")
            }
        }
    }
}

/// Selection controls in the top left corner and an FPS readout in the bottom right.
pub fn spawn_native_overlays(
    mut commands: Commands,
    table: Res<ViewpointTable>,
    rig_state: Res<CameraRigState>,
) {
    let controls = std::iter::once(OverlayControl::OrbitToggle)
        .chain(table.iter().map(|viewpoint| OverlayControl::Viewpoint(viewpoint.id)))
        .collect::<Vec<_>>();

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Px(12.0),
                        left: Val::Px(12.0),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(4.0),
                        padding: UiRect::all(Val::Px(8.0)),
                        ..default()
                    },
                    BackgroundColor(OVERLAY_BACKGROUND),
                ))
                .with_children(|panel| {
                    for control in controls {
                        panel
                            .spawn((
                                Button,
                                Node {
                                    padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
                                    ..default()
                                },
                                BackgroundColor(OVERLAY_BUTTON_IDLE),
                                control,
                            ))
                            .with_children(|button| {
                                button.spawn((
                                    Text::new(control.label(&rig_state)),
                                    TextFont {
                                        font_size: OVERLAY_FONT_SIZE,
                                        ..default()
                                    },
                                    TextColor(Color::WHITE),
                                    control,
                                ));
                            });
                    }
                });

            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

/// Turn button presses into selection events.
pub fn handle_overlay_interactions(
    mut interactions: Query<
        (&Interaction, &OverlayControl, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    rig_state: Res<CameraRigState>,
    mut viewpoint_events: EventWriter<ViewpointSelectionEvent>,
    mut mode_events: EventWriter<ControlModeEvent>,
) {
    for (interaction, control, mut background) in &mut interactions {
        match interaction {
            Interaction::Pressed => match control {
                OverlayControl::OrbitToggle => {
                    mode_events.write(ControlModeEvent {
                        mode: rig_state.mode.toggled(),
                        source: SelectionSource::Overlay,
                    });
                }
                OverlayControl::Viewpoint(id) => {
                    viewpoint_events.write(ViewpointSelectionEvent {
                        id: *id,
                        source: SelectionSource::Overlay,
                    });
                }
            },
            Interaction::Hovered => background.0 = OVERLAY_BUTTON_HOVERED,
            Interaction::None => background.0 = OVERLAY_BUTTON_IDLE,
        }
    }
}

/// Refresh checkbox and radio marks after the selection surface state changes.
pub fn refresh_overlay_labels(
    rig_state: Res<CameraRigState>,
    mut labels: Query<(&OverlayControl, &mut Text)>,
) {
    if !rig_state.is_changed() {
        return;
    }

    for (control, mut text) in &mut labels {
        text.0 = control.label(&rig_state);
    }
}
