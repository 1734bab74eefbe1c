use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use constants::render_settings::CAMERA_FOV_DEGREES;

// Crate engine modules
use crate::engine::camera::orbit_camera::{OrbitCamera, orbit_camera_controller};
use crate::engine::camera::rig_controller::{
    CameraRigSettings, CameraRigState, SmoothedTarget, ViewerCamera, camera_rig_system,
    orbit_is_active, rig_is_active,
};
use crate::engine::camera::viewpoint_table::ViewpointTable;
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_loader::{SceneLoader, spawn_scene_when_ready, start_loading};
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::target_marker::{spawn_look_target_marker, update_look_target_marker};
use crate::engine::systems::fps_tracking::fps_notification_system;
// Crate tools modules
use crate::tools::selection_surface::{SelectionSurfacePlugin, SelectionSurfaceSet};
// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::tools::overlay::{
    handle_overlay_interactions, refresh_overlay_labels, spawn_native_overlays,
};
#[cfg(not(target_arch = "wasm32"))]
use crate::tools::selection_surface::handle_selection_keyboard_shortcuts;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MeshPickingPlugin)
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(WebRpcPlugin)
        .add_plugins(SelectionSurfacePlugin);

    // Camera rig context, shared by the selection surface and the controllers
    app.init_resource::<ViewpointTable>()
        .init_resource::<CameraRigSettings>()
        .init_resource::<CameraRigState>()
        .init_resource::<SmoothedTarget>()
        .init_resource::<OrbitCamera>()
        .init_resource::<LoadingProgress>()
        .init_resource::<SceneLoader>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (spawn_scene_when_ready, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // Camera control waits for the scene; selection state does not.
    let runtime_systems = (
        camera_rig_system.run_if(rig_is_active),
        orbit_camera_controller.run_if(orbit_is_active),
        update_look_target_marker,
    )
        .chain()
        .after(SelectionSurfaceSet);

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)))
        .add_systems(Update, fps_notification_system);

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_native_overlays.after(setup))
            .add_systems(
                Update,
                (
                    handle_selection_keyboard_shortcuts,
                    handle_overlay_interactions,
                )
                    .before(SelectionSurfaceSet),
            )
            .add_systems(Update, (fps_text_update_system, refresh_overlay_labels));
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    table: Res<ViewpointTable>,
    rig_state: Res<CameraRigState>,
    smoothed_target: Res<SmoothedTarget>,
) {
    spawn_lighting(&mut commands);

    let start = table.viewpoint(rig_state.selection).position;
    spawn_viewer_camera(&mut commands, start, smoothed_target.0);
    spawn_look_target_marker(&mut commands, &mut meshes, &mut materials, smoothed_target.0);
}

/// Camera starts on the initial preset, already facing the rig's look target.
fn spawn_viewer_camera(commands: &mut Commands, position: Vec3, look_at: Vec3) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(position).looking_at(look_at, Vec3::Y),
        ViewerCamera,
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
