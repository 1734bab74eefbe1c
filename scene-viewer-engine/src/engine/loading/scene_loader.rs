use std::sync::Arc;

use bevy::asset::{AssetLoadError, DependencyLoadState, LoadState, RecursiveDependencyLoadState};
use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::path::SCENE_ASSET_PATH;
use serde_json::json;

use super::progress::LoadingProgress;
use crate::engine::scene::picking::log_camera_pose_on_click;
use crate::rpc::web_rpc::WebRpcInterface;

/// Root entity of the loaded glTF scene.
#[derive(Component)]
pub struct ViewerScene;

#[derive(Resource)]
pub struct SceneLoader {
    path: String,
    handle: Option<Handle<Gltf>>,
}

impl SceneLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handle: None,
        }
    }
}

impl Default for SceneLoader {
    fn default() -> Self {
        Self::new(SCENE_ASSET_PATH)
    }
}

/// Where the glTF and everything it references stand.
#[derive(Debug)]
enum SceneLoadStatus {
    Pending,
    Ready,
    Failed(Arc<AssetLoadError>),
}

/// A failed buffer or texture fails the whole scene, even when the glTF itself parsed.
fn scene_load_status(
    states: Option<(LoadState, DependencyLoadState, RecursiveDependencyLoadState)>,
) -> SceneLoadStatus {
    match states {
        Some((LoadState::Failed(error), _, _))
        | Some((_, _, RecursiveDependencyLoadState::Failed(error))) => {
            SceneLoadStatus::Failed(error)
        }
        Some((LoadState::Loaded, _, RecursiveDependencyLoadState::Loaded)) => {
            SceneLoadStatus::Ready
        }
        _ => SceneLoadStatus::Pending,
    }
}

/// The file's default scene, else its first one.
fn pick_scene(
    default_scene: Option<&Handle<Scene>>,
    scenes: &[Handle<Scene>],
) -> Option<Handle<Scene>> {
    default_scene.or_else(|| scenes.first()).cloned()
}

// Start the loading process
pub fn start_loading(
    mut scene_loader: ResMut<SceneLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    asset_server: Res<AssetServer>,
) {
    info!("Loading scene from: {}", scene_loader.path);
    scene_loader.handle = Some(asset_server.load(scene_loader.path.clone()));
    loading_progress.scene_requested = true;

    rpc_interface.send_notification(
        "loading_progress",
        json!({
            "stage": "scene",
            "path": scene_loader.path
        }),
    );
}

/// Spawn the scene root once the glTF and its dependencies are loaded.
/// A failed load is recorded so the viewer can still start without it.
pub fn spawn_scene_when_ready(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    scene_loader: Res<SceneLoader>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
) {
    if loading_progress.is_settled() {
        return;
    }

    let Some(ref handle) = scene_loader.handle else {
        return;
    };

    let scene = match scene_load_status(asset_server.get_load_states(handle.id())) {
        SceneLoadStatus::Pending => return,
        SceneLoadStatus::Failed(load_error) => {
            error!("Failed to load scene {}: {}", scene_loader.path, load_error);
            Err(load_error.to_string())
        }
        SceneLoadStatus::Ready => {
            let Some(gltf) = gltfs.get(handle) else {
                return;
            };
            pick_scene(gltf.default_scene.as_ref(), &gltf.scenes)
                .ok_or_else(|| "no scenes in glTF file".to_string())
        }
    };

    match scene {
        Ok(scene) => {
            commands
                .spawn((SceneRoot(scene), ViewerScene))
                .observe(log_camera_pose_on_click);
            loading_progress.scene_spawned = true;

            info!("✓ Scene loaded: {}", scene_loader.path);
            rpc_interface.send_notification("scene_loaded", json!({ "path": scene_loader.path }));
        }
        Err(reason) => {
            warn!("Starting without a scene: {}", reason);
            loading_progress.scene_failed = true;
            rpc_interface.send_notification(
                "scene_load_failed",
                json!({
                    "path": scene_loader.path,
                    "error": reason
                }),
            );
        }
    }
}
