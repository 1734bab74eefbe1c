use bevy::picking::events::{Click, Pointer};
use bevy::prelude::*;
use serde_json::json;

use crate::engine::camera::rig_controller::ViewerCamera;
use crate::rpc::web_rpc::{WebRpcInterface, vec3_json};

/// Log the camera pose when any mesh under the scene root is clicked.
/// Handy for authoring new viewpoint presets.
pub fn log_camera_pose_on_click(
    trigger: Trigger<Pointer<Click>>,
    camera_query: Query<&Transform, With<ViewerCamera>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };

    let (x, y, z) = camera_transform.rotation.to_euler(EulerRot::XYZ);
    let hit = trigger.event().event.hit.position;

    info!(
        "Scene clicked: camera position {:?}, rotation ({:.3}, {:.3}, {:.3})",
        camera_transform.translation, x, y, z
    );

    rpc_interface.send_notification(
        "scene_clicked",
        json!({
            "camera_position": vec3_json(camera_transform.translation),
            "camera_rotation": [x, y, z],
            "hit_position": hit.map(vec3_json),
        }),
    );
}
