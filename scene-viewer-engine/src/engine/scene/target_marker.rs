use bevy::picking::Pickable;
use bevy::prelude::*;
use constants::render_settings::{TARGET_MARKER_COLOUR, TARGET_MARKER_SCALE};

use crate::engine::camera::rig_controller::SmoothedTarget;

#[derive(Component)]
pub struct LookTargetMarker;

pub fn spawn_look_target_marker(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: TARGET_MARKER_COLOUR,
            ..default()
        })),
        Transform::from_translation(position).with_scale(Vec3::splat(TARGET_MARKER_SCALE)),
        Pickable::IGNORE,
        LookTargetMarker,
    ));
}

pub fn update_look_target_marker(
    smoothed_target: Res<SmoothedTarget>,
    mut markers: Query<&mut Transform, With<LookTargetMarker>>,
) {
    if !smoothed_target.is_changed() {
        return;
    }

    for mut transform in &mut markers {
        transform.translation = smoothed_target.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_follows_smoothed_target() {
        let mut app = App::new();
        app.init_resource::<SmoothedTarget>()
            .add_systems(Update, update_look_target_marker);
        let marker = app
            .world_mut()
            .spawn((
                LookTargetMarker,
                Transform::from_scale(Vec3::splat(TARGET_MARKER_SCALE)),
            ))
            .id();

        app.update();
        assert_eq!(
            app.world().get::<Transform>(marker).unwrap().translation,
            Vec3::new(0.0, 2.0, 0.0)
        );

        app.world_mut().resource_mut::<SmoothedTarget>().0 = Vec3::new(1.0, 1.5, -2.0);
        app.update();

        let transform = app.world().get::<Transform>(marker).unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 1.5, -2.0));
        assert_eq!(transform.scale, Vec3::splat(TARGET_MARKER_SCALE));
    }
}
