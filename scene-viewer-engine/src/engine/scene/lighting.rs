use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_LIGHT_BRIGHTNESS, POINT_LIGHT_COLOUR, POINT_LIGHT_INTENSITY, POINT_LIGHT_POSITION,
};

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        brightness: AMBIENT_LIGHT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        PointLight {
            color: POINT_LIGHT_COLOUR,
            intensity: POINT_LIGHT_INTENSITY,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(POINT_LIGHT_POSITION),
    ));
}
