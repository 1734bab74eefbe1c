use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub scene_requested: bool,
    pub scene_spawned: bool,
    pub scene_failed: bool,
}

impl LoadingProgress {
    /// Loading is over, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.scene_spawned || self.scene_failed
    }
}
