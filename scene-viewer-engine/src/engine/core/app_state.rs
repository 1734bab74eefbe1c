use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

// Move on once the scene is in the world, or once it is known it never will be.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_settled() {
        println!("→ Scene settled, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn state_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .add_systems(
                Update,
                transition_to_running.run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn current_state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn stays_loading_until_scene_settles() {
        let mut app = state_app();
        app.world_mut().resource_mut::<LoadingProgress>().scene_requested = true;

        app.update();
        app.update();

        assert_eq!(current_state(&app), AppState::Loading);
    }

    #[test]
    fn runs_after_scene_spawned() {
        let mut app = state_app();
        app.world_mut().resource_mut::<LoadingProgress>().scene_spawned = true;

        app.update();
        app.update();

        assert_eq!(current_state(&app), AppState::Running);
    }

    #[test]
    fn runs_after_scene_failed() {
        let mut app = state_app();
        app.world_mut().resource_mut::<LoadingProgress>().scene_failed = true;

        app.update();
        app.update();

        assert_eq!(current_state(&app), AppState::Running);
    }
}
