use std::time::Duration;

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::render_settings::FPS_NOTIFICATION_INTERVAL_SECS;
use serde_json::json;

use crate::engine::core::app_state::FpsText;
use crate::rpc::web_rpc::WebRpcInterface;

/// Smoothed frame rate, once the diagnostic has enough samples.
pub fn smoothed_fps(diagnostics: &DiagnosticsStore) -> Option<f64> {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
}

/// Repeating timer pacing `fps_update` notifications.
pub struct FpsNotificationTimer(Timer);

impl Default for FpsNotificationTimer {
    fn default() -> Self {
        Self(Timer::new(
            Duration::from_secs_f32(FPS_NOTIFICATION_INTERVAL_SECS),
            TimerMode::Repeating,
        ))
    }
}

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut timer: Local<FpsNotificationTimer>,
    time: Res<Time>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    if let Some(fps) = smoothed_fps(&diagnostics) {
        rpc_interface.send_notification("fps_update", json!({ "fps": fps as f32 }));
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let Some(fps) = smoothed_fps(&diagnostics) else {
        return;
    };

    for mut text in &mut query {
        text.0 = format!("FPS: {fps:.1}");
    }
}
