use bevy::diagnostic::DiagnosticsStore;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::engine::camera::rig_controller::{
    CameraRigSettings, CameraRigState, ControlMode, SmoothedTarget, SmoothingMode, ViewerCamera,
};
use crate::engine::camera::viewpoint_table::{Viewpoint, ViewpointId, ViewpointTable};
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::tools::selection_surface::{
    ControlModeEvent, SelectionSource, ViewpointSelectionEvent,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. Requests without an id are notifications.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

impl RpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }

    fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }
    }
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: Self::METHOD_NOT_FOUND,
            message: "Method not found".to_string(),
            data: Some(json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: Self::INVALID_PARAMS,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Commands the host page can issue, decoded from a request before any state is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcCommand {
    GetViewpoints,
    SelectViewpoint { id: ViewpointId },
    SetOrbitControls { enabled: bool },
    GetCameraState,
    SetRigSmoothing(SmoothingMode),
    GetFps,
}

impl RpcCommand {
    pub fn parse(request: &RpcRequest) -> Result<Self, RpcError> {
        match request.method.as_str() {
            "get_viewpoints" => Ok(Self::GetViewpoints),
            "select_viewpoint" => {
                #[derive(Deserialize)]
                struct SelectViewpointParams {
                    id: ViewpointId,
                }

                let params: SelectViewpointParams =
                    parse_params(&request.params, "Expected integer 'id' parameter")?;
                Ok(Self::SelectViewpoint { id: params.id })
            }
            "set_orbit_controls" => {
                #[derive(Deserialize)]
                struct OrbitControlsParams {
                    enabled: bool,
                }

                let params: OrbitControlsParams =
                    parse_params(&request.params, "Expected boolean 'enabled' parameter")?;
                Ok(Self::SetOrbitControls {
                    enabled: params.enabled,
                })
            }
            "get_camera_state" => Ok(Self::GetCameraState),
            "set_rig_smoothing" => {
                #[derive(Deserialize)]
                struct RigSmoothingParams {
                    mode: String,
                    reference_fps: Option<f32>,
                }

                let params: RigSmoothingParams =
                    parse_params(&request.params, "Expected 'mode' parameter")?;
                let mode = match params.mode.as_str() {
                    "per_frame" => SmoothingMode::PerFrame,
                    "time_normalized" => match params.reference_fps {
                        None => SmoothingMode::time_normalized(),
                        Some(reference_fps) if reference_fps.is_finite() && reference_fps > 0.0 => {
                            SmoothingMode::TimeNormalized { reference_fps }
                        }
                        Some(_) => {
                            return Err(RpcError::invalid_params(
                                "'reference_fps' must be a positive number",
                            ));
                        }
                    },
                    other => {
                        return Err(RpcError::invalid_params(&format!(
                            "Unknown smoothing mode: {other}"
                        )));
                    }
                };
                Ok(Self::SetRigSmoothing(mode))
            }
            "get_fps" => Ok(Self::GetFps),
            _ => Err(RpcError::method_not_found(&request.method)),
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: &Value, message: &str) -> Result<T, RpcError> {
    serde_json::from_value::<T>(params.clone()).map_err(|_| RpcError::invalid_params(message))
}

pub(crate) fn vec3_json(value: Vec3) -> Value {
    json!([value.x, value.y, value.z])
}

fn viewpoint_json(viewpoint: &Viewpoint) -> Value {
    json!({
        "id": viewpoint.id.0,
        "position": vec3_json(viewpoint.position),
        "look_at": vec3_json(viewpoint.look_at),
    })
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue filled by the browser event callback.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
                return;
            }
        }
        None => {
            error!("Window object not available, RPC disabled");
            return;
        }
    }

    // Ownership moves to JS for the lifetime of the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

/// Viewer state reachable from RPC handlers.
#[derive(SystemParam)]
struct ViewerRpcContext<'w, 's> {
    diagnostics: Res<'w, DiagnosticsStore>,
    table: Res<'w, ViewpointTable>,
    rig_state: Res<'w, CameraRigState>,
    smoothed_target: Res<'w, SmoothedTarget>,
    settings: ResMut<'w, CameraRigSettings>,
    camera_query: Query<'w, 's, &'static Transform, With<ViewerCamera>>,
    viewpoint_events: EventWriter<'w, ViewpointSelectionEvent>,
    mode_events: EventWriter<'w, ControlModeEvent>,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut context: ViewerRpcContext,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut context) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Decode and apply one request. Returns a response only when the request carries an id.
fn handle_rpc_request(
    request: &RpcRequest,
    context: &mut ViewerRpcContext<'_, '_>,
) -> Option<RpcResponse> {
    let result = RpcCommand::parse(request).and_then(|command| apply_command(command, context));

    if let Err(error) = &result {
        warn!("RPC method '{}' failed: {}", request.method, error.message);
    }

    let id = request.id.clone()?;
    Some(match result {
        Ok(value) => RpcResponse::success(id, value),
        Err(error) => RpcResponse::failure(id, error),
    })
}

fn apply_command(
    command: RpcCommand,
    context: &mut ViewerRpcContext<'_, '_>,
) -> Result<Value, RpcError> {
    match command {
        RpcCommand::GetViewpoints => {
            let viewpoints: Vec<Value> = context.table.iter().map(viewpoint_json).collect();
            Ok(json!({ "viewpoints": viewpoints }))
        }
        RpcCommand::SelectViewpoint { id } => {
            if context.table.get(id).is_none() {
                return Err(RpcError::invalid_params(&format!("Unknown viewpoint: {id}")));
            }

            context.viewpoint_events.write(ViewpointSelectionEvent {
                id,
                source: SelectionSource::Rpc,
            });
            Ok(json!({
                "success": true,
                "selected_id": id.0
            }))
        }
        RpcCommand::SetOrbitControls { enabled } => {
            let mode = ControlMode::from_orbit_controls(enabled);
            context.mode_events.write(ControlModeEvent {
                mode,
                source: SelectionSource::Rpc,
            });
            Ok(json!({
                "success": true,
                "mode": mode.as_str()
            }))
        }
        RpcCommand::GetCameraState => {
            let position = context
                .camera_query
                .single()
                .map(|transform| vec3_json(transform.translation))
                .unwrap_or(Value::Null);

            Ok(json!({
                "mode": context.rig_state.mode.as_str(),
                "selected_id": context.rig_state.selection.id().0,
                "position": position,
                "smoothed_target": vec3_json(context.smoothed_target.0),
                "smoothing": context.settings.smoothing.as_str(),
            }))
        }
        RpcCommand::SetRigSmoothing(mode) => {
            context.settings.smoothing = mode;
            info!("Camera rig smoothing set to {:?}", mode);
            Ok(json!({
                "success": true,
                "smoothing": mode.as_str()
            }))
        }
        RpcCommand::GetFps => handle_get_fps(&context.diagnostics),
    }
}

/// Zero until the frame time diagnostic has a smoothed value.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<Value, RpcError> {
    let fps = smoothed_fps(diagnostics).unwrap_or(0.0) as f32;

    Ok(json!({
        "fps": fps
    }))
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications first, responses second, to keep ordering stable.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use constants::camera_rig::REFERENCE_FRAME_RATE;
    use std::sync::{Arc, Mutex};

    use crate::engine::camera::orbit_camera::OrbitCamera;
    use crate::engine::core::app_state::AppState;
    use crate::tools::selection_surface::SelectionSurfacePlugin;

    fn request(method: &str, params: Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(1)),
        }
    }

    fn rpc_app(messages: &[Value]) -> App {
        let queue = messages.iter().map(|message| message.to_string()).collect();

        let mut app = App::new();
        app.init_resource::<DiagnosticsStore>()
            .init_resource::<ViewpointTable>()
            .init_resource::<CameraRigState>()
            .init_resource::<SmoothedTarget>()
            .init_resource::<CameraRigSettings>()
            .init_resource::<WebRpcInterface>()
            .insert_resource(MessageQueue(Arc::new(Mutex::new(queue))))
            .add_event::<IncomingRpcMessage>()
            .add_event::<ViewpointSelectionEvent>()
            .add_event::<ControlModeEvent>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages).chain(),
            );
        app.world_mut()
            .spawn((ViewerCamera, Transform::from_xyz(1.0, 2.0, 3.0)));
        app
    }

    fn responses(app: &App) -> &[RpcResponse] {
        &app.world().resource::<WebRpcInterface>().outgoing_responses
    }

    #[test]
    fn parses_select_viewpoint() {
        let command = RpcCommand::parse(&request("select_viewpoint", json!({ "id": 3 })));
        assert_eq!(
            command,
            Ok(RpcCommand::SelectViewpoint {
                id: ViewpointId(3)
            })
        );
    }

    #[test]
    fn rejects_missing_or_malformed_params() {
        let missing = RpcCommand::parse(&request("select_viewpoint", Value::Null)).unwrap_err();
        assert_eq!(missing.code, RpcError::INVALID_PARAMS);

        let wrong_type =
            RpcCommand::parse(&request("set_orbit_controls", json!({ "enabled": "yes" })))
                .unwrap_err();
        assert_eq!(wrong_type.code, RpcError::INVALID_PARAMS);
    }

    #[test]
    fn unknown_method_is_not_found() {
        let error = RpcCommand::parse(&request("fly_to", json!({}))).unwrap_err();
        assert_eq!(error.code, RpcError::METHOD_NOT_FOUND);
        assert_eq!(error.data, Some(json!({ "method": "fly_to" })));
    }

    #[test]
    fn parses_rig_smoothing_modes() {
        assert_eq!(
            RpcCommand::parse(&request("set_rig_smoothing", json!({ "mode": "per_frame" }))),
            Ok(RpcCommand::SetRigSmoothing(SmoothingMode::PerFrame))
        );
        assert_eq!(
            RpcCommand::parse(&request(
                "set_rig_smoothing",
                json!({ "mode": "time_normalized" })
            )),
            Ok(RpcCommand::SetRigSmoothing(SmoothingMode::TimeNormalized {
                reference_fps: REFERENCE_FRAME_RATE
            }))
        );

        let bad_fps = RpcCommand::parse(&request(
            "set_rig_smoothing",
            json!({ "mode": "time_normalized", "reference_fps": 0.0 }),
        ))
        .unwrap_err();
        assert_eq!(bad_fps.code, RpcError::INVALID_PARAMS);

        let bad_mode =
            RpcCommand::parse(&request("set_rig_smoothing", json!({ "mode": "spring" })))
                .unwrap_err();
        assert_eq!(bad_mode.code, RpcError::INVALID_PARAMS);
    }

    #[test]
    fn select_viewpoint_request_dispatches_event_and_responds() {
        let mut app = rpc_app(&[json!({
            "jsonrpc": "2.0",
            "method": "select_viewpoint",
            "params": { "id": 2 },
            "id": 7
        })]);

        app.update();

        let response = &responses(&app)[0];
        assert_eq!(response.id, Some(json!(7)));
        assert_eq!(
            response.result,
            Some(json!({ "success": true, "selected_id": 2 }))
        );

        let events = app.world().resource::<Events<ViewpointSelectionEvent>>();
        let dispatched: Vec<ViewpointId> =
            events.iter_current_update_events().map(|event| event.id).collect();
        assert_eq!(dispatched, vec![ViewpointId(2)]);
    }

    #[test]
    fn unknown_viewpoint_is_rejected_without_event() {
        let mut app = rpc_app(&[json!({
            "jsonrpc": "2.0",
            "method": "select_viewpoint",
            "params": { "id": 99 },
            "id": "a"
        })]);

        app.update();

        let error = responses(&app)[0].error.clone().unwrap();
        assert_eq!(error.code, RpcError::INVALID_PARAMS);
        assert!(app.world().resource::<Events<ViewpointSelectionEvent>>().is_empty());
    }

    #[test]
    fn notifications_apply_without_response() {
        let mut app = rpc_app(&[json!({
            "jsonrpc": "2.0",
            "method": "set_orbit_controls",
            "params": { "enabled": true }
        })]);

        app.update();

        assert!(responses(&app).is_empty());
        let events = app.world().resource::<Events<ControlModeEvent>>();
        let modes: Vec<ControlMode> =
            events.iter_current_update_events().map(|event| event.mode).collect();
        assert_eq!(modes, vec![ControlMode::Manual]);
    }

    #[test]
    fn camera_state_reports_rig_and_camera() {
        let mut app = rpc_app(&[json!({
            "jsonrpc": "2.0",
            "method": "get_camera_state",
            "id": 1
        })]);

        app.update();

        let result = responses(&app)[0].result.clone().unwrap();
        assert_eq!(result["mode"], json!("auto"));
        assert_eq!(result["selected_id"], json!(1));
        assert_eq!(result["position"], json!([1.0, 2.0, 3.0]));
        assert_eq!(result["smoothed_target"], json!([0.0, 2.0, 0.0]));
        assert_eq!(result["smoothing"], json!("per_frame"));
    }

    #[test]
    fn rig_smoothing_request_updates_settings() {
        let mut app = rpc_app(&[json!({
            "jsonrpc": "2.0",
            "method": "set_rig_smoothing",
            "params": { "mode": "time_normalized", "reference_fps": 30.0 },
            "id": 4
        })]);

        app.update();

        assert_eq!(
            app.world().resource::<CameraRigSettings>().smoothing,
            SmoothingMode::TimeNormalized {
                reference_fps: 30.0
            }
        );
    }

    #[test]
    fn malformed_message_produces_debug_notification() {
        let mut app = rpc_app(&[json!("jsonrpc but not an object")]);

        app.update();

        let rpc = app.world().resource::<WebRpcInterface>();
        assert!(rpc.outgoing_responses.is_empty());
        assert_eq!(rpc.pending_notifications()[0].method, "debug_message");
    }

    #[test]
    fn viewpoint_listing_keeps_table_order() {
        let mut app = rpc_app(&[json!({
            "jsonrpc": "2.0",
            "method": "get_viewpoints",
            "id": 2
        })]);

        app.update();

        let result = responses(&app)[0].result.clone().unwrap();
        let ids: Vec<u64> = result["viewpoints"]
            .as_array()
            .unwrap()
            .iter()
            .map(|viewpoint| viewpoint["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(result["viewpoints"][1]["position"], json!([12.0, 6.0, 12.0]));
    }

    #[test]
    fn selection_requested_while_loading_survives_until_running() {
        let mut app = rpc_app(&[json!({
            "jsonrpc": "2.0",
            "method": "select_viewpoint",
            "params": { "id": 3 },
            "id": 11
        })]);
        app.add_plugins((StatesPlugin, SelectionSurfacePlugin))
            .init_state::<AppState>()
            .init_resource::<OrbitCamera>();

        for _ in 0..5 {
            app.update();
        }
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Loading
        );
        assert_eq!(
            responses(&app)[0].result,
            Some(json!({ "success": true, "selected_id": 3 }))
        );

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Running);
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Running
        );
        assert_eq!(
            app.world().resource::<CameraRigState>().selection.id(),
            ViewpointId(3)
        );
    }
}
