//! JSON-RPC 2.0 communication layer for the host page.
//!
//! The viewer runs inside an iframe; the host page renders the selection
//! controls and talks to Bevy via `postMessage`.
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Decode into RpcCommand
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Methods
//!
//! - `get_viewpoints`: list presets in display order
//! - `select_viewpoint { id }`: ease the rig toward a preset
//! - `set_orbit_controls { enabled }`: switch between rig and orbit controls
//! - `get_camera_state`: current mode, selection, camera position, smoothed target
//! - `set_rig_smoothing { mode, reference_fps? }`: `per_frame` or `time_normalized`
//! - `get_fps`: smoothed frame rate
//!
//! Requests sent without an id are applied as notifications and get no response.
//!
//! ## Notifications sent to the host
//!
//! `fps_update`, `viewpoint_changed`, `control_mode_changed`,
//! `loading_progress`, `scene_loaded`, `scene_load_failed`, `scene_clicked`,
//! `debug_message`.
//!
//! ## Error codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (including unknown viewpoint ids)

/// JSON-RPC 2.0 bidirectional communication system for the host page.
pub mod web_rpc;
