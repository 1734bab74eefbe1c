//! User-facing selection controls.
//!
//! The host page drives selection through RPC; native builds add keyboard
//! shortcuts and an on-screen overlay. All of them go through the same events.

/// Native on-screen checkbox and radio buttons plus FPS readout.
#[cfg(not(target_arch = "wasm32"))]
pub mod overlay;

/// Selection events, their handlers and native keyboard shortcuts.
pub mod selection_surface;
