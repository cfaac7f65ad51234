//! Foreign-function bridge to the precompiled embedding engine.
//!
//! The engine ships as an opaque WebAssembly module. This crate loads it,
//! exposes the shared virtual filesystem to the guest through a small host
//! ABI, and dispatches the zero-argument entry points the control surface
//! invokes by name.
//!
//! # Modules
//!
//! - [`config`] — `BridgeConfig` (module size / memory / fuel limits)
//! - [`error`]  — `BridgeError`
//! - [`engine`] — `WasmEngine`, the [`embedview_core::Engine`] implementation

pub mod config;
pub mod engine;
pub mod error;

pub use config::BridgeConfig;
pub use engine::WasmEngine;
pub use error::BridgeError;
