//! Error types for the engine bridge.

/// Errors raised while loading or instantiating the engine module.
///
/// Invocation-time failures are not here: once the engine is up they surface
/// as [`embedview_core::EngineFault`] through the `Engine` trait.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("engine module too large: {actual} bytes (limit {max})")]
    ModuleTooLarge { max: usize, actual: usize },

    #[error("invalid engine module: {0}")]
    InvalidModule(String),

    #[error("engine instantiation failed: {0}")]
    Instantiate(String),

    #[error("bridge internal error: {0}")]
    Internal(String),
}
