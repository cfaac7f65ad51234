//! Bridge configuration.

use serde::{Deserialize, Serialize};

/// Limits applied to the engine module.
///
/// The engine is trusted code, but it runs against user-supplied graphs; the
/// limits bound what a pathological input can cost before the surface gets
/// control back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Max engine module size (bytes).
    pub max_module_size: usize,
    /// Max guest linear memory pages (64KB per page).
    pub max_memory_pages: u32,
    /// Max fuel per invocation when metering is enabled.
    pub max_fuel: u64,
    /// Enable fuel metering.
    pub enable_fuel: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_module_size: 16 * 1024 * 1024,
            max_memory_pages: 256,
            max_fuel: 1_000_000_000,
            enable_fuel: true,
        }
    }
}
