//! Engine operations and the invocation seam.
//!
//! The engine is an opaque precompiled module. It exposes zero-argument entry
//! points addressed by name; inputs and outputs travel through the virtual
//! filesystem, never through call arguments. Invocation is a single attempt
//! with no retry: whatever the engine leaves in the filesystem is the result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named engine entry point.
///
/// The string forms are the module's actual export names and must match
/// bit-exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineOp {
    /// Embed the graph staged at `/input.txt`; draws `/embedding.svg`.
    EmbedLoadedFile,
    /// Self-contained SEFE test path; stages and draws its own fixtures.
    SefeMainTest,
    /// SEFE feasibility over `/red.txt` and `/blue.txt`; returns a status
    /// code and, when feasible, draws both embedding slots.
    SefeLoadedFiles,
}

impl EngineOp {
    /// The export name the bridge resolves in the engine module.
    pub fn export_name(self) -> &'static str {
        match self {
            EngineOp::EmbedLoadedFile => "embedLoadedFile",
            EngineOp::SefeMainTest => "sefeMainTest",
            EngineOp::SefeLoadedFiles => "sefeLoadedFiles",
        }
    }

    /// Whether the operation reports a status code.
    ///
    /// Fire-and-forget operations communicate only through artifact slots.
    pub fn returns_code(self) -> bool {
        matches!(self, EngineOp::SefeLoadedFiles)
    }
}

impl fmt::Display for EngineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.export_name())
    }
}

/// A failure inside the engine or on the way into it.
///
/// Opaque by design: the engine's internals are not observable from this
/// layer, so a fault carries the operation and whatever the bridge could say
/// about the cause.
#[derive(Debug, thiserror::Error)]
#[error("engine operation {operation} failed: {reason}")]
pub struct EngineFault {
    pub operation: EngineOp,
    pub reason: String,
}

/// The invocation seam between the control surface and the engine module.
///
/// Implementations are expected to be blocking once entered; the engine is an
/// in-process module, not a remote service.
pub trait Engine {
    /// Invoke a named zero-argument entry point.
    ///
    /// Returns `Ok(Some(code))` for operations that report a status and
    /// `Ok(None)` for fire-and-forget operations. By the time this returns,
    /// any artifacts the operation produces are visible in the virtual
    /// filesystem.
    fn invoke(&mut self, op: EngineOp) -> Result<Option<i32>, EngineFault>;
}
