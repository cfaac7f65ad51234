//! Error taxonomy for the control surface.

use super::slot::SlotName;
use crate::engine::EngineFault;
use crate::vfs::VfsError;

/// Errors produced by the staging / invocation / delivery protocol.
///
/// A dismissed file picker is deliberately *not* in this taxonomy: staging
/// nothing is a no-op, not a fault. Artifact read failures are also absent;
/// they degrade at the workflow layer instead of propagating (see
/// [`crate::artifact::ArtifactError`]).
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("staging {slot} failed: {reason}")]
    StageFailed { slot: SlotName, reason: String },

    #[error("required inputs not staged: {}", format_slots(.missing))]
    NotStaged { missing: Vec<SlotName> },

    #[error(transparent)]
    Engine(#[from] EngineFault),

    #[error("vfs error: {0}")]
    Vfs(#[from] VfsError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_slots(slots: &[SlotName]) -> String {
    slots
        .iter()
        .map(|s| s.path())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for control-surface operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
