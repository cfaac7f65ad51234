//! Workflows: the state machines that sequence staging, invocation, and
//! delivery.
//!
//! # Modules
//!
//! - [`single`] — one input slot, one drawing (`SingleGraphWorkflow`)
//! - [`sefe`]   — two colored inputs, one combined invocation, a ternary
//!   verdict, up to two drawings (`SefeWorkflow`)

pub mod sefe;
pub mod single;

pub use sefe::{SefeReady, SefeState, SefeWorkflow};
pub use single::{SingleGraphState, SingleGraphWorkflow};

use crate::artifact::{read_artifact, ArtifactError};
use crate::domain::SlotName;
use crate::obs;
use crate::surface::DisplaySurface;
use crate::vfs::VirtualFs;

/// What happened when a workflow tried to deliver one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Vetted markup was handed to the display surface.
    Rendered,
    /// The slot was empty; nothing displayed, condition logged and surfaced.
    Missing,
    /// The markup failed vetting; withheld from the surface.
    Rejected,
}

impl RenderOutcome {
    pub fn is_rendered(self) -> bool {
        matches!(self, RenderOutcome::Rendered)
    }
}

/// Deliver one artifact slot to the surface, degrading on failure.
///
/// A raw fault never escapes: absence and rejection become visible error
/// messages plus a logged condition, and the caller's state machine decides
/// what the outcome means for it.
pub(crate) fn deliver_artifact(
    vfs: &dyn VirtualFs,
    slot: SlotName,
    surface: &mut dyn DisplaySurface,
) -> RenderOutcome {
    match read_artifact(vfs, slot) {
        Ok(artifact) => {
            surface.render_artifact(slot, &artifact.markup);
            obs::emit_artifact_rendered(slot, artifact.markup.len());
            RenderOutcome::Rendered
        }
        Err(ArtifactError::Missing(slot)) => {
            surface.show_error(&format!("no drawing available at {slot}"));
            RenderOutcome::Missing
        }
        Err(ArtifactError::Rejected { slot, reason }) => {
            surface.show_error(&format!("drawing at {slot} withheld: {reason}"));
            RenderOutcome::Rejected
        }
    }
}
