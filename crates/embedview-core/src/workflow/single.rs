//! Single-graph workflow: stage `/input.txt`, embed, deliver `/embedding.svg`.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{ConsoleError, Result, SlotName};
use crate::engine::{Engine, EngineOp};
use crate::obs::{self, SessionSpan};
use crate::staging::{stage_input, InputSource, StageOutcome, StagedInput};
use crate::surface::DisplaySurface;
use crate::vfs::VirtualFs;

use super::{deliver_artifact, RenderOutcome};

/// Where the workflow stands.
///
/// There is no terminal state and no reset: re-staging from anywhere returns
/// to `Staged` for the next invocation, and a previously rendered drawing
/// stays on the surface until overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleGraphState {
    Idle,
    Staged,
    Invoked,
    Rendered,
}

/// One input slot, one engine call, one drawing.
pub struct SingleGraphWorkflow {
    vfs: Arc<dyn VirtualFs>,
    session_id: Uuid,
    state: SingleGraphState,
    staged: Option<StagedInput>,
}

impl SingleGraphWorkflow {
    pub fn new(vfs: Arc<dyn VirtualFs>) -> Self {
        Self {
            vfs,
            session_id: Uuid::new_v4(),
            state: SingleGraphState::Idle,
            staged: None,
        }
    }

    pub fn state(&self) -> SingleGraphState {
        self.state
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Stage a user selection into `/input.txt`.
    ///
    /// A dismissed picker changes nothing. A successful stage (from any
    /// state) arms the next invocation.
    pub async fn stage(&mut self, source: &dyn InputSource) -> Result<StageOutcome> {
        let _span = SessionSpan::enter(self.session_id);
        let outcome = stage_input(self.vfs.as_ref(), SlotName::Input, source).await?;
        if let Some(token) = outcome.staged() {
            self.staged = Some(token);
            self.state = SingleGraphState::Staged;
        }
        Ok(outcome)
    }

    /// Invoke `embedLoadedFile`.
    ///
    /// Requires a staged input: calling the engine against an empty slot is
    /// representable only inside the engine, not through this API.
    pub fn embed(&mut self, engine: &mut dyn Engine) -> Result<()> {
        let _span = SessionSpan::enter(self.session_id);
        if self.staged.is_none() {
            return Err(ConsoleError::NotStaged {
                missing: vec![SlotName::Input],
            });
        }
        let code = engine.invoke(EngineOp::EmbedLoadedFile)?;
        obs::emit_invoked(EngineOp::EmbedLoadedFile, code);
        self.state = SingleGraphState::Invoked;
        Ok(())
    }

    /// Deliver `/embedding.svg` to the surface.
    ///
    /// `Missing` and `Rejected` leave the state where it was; only a
    /// successful delivery advances to `Rendered`.
    pub fn render(&mut self, surface: &mut dyn DisplaySurface) -> RenderOutcome {
        let _span = SessionSpan::enter(self.session_id);
        let outcome = deliver_artifact(self.vfs.as_ref(), SlotName::Embedding, surface);
        if outcome.is_rendered() {
            self.state = SingleGraphState::Rendered;
        }
        outcome
    }
}
