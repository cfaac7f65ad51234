//! SEFE workflow: two colored inputs, one combined invocation, a ternary
//! verdict, up to two correlated drawings.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{ConsoleError, Result, SefeColor, SefeVerdict};
use crate::engine::{Engine, EngineFault, EngineOp};
use crate::obs::{self, SessionSpan};
use crate::staging::{stage_input, InputSource, StageOutcome, StagedInput};
use crate::surface::{DisplaySurface, INFEASIBLE_NOTICE};
use crate::vfs::VirtualFs;

use super::{deliver_artifact, RenderOutcome};

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SefeState {
    Idle,
    RedStaged,
    BlueStaged,
    BothStaged,
    Invoked(SefeVerdict),
    Rendered,
}

/// Capability minted by [`SefeWorkflow::ready`] once both colors are staged.
///
/// [`SefeWorkflow::evaluate`] consumes one, so an invocation with a missing
/// input cannot be written down. The token does not pin slot *contents*;
/// re-staging before evaluation simply means the engine reads the newer text,
/// which is the overwrite semantics the slots already have.
#[derive(Debug, Clone, Copy)]
pub struct SefeReady {
    _red: StagedInput,
    _blue: StagedInput,
}

/// The two-graph coordination state machine.
pub struct SefeWorkflow {
    vfs: Arc<dyn VirtualFs>,
    session_id: Uuid,
    state: SefeState,
    red: Option<StagedInput>,
    blue: Option<StagedInput>,
}

impl SefeWorkflow {
    pub fn new(vfs: Arc<dyn VirtualFs>) -> Self {
        Self {
            vfs,
            session_id: Uuid::new_v4(),
            state: SefeState::Idle,
            red: None,
            blue: None,
        }
    }

    pub fn state(&self) -> SefeState {
        self.state
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Stage a user selection into one color's input slot.
    ///
    /// Staging transitions commute: colors can arrive in either order and be
    /// repeated, and each re-stage overwrites that color's slot only.
    pub async fn stage(
        &mut self,
        color: SefeColor,
        source: &dyn InputSource,
    ) -> Result<StageOutcome> {
        let _span = SessionSpan::enter(self.session_id);
        let outcome = stage_input(self.vfs.as_ref(), color.input_slot(), source).await?;
        if let Some(token) = outcome.staged() {
            match color {
                SefeColor::Red => self.red = Some(token),
                SefeColor::Blue => self.blue = Some(token),
            }
            self.state = self.staged_state();
        }
        Ok(outcome)
    }

    fn staged_state(&self) -> SefeState {
        match (self.red.is_some(), self.blue.is_some()) {
            (true, true) => SefeState::BothStaged,
            (true, false) => SefeState::RedStaged,
            (false, true) => SefeState::BlueStaged,
            (false, false) => SefeState::Idle,
        }
    }

    /// Mint the invocation capability, or name exactly what is missing.
    pub fn ready(&self) -> Result<SefeReady> {
        match (self.red, self.blue) {
            (Some(red), Some(blue)) => Ok(SefeReady {
                _red: red,
                _blue: blue,
            }),
            (red, blue) => {
                let mut missing = Vec::new();
                if red.is_none() {
                    missing.push(SefeColor::Red.input_slot());
                }
                if blue.is_none() {
                    missing.push(SefeColor::Blue.input_slot());
                }
                Err(ConsoleError::NotStaged { missing })
            }
        }
    }

    /// Invoke `sefeLoadedFiles` and branch on the decoded verdict.
    ///
    /// - `Feasible` — deliver both drawings, each independently; one failing
    ///   does not block the other.
    /// - `Infeasible` — zero artifact reads, one user-visible notice.
    /// - `EngineError` — a user-visible error, kept distinct from
    ///   infeasibility.
    ///
    /// An engine trap propagates as an error and leaves the state at
    /// `BothStaged`; the filesystem stays as the engine last left it.
    pub fn evaluate(
        &mut self,
        _ready: SefeReady,
        engine: &mut dyn Engine,
        surface: &mut dyn DisplaySurface,
    ) -> Result<SefeVerdict> {
        let _span = SessionSpan::enter(self.session_id);
        let code = engine.invoke(EngineOp::SefeLoadedFiles)?;
        obs::emit_invoked(EngineOp::SefeLoadedFiles, code);

        let Some(code) = code else {
            return Err(EngineFault {
                operation: EngineOp::SefeLoadedFiles,
                reason: "no status code returned".to_string(),
            }
            .into());
        };

        let verdict = SefeVerdict::from_code(code);
        obs::emit_verdict(self.session_id, verdict);
        self.state = SefeState::Invoked(verdict);

        match verdict {
            SefeVerdict::Feasible => {
                self.deliver_all(surface);
            }
            SefeVerdict::Infeasible => {
                surface.show_notice(INFEASIBLE_NOTICE);
            }
            SefeVerdict::EngineError(code) => {
                surface.show_error(&format!(
                    "embedding engine returned an undefined status ({code})"
                ));
            }
        }
        Ok(verdict)
    }

    /// Re-deliver both drawings on demand (the standalone visualize trigger).
    pub fn render(&mut self, surface: &mut dyn DisplaySurface) -> [(SefeColor, RenderOutcome); 2] {
        let _span = SessionSpan::enter(self.session_id);
        self.deliver_all(surface)
    }

    fn deliver_all(&mut self, surface: &mut dyn DisplaySurface) -> [(SefeColor, RenderOutcome); 2] {
        let outcomes = SefeColor::ALL.map(|color| {
            (
                color,
                deliver_artifact(self.vfs.as_ref(), color.artifact_slot(), surface),
            )
        });
        if outcomes.iter().any(|(_, o)| o.is_rendered()) {
            self.state = SefeState::Rendered;
        }
        outcomes
    }

    /// Fire the engine's self-contained SEFE test path.
    ///
    /// Stages nothing and proves nothing about this session's inputs; the
    /// engine draws its own fixtures into the embedding slots.
    pub fn run_self_test(&self, engine: &mut dyn Engine) -> Result<()> {
        let _span = SessionSpan::enter(self.session_id);
        let code = engine.invoke(EngineOp::SefeMainTest)?;
        obs::emit_invoked(EngineOp::SefeMainTest, code);
        Ok(())
    }
}
