//! Feasibility verdicts for the SEFE workflow.

use serde::{Deserialize, Serialize};

/// Outcome of a SEFE feasibility invocation.
///
/// The engine reports feasibility as a bare integer (`1` feasible, `0`
/// infeasible). Every other value is undefined by the contract and must stay
/// distinguishable from [`SefeVerdict::Infeasible`]: an engine that answers
/// garbage has faulted, it has not answered "no".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SefeVerdict {
    /// The two graphs admit a simultaneous embedding; both drawings exist.
    Feasible,
    /// The two graphs do not admit a simultaneous embedding.
    Infeasible,
    /// The engine returned a code outside the contract.
    EngineError(i32),
}

impl SefeVerdict {
    /// Decode the raw engine status code.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => SefeVerdict::Feasible,
            0 => SefeVerdict::Infeasible,
            other => SefeVerdict::EngineError(other),
        }
    }

    /// Returns `true` when the verdict is `Feasible`.
    pub fn is_feasible(&self) -> bool {
        matches!(self, SefeVerdict::Feasible)
    }
}
