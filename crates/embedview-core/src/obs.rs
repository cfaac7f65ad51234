//! Structured observability hooks for protocol lifecycle events.
//!
//! This module provides:
//! - Session-scoped tracing spans via the `SessionSpan` RAII guard
//! - Emission functions for staging, invocation, delivery, and export events
//!
//! Events are emitted at `info!` level; degradations (missing or rejected
//! artifacts, undefined engine codes) at `warn!`.

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{SlotName, SefeVerdict};
use crate::engine::EngineOp;

/// RAII guard that enters a session-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = SessionSpan::enter(session_id);
/// // All tracing calls below carry session_id
/// ```
pub struct SessionSpan {
    _span: tracing::span::EnteredSpan,
}

impl SessionSpan {
    /// Create and enter a span tagged with the session id.
    pub fn enter(session_id: Uuid) -> Self {
        let span = tracing::info_span!("embedview.session", session_id = %session_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a slot was staged from a selected file.
pub fn emit_staged(slot: SlotName, file_name: &str, bytes: usize) {
    info!(event = "stage.completed", slot = %slot, file = %file_name, bytes = bytes);
}

/// Emit event: the picker was dismissed, nothing staged.
pub fn emit_stage_skipped(slot: SlotName) {
    info!(event = "stage.skipped", slot = %slot);
}

/// Emit event: an engine entry point returned.
pub fn emit_invoked(op: EngineOp, code: Option<i32>) {
    info!(event = "engine.invoked", operation = %op, code = code);
}

/// Emit event: a feasibility verdict was decoded.
pub fn emit_verdict(session_id: Uuid, verdict: SefeVerdict) {
    match verdict {
        SefeVerdict::EngineError(code) => {
            warn!(event = "sefe.verdict", session_id = %session_id, code = code, "undefined engine status code");
        }
        _ => {
            info!(event = "sefe.verdict", session_id = %session_id, verdict = ?verdict);
        }
    }
}

/// Emit event: vetted markup was handed to the display surface.
pub fn emit_artifact_rendered(slot: SlotName, bytes: usize) {
    info!(event = "artifact.rendered", slot = %slot, bytes = bytes);
}

/// Emit event: an expected artifact slot was empty (warning level).
pub fn emit_artifact_missing(slot: SlotName) {
    warn!(event = "artifact.missing", slot = %slot);
}

/// Emit event: markup failed vetting and was withheld (warning level).
pub fn emit_artifact_rejected(slot: SlotName, reason: &str) {
    warn!(event = "artifact.rejected", slot = %slot, reason = %reason);
}

/// Emit event: a rendered drawing was packaged for download.
pub fn emit_export(file_name: &str, bytes: usize) {
    info!(event = "export.completed", file = %file_name, bytes = bytes);
}
