//! Input staging: moving a user-selected file into an engine slot.
//!
//! Staging is the only operation in the protocol with a suspension point: it
//! awaits the file read, then synchronously overwrites the target slot.
//! Completion is observable solely through the slot's new content becoming
//! visible to the engine; there is no other return channel.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{ConsoleError, Result, SlotName};
use crate::obs;
use crate::vfs::VirtualFs;

/// A file the user picked, resolved to its text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Display name of the selection (file name, not the full path).
    pub name: String,
    /// Full text content. Read in full before staging; no size limit.
    pub text: String,
}

/// The file-picker seam: where staged input comes from.
///
/// `Ok(None)` means the picker was dismissed; the stage operation then does
/// nothing at all. That is the expected idle path, not a failure.
#[async_trait]
pub trait InputSource: Send + Sync {
    async fn fetch(&self) -> std::io::Result<Option<SelectedFile>>;
}

/// An [`InputSource`] backed by an optional local path.
///
/// An absent path models a dismissed picker.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Option<PathBuf>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn dismissed() -> Self {
        Self { path: None }
    }
}

#[async_trait]
impl InputSource for FileSource {
    async fn fetch(&self) -> std::io::Result<Option<SelectedFile>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        let text = tokio::fs::read_to_string(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Some(SelectedFile { name, text }))
    }
}

/// Proof that a slot was populated during this session.
///
/// Invocation requires one of these per expected input, which makes "invoke
/// with nothing staged" unrepresentable at the API level instead of an
/// engine-defined failure discovered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedInput {
    slot: SlotName,
}

impl StagedInput {
    pub(crate) fn new(slot: SlotName) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> SlotName {
        self.slot
    }
}

/// Outcome of a stage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The slot now holds the selected file's text.
    Staged(StagedInput),
    /// The picker was dismissed; no slot was written.
    NothingSelected,
}

impl StageOutcome {
    pub fn staged(self) -> Option<StagedInput> {
        match self {
            StageOutcome::Staged(input) => Some(input),
            StageOutcome::NothingSelected => None,
        }
    }
}

/// Stage a user selection into the named slot.
///
/// Suspends only while the source reads. On success the slot is overwritten
/// unconditionally; re-staging discards the previous content. A source read
/// failure leaves the slot untouched and surfaces as
/// [`ConsoleError::StageFailed`] rather than silently staging nothing.
pub async fn stage_input(
    vfs: &dyn VirtualFs,
    slot: SlotName,
    source: &dyn InputSource,
) -> Result<StageOutcome> {
    let selected = match source.fetch().await {
        Ok(Some(file)) => file,
        Ok(None) => {
            obs::emit_stage_skipped(slot);
            return Ok(StageOutcome::NothingSelected);
        }
        Err(err) => {
            return Err(ConsoleError::StageFailed {
                slot,
                reason: err.to_string(),
            })
        }
    };

    vfs.write_text(slot, &selected.text);
    obs::emit_staged(slot, &selected.name, selected.text.len());
    Ok(StageOutcome::Staged(StagedInput::new(slot)))
}
