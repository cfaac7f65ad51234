//! Artifact retrieval: reading engine drawings back out of the filesystem.
//!
//! The engine writes SVG text as a side effect of invocation. Reads are pure
//! and repeatable; a missing or unreadable slot degrades (the caller renders
//! nothing and logs) instead of propagating an unhandled fault.
//!
//! Markup is vetted before it is handed to any display surface. The artifact
//! is attacker-influenceable whenever the engine echoes input, so the trust
//! boundary sits here: malformed XML and embedded scripts never reach a
//! renderer.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::domain::SlotName;
use crate::obs;
use crate::vfs::{VfsError, VirtualFs};

/// An engine drawing read back from the virtual filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub slot: SlotName,
    /// Opaque SVG markup, exactly as the engine wrote it.
    pub markup: String,
}

/// Why an artifact could not be delivered.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact {0} is not present")]
    Missing(SlotName),

    #[error("artifact {slot} rejected: {reason}")]
    Rejected { slot: SlotName, reason: String },
}

/// Read the named artifact slot and vet its markup.
pub fn read_artifact(
    vfs: &dyn VirtualFs,
    slot: SlotName,
) -> Result<Artifact, ArtifactError> {
    let markup = vfs.read_text(slot).map_err(|err| match err {
        VfsError::NotFound(slot) => {
            obs::emit_artifact_missing(slot);
            ArtifactError::Missing(slot)
        }
    })?;

    vet_markup(slot, &markup)?;
    Ok(Artifact { slot, markup })
}

/// Accept only well-formed XML whose root element is `svg` and which carries
/// no `script` elements.
pub fn vet_markup(slot: SlotName, markup: &str) -> Result<(), ArtifactError> {
    let reject = |reason: String| {
        obs::emit_artifact_rejected(slot, &reason);
        ArtifactError::Rejected { slot, reason }
    };

    let mut reader = Reader::from_str(markup);
    let mut saw_root = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();
                if !saw_root {
                    if name.as_ref() != b"svg" {
                        return Err(reject(format!(
                            "root element is not svg: {}",
                            String::from_utf8_lossy(name.as_ref())
                        )));
                    }
                    saw_root = true;
                }
                if name.as_ref() == b"script" {
                    return Err(reject("script element in markup".to_string()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(reject(format!("malformed markup: {err}"))),
        }
    }

    if !saw_root {
        return Err(reject("no svg element found".to_string()));
    }
    Ok(())
}
