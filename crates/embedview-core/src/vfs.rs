//! Virtual filesystem: the engine-visible store of named text blobs.
//!
//! The engine does not take arguments; it communicates exclusively through
//! named slots in this store. The store is process-wide shared mutable state:
//! a staging write is visible to the next invocation regardless of which
//! workflow performed it, and writing a slot twice keeps only the second
//! content.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::SlotName;

/// Errors from virtual-filesystem access.
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    #[error("slot {0} is not present")]
    NotFound(SlotName),
}

/// Synchronous write/read-as-text primitives shared with the engine bridge.
pub trait VirtualFs: Send + Sync {
    /// Overwrite the named slot with `contents`. Never appends.
    fn write_text(&self, slot: SlotName, contents: &str);

    /// Read the named slot as text.
    fn read_text(&self, slot: SlotName) -> Result<String, VfsError>;

    /// Whether the named slot currently holds content.
    fn contains(&self, slot: SlotName) -> bool;
}

/// In-memory slot store, the in-process analog of the engine's `FS` module.
#[derive(Debug, Default)]
pub struct MemoryFs {
    entries: RwLock<HashMap<SlotName, String>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VirtualFs for MemoryFs {
    fn write_text(&self, slot: SlotName, contents: &str) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(slot, contents.to_string());
    }

    fn read_text(&self, slot: SlotName) -> Result<String, VfsError> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        entries.get(&slot).cloned().ok_or(VfsError::NotFound(slot))
    }

    fn contains(&self, slot: SlotName) -> bool {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(&slot)
    }
}
