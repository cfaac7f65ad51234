//! Slot names: the closed set of virtual-filesystem paths shared with the engine.
//!
//! The engine addresses its inputs and outputs by fixed paths. Keeping the
//! set closed (an enum instead of raw strings) removes the cross-workflow
//! collision hazard of two callers staging into the same ad-hoc path.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed virtual-filesystem path agreed with the engine.
///
/// The string forms are a bit-exact naming contract; changing one breaks the
/// handoff with the precompiled engine module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    /// Single-graph input, read by `embedLoadedFile`.
    Input,
    /// Single-graph drawing, written by `embedLoadedFile`.
    Embedding,
    /// Red SEFE input, read by `sefeLoadedFiles`.
    RedInput,
    /// Blue SEFE input, read by `sefeLoadedFiles`.
    BlueInput,
    /// Red SEFE drawing, written by `sefeLoadedFiles`.
    RedEmbedding,
    /// Blue SEFE drawing, written by `sefeLoadedFiles`.
    BlueEmbedding,
}

impl SlotName {
    /// The engine-visible path for this slot.
    pub fn path(self) -> &'static str {
        match self {
            SlotName::Input => "/input.txt",
            SlotName::Embedding => "/embedding.svg",
            SlotName::RedInput => "/red.txt",
            SlotName::BlueInput => "/blue.txt",
            SlotName::RedEmbedding => "/embedding-red.svg",
            SlotName::BlueEmbedding => "/embedding-blue.svg",
        }
    }

    /// Resolve an engine-supplied path back to a slot.
    ///
    /// Returns `None` for any path outside the agreed set; the bridge refuses
    /// such accesses instead of inventing new slots.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/input.txt" => Some(SlotName::Input),
            "/embedding.svg" => Some(SlotName::Embedding),
            "/red.txt" => Some(SlotName::RedInput),
            "/blue.txt" => Some(SlotName::BlueInput),
            "/embedding-red.svg" => Some(SlotName::RedEmbedding),
            "/embedding-blue.svg" => Some(SlotName::BlueEmbedding),
            _ => None,
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The two graphs of a SEFE session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SefeColor {
    Red,
    Blue,
}

impl SefeColor {
    /// Both colors, in the order the original surface renders them.
    pub const ALL: [SefeColor; 2] = [SefeColor::Red, SefeColor::Blue];

    /// The input slot this color stages into.
    pub fn input_slot(self) -> SlotName {
        match self {
            SefeColor::Red => SlotName::RedInput,
            SefeColor::Blue => SlotName::BlueInput,
        }
    }

    /// The artifact slot the engine draws this color into.
    pub fn artifact_slot(self) -> SlotName {
        match self {
            SefeColor::Red => SlotName::RedEmbedding,
            SefeColor::Blue => SlotName::BlueEmbedding,
        }
    }

    /// Fixed file name used when exporting this color's drawing.
    pub fn export_file_name(self) -> &'static str {
        match self {
            SefeColor::Red => "red.svg",
            SefeColor::Blue => "blue.svg",
        }
    }
}

impl fmt::Display for SefeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SefeColor::Red => write!(f, "red"),
            SefeColor::Blue => write!(f, "blue"),
        }
    }
}
