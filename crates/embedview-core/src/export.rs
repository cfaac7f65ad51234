//! Export: packaging a rendered drawing as a downloadable file.
//!
//! Pure, synchronous, client-local serialization with no engine interaction.
//! The bundle's contents are byte-for-byte the markup currently displayed;
//! export never re-reads the virtual filesystem.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::SefeColor;
use crate::obs;

/// MIME type for exported drawings.
pub const SVG_MIME: &str = "image/svg+xml";

/// A downloadable file: fixed name, fixed MIME, exact displayed markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub file_name: String,
    pub mime: String,
    pub contents: String,
}

impl ExportBundle {
    /// Package a rendered SEFE drawing under its fixed per-color name.
    pub fn for_color(color: SefeColor, markup: &str) -> Self {
        Self::named(color.export_file_name(), markup)
    }

    /// Package the single-graph drawing.
    pub fn for_embedding(markup: &str) -> Self {
        Self::named("embedding.svg", markup)
    }

    fn named(file_name: &str, markup: &str) -> Self {
        obs::emit_export(file_name, markup.len());
        Self {
            file_name: file_name.to_string(),
            mime: SVG_MIME.to_string(),
            contents: markup.to_string(),
        }
    }

    /// Write the bundle into `dir`, returning the file's path.
    ///
    /// The on-disk download analog of the browser's blob-and-anchor dance.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.contents.as_bytes())?;
        Ok(path)
    }
}
