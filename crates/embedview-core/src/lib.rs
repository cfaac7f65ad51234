//! Embedview core: the control surface for the planarity embedding engine.
//!
//! The engine is an opaque precompiled module that communicates through a
//! virtual filesystem of named slots: graph descriptions go in, SVG drawings
//! come out. This crate owns everything around that contract (staging user
//! files into slots, invoking named entry points, decoding the SEFE
//! feasibility verdict, vetting and delivering artifacts, and exporting
//! rendered drawings) while the engine itself stays behind the
//! [`engine::Engine`] trait.

pub mod artifact;
pub mod domain;
pub mod engine;
pub mod export;
pub mod obs;
pub mod staging;
pub mod surface;
pub mod vfs;
pub mod workflow;

pub use artifact::{read_artifact, Artifact, ArtifactError};
pub use domain::{ConsoleError, Result, SefeColor, SefeVerdict, SlotName};
pub use engine::{Engine, EngineFault, EngineOp};
pub use export::{ExportBundle, SVG_MIME};
pub use staging::{stage_input, FileSource, InputSource, SelectedFile, StageOutcome, StagedInput};
pub use surface::{DisplaySurface, RecordingSurface, INFEASIBLE_NOTICE};
pub use vfs::{MemoryFs, VfsError, VirtualFs};
pub use workflow::{
    RenderOutcome, SefeReady, SefeState, SefeWorkflow, SingleGraphState, SingleGraphWorkflow,
};
