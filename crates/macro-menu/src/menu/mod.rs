//! Menu nutrition pipeline: load, normalize, deduplicate, derive densities,
//! score, gate into diet profiles and present.

pub mod dedup;
pub mod domain;
pub mod features;
pub mod loader;
pub mod normalizer;
mod pipeline;
pub mod presenter;
pub mod profiles;
pub mod scoring;
mod tuning;

pub use domain::{MenuColumn, MenuItem, Nutrient, Nutrients, ScoredItem};
pub use loader::{LoadError, LoadedTable, MenuLoader, RawRow, SourceFormat};
pub use normalizer::NormalizationReport;
pub use pipeline::{MenuPipeline, MenuRun, PipelineError, RunSummary};
pub use presenter::{ProfileEntry, ProfileListing, WebItem, DEFAULT_ARTIFACT_PATH};
pub use profiles::{GateFailure, GateReport, ProfileGate, ProfileGates, ProfileKind, ProfileSet};
pub use scoring::{MacroScorer, ScoreSummary, ScoringConfig};
pub use tuning::PipelineTuning;
