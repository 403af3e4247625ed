use super::dedup::deduplicate;
use super::domain::ScoredItem;
use super::features::derive_features;
use super::loader::{LoadError, LoadedTable, MenuLoader};
use super::normalizer::{normalize_table, NormalizationReport};
use super::presenter::{render_web_artifact, write_atomically, ProfileListing, WebItem};
use super::profiles::{GateReport, ProfileKind, ProfileSet};
use super::scoring::{MacroScorer, ScoreSummary};
use super::tuning::PipelineTuning;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, info_span};

/// Fatal pipeline failures, each naming the stage that gave up.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("load stage: source unreadable ({origin}): {source}")]
    SourceUnreadable { origin: String, source: LoadError },
    #[error("normalize stage: no menu rows remain after normalization")]
    SchemaEmpty,
    #[error("present stage: failed to encode web artifact: {0}")]
    ArtifactEncode(#[source] serde_json::Error),
    #[error("present stage: failed to write {}: {source}", .path.display())]
    ArtifactWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Batch transform from a menu export to scored items.
pub struct MenuPipeline {
    tuning: PipelineTuning,
    scorer: MacroScorer,
}

impl MenuPipeline {
    pub fn new(tuning: PipelineTuning) -> Self {
        let scorer = MacroScorer::new(tuning.scoring.clone());
        Self { tuning, scorer }
    }

    pub fn run_path<P: AsRef<Path>>(&self, path: P) -> Result<MenuRun, PipelineError> {
        let path = path.as_ref();
        let table =
            MenuLoader::from_path(path).map_err(|source| PipelineError::SourceUnreadable {
                origin: path.display().to_string(),
                source,
            })?;
        self.process(table)
    }

    pub fn run_reader<R: Read>(&self, reader: R) -> Result<MenuRun, PipelineError> {
        let table =
            MenuLoader::from_reader(reader).map_err(|source| PipelineError::SourceUnreadable {
                origin: "reader".to_string(),
                source,
            })?;
        self.process(table)
    }

    pub fn process(&self, table: LoadedTable) -> Result<MenuRun, PipelineError> {
        let span = info_span!("menu_pipeline");
        let _entered = span.enter();

        let rows_loaded = table.rows.len();
        info!(rows = rows_loaded, columns = table.columns.len(), "menu export loaded");
        let missing = table.missing_columns();
        if !missing.is_empty() {
            debug!(?missing, "recognized columns absent from export");
        }

        let (items, normalization) = normalize_table(&table);
        info!(
            kept = normalization.rows_kept,
            dropped_identity = normalization.dropped_missing_identity,
            dropped_calories = normalization.dropped_invalid_calories,
            negatives_erased = normalization.negative_values_erased,
            sodium_rescaled = normalization.sodium_rescaled,
            "menu rows normalized"
        );
        if items.is_empty() {
            return Err(PipelineError::SchemaEmpty);
        }

        let items = deduplicate(items);
        info!(unique = items.len(), "duplicate menu rows collapsed");

        let (items, scoring) = self.scorer.score(derive_features(items));
        info!(
            scored = items.len(),
            clip_low = scoring.clip_low,
            clip_high = scoring.clip_high,
            degenerate = scoring.degenerate,
            "macro scores computed"
        );

        Ok(MenuRun {
            tuning: self.tuning.clone(),
            rows_loaded,
            normalization,
            scoring,
            items,
        })
    }
}

/// Result of one pipeline run; read-only once produced.
#[derive(Debug, Clone)]
pub struct MenuRun {
    tuning: PipelineTuning,
    rows_loaded: usize,
    normalization: NormalizationReport,
    scoring: ScoreSummary,
    items: Vec<ScoredItem>,
}

impl MenuRun {
    pub fn items(&self) -> &[ScoredItem] {
        &self.items
    }

    pub fn rows_loaded(&self) -> usize {
        self.rows_loaded
    }

    pub fn normalization(&self) -> &NormalizationReport {
        &self.normalization
    }

    pub fn scoring(&self) -> &ScoreSummary {
        &self.scoring
    }

    pub fn profiles(&self) -> ProfileSet<'_> {
        ProfileSet::select(&self.items, &self.tuning.profiles)
    }

    pub fn listing(&self, kind: ProfileKind) -> ProfileListing {
        self.listing_with_limit(kind, self.tuning.listing_limit)
    }

    pub fn listing_with_limit(&self, kind: ProfileKind, limit: usize) -> ProfileListing {
        let profiles = self.profiles();
        ProfileListing::build(kind, profiles.members(kind), limit)
    }

    /// Scored items whose name matches `item_name`, ignoring ASCII case.
    pub fn find_items(&self, item_name: &str) -> Vec<&ScoredItem> {
        let needle = item_name.trim();
        self.items
            .iter()
            .filter(|item| item.item.item_name.eq_ignore_ascii_case(needle))
            .collect()
    }

    /// Why `item` passes or fails each profile gate.
    pub fn gate_reports(&self, item: &ScoredItem) -> Vec<GateReport> {
        self.tuning.profiles.reports(item)
    }

    pub fn web_items(&self) -> Vec<WebItem> {
        self.items.iter().map(WebItem::from).collect()
    }

    pub fn render_artifact(&self) -> Result<Vec<u8>, PipelineError> {
        render_web_artifact(&self.web_items()).map_err(PipelineError::ArtifactEncode)
    }

    /// Replaces the web artifact at `path` and summarizes the run.
    pub fn write_artifact<P: AsRef<Path>>(&self, path: P) -> Result<RunSummary, PipelineError> {
        let path = path.as_ref();
        let bytes = self.render_artifact()?;
        write_atomically(path, &bytes).map_err(|source| PipelineError::ArtifactWrite {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), records = self.items.len(), "web artifact written");

        Ok(self.summary(Some(path)))
    }

    pub fn summary(&self, artifact_path: Option<&Path>) -> RunSummary {
        let profiles = self.profiles();
        RunSummary {
            generated_at: Utc::now(),
            rows_loaded: self.rows_loaded,
            rows_scored: self.items.len(),
            normalization: self.normalization,
            degenerate_scores: self.scoring.degenerate,
            cut_matches: profiles.cut.len(),
            bulk_matches: profiles.bulk.len(),
            artifact_path: artifact_path.map(Path::to_path_buf),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub rows_loaded: usize,
    pub rows_scored: usize,
    pub normalization: NormalizationReport,
    pub degenerate_scores: bool,
    pub cut_matches: usize,
    pub bulk_matches: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_path: Option<PathBuf>,
}
