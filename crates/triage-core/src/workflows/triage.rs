use super::{screen, select};
use crate::core::models::candidate::CandidateRecord;
use crate::engine::config::{ScreeningConfig, SelectionConfig};
use crate::engine::error::EngineError;
use crate::engine::escalation::ScreeningStats;
use crate::engine::progress::ProgressReporter;
use tracing::{info, instrument};

/// Result of a full triage run.
#[derive(Debug, Clone)]
pub struct TriageResult {
    /// The final diverse shortlist, best rank first.
    pub shortlist: Vec<CandidateRecord>,
    /// Survivors ranked below the shortlist cut.
    pub remainder: Vec<CandidateRecord>,
    /// Candidates rejected by the cascade and not admitted by any fallback.
    pub rejected: Vec<CandidateRecord>,
    pub stats: ScreeningStats,
}

/// The complete pipeline: filter cascade, fallback escalation, worst-metric
/// ranking, and diversity selection.
#[instrument(skip_all, name = "triage_pipeline")]
pub fn run(
    candidates: Vec<CandidateRecord>,
    screening: &ScreeningConfig,
    selection: &SelectionConfig,
    reporter: &ProgressReporter,
) -> Result<TriageResult, EngineError> {
    let outcome = screen::run(candidates, screening, reporter)?;
    let selected = select::run(outcome.selected, selection, reporter);

    info!(
        shortlisted = selected.shortlist.len(),
        remainder = selected.remainder.len(),
        rejected = outcome.rejected.len(),
        "Triage pipeline complete."
    );
    Ok(TriageResult {
        shortlist: selected.shortlist,
        remainder: selected.remainder,
        rejected: outcome.rejected,
        stats: outcome.stats,
    })
}
