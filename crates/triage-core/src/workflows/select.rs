use crate::core::models::candidate::CandidateRecord;
use crate::engine::config::SelectionConfig;
use crate::engine::diversity;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::ranking;
use std::collections::HashSet;
use tracing::{info, instrument};

/// Shortlist plus the ranked survivors that did not make the final cut.
///
/// Both sets carry the ranks and quality keys written back by the ranking pass,
/// so no record is ever lost at the output boundary.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// The final shortlist, ordered best rank first.
    pub shortlist: Vec<CandidateRecord>,
    /// Ranked candidates beyond the shortlist, in rank order.
    pub remainder: Vec<CandidateRecord>,
}

/// Re-orders surviving candidates by worst-metric rank, then greedily selects
/// the final diverse subset.
#[instrument(skip_all, name = "selection_workflow")]
pub fn run(
    candidates: Vec<CandidateRecord>,
    config: &SelectionConfig,
    reporter: &ProgressReporter,
) -> SelectionOutcome {
    reporter.report(Progress::PhaseStart { name: "Ranking" });
    info!(
        candidates = candidates.len(),
        metrics = config.weights.len(),
        "Ranking candidates by worst tracked metric."
    );
    let ranked = ranking::rank(candidates, &config.weights);
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Diversity Selection",
    });
    let chosen: HashSet<usize> = diversity::select(
        &ranked,
        config.target_count,
        config.diversity_alpha,
    )
    .into_iter()
    .collect();

    let mut shortlist = Vec::with_capacity(chosen.len());
    let mut remainder = Vec::with_capacity(ranked.len().saturating_sub(chosen.len()));
    for (index, record) in ranked.into_iter().enumerate() {
        if chosen.contains(&index) {
            shortlist.push(record);
        } else {
            remainder.push(record);
        }
    }
    reporter.report(Progress::StatusUpdate {
        text: format!("{} candidate(s) shortlisted", shortlist.len()),
    });
    reporter.report(Progress::PhaseFinish);

    info!(shortlisted = shortlist.len(), "Selection complete.");
    SelectionOutcome {
        shortlist,
        remainder,
    }
}
