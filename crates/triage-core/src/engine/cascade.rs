use super::config::ScreeningConfig;
use super::gates::{self, GateResult};
use crate::core::models::candidate::CandidateRecord;
use rayon::prelude::*;
use tracing::{debug, instrument};

// Legacy composite-score weights: structural confidence, humanness, inverse
// liability burden, inverse soft-fail count. Kept for backward-compatible
// sorting when worst-metric ranking is not used.
const W_STRUCTURAL: f64 = 0.3;
const W_HUMANNESS: f64 = 0.3;
const W_LIABILITIES: f64 = 0.2;
const W_SOFT_FAILS: f64 = 0.2;

// Humanness scores arrive as percentiles.
const HUMANNESS_SCALE: f64 = 100.0;

type Gate = fn(&CandidateRecord, &ScreeningConfig) -> GateResult;

const GATES: [(&str, Gate); 5] = [
    (gates::BINDING, gates::binding::evaluate),
    (gates::HUMANNESS, gates::humanness::evaluate),
    (gates::LIABILITIES, gates::liabilities::evaluate),
    (gates::DEVELOPABILITY, gates::developability::evaluate),
    (gates::AGGREGATION, gates::aggregation::evaluate),
];

/// Runs all five gates over every candidate, writing verdicts, risk flags, and
/// the legacy composite score into each record.
///
/// Gate evaluation is independent per candidate; no verdict depends on any
/// other candidate's data, so the pass is parallelized with no shared state.
#[instrument(skip_all, fields(candidates = records.len()))]
pub fn run(records: &mut [CandidateRecord], config: &ScreeningConfig) {
    records
        .par_iter_mut()
        .for_each(|record| evaluate_candidate(record, config));

    let rejected = records.iter().filter(|r| r.is_rejected()).count();
    debug!(
        total = records.len(),
        rejected,
        "Filter cascade complete."
    );
}

fn evaluate_candidate(record: &mut CandidateRecord, config: &ScreeningConfig) {
    let results: Vec<(&str, GateResult)> = GATES
        .iter()
        .map(|(name, gate)| (*name, gate(record, config)))
        .collect();

    for (name, result) in results {
        for note in &result.notes {
            record.push_risk_flag(format!("{}: {}", name, note));
        }
        record.gate_verdicts.insert(name.to_string(), result.verdict);
    }

    record.composite_score = composite_score(record);
}

/// Legacy composite score, higher is better. Absent metrics contribute zero.
pub fn composite_score(record: &CandidateRecord) -> f64 {
    let structural = record.binding.ptm.unwrap_or(0.0);
    let humanness = record.humanness.mean.unwrap_or(0.0) / HUMANNESS_SCALE;
    let liability_term = 1.0 / (1.0 + record.liabilities.total() as f64);
    let soft_term = 1.0 / (1.0 + record.soft_fail_count() as f64);

    W_STRUCTURAL * structural
        + W_HUMANNESS * humanness
        + W_LIABILITIES * liability_term
        + W_SOFT_FAILS * soft_term
}
