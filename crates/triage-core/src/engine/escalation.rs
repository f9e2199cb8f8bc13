use super::config::ScreeningConfig;
use super::error::EngineError;
use crate::core::models::candidate::CandidateRecord;
use crate::core::models::verdict::GateVerdict;
use crate::engine::gates;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Why a candidate was admitted outside the strict pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdmissionReason {
    /// Every failing gate was a soft failure; the candidate was flagged, never
    /// disqualified.
    SoftRescue { flags: Vec<String> },
    /// Admitted after thresholds were relaxed by the given percentage.
    ThresholdRelaxation { percent: f64 },
}

/// One audit-trail entry per fallback admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub candidate_id: String,
    pub reason: AdmissionReason,
}

/// Escalation statistics surfaced to the caller alongside the survivor set.
///
/// A `final_count` below the configured minimum is a property of the input,
/// not a failure; callers must check it explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningStats {
    pub total_input: usize,
    pub strict_pass: usize,
    pub final_count: usize,
    pub audit_trail: Vec<AdmissionRecord>,
}

/// Survivors, rejected records, and statistics of one screening run.
#[derive(Debug, Clone)]
pub struct ScreeningOutcome {
    pub selected: Vec<CandidateRecord>,
    pub rejected: Vec<CandidateRecord>,
    pub stats: ScreeningStats,
}

/// Applies the fallback escalator over an already-cascaded candidate set.
///
/// Strict pass first; when the yield is below `min_candidates`, soft-only
/// candidates are rescued in composite order (early-stopping at the minimum),
/// then thresholds are relaxed once by the bounded fraction and remaining
/// rejected candidates are re-tested directly against the relaxed values.
/// Every fallback admission lands in the audit trail. A shortfall after full
/// relaxation is returned as-is unless `fail_on_shortfall` is set.
#[instrument(skip_all, fields(candidates = records.len()))]
pub fn escalate(
    records: Vec<CandidateRecord>,
    config: &ScreeningConfig,
) -> Result<ScreeningOutcome, EngineError> {
    let total_input = records.len();
    let mut audit_trail = Vec::new();

    // Phase 1: strict pass, candidates with every gate clean.
    let (mut selected, mut rejected): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| r.gate_verdicts.values().all(|v| *v == GateVerdict::Pass));
    let strict_pass = selected.len();
    info!(
        total_input,
        strict_pass,
        minimum = config.min_candidates,
        "Strict filter pass complete."
    );

    // Phase 2: soft-only rescue.
    if selected.len() < config.min_candidates {
        rescue_soft_fails(&mut selected, &mut rejected, &mut audit_trail, config);
    }

    // Phase 3: bounded threshold relaxation.
    if selected.len() < config.min_candidates && config.max_relaxation > 0.0 {
        relax_thresholds(&mut selected, &mut rejected, &mut audit_trail, config);
    }

    if selected.len() < config.min_candidates {
        info!(
            survivors = selected.len(),
            minimum = config.min_candidates,
            "Escalation exhausted below the minimum yield."
        );
        if config.fail_on_shortfall {
            return Err(EngineError::InsufficientSurvivors {
                survivors: selected.len(),
                minimum: config.min_candidates,
            });
        }
    }

    // Re-sort the surviving set by composite score and re-rank.
    selected.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
    for (i, record) in selected.iter_mut().enumerate() {
        record.rank = i + 1;
    }

    let stats = ScreeningStats {
        total_input,
        strict_pass,
        final_count: selected.len(),
        audit_trail,
    };
    Ok(ScreeningOutcome {
        selected,
        rejected,
        stats,
    })
}

fn rescue_soft_fails(
    selected: &mut Vec<CandidateRecord>,
    rejected: &mut Vec<CandidateRecord>,
    audit_trail: &mut Vec<AdmissionRecord>,
    config: &ScreeningConfig,
) {
    // Best composite first, so an early stop keeps the strongest flagged
    // candidates.
    let order = (0..rejected.len())
        .filter(|&i| rejected[i].has_only_soft_fails())
        .sorted_by(|&a, &b| {
            rejected[b]
                .composite_score
                .total_cmp(&rejected[a].composite_score)
        });

    let mut admitted = Vec::new();
    for index in order {
        if selected.len() + admitted.len() >= config.min_candidates {
            break;
        }
        admitted.push(index);
    }

    admitted.sort_unstable();
    for index in admitted.into_iter().rev() {
        let record = rejected.remove(index);
        debug!(candidate = %record.id, "Rescued soft-flagged candidate.");
        audit_trail.push(AdmissionRecord {
            candidate_id: record.id.clone(),
            reason: AdmissionReason::SoftRescue {
                flags: record.risk_flags.clone(),
            },
        });
        selected.push(record);
    }
}

fn relax_thresholds(
    selected: &mut Vec<CandidateRecord>,
    rejected: &mut Vec<CandidateRecord>,
    audit_trail: &mut Vec<AdmissionRecord>,
    config: &ScreeningConfig,
) {
    let factor = 1.0 - config.max_relaxation;
    let relaxed_ptm = config.binding.min_ptm * factor;
    let relaxed_area = config.binding.min_buried_area * factor;
    let relaxed_humanness = config.min_humanness * factor;
    let percent = config.max_relaxation * 100.0;
    info!(
        relaxed_ptm,
        relaxed_area, relaxed_humanness, percent, "Relaxing admission thresholds."
    );

    // Direct re-test of raw metrics against the relaxed thresholds; the full
    // cascade is not re-run. A recorded liabilities failure or a below-minimum
    // contact count cannot be cured by relaxation.
    let passes_relaxed = |record: &CandidateRecord| -> bool {
        if record
            .gate_verdicts
            .get(gates::LIABILITIES)
            .is_some_and(GateVerdict::is_hard_fail)
        {
            return false;
        }
        if record
            .binding
            .interface_contacts
            .is_some_and(|c| c < config.binding.min_contacts)
        {
            return false;
        }
        if record
            .binding
            .buried_area
            .is_some_and(|a| a < relaxed_area)
        {
            return false;
        }
        if relaxed_ptm > 0.0
            && record
                .binding
                .ptm
                .is_some_and(|p| p > 0.0 && p < relaxed_ptm)
        {
            return false;
        }
        if record
            .humanness
            .mean
            .is_some_and(|h| h < relaxed_humanness)
        {
            return false;
        }
        true
    };

    let mut index = 0;
    while index < rejected.len() {
        if passes_relaxed(&rejected[index]) {
            let mut record = rejected.remove(index);
            debug!(candidate = %record.id, percent, "Admitted via threshold relaxation.");
            record.push_risk_flag(format!("admitted at {:.1}% threshold relaxation", percent));
            audit_trail.push(AdmissionRecord {
                candidate_id: record.id.clone(),
                reason: AdmissionReason::ThresholdRelaxation { percent },
            });
            selected.push(record);
        } else {
            index += 1;
        }
    }
}
