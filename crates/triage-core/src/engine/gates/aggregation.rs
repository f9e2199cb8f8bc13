use super::GateResult;
use crate::core::models::candidate::CandidateRecord;
use crate::core::sequence::{aromatic_fraction, max_aromatic_run};
use crate::engine::config::ScreeningConfig;

// Aromatic content limits restricted to annotated CDRs.
const CDR_MAX_AROMATIC_FRACTION: f64 = 0.20;
const CDR_MAX_AROMATIC_RUN: usize = 1;
// Whole-sequence fallback when CDR boundaries are unknown.
const GLOBAL_MAX_AROMATIC_FRACTION: f64 = 0.15;
const GLOBAL_MAX_AROMATIC_RUN: usize = 2;

/// Aggregation-propensity gate. Soft-only.
///
/// Inspects aromatic-residue content restricted to CDR regions when boundary
/// annotations are available (aromatic surface at the paratope drives
/// self-association), falling back to the whole sequence with looser limits
/// otherwise.
pub fn evaluate(record: &CandidateRecord, _config: &ScreeningConfig) -> GateResult {
    if record.sequence.is_empty() {
        return GateResult::soft_fail(vec!["empty sequence".to_string()]);
    }

    let mut notes = Vec::new();

    if record.cdr_spans.is_empty() {
        let fraction = aromatic_fraction(&record.sequence);
        if fraction > GLOBAL_MAX_AROMATIC_FRACTION {
            notes.push(format!(
                "aromatic fraction {:.2} over whole sequence exceeds {:.2}",
                fraction, GLOBAL_MAX_AROMATIC_FRACTION
            ));
        }
        let run = max_aromatic_run(&record.sequence);
        if run > GLOBAL_MAX_AROMATIC_RUN {
            notes.push(format!("{} consecutive aromatic residues", run));
        }
    } else {
        let cdr_window: String = record
            .cdr_spans
            .iter()
            .flat_map(|span| record.sequence.chars().skip(span.start).take(span.len()))
            .collect();

        let fraction = aromatic_fraction(&cdr_window);
        if fraction > CDR_MAX_AROMATIC_FRACTION {
            notes.push(format!(
                "aromatic fraction {:.2} over CDRs exceeds {:.2}",
                fraction, CDR_MAX_AROMATIC_FRACTION
            ));
        }

        for span in &record.cdr_spans {
            let window: String = record.sequence.chars().skip(span.start).take(span.len()).collect();
            let run = max_aromatic_run(&window);
            if run > CDR_MAX_AROMATIC_RUN {
                notes.push(format!(
                    "{} consecutive aromatic residues in {}",
                    run, span.label
                ));
            }
        }
    }

    if notes.is_empty() {
        GateResult::pass()
    } else {
        GateResult::soft_fail(notes)
    }
}
