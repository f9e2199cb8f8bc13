use super::GateResult;
use crate::core::models::candidate::CandidateRecord;
use crate::engine::config::ScreeningConfig;

/// Binding-quality gate.
///
/// Hard-fails on a present-but-below-minimum buried area or contact count.
/// The structural-confidence threshold is applied only when both the threshold
/// and the candidate's value are strictly positive: one upstream predictor
/// always emits `0.0` for this metric, and treating that as a real score would
/// reject its entire output. Absent area or contacts is incomplete evidence,
/// flagged as a soft failure rather than rejected.
pub fn evaluate(record: &CandidateRecord, config: &ScreeningConfig) -> GateResult {
    let thresholds = &config.binding;

    if let Some(area) = record.binding.buried_area {
        if area < thresholds.min_buried_area {
            return GateResult::fail(format!(
                "buried interface area {:.0} below minimum {:.0}",
                area, thresholds.min_buried_area
            ));
        }
    }

    if let Some(contacts) = record.binding.interface_contacts {
        if contacts < thresholds.min_contacts {
            return GateResult::fail(format!(
                "interface contacts {} below minimum {}",
                contacts, thresholds.min_contacts
            ));
        }
    }

    if thresholds.min_ptm > 0.0 {
        if let Some(ptm) = record.binding.ptm {
            if ptm > 0.0 && ptm < thresholds.min_ptm {
                return GateResult::fail(format!(
                    "structural confidence {:.3} below minimum {:.3}",
                    ptm, thresholds.min_ptm
                ));
            }
        }
    }

    let mut notes = Vec::new();
    if record.binding.buried_area.is_none() {
        notes.push("buried interface area not measured".to_string());
    }
    if record.binding.interface_contacts.is_none() {
        notes.push("interface contact count not measured".to_string());
    }
    if notes.is_empty() {
        GateResult::pass()
    } else {
        GateResult::soft_fail(notes)
    }
}
