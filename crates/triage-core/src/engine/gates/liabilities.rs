use super::GateResult;
use crate::core::models::candidate::CandidateRecord;
use crate::core::models::metrics::LiabilityClass;
use crate::core::models::verdict::GateVerdict;
use crate::engine::config::ScreeningConfig;

/// Sequence-liability gate.
///
/// CDR-located deamidation, isomerization, and glycosylation sites hard-fail
/// unless the per-class allow flag is set, as does any unpaired cysteine.
/// Oxidation is a pure soft filter: it flags above the configured count but
/// never hard-fails, regardless of CDR/framework location.
pub fn evaluate(record: &CandidateRecord, config: &ScreeningConfig) -> GateResult {
    let policy = &config.liabilities;
    let hard_classes = [
        (LiabilityClass::Deamidation, policy.allow_cdr_deamidation),
        (LiabilityClass::Isomerization, policy.allow_cdr_isomerization),
        (LiabilityClass::Glycosylation, policy.allow_cdr_glycosylation),
    ];

    for (class, allowed) in hard_classes {
        let count = record.liabilities.cdr_count(class);
        if count > 0 && !allowed {
            return GateResult::fail(format!("{} CDR {:?} site(s)", count, class));
        }
    }

    if record.liabilities.unpaired_cysteines > 0 {
        return GateResult::fail(format!(
            "{} unpaired cysteine(s)",
            record.liabilities.unpaired_cysteines
        ));
    }

    let oxidation = record.liabilities.count(LiabilityClass::Oxidation);
    if oxidation > policy.max_oxidation_sites as usize {
        return GateResult::soft_fail(vec![format!(
            "{} oxidation site(s) exceed tolerated {}",
            oxidation, policy.max_oxidation_sites
        )]);
    }

    GateResult {
        verdict: GateVerdict::Pass,
        notes: Vec::new(),
    }
}
