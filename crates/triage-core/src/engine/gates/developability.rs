use super::GateResult;
use crate::core::models::candidate::CandidateRecord;
use crate::engine::config::ScreeningConfig;

/// Developability gate. Soft-only: out-of-range values flag a concern but never
/// reject, and missing values pass outright (cannot assess, no penalty).
pub fn evaluate(record: &CandidateRecord, config: &ScreeningConfig) -> GateResult {
    let ranges = &config.developability;
    let metrics = &record.developability;
    let mut notes = Vec::new();

    if let Some(len) = metrics.cdr3_length {
        if len < ranges.min_cdr3_length || len > ranges.max_cdr3_length {
            notes.push(format!(
                "CDR3 length {} outside [{}, {}]",
                len, ranges.min_cdr3_length, ranges.max_cdr3_length
            ));
        }
    }

    if let Some(charge) = metrics.net_charge {
        if charge < ranges.min_net_charge || charge > ranges.max_net_charge {
            notes.push(format!(
                "net charge {:.1} outside [{:.1}, {:.1}]",
                charge, ranges.min_net_charge, ranges.max_net_charge
            ));
        }
    }

    if let Some(pi) = metrics.isoelectric_point {
        if pi < ranges.min_isoelectric_point || pi > ranges.max_isoelectric_point {
            notes.push(format!(
                "isoelectric point {:.1} outside [{:.1}, {:.1}]",
                pi, ranges.min_isoelectric_point, ranges.max_isoelectric_point
            ));
        }
    }

    if let Some(patches) = metrics.hydrophobic_patches {
        if patches > ranges.max_hydrophobic_patches {
            notes.push(format!(
                "{} hydrophobic patches exceed tolerated {}",
                patches, ranges.max_hydrophobic_patches
            ));
        }
    }

    if notes.is_empty() {
        GateResult::pass()
    } else {
        GateResult::soft_fail(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::CandidateBuilder;
    use crate::core::models::metrics::DevelopabilityMetrics;
    use crate::core::models::verdict::GateVerdict;
    use crate::engine::gates::test_screening_config;

    fn candidate(metrics: DevelopabilityMetrics) -> CandidateRecord {
        CandidateBuilder::new("c", "EVQLVESGG")
            .developability(metrics)
            .build()
            .unwrap()
    }

    #[test]
    fn in_range_metrics_pass() {
        let config = test_screening_config();
        let record = candidate(DevelopabilityMetrics {
            cdr3_length: Some(12),
            net_charge: Some(1.5),
            isoelectric_point: Some(8.0),
            hydrophobic_patches: Some(2),
        });
        assert_eq!(evaluate(&record, &config).verdict, GateVerdict::Pass);
    }

    #[test]
    fn missing_values_pass() {
        let config = test_screening_config();
        let record = candidate(DevelopabilityMetrics::default());
        let result = evaluate(&record, &config);
        assert_eq!(result.verdict, GateVerdict::Pass);
        assert!(result.notes.is_empty());
    }

    #[test]
    fn never_hard_fails_even_with_every_metric_out_of_range() {
        let config = test_screening_config();
        let record = candidate(DevelopabilityMetrics {
            cdr3_length: Some(30),
            net_charge: Some(9.0),
            isoelectric_point: Some(3.0),
            hydrophobic_patches: Some(8),
        });
        let result = evaluate(&record, &config);
        assert_eq!(result.verdict, GateVerdict::SoftFail);
        assert_eq!(result.notes.len(), 4);
    }

    #[test]
    fn boundary_values_are_inside_the_range() {
        let config = test_screening_config();
        let record = candidate(DevelopabilityMetrics {
            cdr3_length: Some(22),
            net_charge: Some(-2.0),
            isoelectric_point: Some(9.5),
            hydrophobic_patches: Some(3),
        });
        assert_eq!(evaluate(&record, &config).verdict, GateVerdict::Pass);
    }
}
