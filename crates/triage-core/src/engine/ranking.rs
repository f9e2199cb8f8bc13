use super::config::MetricWeight;
use crate::core::models::candidate::CandidateRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Ranking direction of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// A metric tracked by worst-metric ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    InterfaceConfidence,
    StructuralConfidence,
    BuriedArea,
    Contacts,
    BindingEnergy,
    Humanness,
    EpitopeOverlap,
}

impl RankMetric {
    pub fn label(&self) -> &'static str {
        match self {
            RankMetric::InterfaceConfidence => "interface_confidence",
            RankMetric::StructuralConfidence => "structural_confidence",
            RankMetric::BuriedArea => "buried_area",
            RankMetric::Contacts => "contacts",
            RankMetric::BindingEnergy => "binding_energy",
            RankMetric::Humanness => "humanness",
            RankMetric::EpitopeOverlap => "epitope_overlap",
        }
    }

    /// Predicted binding energies are log-likelihood-style scores: lower is
    /// better. Everything else ranks higher-value-as-better.
    pub fn direction(&self) -> Direction {
        match self {
            RankMetric::BindingEnergy => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }

    pub fn extract(&self, record: &CandidateRecord) -> Option<f64> {
        match self {
            RankMetric::InterfaceConfidence => record.binding.iptm,
            RankMetric::StructuralConfidence => record.binding.ptm,
            RankMetric::BuriedArea => record.binding.buried_area,
            RankMetric::Contacts => record.binding.interface_contacts.map(f64::from),
            RankMetric::BindingEnergy => record.binding.delta_g,
            RankMetric::Humanness => record.humanness.mean,
            RankMetric::EpitopeOverlap => record.epitope.as_ref().map(|e| e.overlap),
        }
    }
}

/// Transient per-candidate projection used during one ranking pass.
struct RankedCandidate {
    index: usize,
    /// Worst weighted rank across the metrics this candidate has values for;
    /// `None` when it has no tracked metric at all.
    quality_key: Option<f64>,
    /// Raw interface confidence, the tiebreaker; missing sorts last.
    tiebreak: f64,
}

/// Worst-metric ranking.
///
/// Each tracked metric ranks all candidates 1..N on that metric alone, missing
/// values placed at the worst extreme of the ordering (consistently for both
/// directions). A candidate's quality key is its maximum rank-over-weight
/// across the metrics it has values for: it is only as good as its worst
/// tracked metric, scaled by importance. Metrics with zero populated
/// candidates are skipped entirely.
///
/// Returns the candidates sorted best-first with `rank` and `quality_key`
/// written back.
#[instrument(skip_all, fields(candidates = records.len(), metrics = weights.len()))]
pub fn rank(mut records: Vec<CandidateRecord>, weights: &[MetricWeight]) -> Vec<CandidateRecord> {
    if records.is_empty() {
        return records;
    }

    let mut projections: Vec<RankedCandidate> = records
        .iter()
        .enumerate()
        .map(|(index, record)| RankedCandidate {
            index,
            quality_key: None,
            tiebreak: record.binding.iptm.unwrap_or(f64::NEG_INFINITY),
        })
        .collect();

    for entry in weights {
        let mut populated: Vec<(usize, f64)> = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| entry.metric.extract(record).map(|v| (index, v)))
            .collect();
        if populated.is_empty() {
            debug!(metric = entry.metric.label(), "No data; metric skipped.");
            continue;
        }

        match entry.metric.direction() {
            Direction::HigherIsBetter => {
                populated.sort_by(|a, b| b.1.total_cmp(&a.1));
            }
            Direction::LowerIsBetter => {
                populated.sort_by(|a, b| a.1.total_cmp(&b.1));
            }
        }

        // Missing-value candidates occupy the worst ranks, in input order;
        // only candidates that actually have the metric fold it into their
        // quality key.
        for (position, &(index, _)) in populated.iter().enumerate() {
            let weighted = (position + 1) as f64 / entry.weight;
            let key = &mut projections[index].quality_key;
            *key = Some(key.map_or(weighted, |current| current.max(weighted)));
        }
    }

    projections.sort_by(|a, b| {
        let a_key = a.quality_key.unwrap_or(f64::INFINITY);
        let b_key = b.quality_key.unwrap_or(f64::INFINITY);
        a_key
            .total_cmp(&b_key)
            .then(b.tiebreak.total_cmp(&a.tiebreak))
            .then(a.index.cmp(&b.index))
    });

    let order: Vec<usize> = projections.iter().map(|p| p.index).collect();
    let keys: Vec<Option<f64>> = projections.iter().map(|p| p.quality_key).collect();

    let mut by_original: Vec<Option<CandidateRecord>> = records.drain(..).map(Some).collect();
    let mut ranked = Vec::with_capacity(by_original.len());
    for (position, index) in order.into_iter().enumerate() {
        let mut record = by_original[index].take().expect("permutation visits each index once");
        record.rank = position + 1;
        record.quality_key = keys[position];
        ranked.push(record);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::CandidateBuilder;
    use crate::core::models::metrics::BindingMetrics;
    use crate::engine::config::SelectionConfigBuilder;

    fn candidate(id: &str, binding: BindingMetrics) -> CandidateRecord {
        CandidateBuilder::new(id, "EVQLVESGG")
            .binding(binding)
            .build()
            .unwrap()
    }

    fn weights(entries: &[(RankMetric, f64)]) -> Vec<MetricWeight> {
        let mut builder = SelectionConfigBuilder::new().target_count(1);
        for (metric, weight) in entries {
            builder = builder.weight(*metric, *weight);
        }
        builder.build().unwrap().weights
    }

    fn ids(records: &[CandidateRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn worst_metric_dominates_the_quality_key() {
        // "balanced" is second-best on both metrics; "spiky" is best on one
        // and worst on the other. The minimax rank prefers "balanced".
        let records = vec![
            candidate(
                "spiky",
                BindingMetrics {
                    iptm: Some(0.95),
                    buried_area: Some(600.0),
                    ..BindingMetrics::default()
                },
            ),
            candidate(
                "balanced",
                BindingMetrics {
                    iptm: Some(0.90),
                    buried_area: Some(900.0),
                    ..BindingMetrics::default()
                },
            ),
            candidate(
                "weak",
                BindingMetrics {
                    iptm: Some(0.50),
                    buried_area: Some(950.0),
                    ..BindingMetrics::default()
                },
            ),
        ];
        let ranked = rank(
            records,
            &weights(&[
                (RankMetric::InterfaceConfidence, 1.0),
                (RankMetric::BuriedArea, 1.0),
            ]),
        );

        assert_eq!(ids(&ranked), vec!["balanced", "spiky", "weak"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].quality_key, Some(2.0));
    }

    #[test]
    fn higher_weight_shrinks_the_rank_penalty() {
        let records = vec![
            candidate(
                "a",
                BindingMetrics {
                    iptm: Some(0.9),
                    buried_area: Some(500.0),
                    ..BindingMetrics::default()
                },
            ),
            candidate(
                "b",
                BindingMetrics {
                    iptm: Some(0.5),
                    buried_area: Some(900.0),
                    ..BindingMetrics::default()
                },
            ),
        ];

        // With area weighted 4x, "a"'s poor area rank (2 / 4 = 0.5) costs less
        // than "b"'s poor confidence rank (2 / 1 = 2).
        let ranked = rank(
            records,
            &weights(&[
                (RankMetric::InterfaceConfidence, 1.0),
                (RankMetric::BuriedArea, 4.0),
            ]),
        );
        assert_eq!(ids(&ranked), vec!["a", "b"]);
        assert_eq!(ranked[0].quality_key, Some(1.0));
        assert_eq!(ranked[1].quality_key, Some(2.0));
    }

    #[test]
    fn binding_energy_ranks_lower_value_as_better() {
        let records = vec![
            candidate(
                "shallow",
                BindingMetrics {
                    delta_g: Some(-4.0),
                    ..BindingMetrics::default()
                },
            ),
            candidate(
                "deep",
                BindingMetrics {
                    delta_g: Some(-11.5),
                    ..BindingMetrics::default()
                },
            ),
        ];
        let ranked = rank(records, &weights(&[(RankMetric::BindingEnergy, 1.0)]));
        assert_eq!(ids(&ranked), vec!["deep", "shallow"]);
    }

    #[test]
    fn missing_value_is_excluded_from_own_quality_key_but_ranks_worst() {
        let records = vec![
            candidate(
                "full",
                BindingMetrics {
                    iptm: Some(0.6),
                    buried_area: Some(900.0),
                    ..BindingMetrics::default()
                },
            ),
            candidate(
                "no-area",
                BindingMetrics {
                    iptm: Some(0.9),
                    ..BindingMetrics::default()
                },
            ),
        ];
        let ranked = rank(
            records,
            &weights(&[
                (RankMetric::InterfaceConfidence, 1.0),
                (RankMetric::BuriedArea, 1.0),
            ]),
        );

        // "no-area": confidence rank 1 only; quality key 1.0.
        // "full": confidence rank 2, area rank 1; quality key 2.0.
        assert_eq!(ids(&ranked), vec!["no-area", "full"]);
        assert_eq!(ranked[0].quality_key, Some(1.0));
        assert_eq!(ranked[1].quality_key, Some(2.0));
    }

    #[test]
    fn metric_with_no_data_is_skipped_for_everyone() {
        let records = vec![
            candidate(
                "a",
                BindingMetrics {
                    iptm: Some(0.9),
                    ..BindingMetrics::default()
                },
            ),
            candidate(
                "b",
                BindingMetrics {
                    iptm: Some(0.8),
                    ..BindingMetrics::default()
                },
            ),
        ];
        let with_dead_metric = rank(
            records.clone(),
            &weights(&[
                (RankMetric::InterfaceConfidence, 1.0),
                (RankMetric::Humanness, 5.0),
            ]),
        );
        let without = rank(records, &weights(&[(RankMetric::InterfaceConfidence, 1.0)]));

        assert_eq!(ids(&with_dead_metric), ids(&without));
        assert_eq!(
            with_dead_metric[0].quality_key,
            without[0].quality_key
        );
    }

    #[test]
    fn scaling_a_metric_by_a_positive_constant_preserves_order() {
        let areas = [900.0, 750.0, 820.0, 610.0];
        let build = |scale: f64| -> Vec<CandidateRecord> {
            areas
                .iter()
                .enumerate()
                .map(|(i, area)| {
                    candidate(
                        &format!("c{}", i),
                        BindingMetrics {
                            iptm: Some(0.5 + i as f64 * 0.01),
                            buried_area: Some(area * scale),
                            ..BindingMetrics::default()
                        },
                    )
                })
                .collect()
        };
        let metric_weights = weights(&[
            (RankMetric::InterfaceConfidence, 2.0),
            (RankMetric::BuriedArea, 1.0),
        ]);

        let base = rank(build(1.0), &metric_weights);
        let scaled = rank(build(3.7), &metric_weights);

        assert_eq!(ids(&base), ids(&scaled));
        for (a, b) in base.iter().zip(&scaled) {
            assert_eq!(a.quality_key, b.quality_key);
        }
    }

    #[test]
    fn quality_ties_break_by_raw_interface_confidence() {
        // Both candidates have the same quality key on disjoint strengths.
        let records = vec![
            candidate(
                "lower-iptm",
                BindingMetrics {
                    iptm: Some(0.7),
                    buried_area: Some(900.0),
                    ..BindingMetrics::default()
                },
            ),
            candidate(
                "higher-iptm",
                BindingMetrics {
                    iptm: Some(0.9),
                    buried_area: Some(800.0),
                    ..BindingMetrics::default()
                },
            ),
        ];
        let ranked = rank(
            records,
            &weights(&[
                (RankMetric::InterfaceConfidence, 1.0),
                (RankMetric::BuriedArea, 1.0),
            ]),
        );
        // Quality keys tie at 2.0; the higher raw confidence wins.
        assert_eq!(ids(&ranked), vec!["higher-iptm", "lower-iptm"]);
    }

    #[test]
    fn candidates_with_no_tracked_metrics_sort_last_without_a_key() {
        let records = vec![
            candidate("bare", BindingMetrics::default()),
            candidate(
                "scored",
                BindingMetrics {
                    iptm: Some(0.4),
                    ..BindingMetrics::default()
                },
            ),
        ];
        let ranked = rank(records, &weights(&[(RankMetric::InterfaceConfidence, 1.0)]));
        assert_eq!(ids(&ranked), vec!["scored", "bare"]);
        assert_eq!(ranked[1].quality_key, None);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn ranking_twice_yields_identical_order() {
        let records: Vec<CandidateRecord> = (0..8)
            .map(|i| {
                candidate(
                    &format!("c{}", i),
                    BindingMetrics {
                        iptm: Some(0.5 + (i % 3) as f64 * 0.1),
                        buried_area: Some(700.0 + (i % 4) as f64 * 60.0),
                        ..BindingMetrics::default()
                    },
                )
            })
            .collect();
        let metric_weights = weights(&[
            (RankMetric::InterfaceConfidence, 3.0),
            (RankMetric::BuriedArea, 1.0),
        ]);

        let first = rank(records.clone(), &metric_weights);
        let second = rank(records, &metric_weights);
        assert_eq!(ids(&first), ids(&second));
    }
}
