use crate::core::models::candidate::CandidateRecord;
use crate::core::sequence::pairwise_identity;
use tracing::{debug, instrument};

/// Greedy maximin diversity selection over a ranked, best-first candidate pool.
///
/// Rank quality is normalized to [0, 1] (best candidate 1.0, worst 0.0;
/// single-candidate pools get 1.0). Selection is seeded with the best-quality
/// candidate; each following pick maximizes
/// `(1 - alpha) * quality + alpha * (1 - max_identity_to_selected)` until
/// `target_count` are chosen or the pool is exhausted. With a small alpha,
/// quality dominates and diversity only breaks near-ties or prunes clusters of
/// near-duplicates.
///
/// Returns indices into `records` in selection order.
#[instrument(skip_all, fields(pool = records.len(), target = target_count))]
pub fn select(records: &[CandidateRecord], target_count: usize, alpha: f64) -> Vec<usize> {
    if records.is_empty() || target_count == 0 {
        return Vec::new();
    }

    let n = records.len();
    let quality: Vec<f64> = (0..n)
        .map(|position| {
            if n == 1 {
                1.0
            } else {
                (n - 1 - position) as f64 / (n - 1) as f64
            }
        })
        .collect();
    let sequences: Vec<String> = records.iter().map(|r| r.comparison_sequence()).collect();

    let mut selected = vec![0usize];
    let mut remaining: Vec<usize> = (1..n).collect();

    while selected.len() < target_count && !remaining.is_empty() {
        let mut best_position = 0;
        let mut best_score = f64::NEG_INFINITY;

        for (position, &index) in remaining.iter().enumerate() {
            let max_identity = selected
                .iter()
                .map(|&s| pairwise_identity(&sequences[index], &sequences[s]))
                .fold(0.0_f64, f64::max);
            let score = (1.0 - alpha) * quality[index] + alpha * (1.0 - max_identity);
            if score > best_score {
                best_score = score;
                best_position = position;
            }
        }

        let index = remaining.remove(best_position);
        debug!(candidate = %records[index].id, score = best_score, "Selected.");
        selected.push(index);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::CandidateBuilder;
    use crate::engine::config::DEFAULT_DIVERSITY_ALPHA;

    fn pool(sequences: &[&str]) -> Vec<CandidateRecord> {
        sequences
            .iter()
            .enumerate()
            .map(|(i, seq)| {
                let mut record = CandidateBuilder::new(format!("c{}", i), *seq).build().unwrap();
                record.rank = i + 1;
                record
            })
            .collect()
    }

    fn max_pairwise_identity(records: &[CandidateRecord], indices: &[usize]) -> f64 {
        use itertools::Itertools;
        indices
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| {
                pairwise_identity(
                    &records[a].comparison_sequence(),
                    &records[b].comparison_sequence(),
                )
            })
            .fold(0.0_f64, f64::max)
    }

    #[test]
    fn empty_pool_or_zero_target_selects_nothing() {
        assert!(select(&[], 3, 0.5).is_empty());
        let records = pool(&["EVQL"]);
        assert!(select(&records, 0, 0.5).is_empty());
    }

    #[test]
    fn seeds_with_the_best_quality_candidate() {
        let records = pool(&["EVQLAAAA", "DIQMBBBB", "QVQLCCCC"]);
        let selected = select(&records, 2, DEFAULT_DIVERSITY_ALPHA);
        assert_eq!(selected[0], 0);
    }

    #[test]
    fn exhausts_the_pool_when_target_exceeds_it() {
        let records = pool(&["EVQLAAAA", "DIQMBBBB", "QVQLCCCC"]);
        let selected = select(&records, 10, DEFAULT_DIVERSITY_ALPHA);
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn small_alpha_keeps_quality_order() {
        let records = pool(&["EVQLAAAA", "EVQLAAAB", "DIQMBBBB", "QVQLCCCC"]);
        let selected = select(&records, 3, DEFAULT_DIVERSITY_ALPHA);
        assert_eq!(selected, vec![0, 1, 2]);
    }

    #[test]
    fn larger_alpha_prunes_a_near_duplicate_of_the_seed() {
        // Index 1 is a near-copy of the seed; with diversity weighted up, the
        // distinct lower-quality candidates win the remaining slots.
        let records = pool(&[
            "EVQLVESGGGLVQAGG",
            "EVQLVESGGGLVQAGA",
            "DIQMTQSPSSLSASVG",
            "QSVLTQPPSVSGAPGQ",
        ]);
        let selected = select(&records, 3, 0.7);
        assert_eq!(selected[0], 0);
        assert!(!selected.contains(&1), "near-duplicate was not pruned");
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn output_is_never_more_clustered_than_naive_top_k() {
        let records = pool(&[
            "EVQLVESGGGLVQAGG",
            "EVQLVESGGGLVQAGA",
            "EVQLVESGGGLVQAGT",
            "DIQMTQSPSSLSASVG",
            "QSVLTQPPSVSGAPGQ",
        ]);
        let k = 3;
        for alpha in [0.0, DEFAULT_DIVERSITY_ALPHA, 0.3, 0.9] {
            let selected = select(&records, k, alpha);
            let top_k: Vec<usize> = (0..k).collect();
            assert!(
                max_pairwise_identity(&records, &selected)
                    <= max_pairwise_identity(&records, &top_k) + 1e-12,
                "alpha {} clustered the output more than naive top-{}",
                alpha,
                k
            );
        }
    }

    #[test]
    fn two_chain_candidates_compare_on_the_concatenated_sequence() {
        use crate::core::models::candidate::BinderFormat;

        let mut heavy_only = CandidateBuilder::new("a", "EVQLVESG").build().unwrap();
        heavy_only.rank = 1;
        let mut paired = CandidateBuilder::new("b", "EVQLVESG")
            .format(BinderFormat::Scfv)
            .light_sequence("DIQMTQSP")
            .build()
            .unwrap();
        paired.rank = 2;

        // Same heavy chain, but the paired candidate's comparison sequence is
        // twice as long, halving the identity.
        let records = vec![heavy_only, paired];
        let identity = pairwise_identity(
            &records[0].comparison_sequence(),
            &records[1].comparison_sequence(),
        );
        assert!((identity - 0.5).abs() < 1e-12);

        let selected = select(&records, 2, 0.5);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn selection_is_deterministic() {
        let records = pool(&[
            "EVQLVESGGGLVQAGG",
            "EVQLVESGGGLVQAGA",
            "DIQMTQSPSSLSASVG",
            "QSVLTQPPSVSGAPGQ",
            "QVQLQESGPGLVKPSE",
        ]);
        let first = select(&records, 3, 0.25);
        let second = select(&records, 3, 0.25);
        assert_eq!(first, second);
    }
}
