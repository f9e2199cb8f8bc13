//! Pure sequence utilities: aromatic-content analysis for the aggregation gate
//! and the cheap positional identity metric used by diversity selection.

use phf::{Set, phf_set};

/// Aromatic residues considered by the aggregation-propensity gate.
static AROMATIC_RESIDUES: Set<char> = phf_set! {'F', 'W', 'Y'};

pub fn is_aromatic(residue: char) -> bool {
    AROMATIC_RESIDUES.contains(&residue.to_ascii_uppercase())
}

/// Fraction of aromatic residues in `window`. Empty input yields 0.0.
pub fn aromatic_fraction(window: &str) -> f64 {
    let total = window.chars().count();
    if total == 0 {
        return 0.0;
    }
    let aromatic = window.chars().filter(|&c| is_aromatic(c)).count();
    aromatic as f64 / total as f64
}

/// Length of the longest run of consecutive aromatic residues in `window`.
pub fn max_aromatic_run(window: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in window.chars() {
        if is_aromatic(c) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Pairwise sequence identity between two candidates.
///
/// Intentionally a cheap positional metric, not an alignment: position-wise
/// matches over the overlapping prefix, divided by the longer sequence's
/// length. Two empty sequences are considered identical.
pub fn pairwise_identity(a: &str, b: &str) -> f64 {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 1.0;
    }
    let matches = a
        .chars()
        .zip(b.chars())
        .filter(|(x, y)| x == y)
        .count();
    matches as f64 / longer as f64
}
