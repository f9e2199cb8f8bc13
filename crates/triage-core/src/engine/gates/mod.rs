//! The five independent quality gates of the filter cascade.
//!
//! Each gate is a pure function of one candidate record (plus read-only
//! configuration) to a three-valued verdict with optional human-readable notes.
//! Gates never look at other candidates and never mutate the record; the
//! cascade owns writing verdicts and risk flags back.

pub mod aggregation;
pub mod binding;
pub mod developability;
pub mod humanness;
pub mod liabilities;

use crate::core::models::verdict::GateVerdict;

pub const BINDING: &str = "binding";
pub const HUMANNESS: &str = "humanness";
pub const LIABILITIES: &str = "liabilities";
pub const DEVELOPABILITY: &str = "developability";
pub const AGGREGATION: &str = "aggregation";

/// Verdict of a single gate plus the notes that become risk flags on soft
/// failure.
#[derive(Debug, Clone, PartialEq)]
pub struct GateResult {
    pub verdict: GateVerdict,
    pub notes: Vec<String>,
}

impl GateResult {
    pub fn pass() -> Self {
        Self {
            verdict: GateVerdict::Pass,
            notes: Vec::new(),
        }
    }

    pub fn fail(note: impl Into<String>) -> Self {
        Self {
            verdict: GateVerdict::Fail,
            notes: vec![note.into()],
        }
    }

    pub fn soft_fail(notes: Vec<String>) -> Self {
        Self {
            verdict: GateVerdict::SoftFail,
            notes,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_screening_config() -> crate::engine::config::ScreeningConfig {
    use crate::engine::config::{
        BindingThresholds, DevelopabilityRanges, LiabilityPolicy, ScreeningConfigBuilder,
    };

    ScreeningConfigBuilder::new()
        .binding(BindingThresholds {
            min_ptm: 0.5,
            min_buried_area: 800.0,
            min_contacts: 10,
        })
        .min_humanness(50.0)
        .liabilities(LiabilityPolicy {
            allow_cdr_deamidation: false,
            allow_cdr_isomerization: false,
            allow_cdr_glycosylation: false,
            max_oxidation_sites: 2,
        })
        .developability(DevelopabilityRanges {
            min_cdr3_length: 6,
            max_cdr3_length: 22,
            min_net_charge: -2.0,
            max_net_charge: 4.0,
            min_isoelectric_point: 6.0,
            max_isoelectric_point: 9.5,
            max_hydrophobic_patches: 3,
        })
        .min_candidates(5)
        .max_relaxation(0.1)
        .build()
        .unwrap()
}
