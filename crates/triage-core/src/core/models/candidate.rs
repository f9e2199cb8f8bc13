use super::metrics::{
    BindingMetrics, DevelopabilityMetrics, EpitopeAnnotation, HumannessScores, LiabilityProfile,
};
use super::verdict::{GateVerdict, aggregate_verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format of a designed binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinderFormat {
    /// Single-domain binder (one chain, no light sequence).
    Vhh,
    /// Two-chain binder with a paired light sequence.
    Scfv,
}

impl BinderFormat {
    pub fn is_single_domain(&self) -> bool {
        matches!(self, BinderFormat::Vhh)
    }
}

/// Half-open span of a CDR over the primary sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdrSpan {
    /// CDR label, e.g. "CDR1".
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl CdrSpan {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One in-memory record per designed candidate.
///
/// Identity and metric groups are attached at ingestion through
/// [`super::builder::CandidateBuilder`]; the decision-state fields are written
/// by the filter cascade, the escalator, and the ranker, each into its own slot.
/// Records are never deleted, only partitioned into rejected and shortlist sets
/// at the output boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    // --- Identity ---
    pub id: String,
    pub sequence: String,
    /// Present exactly when `format` is a two-chain variant.
    pub light_sequence: Option<String>,
    pub format: BinderFormat,
    /// Which generation/optimization track produced this candidate.
    pub track: String,
    /// CDR spans over the primary sequence; empty means boundaries are unknown.
    #[serde(default)]
    pub cdr_spans: Vec<CdrSpan>,

    // --- Externally attached metric groups ---
    #[serde(default)]
    pub binding: BindingMetrics,
    #[serde(default)]
    pub epitope: Option<EpitopeAnnotation>,
    #[serde(default)]
    pub humanness: HumannessScores,
    #[serde(default)]
    pub liabilities: LiabilityProfile,
    #[serde(default)]
    pub developability: DevelopabilityMetrics,

    // --- Decision state ---
    #[serde(default)]
    pub gate_verdicts: BTreeMap<String, GateVerdict>,
    #[serde(default)]
    pub risk_flags: Vec<String>,
    #[serde(default)]
    pub composite_score: f64,
    /// Worst-metric quality key; lower is better. Written back by ranking.
    #[serde(default)]
    pub quality_key: Option<f64>,
    /// Final rank, 1 = best. Zero until ranking has run.
    #[serde(default)]
    pub rank: usize,
}

impl CandidateRecord {
    /// Aggregate verdict over all recorded gates.
    ///
    /// Meaningful only after the cascade has run; an empty verdict map
    /// aggregates to `Pass`.
    pub fn verdict(&self) -> GateVerdict {
        aggregate_verdict(&self.gate_verdicts)
    }

    pub fn is_rejected(&self) -> bool {
        self.verdict().is_hard_fail()
    }

    /// True when every failing gate is a soft failure.
    pub fn has_only_soft_fails(&self) -> bool {
        !self.gate_verdicts.is_empty()
            && self.gate_verdicts.values().all(|v| !v.is_hard_fail())
            && self.gate_verdicts.values().any(GateVerdict::is_soft_fail)
    }

    pub fn soft_fail_count(&self) -> usize {
        self.gate_verdicts
            .values()
            .filter(|v| v.is_soft_fail())
            .count()
    }

    /// The sequence used for pairwise-identity comparison: primary chain,
    /// with the light chain concatenated when present.
    pub fn comparison_sequence(&self) -> String {
        match &self.light_sequence {
            Some(light) => format!("{}{}", self.sequence, light),
            None => self.sequence.clone(),
        }
    }

    pub fn push_risk_flag(&mut self, flag: impl Into<String>) {
        self.risk_flags.push(flag.into());
    }
}
