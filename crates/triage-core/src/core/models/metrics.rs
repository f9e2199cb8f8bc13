use serde::{Deserialize, Serialize};

/// Structure-derived binding metrics for a candidate.
///
/// Every field is optional: absence means the upstream predictor did not produce
/// the value, which is a valid state and distinct from an explicit `0.0`. In
/// particular `ptm` is populated-but-always-zero by one upstream predictor, and
/// the binding gate guards against conflating the two.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingMetrics {
    /// Interface confidence (ipTM-style), higher is better.
    pub iptm: Option<f64>,
    /// Structural confidence (pTM-style), higher is better.
    pub ptm: Option<f64>,
    /// Buried interface area in square angstroms.
    pub buried_area: Option<f64>,
    /// Number of inter-chain contacts at the interface.
    pub interface_contacts: Option<u32>,
    /// Predicted binding energy in kcal/mol; lower is better.
    pub delta_g: Option<f64>,
}

/// Categorical epitope class relative to the reference epitope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpitopeClass {
    Target,
    Adjacent,
    OffTarget,
    Unclassified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpitopeAnnotation {
    pub class: EpitopeClass,
    /// Fraction of the reference epitope covered by this candidate's footprint.
    pub overlap: f64,
}

/// Per-chain and mean humanness scores (OASis-style percentiles).
///
/// A present `0.0` is a real failing score; only `None` means "cannot assess".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumannessScores {
    pub heavy: Option<f64>,
    pub light: Option<f64>,
    pub mean: Option<f64>,
}

/// Sequence-liability category reported by the upstream motif scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityClass {
    Deamidation,
    Isomerization,
    Glycosylation,
    Oxidation,
}

/// Location of a liability site relative to the CDR annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceRegion {
    Cdr,
    Framework,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilitySite {
    pub class: LiabilityClass,
    /// Zero-based position of the motif start in the primary sequence.
    pub position: usize,
    /// The matched motif text, e.g. "NG".
    pub motif: String,
    pub region: SequenceRegion,
}

/// All liability sites found in a candidate, plus the unpaired-cysteine count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiabilityProfile {
    pub sites: Vec<LiabilitySite>,
    pub unpaired_cysteines: u32,
}

impl LiabilityProfile {
    /// Number of sites of `class` located inside a CDR.
    pub fn cdr_count(&self, class: LiabilityClass) -> usize {
        self.sites
            .iter()
            .filter(|s| s.class == class && s.region == SequenceRegion::Cdr)
            .count()
    }

    /// Number of sites of `class` anywhere in the sequence.
    pub fn count(&self, class: LiabilityClass) -> usize {
        self.sites.iter().filter(|s| s.class == class).count()
    }

    /// Total liability burden: all sites plus unpaired cysteines.
    pub fn total(&self) -> usize {
        self.sites.len() + self.unpaired_cysteines as usize
    }
}

/// Developability metrics computed by an external property calculator.
///
/// Missing values are treated as passing by the developability gate: no
/// evidence, no penalty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevelopabilityMetrics {
    pub cdr3_length: Option<usize>,
    pub net_charge: Option<f64>,
    pub isoelectric_point: Option<f64>,
    pub hydrophobic_patches: Option<u32>,
}
