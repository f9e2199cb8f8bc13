use super::ranking::RankMetric;
use thiserror::Error;

/// Default diversity/quality trade-off: quality dominates, diversity only
/// breaks near-ties or prunes clusters of near-duplicates.
pub const DEFAULT_DIVERSITY_ALPHA: f64 = 0.001;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for {parameter}: {message}")]
    InvalidValue {
        parameter: &'static str,
        message: String,
    },
}

/// Hard thresholds applied by the binding-quality gate.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingThresholds {
    /// Structural-confidence minimum. Applied only when both this threshold and
    /// the candidate's value are strictly positive; one upstream predictor
    /// always emits zero for this metric.
    pub min_ptm: f64,
    /// Minimum buried interface area in square angstroms.
    pub min_buried_area: f64,
    /// Minimum number of interface contacts.
    pub min_contacts: u32,
}

/// Per-class allow flags for the liability gate.
#[derive(Debug, Clone, PartialEq)]
pub struct LiabilityPolicy {
    pub allow_cdr_deamidation: bool,
    pub allow_cdr_isomerization: bool,
    pub allow_cdr_glycosylation: bool,
    /// Oxidation sites tolerated before the (soft-only) oxidation filter flags.
    pub max_oxidation_sites: u32,
}

/// Acceptable ranges for the (soft-only) developability gate.
#[derive(Debug, Clone, PartialEq)]
pub struct DevelopabilityRanges {
    pub min_cdr3_length: usize,
    pub max_cdr3_length: usize,
    pub min_net_charge: f64,
    pub max_net_charge: f64,
    pub min_isoelectric_point: f64,
    pub max_isoelectric_point: f64,
    pub max_hydrophobic_patches: u32,
}

/// Full configuration of the filter cascade and its fallback escalator.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningConfig {
    pub binding: BindingThresholds,
    /// Minimum mean humanness score; a present `0.0` below this is a real failure.
    pub min_humanness: f64,
    pub liabilities: LiabilityPolicy,
    pub developability: DevelopabilityRanges,
    /// Minimum yield the escalator tries to guarantee.
    pub min_candidates: usize,
    /// Bounded multiplicative relaxation fraction for phase-3 escalation,
    /// in `[0, 1)`. `0.1` lowers the relaxed thresholds by up to 10%.
    pub max_relaxation: f64,
    /// Promote a post-escalation shortfall to a hard error instead of
    /// surfacing it in statistics only.
    pub fail_on_shortfall: bool,
}

#[derive(Default)]
pub struct ScreeningConfigBuilder {
    binding: Option<BindingThresholds>,
    min_humanness: Option<f64>,
    liabilities: Option<LiabilityPolicy>,
    developability: Option<DevelopabilityRanges>,
    min_candidates: Option<usize>,
    max_relaxation: Option<f64>,
    fail_on_shortfall: bool,
}

impl ScreeningConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(mut self, thresholds: BindingThresholds) -> Self {
        self.binding = Some(thresholds);
        self
    }
    pub fn min_humanness(mut self, minimum: f64) -> Self {
        self.min_humanness = Some(minimum);
        self
    }
    pub fn liabilities(mut self, policy: LiabilityPolicy) -> Self {
        self.liabilities = Some(policy);
        self
    }
    pub fn developability(mut self, ranges: DevelopabilityRanges) -> Self {
        self.developability = Some(ranges);
        self
    }
    pub fn min_candidates(mut self, count: usize) -> Self {
        self.min_candidates = Some(count);
        self
    }
    pub fn max_relaxation(mut self, fraction: f64) -> Self {
        self.max_relaxation = Some(fraction);
        self
    }
    pub fn fail_on_shortfall(mut self, fail: bool) -> Self {
        self.fail_on_shortfall = fail;
        self
    }

    pub fn build(self) -> Result<ScreeningConfig, ConfigError> {
        let max_relaxation = self
            .max_relaxation
            .ok_or(ConfigError::MissingParameter("max_relaxation"))?;
        if !(0.0..1.0).contains(&max_relaxation) {
            return Err(ConfigError::InvalidValue {
                parameter: "max_relaxation",
                message: format!("{} is not in [0, 1)", max_relaxation),
            });
        }

        Ok(ScreeningConfig {
            binding: self
                .binding
                .ok_or(ConfigError::MissingParameter("binding"))?,
            min_humanness: self
                .min_humanness
                .ok_or(ConfigError::MissingParameter("min_humanness"))?,
            liabilities: self
                .liabilities
                .ok_or(ConfigError::MissingParameter("liabilities"))?,
            developability: self
                .developability
                .ok_or(ConfigError::MissingParameter("developability"))?,
            min_candidates: self
                .min_candidates
                .ok_or(ConfigError::MissingParameter("min_candidates"))?,
            max_relaxation,
            fail_on_shortfall: self.fail_on_shortfall,
        })
    }
}

/// Importance weight for one ranked metric. The order of weights in
/// [`SelectionConfig::weights`] is the priority order used when iterating
/// metrics, which keeps runs deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricWeight {
    pub metric: RankMetric,
    pub weight: f64,
}

/// Configuration of worst-metric ranking and diversity selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    pub weights: Vec<MetricWeight>,
    /// Size of the final shortlist.
    pub target_count: usize,
    /// Diversity trade-off in `[0, 1]`; see [`DEFAULT_DIVERSITY_ALPHA`].
    pub diversity_alpha: f64,
}

#[derive(Default)]
pub struct SelectionConfigBuilder {
    weights: Vec<MetricWeight>,
    target_count: Option<usize>,
    diversity_alpha: Option<f64>,
}

impl SelectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weight(mut self, metric: RankMetric, weight: f64) -> Self {
        self.weights.push(MetricWeight { metric, weight });
        self
    }
    pub fn weights(mut self, weights: Vec<MetricWeight>) -> Self {
        self.weights = weights;
        self
    }
    pub fn target_count(mut self, count: usize) -> Self {
        self.target_count = Some(count);
        self
    }
    pub fn diversity_alpha(mut self, alpha: f64) -> Self {
        self.diversity_alpha = Some(alpha);
        self
    }

    pub fn build(self) -> Result<SelectionConfig, ConfigError> {
        if self.weights.is_empty() {
            return Err(ConfigError::MissingParameter("weights"));
        }
        for entry in &self.weights {
            if entry.weight <= 0.0 || !entry.weight.is_finite() {
                return Err(ConfigError::InvalidValue {
                    parameter: "weights",
                    message: format!(
                        "weight for {} must be finite and positive, got {}",
                        entry.metric.label(),
                        entry.weight
                    ),
                });
            }
        }

        let diversity_alpha = self.diversity_alpha.unwrap_or(DEFAULT_DIVERSITY_ALPHA);
        if !(0.0..=1.0).contains(&diversity_alpha) {
            return Err(ConfigError::InvalidValue {
                parameter: "diversity_alpha",
                message: format!("{} is not in [0, 1]", diversity_alpha),
            });
        }

        Ok(SelectionConfig {
            weights: self.weights,
            target_count: self
                .target_count
                .ok_or(ConfigError::MissingParameter("target_count"))?,
            diversity_alpha,
        })
    }
}
