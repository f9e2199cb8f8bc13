use crate::cli::ScreenArgs;
use crate::error::{CliError, Result};
use bindertriage::engine::config::{
    BindingThresholds, DevelopabilityRanges, LiabilityPolicy, MetricWeight, ScreeningConfig,
    ScreeningConfigBuilder, SelectionConfig, SelectionConfigBuilder,
};
use bindertriage::engine::ranking::RankMetric;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// On-disk configuration. Every key is optional; omitted keys fall back to the
/// defaults below, and `screen` command-line flags override the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub screening: ScreeningSection,
    pub selection: SelectionSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScreeningSection {
    pub min_ptm: f64,
    pub min_buried_area: f64,
    pub min_contacts: u32,
    pub min_humanness: f64,
    pub allow_cdr_deamidation: bool,
    pub allow_cdr_isomerization: bool,
    pub allow_cdr_glycosylation: bool,
    pub max_oxidation_sites: u32,
    pub min_cdr3_length: usize,
    pub max_cdr3_length: usize,
    pub min_net_charge: f64,
    pub max_net_charge: f64,
    pub min_isoelectric_point: f64,
    pub max_isoelectric_point: f64,
    pub max_hydrophobic_patches: u32,
    pub min_candidates: usize,
    pub max_relaxation: f64,
    pub fail_on_shortfall: bool,
}

impl Default for ScreeningSection {
    fn default() -> Self {
        Self {
            min_ptm: 0.5,
            min_buried_area: 800.0,
            min_contacts: 10,
            min_humanness: 50.0,
            allow_cdr_deamidation: false,
            allow_cdr_isomerization: false,
            allow_cdr_glycosylation: false,
            max_oxidation_sites: 2,
            min_cdr3_length: 6,
            max_cdr3_length: 22,
            min_net_charge: -2.0,
            max_net_charge: 4.0,
            min_isoelectric_point: 6.0,
            max_isoelectric_point: 9.5,
            max_hydrophobic_patches: 3,
            min_candidates: 10,
            max_relaxation: 0.1,
            fail_on_shortfall: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionSection {
    /// Ordered metric weights; the order is the tie-breaking priority.
    pub weights: Vec<WeightEntry>,
    pub target_count: usize,
    pub diversity_alpha: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightEntry {
    pub metric: RankMetric,
    pub weight: f64,
}

impl Default for SelectionSection {
    fn default() -> Self {
        let weights = [
            (RankMetric::InterfaceConfidence, 3.0),
            (RankMetric::BindingEnergy, 2.0),
            (RankMetric::Humanness, 2.0),
            (RankMetric::BuriedArea, 1.0),
            (RankMetric::Contacts, 1.0),
            (RankMetric::EpitopeOverlap, 1.0),
        ]
        .into_iter()
        .map(|(metric, weight)| WeightEntry { metric, weight })
        .collect();

        Self {
            weights,
            target_count: 10,
            diversity_alpha: 0.001,
        }
    }
}

pub fn load(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: anyhow::Error::new(e),
    })?;
    debug!("Loaded configuration from '{}'.", path.display());
    Ok(config)
}

/// Merges the file configuration with command-line overrides and validates the
/// result through the core builders.
pub fn build_configs(
    file: FileConfig,
    args: &ScreenArgs,
) -> Result<(ScreeningConfig, SelectionConfig)> {
    let screening_section = file.screening;
    let selection_section = file.selection;

    let screening = ScreeningConfigBuilder::new()
        .binding(BindingThresholds {
            min_ptm: screening_section.min_ptm,
            min_buried_area: screening_section.min_buried_area,
            min_contacts: screening_section.min_contacts,
        })
        .min_humanness(screening_section.min_humanness)
        .liabilities(LiabilityPolicy {
            allow_cdr_deamidation: screening_section.allow_cdr_deamidation,
            allow_cdr_isomerization: screening_section.allow_cdr_isomerization,
            allow_cdr_glycosylation: screening_section.allow_cdr_glycosylation,
            max_oxidation_sites: screening_section.max_oxidation_sites,
        })
        .developability(DevelopabilityRanges {
            min_cdr3_length: screening_section.min_cdr3_length,
            max_cdr3_length: screening_section.max_cdr3_length,
            min_net_charge: screening_section.min_net_charge,
            max_net_charge: screening_section.max_net_charge,
            min_isoelectric_point: screening_section.min_isoelectric_point,
            max_isoelectric_point: screening_section.max_isoelectric_point,
            max_hydrophobic_patches: screening_section.max_hydrophobic_patches,
        })
        .min_candidates(
            args.min_candidates
                .unwrap_or(screening_section.min_candidates),
        )
        .max_relaxation(
            args.max_relaxation
                .unwrap_or(screening_section.max_relaxation),
        )
        .fail_on_shortfall(args.fail_on_shortfall || screening_section.fail_on_shortfall)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let weights: Vec<MetricWeight> = selection_section
        .weights
        .into_iter()
        .map(|entry| MetricWeight {
            metric: entry.metric,
            weight: entry.weight,
        })
        .collect();
    let selection = SelectionConfigBuilder::new()
        .weights(weights)
        .target_count(args.target_count.unwrap_or(selection_section.target_count))
        .diversity_alpha(
            args.diversity_alpha
                .unwrap_or(selection_section.diversity_alpha),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok((screening, selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn screen_args(extra: &[&str]) -> ScreenArgs {
        let mut argv = vec![
            "triage",
            "screen",
            "--input",
            "in.json",
            "--output",
            "out.json",
        ];
        argv.extend_from_slice(extra);
        match crate::cli::Cli::parse_from(argv).command {
            crate::cli::Commands::Screen(args) => args,
        }
    }

    #[test]
    fn empty_file_yields_full_defaults() {
        let file: FileConfig = toml::from_str("").unwrap();
        let (screening, selection) = build_configs(file, &screen_args(&[])).unwrap();

        assert_eq!(screening.binding.min_buried_area, 800.0);
        assert_eq!(screening.min_candidates, 10);
        assert!(!screening.fail_on_shortfall);
        assert_eq!(selection.target_count, 10);
        assert_eq!(selection.weights.len(), 6);
        assert_eq!(selection.weights[0].metric, RankMetric::InterfaceConfidence);
    }

    #[test]
    fn file_values_override_defaults() {
        let toml_text = r#"
            [screening]
            min_buried_area = 650.0
            min_candidates = 4

            [selection]
            target_count = 3
            diversity_alpha = 0.05

            [[selection.weights]]
            metric = "humanness"
            weight = 5.0
        "#;
        let file: FileConfig = toml::from_str(toml_text).unwrap();
        let (screening, selection) = build_configs(file, &screen_args(&[])).unwrap();

        assert_eq!(screening.binding.min_buried_area, 650.0);
        assert_eq!(screening.min_candidates, 4);
        assert_eq!(selection.target_count, 3);
        assert_eq!(selection.diversity_alpha, 0.05);
        assert_eq!(selection.weights.len(), 1);
        assert_eq!(selection.weights[0].metric, RankMetric::Humanness);
    }

    #[test]
    fn cli_flags_override_the_file() {
        let toml_text = r#"
            [screening]
            min_candidates = 4

            [selection]
            target_count = 3
        "#;
        let file: FileConfig = toml::from_str(toml_text).unwrap();
        let args = screen_args(&[
            "--min-candidates",
            "7",
            "--target-count",
            "2",
            "--fail-on-shortfall",
        ]);
        let (screening, selection) = build_configs(file, &args).unwrap();

        assert_eq!(screening.min_candidates, 7);
        assert_eq!(selection.target_count, 2);
        assert!(screening.fail_on_shortfall);
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let file: FileConfig = toml::from_str("").unwrap();
        let args = screen_args(&["--max-relaxation", "1.5"]);
        let result = build_configs(file, &args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_metric_name_fails_to_parse() {
        let toml_text = r#"
            [[selection.weights]]
            metric = "coolness"
            weight = 1.0
        "#;
        let result: std::result::Result<FileConfig, _> = toml::from_str(toml_text);
        assert!(result.is_err());
    }
}
