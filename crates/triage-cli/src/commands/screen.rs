use crate::cli::ScreenArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use bindertriage::core::models::candidate::CandidateRecord;
use bindertriage::engine::escalation::ScreeningStats;
use bindertriage::engine::progress::ProgressReporter;
use bindertriage::workflows::triage;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: ScreenArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => config::load(path)?,
        None => config::FileConfig::default(),
    };
    let (screening, selection) = config::build_configs(file_config, &args)?;

    let candidates = read_candidates(&args.input)?;
    info!(
        "Loaded {} candidate(s) from '{}'.",
        candidates.len(),
        args.input.display()
    );
    if candidates.is_empty() {
        warn!("Input file contains no candidates; the shortlist will be empty.");
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let result = triage::run(candidates, &screening, &selection, &reporter)?;
    drop(reporter);

    write_shortlist(&args.output, &result.shortlist)?;
    if let Some(path) = &args.stats {
        write_stats(path, &result.stats)?;
    }
    if let Some(path) = &args.report {
        write_report(path, &result.shortlist)?;
    }

    if result.stats.final_count < screening.min_candidates {
        println!(
            "⚠ Only {} of the requested {} candidates survived escalation.",
            result.stats.final_count, screening.min_candidates
        );
    }
    println!(
        "Shortlisted {} of {} candidates ({} rejected, {} fallback admission(s)). Output: {}",
        result.shortlist.len(),
        result.stats.total_input,
        result.rejected.len(),
        result.stats.audit_trail.len(),
        args.output.display()
    );
    Ok(())
}

fn read_candidates(path: &Path) -> Result<Vec<CandidateRecord>> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: anyhow::Error::new(e),
    })
}

fn write_shortlist(path: &Path, shortlist: &[CandidateRecord]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), shortlist)
        .map_err(|e| CliError::Other(anyhow::Error::new(e)))?;
    info!("Wrote shortlist to '{}'.", path.display());
    Ok(())
}

fn write_stats(path: &Path, stats: &ScreeningStats) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), stats)
        .map_err(|e| CliError::Other(anyhow::Error::new(e)))?;
    info!("Wrote screening statistics to '{}'.", path.display());
    Ok(())
}

fn write_report(path: &Path, shortlist: &[CandidateRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| CliError::Other(e.into()))?;
    writer
        .write_record([
            "rank",
            "id",
            "format",
            "track",
            "quality_key",
            "composite_score",
            "iptm",
            "ptm",
            "buried_area",
            "interface_contacts",
            "delta_g",
            "humanness_mean",
            "risk_flags",
        ])
        .map_err(|e| CliError::Other(e.into()))?;

    let optional = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    for record in shortlist {
        writer
            .write_record([
                record.rank.to_string(),
                record.id.clone(),
                format!("{:?}", record.format).to_lowercase(),
                record.track.clone(),
                optional(record.quality_key),
                record.composite_score.to_string(),
                optional(record.binding.iptm),
                optional(record.binding.ptm),
                optional(record.binding.buried_area),
                record
                    .binding
                    .interface_contacts
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
                optional(record.binding.delta_g),
                optional(record.humanness.mean),
                record.risk_flags.join("; "),
            ])
            .map_err(|e| CliError::Other(e.into()))?;
    }
    writer.flush()?;
    info!("Wrote CSV report to '{}'.", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use bindertriage::core::models::builder::CandidateBuilder;
    use bindertriage::core::models::metrics::{BindingMetrics, HumannessScores};
    use clap::Parser;
    use std::path::PathBuf;

    fn screen_args(input: &Path, output: &Path, extra: &[&str]) -> ScreenArgs {
        let input = input.to_string_lossy().into_owned();
        let output = output.to_string_lossy().into_owned();
        let mut argv = vec![
            "triage",
            "screen",
            "--input",
            input.as_str(),
            "--output",
            output.as_str(),
        ];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Screen(args) => args,
        }
    }

    fn sample_candidates() -> Vec<CandidateRecord> {
        (0..4)
            .map(|i| {
                CandidateBuilder::new(format!("d-{:03}", i), "EVQLVESGGGLVQAGGSLRLSCAAS")
                    .track("denovo")
                    .binding(BindingMetrics {
                        iptm: Some(0.95 - i as f64 * 0.1),
                        ptm: Some(0.7),
                        buried_area: Some(900.0),
                        interface_contacts: Some(14),
                        delta_g: Some(-8.0),
                    })
                    .humanness(HumannessScores {
                        heavy: Some(70.0),
                        light: None,
                        mean: Some(70.0),
                    })
                    .build()
                    .unwrap()
            })
            .collect()
    }

    fn write_input(dir: &Path) -> PathBuf {
        let path = dir.join("candidates.json");
        let file = File::create(&path).unwrap();
        serde_json::to_writer(file, &sample_candidates()).unwrap();
        path
    }

    #[test]
    fn screen_command_writes_shortlist_stats_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("shortlist.json");
        let stats = dir.path().join("stats.json");
        let report = dir.path().join("report.csv");

        let args = screen_args(
            &input,
            &output,
            &[
                "--stats",
                stats.to_str().unwrap(),
                "--report",
                report.to_str().unwrap(),
                "--min-candidates",
                "2",
                "--target-count",
                "3",
            ],
        );
        run(args).unwrap();

        let shortlist: Vec<CandidateRecord> =
            serde_json::from_reader(File::open(&output).unwrap()).unwrap();
        assert_eq!(shortlist.len(), 3);
        assert_eq!(shortlist[0].rank, 1);
        assert_eq!(shortlist[0].id, "d-000");

        let stats: ScreeningStats =
            serde_json::from_reader(File::open(&stats).unwrap()).unwrap();
        assert_eq!(stats.total_input, 4);
        assert_eq!(stats.final_count, 4);

        let report_text = std::fs::read_to_string(&report).unwrap();
        assert!(report_text.starts_with("rank,id,"));
        assert!(report_text.contains("d-000"));
    }

    #[test]
    fn missing_input_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = screen_args(
            &dir.path().join("absent.json"),
            &dir.path().join("out.json"),
            &[],
        );
        assert!(matches!(run(args), Err(CliError::Io(_))));
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        std::fs::write(&input, "{ not json ]").unwrap();

        let args = screen_args(&input, &dir.path().join("out.json"), &[]);
        assert!(matches!(run(args), Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn shortfall_flag_turns_a_thin_pool_into_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let args = screen_args(
            &input,
            &dir.path().join("out.json"),
            &["--min-candidates", "50", "--fail-on-shortfall"],
        );
        let result = run(args);
        assert!(matches!(result, Err(CliError::Core(_))));
    }
}
