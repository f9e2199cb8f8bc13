use crate::core::models::candidate::CandidateRecord;
use crate::engine::cascade;
use crate::engine::config::ScreeningConfig;
use crate::engine::error::EngineError;
use crate::engine::escalation::{self, ScreeningOutcome};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// Runs the filter cascade and, when the strict yield is below the configured
/// minimum, the fallback escalator.
///
/// Returns the survivor and rejected partitions together with screening
/// statistics; a below-minimum final count is reported in the statistics, not
/// raised (unless the configuration says otherwise).
#[instrument(skip_all, name = "screening_workflow")]
pub fn run(
    candidates: Vec<CandidateRecord>,
    config: &ScreeningConfig,
    reporter: &ProgressReporter,
) -> Result<ScreeningOutcome, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Filter Cascade",
    });
    info!(candidates = candidates.len(), "Running filter cascade.");
    let mut records = candidates;
    cascade::run(&mut records, config);
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Fallback Escalation",
    });
    let outcome = escalation::escalate(records, config)?;
    reporter.report(Progress::StatusUpdate {
        text: format!(
            "{} of {} candidates survived ({} strict, {} via fallback)",
            outcome.stats.final_count,
            outcome.stats.total_input,
            outcome.stats.strict_pass,
            outcome.stats.audit_trail.len()
        ),
    });
    reporter.report(Progress::PhaseFinish);

    info!(
        strict_pass = outcome.stats.strict_pass,
        final_count = outcome.stats.final_count,
        fallback_admissions = outcome.stats.audit_trail.len(),
        "Screening complete."
    );
    Ok(outcome)
}
