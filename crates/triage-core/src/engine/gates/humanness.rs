use super::GateResult;
use crate::core::models::candidate::CandidateRecord;
use crate::engine::config::ScreeningConfig;

/// Humanness gate.
///
/// A present score of exactly zero is a real failing score, not "unavailable";
/// only a fully absent value means the candidate cannot be assessed.
pub fn evaluate(record: &CandidateRecord, config: &ScreeningConfig) -> GateResult {
    match record.humanness.mean {
        Some(score) if score < config.min_humanness => GateResult::fail(format!(
            "mean humanness {:.1} below minimum {:.1}",
            score, config.min_humanness
        )),
        Some(_) => GateResult::pass(),
        None => GateResult::soft_fail(vec!["humanness not assessed".to_string()]),
    }
}
