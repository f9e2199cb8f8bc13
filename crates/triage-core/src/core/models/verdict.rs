use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a single quality gate.
///
/// `Fail` unconditionally disqualifies a candidate; `SoftFail` flags a concern
/// without disqualifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateVerdict {
    Pass,
    Fail,
    SoftFail,
}

impl GateVerdict {
    pub fn is_hard_fail(&self) -> bool {
        matches!(self, GateVerdict::Fail)
    }

    pub fn is_soft_fail(&self) -> bool {
        matches!(self, GateVerdict::SoftFail)
    }
}

/// Collapses a per-gate verdict map into a single accept/reject decision.
///
/// A candidate is rejected iff at least one gate returned `Fail`; soft failures
/// alone never reject.
pub fn aggregate_verdict(verdicts: &BTreeMap<String, GateVerdict>) -> GateVerdict {
    if verdicts.values().any(GateVerdict::is_hard_fail) {
        GateVerdict::Fail
    } else {
        GateVerdict::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict_map(entries: &[(&str, GateVerdict)]) -> BTreeMap<String, GateVerdict> {
        entries
            .iter()
            .map(|(name, v)| (name.to_string(), *v))
            .collect()
    }

    #[test]
    fn empty_map_aggregates_to_pass() {
        assert_eq!(aggregate_verdict(&BTreeMap::new()), GateVerdict::Pass);
    }

    #[test]
    fn any_hard_fail_rejects() {
        let verdicts = verdict_map(&[
            ("binding", GateVerdict::Pass),
            ("humanness", GateVerdict::Fail),
            ("liabilities", GateVerdict::Pass),
        ]);
        assert_eq!(aggregate_verdict(&verdicts), GateVerdict::Fail);
    }

    #[test]
    fn soft_fails_alone_do_not_reject() {
        let verdicts = verdict_map(&[
            ("binding", GateVerdict::SoftFail),
            ("developability", GateVerdict::SoftFail),
        ]);
        assert_eq!(aggregate_verdict(&verdicts), GateVerdict::Pass);
    }

    #[test]
    fn serializes_in_snake_case() {
        let json = serde_json::to_string(&GateVerdict::SoftFail).unwrap();
        assert_eq!(json, "\"soft_fail\"");
    }
}
