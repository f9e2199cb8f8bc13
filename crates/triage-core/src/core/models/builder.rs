use super::candidate::{BinderFormat, CandidateRecord, CdrSpan};
use super::metrics::{
    BindingMetrics, DevelopabilityMetrics, EpitopeAnnotation, HumannessScores, LiabilityProfile,
};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ModelError {
    #[error("Candidate '{id}' is a two-chain format but has no light sequence")]
    MissingLightChain { id: String },

    #[error("Candidate '{id}' is a single-domain format but carries a light sequence")]
    UnexpectedLightChain { id: String },

    #[error("Candidate '{id}' has CDR span '{label}' ({start}..{end}) outside the sequence (length {len})")]
    CdrSpanOutOfBounds {
        id: String,
        label: String,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Staged constructor for a [`CandidateRecord`].
///
/// A minimal identity-only record is created at ingestion; each upstream stage
/// attaches its metric group before `build` runs the invariant checks. Decision
/// state always starts empty.
pub struct CandidateBuilder {
    id: String,
    sequence: String,
    light_sequence: Option<String>,
    format: BinderFormat,
    track: String,
    cdr_spans: Vec<CdrSpan>,
    binding: BindingMetrics,
    epitope: Option<EpitopeAnnotation>,
    humanness: HumannessScores,
    liabilities: LiabilityProfile,
    developability: DevelopabilityMetrics,
}

impl CandidateBuilder {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
            light_sequence: None,
            format: BinderFormat::Vhh,
            track: String::new(),
            cdr_spans: Vec::new(),
            binding: BindingMetrics::default(),
            epitope: None,
            humanness: HumannessScores::default(),
            liabilities: LiabilityProfile::default(),
            developability: DevelopabilityMetrics::default(),
        }
    }

    pub fn format(mut self, format: BinderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn light_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.light_sequence = Some(sequence.into());
        self
    }

    pub fn track(mut self, track: impl Into<String>) -> Self {
        self.track = track.into();
        self
    }

    pub fn cdr_spans(mut self, spans: Vec<CdrSpan>) -> Self {
        self.cdr_spans = spans;
        self
    }

    pub fn binding(mut self, binding: BindingMetrics) -> Self {
        self.binding = binding;
        self
    }

    pub fn epitope(mut self, epitope: EpitopeAnnotation) -> Self {
        self.epitope = Some(epitope);
        self
    }

    pub fn humanness(mut self, humanness: HumannessScores) -> Self {
        self.humanness = humanness;
        self
    }

    pub fn liabilities(mut self, liabilities: LiabilityProfile) -> Self {
        self.liabilities = liabilities;
        self
    }

    pub fn developability(mut self, developability: DevelopabilityMetrics) -> Self {
        self.developability = developability;
        self
    }

    pub fn build(self) -> Result<CandidateRecord, ModelError> {
        match (self.format.is_single_domain(), &self.light_sequence) {
            (true, Some(_)) => {
                return Err(ModelError::UnexpectedLightChain { id: self.id });
            }
            (false, None) => {
                return Err(ModelError::MissingLightChain { id: self.id });
            }
            _ => {}
        }

        for span in &self.cdr_spans {
            if span.is_empty() || span.end > self.sequence.chars().count() {
                return Err(ModelError::CdrSpanOutOfBounds {
                    id: self.id,
                    label: span.label.clone(),
                    start: span.start,
                    end: span.end,
                    len: self.sequence.chars().count(),
                });
            }
        }

        Ok(CandidateRecord {
            id: self.id,
            sequence: self.sequence,
            light_sequence: self.light_sequence,
            format: self.format,
            track: self.track,
            cdr_spans: self.cdr_spans,
            binding: self.binding,
            epitope: self.epitope,
            humanness: self.humanness,
            liabilities: self.liabilities,
            developability: self.developability,
            gate_verdicts: BTreeMap::new(),
            risk_flags: Vec::new(),
            composite_score: 0.0,
            quality_key: None,
            rank: 0,
        })
    }
}
