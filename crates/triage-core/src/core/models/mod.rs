//! Data structures for binder candidates and their externally computed metrics.
//!
//! A [`candidate::CandidateRecord`] aggregates raw sequence identity with every
//! metric group an upstream collaborator may attach (binding, epitope, humanness,
//! liabilities, developability), plus the mutable decision state written by the
//! filter cascade and the ranker. Records are created through
//! [`builder::CandidateBuilder`], which enforces the chain/format invariant.

pub mod builder;
pub mod candidate;
pub mod metrics;
pub mod verdict;
