//! # BinderTriage Core Library
//!
//! A deterministic engine for filtering, multi-objective ranking, and diversity
//! selection of designed biomolecule binders against a fixed target.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`CandidateRecord`
//!   and its metric groups), the three-valued gate verdict, and pure sequence
//!   utilities (aromatic content, pairwise identity).
//!
//! - **[`engine`]: The Logic Core.** This layer implements the admission-control
//!   machinery: the five filter gates and their cascade, the fallback escalator with
//!   its audit trail, worst-metric ranking, and greedy maximin diversity selection.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer.
//!   It ties the `engine` and `core` together to execute the complete triage
//!   pipeline: filter, escalate, rank, select.
//!
//! The engine never computes biological metrics itself. Every score it consumes is
//! attached by an upstream collaborator before a workflow runs, and absence of a
//! metric is a first-class state rather than an error.

pub mod core;
pub mod engine;
pub mod workflows;
