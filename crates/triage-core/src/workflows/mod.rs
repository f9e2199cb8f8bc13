//! # Workflows Module
//!
//! High-level entry points that orchestrate the complete triage pipeline.
//!
//! ## Overview
//!
//! Workflows are the top-level API of the library. Each ties the `engine` and
//! `core` layers together, owns phase-level progress reporting, and returns the
//! partitioned candidate sets together with audit statistics.
//!
//! - **Screening Workflow** ([`screen`]) - Filter cascade plus fallback
//!   escalation: the only place admission decisions are made.
//! - **Selection Workflow** ([`select`]) - Worst-metric ranking followed by
//!   greedy maximin diversity selection.
//! - **Triage Workflow** ([`triage`]) - The full pipeline: filter, escalate,
//!   rank, select.

pub mod screen;
pub mod select;
pub mod triage;
