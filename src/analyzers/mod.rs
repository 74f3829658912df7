//! Survey aggregation and weighted scoring.
//!
//! This module groups parsed response rows by term, instructor, and
//! course, computes per-question response-level percentages, and folds
//! them into a single weighted satisfaction score per group.

pub mod aggregate;
pub mod types;
pub mod utility;
