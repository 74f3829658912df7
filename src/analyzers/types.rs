//! Data types produced by the aggregation pipeline.

use serde::Serialize;

/// Per-question response-level percentages within one group.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBreakdown {
    pub question_number: u32,
    /// Percent of respondents answering the top level ("all/completely").
    pub pct_all: i64,
    /// Percent of respondents answering the middle level ("some").
    pub pct_some: i64,
}

/// Aggregated result for one (term, instructor, course) group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupResult {
    pub term: String,
    pub instructor: String,
    pub course: String,
    pub total_response_count: usize,
    /// Weighted satisfaction score in [0, 1].
    pub weighted_avg: f64,
    /// One entry per question, q1..q10 in order.
    pub question_breakdown: Vec<QuestionBreakdown>,
}
