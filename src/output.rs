//! Output formatting for aggregated survey results.
//!
//! Supports the plain-text report, pretty JSON, and the flat summary
//! CSV consumed by spreadsheet tooling.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::debug;

use crate::analyzers::types::GroupResult;

/// Logs results using Rust's debug pretty-print format.
pub fn print_pretty(results: &[GroupResult]) {
    debug!("{:#?}", results);
}

/// Renders results as pretty-printed JSON.
pub fn to_json_pretty(results: &[GroupResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Renders the plain-text report, one block per group:
///
/// ```text
/// -------
/// Fall2023 A. Smith EECS690
/// total response count = 2
/// q#       all     some
/// q1       100     0
/// ...
/// weighted avg. = 1.00
/// ```
pub fn render_report(results: &[GroupResult]) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str("-------\n");
        out.push_str(&format!(
            "{} {} {}\n",
            result.term, result.instructor, result.course
        ));
        out.push_str(&format!(
            "total response count = {}\n",
            result.total_response_count
        ));
        out.push_str("q# \t all \t some\n");
        for q in &result.question_breakdown {
            out.push_str(&format!(
                "q{} \t {} \t {}\n",
                q.question_number, q.pct_all, q.pct_some
            ));
        }
        out.push_str(&format!("weighted avg. = {:.2}\n", result.weighted_avg));
    }
    out
}

/// One row of the summary CSV. Field order and renames produce the
/// export header exactly.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "Term")]
    pub term: String,
    #[serde(rename = "Instructor")]
    pub instructor: String,
    #[serde(rename = "Course")]
    pub course: String,
    #[serde(rename = "Total Responses")]
    pub total_responses: usize,
    #[serde(rename = "Weighted Avg")]
    pub weighted_avg: f64,

    #[serde(rename = "Q1 % All")]
    pub q1_all: i64,
    #[serde(rename = "Q1 % Some")]
    pub q1_some: i64,
    #[serde(rename = "Q2 % All")]
    pub q2_all: i64,
    #[serde(rename = "Q2 % Some")]
    pub q2_some: i64,
    #[serde(rename = "Q3 % All")]
    pub q3_all: i64,
    #[serde(rename = "Q3 % Some")]
    pub q3_some: i64,
    #[serde(rename = "Q4 % All")]
    pub q4_all: i64,
    #[serde(rename = "Q4 % Some")]
    pub q4_some: i64,
    #[serde(rename = "Q5 % All")]
    pub q5_all: i64,
    #[serde(rename = "Q5 % Some")]
    pub q5_some: i64,
    #[serde(rename = "Q6 % All")]
    pub q6_all: i64,
    #[serde(rename = "Q6 % Some")]
    pub q6_some: i64,
    #[serde(rename = "Q7 % All")]
    pub q7_all: i64,
    #[serde(rename = "Q7 % Some")]
    pub q7_some: i64,
    #[serde(rename = "Q8 % All")]
    pub q8_all: i64,
    #[serde(rename = "Q8 % Some")]
    pub q8_some: i64,
    #[serde(rename = "Q9 % All")]
    pub q9_all: i64,
    #[serde(rename = "Q9 % Some")]
    pub q9_some: i64,
    #[serde(rename = "Q10 % All")]
    pub q10_all: i64,
    #[serde(rename = "Q10 % Some")]
    pub q10_some: i64,
}

impl From<&GroupResult> for SummaryRecord {
    fn from(r: &GroupResult) -> Self {
        let all = |i: usize| r.question_breakdown[i].pct_all;
        let some = |i: usize| r.question_breakdown[i].pct_some;
        Self {
            term: r.term.clone(),
            instructor: r.instructor.clone(),
            course: r.course.clone(),
            total_responses: r.total_response_count,
            weighted_avg: r.weighted_avg,
            q1_all: all(0),
            q1_some: some(0),
            q2_all: all(1),
            q2_some: some(1),
            q3_all: all(2),
            q3_some: some(2),
            q4_all: all(3),
            q4_some: some(3),
            q5_all: all(4),
            q5_some: some(4),
            q6_all: all(5),
            q6_some: some(5),
            q7_all: all(6),
            q7_some: some(6),
            q8_all: all(7),
            q8_some: some(7),
            q9_all: all(8),
            q9_some: some(8),
            q10_all: all(9),
            q10_some: some(9),
        }
    }
}

/// Writes the summary CSV, header first, one record per group.
pub fn write_summary_csv<W: Write>(writer: W, results: &[GroupResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for result in results {
        wtr.serialize(SummaryRecord::from(result))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders the summary CSV into a byte buffer.
pub fn summary_csv_bytes(results: &[GroupResult]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_summary_csv(&mut buf, results)?;
    Ok(buf)
}

/// Writes the summary CSV to a file, replacing any existing content.
pub fn write_summary_file(path: &str, results: &[GroupResult]) -> Result<()> {
    debug!(path, groups = results.len(), "Writing summary CSV");
    let file = std::fs::File::create(path)?;
    write_summary_csv(file, results)
}
