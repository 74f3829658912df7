//! Fixed survey schema for dashboard exports.
//!
//! The instructor evaluation always carries the same ten Likert-style
//! question columns plus four identity columns. Header resolution is
//! done once up front so a malformed export fails with the name of the
//! missing column instead of producing empty groups downstream.

use crate::error::RaterError;
use std::collections::HashMap;

pub const TERM_COLUMN: &str = "Term Name";
pub const INSTRUCTOR_COLUMN: &str = "Instructor Name";
pub const COURSE_COLUMN: &str = "Course Code Dashboard";
pub const SURVEY_SOURCE_COLUMN: &str = "Survey Source";

/// Substring of `Survey Source` that marks an instructor-evaluation row.
pub const INSTRUCTOR_SOURCE_MARKER: &str = "Instructor";

pub const QUESTION_COUNT: usize = 10;

/// The ten question columns, in question-number order (q1..q10).
pub static QUESTION_COLUMNS: [&str; QUESTION_COUNT] = [
    "[NUM] Instructor Q1_1 - The instructor helped me understand what I was expected to learn",
    "[NUM] Instructor Q1_2 - The instructor explained the purpose of work I did in the course (things like discussions, assignments, exams, class activities)",
    "[NUM] Instructor Q1_3 - The instructor made deadlines clear",
    "[NUM] Instructor Q1_4 - The instructor was clear about how I would be graded",
    "[NUM] Instructor Q1_5 - The instructor provided feedback that helped me learn",
    "[NUM] Instructor Q2_1 - The instructor helped create an environment in the class (whether in person or online) that motivated me to learn",
    "[NUM] Instructor Q2_2 - The instructor responded respectfully if I had  questions",
    "[NUM] Instructor Q2_3 - The instructor helped me feel that I could succeed in the class",
    "[NUM] Instructor Q2_4 - The instructor helped me understand different ways to apply what I learned",
    "[NUM] Instructor Q2_5 - The instructor used approaches that encouraged me to participate in class activities (in person or online)",
];

/// Header indices for one parsed export.
#[derive(Debug)]
pub struct ColumnMap {
    pub term: usize,
    pub instructor: usize,
    pub course: usize,
    pub survey_source: usize,
    pub questions: [usize; QUESTION_COUNT],
}

impl ColumnMap {
    /// Resolves a CSV header record against the fixed schema.
    ///
    /// Matching normalizes whitespace runs to single spaces and trims.
    /// Identity columns additionally accept a trailing `*` variant,
    /// which some dashboard exports attach to required fields.
    ///
    /// # Errors
    ///
    /// Returns [`RaterError::MissingColumn`] naming the first absent
    /// column, identity columns before question columns.
    pub fn from_headers(headers: &csv::StringRecord) -> Result<Self, RaterError> {
        let mut lookup: HashMap<String, usize> = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            // first occurrence wins on duplicate headers
            lookup.entry(normalize(name)).or_insert(idx);
        }

        let term = resolve_identity(&lookup, TERM_COLUMN)?;
        let instructor = resolve_identity(&lookup, INSTRUCTOR_COLUMN)?;
        let course = resolve_identity(&lookup, COURSE_COLUMN)?;
        let survey_source = resolve_identity(&lookup, SURVEY_SOURCE_COLUMN)?;

        let mut questions = [0usize; QUESTION_COUNT];
        for (i, label) in QUESTION_COLUMNS.iter().enumerate() {
            questions[i] = resolve(&lookup, label)?;
        }

        Ok(Self {
            term,
            instructor,
            course,
            survey_source,
            questions,
        })
    }
}

fn resolve(lookup: &HashMap<String, usize>, label: &str) -> Result<usize, RaterError> {
    lookup
        .get(&normalize(label))
        .copied()
        .ok_or_else(|| RaterError::MissingColumn {
            name: label.to_string(),
        })
}

fn resolve_identity(lookup: &HashMap<String, usize>, label: &str) -> Result<usize, RaterError> {
    if let Some(idx) = lookup.get(&normalize(label)) {
        return Ok(*idx);
    }
    let starred = format!("{label}*");
    lookup
        .get(&normalize(&starred))
        .copied()
        .ok_or_else(|| RaterError::MissingColumn {
            name: label.to_string(),
        })
}

/// Collapses whitespace runs to single spaces and trims the ends.
fn normalize(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
