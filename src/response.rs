use crate::schema::{ColumnMap, QUESTION_COUNT};

/// One respondent's parsed submission.
#[derive(Debug, Default, Clone)]
pub struct ResponseRow {
    pub term: String,
    pub instructor: String,
    pub course: String,
    pub survey_source: Option<String>,

    /// Response level per question, in fixed q1..q10 order. `None` when
    /// the cell is empty or not an integral number.
    pub answers: [Option<i64>; QUESTION_COUNT],
}

impl ResponseRow {
    /// Builds a row from a raw CSV record using pre-resolved column
    /// indices. Cells past the end of a short record read as empty.
    pub fn from_record(record: &csv::StringRecord, columns: &ColumnMap) -> Self {
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let survey_source = {
            let raw = cell(columns.survey_source);
            if raw.is_empty() {
                None
            } else {
                Some(raw.to_string())
            }
        };

        let mut answers = [None; QUESTION_COUNT];
        for (i, &idx) in columns.questions.iter().enumerate() {
            answers[i] = parse_level(cell(idx));
        }

        Self {
            term: cell(columns.term).to_string(),
            instructor: cell(columns.instructor).to_string(),
            course: cell(columns.course).to_string(),
            survey_source,
            answers,
        }
    }

    /// Whether this row belongs to an instructor evaluation, i.e. its
    /// survey source contains `marker`. Missing sources never match.
    pub fn is_from_source(&self, marker: &str) -> bool {
        self.survey_source
            .as_deref()
            .is_some_and(|s| s.contains(marker))
    }
}

/// Parses a response-level cell. Dashboard exports render levels as
/// integers or integral floats ("3", "3.0"); anything else counts as
/// unanswered.
fn parse_level(cell: &str) -> Option<i64> {
    if cell.is_empty() {
        return None;
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Some(n);
    }
    match cell.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}
