use crate::analyzers::types::{GroupResult, QuestionBreakdown};
use crate::analyzers::utility::pct;
use crate::response::ResponseRow;
use crate::schema::{INSTRUCTOR_SOURCE_MARKER, QUESTION_COUNT};

/// Response level granted full credit in the weighted score.
const FULL_CREDIT_LEVEL: i64 = 3;
/// Response level granted half credit in the weighted score.
const HALF_CREDIT_LEVEL: i64 = 2;

/// Aggregates response rows into one [`GroupResult`] per
/// (term, instructor, course) group.
///
/// Iterates the full Cartesian product of the distinct term, instructor,
/// and course values (each in first-seen order), selecting rows whose
/// identity fields match and whose survey source marks an instructor
/// evaluation. Combinations with no matching rows are skipped outright.
///
/// Percentages are rounded per question before the weighted sum is
/// taken, so the score matches the published reports digit for digit.
///
/// The triple-nested scan is O(T·I·C) passes over the row set, which is
/// fine at survey-export scale (thousands of rows, tens of distinct
/// values per dimension).
pub fn aggregate(rows: &[ResponseRow]) -> Vec<GroupResult> {
    let terms = distinct(rows, |r| &r.term);
    let instructors = distinct(rows, |r| &r.instructor);
    let courses = distinct(rows, |r| &r.course);

    let mut results = Vec::new();

    for term in &terms {
        for instructor in &instructors {
            for course in &courses {
                let selected: Vec<&ResponseRow> = rows
                    .iter()
                    .filter(|r| {
                        r.term == **term
                            && r.instructor == **instructor
                            && r.course == **course
                            && r.is_from_source(INSTRUCTOR_SOURCE_MARKER)
                    })
                    .collect();

                let n_total = selected.len();
                if n_total == 0 {
                    continue;
                }

                let mut question_breakdown = Vec::with_capacity(QUESTION_COUNT);
                let mut weighted_sum = 0.0;

                for q in 0..QUESTION_COUNT {
                    let n_all = selected
                        .iter()
                        .filter(|r| r.answers[q] == Some(FULL_CREDIT_LEVEL))
                        .count();
                    let n_some = selected
                        .iter()
                        .filter(|r| r.answers[q] == Some(HALF_CREDIT_LEVEL))
                        .count();

                    let pct_all = pct(n_all, n_total);
                    let pct_some = pct(n_some, n_total);

                    question_breakdown.push(QuestionBreakdown {
                        question_number: (q + 1) as u32,
                        pct_all,
                        pct_some,
                    });

                    weighted_sum += pct_all as f64 + 0.5 * pct_some as f64;
                }

                let weighted_avg = weighted_sum / (QUESTION_COUNT as f64 * 100.0);

                results.push(GroupResult {
                    term: (*term).clone(),
                    instructor: (*instructor).clone(),
                    course: (*course).clone(),
                    total_response_count: n_total,
                    weighted_avg,
                    question_breakdown,
                });
            }
        }
    }

    results
}

/// Distinct values of `key` across all rows, in first-seen order.
fn distinct<'a, F>(rows: &'a [ResponseRow], key: F) -> Vec<&'a String>
where
    F: Fn(&'a ResponseRow) -> &'a String,
{
    let mut seen = std::collections::HashSet::new();
    let mut values = Vec::new();
    for row in rows {
        let value = key(row);
        if seen.insert(value) {
            values.push(value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(term: &str, instructor: &str, course: &str, source: &str, level: i64) -> ResponseRow {
        ResponseRow {
            term: term.to_string(),
            instructor: instructor.to_string(),
            course: course.to_string(),
            survey_source: if source.is_empty() {
                None
            } else {
                Some(source.to_string())
            },
            answers: [Some(level); QUESTION_COUNT],
        }
    }

    #[test]
    fn test_all_top_answers_score_one() {
        let rows = vec![
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 3),
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 3),
        ];
        let results = aggregate(&rows);

        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.total_response_count, 2);
        assert_eq!(r.weighted_avg, 1.0);
        assert_eq!(r.question_breakdown.len(), QUESTION_COUNT);
        for q in &r.question_breakdown {
            assert_eq!(q.pct_all, 100);
            assert_eq!(q.pct_some, 0);
        }
    }

    #[test]
    fn test_all_bottom_answers_score_zero() {
        let rows = vec![row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 1)];
        let results = aggregate(&rows);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].weighted_avg, 0.0);
    }

    #[test]
    fn test_out_of_domain_answers_score_zero() {
        let rows = vec![row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 7)];
        let results = aggregate(&rows);

        assert_eq!(results[0].weighted_avg, 0.0);
        assert_eq!(results[0].question_breakdown[0].pct_all, 0);
    }

    #[test]
    fn test_rounding_on_three_respondents() {
        // every question sees the answers [3, 3, 2]
        let rows = vec![
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 3),
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 3),
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 2),
        ];

        let results = aggregate(&rows);
        let q1 = &results[0].question_breakdown[0];
        assert_eq!(q1.pct_all, 67);
        assert_eq!(q1.pct_some, 33);
    }

    #[test]
    fn test_non_instructor_sources_are_excluded() {
        let rows = vec![
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 3),
            row("Fall2023", "A. Smith", "EECS690", "Student Self", 1),
            row("Fall2023", "A. Smith", "EECS690", "", 1),
        ];
        let results = aggregate(&rows);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].total_response_count, 1);
        assert_eq!(results[0].weighted_avg, 1.0);
    }

    #[test]
    fn test_empty_combinations_are_omitted() {
        // two instructors x two courses, but only two co-occurring pairs
        let rows = vec![
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 3),
            row("Fall2023", "B. Jones", "EECS388", "Instructor Eval", 2),
        ];
        let results = aggregate(&rows);

        assert_eq!(results.len(), 2);
        // cardinality bound: 1 term x 2 instructors x 2 courses
        assert!(results.len() <= 4);
    }

    #[test]
    fn test_no_instructor_rows_yields_empty_output() {
        let rows = vec![row("Fall2023", "A. Smith", "EECS690", "Course Eval", 3)];
        assert!(aggregate(&rows).is_empty());
    }

    #[test]
    fn test_groups_do_not_contaminate_each_other() {
        let rows = vec![
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 3),
            row("Fall2023", "B. Jones", "EECS388", "Instructor Eval", 1),
        ];
        let results = aggregate(&rows);

        assert_eq!(results.len(), 2);
        let smith = results
            .iter()
            .find(|r| r.instructor == "A. Smith")
            .unwrap();
        let jones = results
            .iter()
            .find(|r| r.instructor == "B. Jones")
            .unwrap();
        assert_eq!(smith.weighted_avg, 1.0);
        assert_eq!(jones.weighted_avg, 0.0);
        assert_eq!(smith.total_response_count, 1);
        assert_eq!(jones.total_response_count, 1);
    }

    #[test]
    fn test_output_follows_first_seen_nested_order() {
        let rows = vec![
            row("Spring2024", "B. Jones", "EECS388", "Instructor Eval", 3),
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 3),
            // makes A. Smith also teach EECS388 in Spring2024
            row("Spring2024", "A. Smith", "EECS388", "Instructor Eval", 2),
        ];
        let results = aggregate(&rows);

        // terms: Spring2024, Fall2023; instructors: B. Jones, A. Smith;
        // courses: EECS388, EECS690 -- nested iteration in that order
        let order: Vec<(&str, &str, &str)> = results
            .iter()
            .map(|r| (r.term.as_str(), r.instructor.as_str(), r.course.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Spring2024", "B. Jones", "EECS388"),
                ("Spring2024", "A. Smith", "EECS388"),
                ("Fall2023", "A. Smith", "EECS690"),
            ]
        );
    }

    #[test]
    fn test_mixed_levels_weighting() {
        // one respondent answering 2 on every question: each question
        // contributes 0 + 0.5 * 100, so the score lands at 0.5
        let rows = vec![row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 2)];
        let results = aggregate(&rows);
        assert_eq!(results[0].weighted_avg, 0.5);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let rows = vec![
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 3),
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 2),
            row("Fall2023", "A. Smith", "EECS690", "Instructor Eval", 1),
        ];
        for r in aggregate(&rows) {
            assert!(r.total_response_count >= 1);
            assert!((0.0..=1.0).contains(&r.weighted_avg));
        }
    }
}
