//! CSV parser for dashboard survey exports.

use std::io::Read;

use crate::error::RaterError;
use crate::response::ResponseRow;
use crate::schema::ColumnMap;

/// Reads a CSV export with a header row and materializes one
/// [`ResponseRow`] per data record.
///
/// Records with fewer fields than the header are tolerated; missing
/// cells read as empty.
///
/// # Errors
///
/// Returns [`RaterError::MissingColumn`] when the header lacks a
/// required column, or [`RaterError::Parse`] when the input cannot be
/// read as CSV at all.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<ResponseRow>, RaterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(rdr.headers()?)?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(ResponseRow::from_record(&record, &columns));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::QUESTION_COLUMNS;

    fn export(data_lines: &[&str]) -> String {
        let mut header = vec![
            "Term Name".to_string(),
            "Instructor Name".to_string(),
            "Course Code Dashboard".to_string(),
            "Survey Source".to_string(),
        ];
        header.extend(QUESTION_COLUMNS.iter().map(|q| format!("\"{q}\"")));
        let mut out = header.join(",");
        out.push('\n');
        for line in data_lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_parse_two_rows() {
        let csv = export(&[
            "Fall2023,A. Smith,EECS690,Instructor Eval,3,3,3,3,3,3,3,3,3,3",
            "Fall2023,A. Smith,EECS690,Instructor Eval,2,2,2,2,2,2,2,2,2,2",
        ]);
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].answers[0], Some(3));
        assert_eq!(rows[1].answers[9], Some(2));
    }

    #[test]
    fn test_parse_tolerates_short_records() {
        let csv = export(&["Fall2023,A. Smith,EECS690"]);
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].survey_source, None);
    }

    #[test]
    fn test_parse_missing_column_is_fatal() {
        let csv = "Term Name,Instructor Name\nFall2023,A. Smith\n";
        let err = parse_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RaterError::MissingColumn { .. }));
    }

    #[test]
    fn test_parse_non_csv_input() {
        // invalid UTF-8 in the header cannot be read as CSV text
        let bytes: &[u8] = &[0xFF, 0xFE, 0x00, b'\n', 0xFF];
        assert!(parse_rows(bytes).is_err());
    }
}
