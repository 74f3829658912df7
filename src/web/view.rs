//! HTML rendering for the upload form and results page.

use crate::analyzers::types::GroupResult;

/// Escapes a value for interpolation into HTML text or attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the full page: upload form, optional error notice, optional
/// results table with per-question breakdowns and a CSV download link.
pub fn render_page(
    results: &[GroupResult],
    error: Option<&str>,
    export_token: Option<&str>,
) -> String {
    let mut body = String::new();

    body.push_str(concat!(
        "<h1>FAR Survey Calculator</h1>\n",
        "<form method=\"post\" enctype=\"multipart/form-data\" action=\"/analyze\">\n",
        "  <input type=\"file\" name=\"csv_file\" accept=\".csv\" required />\n",
        "  <button type=\"submit\">Analyze</button>\n",
        "</form>\n",
    ));

    if let Some(message) = error {
        body.push_str(&format!(
            "<div class=\"error\">{}</div>\n",
            escape_html(message)
        ));
    }

    if results.is_empty() {
        body.push_str("<p class=\"muted\">Upload a FAR survey CSV to see results.</p>\n");
    } else {
        if let Some(token) = export_token {
            body.push_str(&format!(
                "<p><a href=\"/export/{}\">Download summary CSV</a></p>\n",
                escape_html(token)
            ));
        }
        body.push_str(&render_results_table(results));
    }

    format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "  <meta charset=\"UTF-8\" />\n",
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
            "  <title>FAR Survey Calculator</title>\n",
            "  <style>\n",
            "    body {{ font-family: Arial, sans-serif; margin: 2rem; }}\n",
            "    table {{ border-collapse: collapse; width: 100%; margin-bottom: 1rem; }}\n",
            "    th, td {{ border: 1px solid #ccc; padding: 0.5rem; text-align: left; vertical-align: top; }}\n",
            "    th {{ background: #f5f5f5; }}\n",
            "    .error {{ color: #b00020; margin-bottom: 1rem; }}\n",
            "    .muted {{ color: #666; }}\n",
            "  </style>\n",
            "</head>\n",
            "<body>\n",
            "{}",
            "</body>\n",
            "</html>\n",
        ),
        body
    )
}

fn render_results_table(results: &[GroupResult]) -> String {
    let mut rows = String::new();
    for result in results {
        let mut question_rows = String::new();
        for q in &result.question_breakdown {
            question_rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                q.question_number, q.pct_all, q.pct_some
            ));
        }

        rows.push_str(&format!(
            concat!(
                "<tr>",
                "<td>{term}</td>",
                "<td>{instructor}</td>",
                "<td>{course}</td>",
                "<td>{total}</td>",
                "<td>{avg:.2}</td>",
                "<td><details><summary>View q1&ndash;q10 percentages</summary>",
                "<table><thead><tr><th>Q#</th><th>% All</th><th>% Some</th></tr></thead>",
                "<tbody>{questions}</tbody></table></details></td>",
                "</tr>\n",
            ),
            term = escape_html(&result.term),
            instructor = escape_html(&result.instructor),
            course = escape_html(&result.course),
            total = result.total_response_count,
            avg = result.weighted_avg,
            questions = question_rows,
        ));
    }

    format!(
        concat!(
            "<table>\n",
            "<thead><tr>",
            "<th>Term</th><th>Instructor</th><th>Course</th>",
            "<th>Total Responses</th><th>Weighted Avg.</th><th>Question Breakdown</th>",
            "</tr></thead>\n",
            "<tbody>\n{}</tbody>\n",
            "</table>\n",
        ),
        rows
    )
}
