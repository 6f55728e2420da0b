//! Column-aligned text tables.
//!
//! Rows are built as strings whose fields are joined by [`FIELD_SEPARATOR`], a
//! non-printable unit separator, so field values containing spaces or commas
//! are never mis-split.

use std::cmp::Ordering;

/// ASCII unit separator (0x1F).
pub const FIELD_SEPARATOR: char = '\x1f';

/// Gap placed between rendered columns.
pub const COLUMN_GLUE: &str = " ";

/// Index of the value field in a metrics report row.
pub const VALUE_COLUMN: usize = 4;

/// Join fields into one delimited row. Every field is followed by the
/// separator, so rows end with an empty trailing field.
pub fn delimited_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut row = String::new();
    for field in fields {
        row.push_str(field.as_ref());
        row.push(FIELD_SEPARATOR);
    }
    row
}

/// Render delimited rows as aligned columns.
///
/// Each field is trimmed and left-padded to its column's widest cell (counted
/// in characters); the last field of a row is never padded. Lines are joined
/// with `\n` and trailing whitespace is trimmed from the whole output.
pub fn columnize(rows: &[String]) -> String {
    let split: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.split(FIELD_SEPARATOR).map(str::trim).collect())
        .collect();

    let mut widths: Vec<usize> = Vec::new();
    for fields in &split {
        for (i, field) in fields.iter().enumerate() {
            let len = field.chars().count();
            if i >= widths.len() {
                widths.push(len);
            } else if len > widths[i] {
                widths[i] = len;
            }
        }
    }

    let mut lines = Vec::with_capacity(split.len());
    for fields in &split {
        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i + 1 == fields.len() {
                line.push_str(field);
            } else {
                line.push_str(&format!("{field:<width$}", width = widths[i]));
                line.push_str(COLUMN_GLUE);
            }
        }
        lines.push(line);
    }
    lines.join("\n").trim_end().to_string()
}

/// Numeric value of a report row, read from [`VALUE_COLUMN`] with any trailing
/// `%` removed. Rows that do not parse count as zero.
fn row_value(row: &str) -> f64 {
    row.split(FIELD_SEPARATOR)
        .nth(VALUE_COLUMN)
        .and_then(|v| v.trim().trim_end_matches('%').parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Sort every row after the header by value, highest first.
///
/// The sort is stable, so rows with equal values keep their timestamp order.
pub fn sort_rows_by_value(rows: &mut [String]) {
    if let Some((_header, body)) = rows.split_first_mut() {
        body.sort_by(|a, b| {
            row_value(b)
                .partial_cmp(&row_value(a))
                .unwrap_or(Ordering::Equal)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_row(value: &str) -> String {
        delimited_row(["ts", "consul.m", "gauge", "percentage", value, "[]"])
    }

    // -----------------------------------------------------------------------
    // Row construction
    // -----------------------------------------------------------------------

    #[test]
    fn delimited_row_has_trailing_separator() {
        let row = delimited_row(["a", "b c", "d,e"]);
        assert_eq!(row, "a\x1fb c\x1fd,e\x1f");
        assert_eq!(row.split(FIELD_SEPARATOR).count(), 4);
    }

    // -----------------------------------------------------------------------
    // Column alignment
    // -----------------------------------------------------------------------

    #[test]
    fn columnize_aligns_columns() {
        let rows = vec![
            delimited_row(["Name", "Value"]),
            delimited_row(["consul.long.name", "1"]),
            delimited_row(["x", "12345"]),
        ];
        let out = columnize(&rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name             Value ");
        assert_eq!(lines[1], "consul.long.name 1     ");
        assert_eq!(lines[2], "x                12345");
    }

    #[test]
    fn columnize_output_has_no_trailing_whitespace() {
        let rows = vec![
            delimited_row(["Timestamp", "Value", "Labels"]),
            delimited_row(["t1", "1", "[]"]),
        ];
        let out = columnize(&rows);
        assert_eq!(out, out.trim_end());
        assert!(out.ends_with("[]"));
        // Earlier lines keep their padding.
        assert_eq!(out.lines().next().unwrap(), "Timestamp Value Labels ");
    }

    #[test]
    fn columnize_keeps_spaces_inside_fields() {
        let rows = vec![
            delimited_row(["Labels", "End"]),
            delimited_row(["[{a: b} {c: d}]", "x"]),
        ];
        let out = columnize(&rows);
        assert!(out.contains("[{a: b} {c: d}] x"));
    }

    #[test]
    fn columnize_trims_fields_and_has_no_trailing_newline() {
        let rows = vec!["  a \x1fb".to_string(), "cc\x1fd".to_string()];
        assert_eq!(columnize(&rows), "a  b\ncc d");
        assert_eq!(columnize(&[]), "");
    }

    // -----------------------------------------------------------------------
    // Sort by value
    // -----------------------------------------------------------------------

    #[test]
    fn sort_by_value_descending_keeps_header() {
        let mut rows = vec![
            delimited_row(["Timestamp", "Metric", "Type", "Unit", "Value", "Labels"]),
            report_row("5.0%"),
            report_row("90.0%"),
            report_row("12.0%"),
        ];
        sort_rows_by_value(&mut rows);
        assert!(rows[0].starts_with("Timestamp"));
        let values: Vec<f64> = rows[1..].iter().map(|r| row_value(r)).collect();
        assert_eq!(values, vec![90.0, 12.0, 5.0]);
    }

    #[test]
    fn unparseable_values_sort_as_zero() {
        let mut rows = vec![
            delimited_row(["h"]),
            report_row("1.50s"),
            report_row("-3"),
            report_row("2"),
        ];
        sort_rows_by_value(&mut rows);
        let values: Vec<String> = rows[1..]
            .iter()
            .map(|r| r.split(FIELD_SEPARATOR).nth(VALUE_COLUMN).unwrap().to_string())
            .collect();
        assert_eq!(values, vec!["2", "1.50s", "-3"]);
    }

    #[test]
    fn sort_handles_header_only() {
        let mut rows = vec![delimited_row(["h"])];
        sort_rows_by_value(&mut rows);
        assert_eq!(rows.len(), 1);
        sort_rows_by_value(&mut []);
    }
}
