//! Plain two-column table rendering for the `show` commands.
//!
//! Output format:
//! ```text
//! +----------------------+-------+
//! | Environment Variable | Value |
//! +----------------------+-------+
//! | DB_NAME              | wp    |
//! +----------------------+-------+
//! ```

/// Render `rows` as a bordered two-column table, including a trailing
/// newline. With no rows, only the header block is rendered.
pub fn render_table(headers: (&str, &str), rows: &[(String, String)]) -> String {
    let left = column_width(headers.0, rows.iter().map(|(l, _)| l.as_str()));
    let right = column_width(headers.1, rows.iter().map(|(_, r)| r.as_str()));

    let separator = format!("+{}+{}+\n", "-".repeat(left + 2), "-".repeat(right + 2));

    let mut out = String::new();
    out.push_str(&separator);
    out.push_str(&row_line(headers.0, headers.1, left, right));
    out.push_str(&separator);
    for (l, r) in rows {
        out.push_str(&row_line(l, r, left, right));
    }
    if !rows.is_empty() {
        out.push_str(&separator);
    }
    out
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

fn row_line(left: &str, right: &str, left_width: usize, right_width: usize) -> String {
    format!(
        "| {:<left_width$} | {:<right_width$} |\n",
        left, right
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rows_padded_to_widest_cell() {
        let rows = vec![
            ("DB_NAME".to_string(), "wp".to_string()),
            ("WP_HOME".to_string(), "http://localhost".to_string()),
        ];
        let table = render_table(("Environment Variable", "Value"), &rows);
        let expected = "\
+----------------------+------------------+
| Environment Variable | Value            |
+----------------------+------------------+
| DB_NAME              | wp               |
| WP_HOME              | http://localhost |
+----------------------+------------------+
";
        assert_eq!(table, expected);
    }

    #[test]
    fn empty_table_renders_headers_only() {
        let table = render_table(("WordPress Key", "Value"), &[]);
        let expected = "\
+---------------+-------+
| WordPress Key | Value |
+---------------+-------+
";
        assert_eq!(table, expected);
    }

    #[test]
    fn wide_values_stretch_the_column() {
        let rows = vec![("K".to_string(), "x".repeat(40))];
        let table = render_table(("K", "V"), &rows);
        for line in table.lines() {
            assert_eq!(line.chars().count(), table.lines().next().unwrap().chars().count());
        }
    }
}
