// Formatting of transpiler syntax errors

use super::envelope::ReportedError;

/// Build the user-facing message for a reported syntax error
///
/// File, line, column and source excerpt are each omitted when unknown.
pub fn format_error_details(error: &ReportedError, source: &str, path: &str) -> String {
    let mut lines = vec![format!("Message: {}", error.message)];

    if !path.trim().is_empty() {
        lines.push(format!("File: {}", path));
    }
    if error.line_number > 0 {
        lines.push(format!("Line number: {}", error.line_number));
    }
    if error.column_number > 0 {
        lines.push(format!("Column number: {}", error.column_number));
    }
    if let Some(fragment) = source_fragment(source, error.line_number, error.column_number) {
        lines.push("Source error:".to_string());
        lines.push(String::new());
        lines.push(fragment);
    }

    lines.join("\n")
}

/// Excerpt of `source` around a 1-based position
///
/// Shows the line before, the line itself and the line after, with a caret
/// row under the target line when the column is known.
pub fn source_fragment(source: &str, line: i64, column: i64) -> Option<String> {
    if line <= 0 {
        return None;
    }

    let lines: Vec<&str> = source.lines().collect();
    let target = usize::try_from(line - 1).ok()?;
    if target >= lines.len() {
        return None;
    }

    let first = target.saturating_sub(1);
    let last = (target + 1).min(lines.len() - 1);
    let width = (last + 1).to_string().len();

    let mut rows = Vec::with_capacity(4);
    for (idx, text) in lines.iter().enumerate().take(last + 1).skip(first) {
        let prefix = format!("Line {:>width$}: ", idx + 1, width = width);
        rows.push(format!("{}{}", prefix, text));

        if idx == target && column > 0 {
            let column = usize::try_from(column - 1).unwrap_or(0);
            rows.push(caret_row(prefix.len(), text, column));
        }
    }

    Some(rows.join("\n"))
}

// Tabs before the column are kept so the caret lines up however they render
fn caret_row(prefix_len: usize, text: &str, column: usize) -> String {
    let mut row = "-".repeat(prefix_len);
    row.extend(
        text.chars()
            .take(column)
            .map(|c| if c == '\t' { '\t' } else { '-' }),
    );
    row.push('^');
    row
}
