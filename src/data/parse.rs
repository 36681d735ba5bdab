use crate::error::{ForecastError, Result};

/// Parses a numeric sequence from free-form text.
///
/// Values may be separated by commas, semicolons, whitespace or newlines.
/// A leading header line (any cell that is not a number) is skipped.
pub fn parse_sequence(text: &str) -> Result<Vec<f64>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty()).peekable();

    if let Some(first) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut values = Vec::new();
    for line in lines {
        for cell in split_cells(line) {
            let value = cell
                .parse::<f64>()
                .map_err(|_| ForecastError::Parse(cell.to_string()))?;
            values.push(value);
        }
    }
    Ok(values)
}

fn split_cells(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(|cell| cell.trim_matches('"'))
        .filter(|cell| !cell.is_empty())
}

fn is_header(line: &str) -> bool {
    split_cells(line).any(|cell| cell.parse::<f64>().is_err())
}
