use super::NormalizeError;
use serde_json::Value;

/// Lines kept before the cut (line 1 only).
const LEADING_KEPT: usize = 1;
/// First line kept after the cut, 0-based (line 7).
const RESUME_AT: usize = 6;
/// Lines dropped from the end.
const TRAILING_DROPPED: usize = 2;

/// Drops lines 2..=6 (1-based) and then the last two lines, and rejoins with `\n`.
/// Purely positional; inputs shorter than the window collapse to at most line 1.
pub fn strip_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut kept: Vec<&str> = lines
        .iter()
        .take(LEADING_KEPT)
        .chain(lines.iter().skip(RESUME_AT))
        .copied()
        .collect();
    kept.truncate(kept.len().saturating_sub(TRAILING_DROPPED));
    kept.join("\n")
}

/// Strips the fixed window from `text` and parses what is left.
pub fn excise(text: &str) -> Result<Value, NormalizeError> {
    let cleaned = strip_lines(text);
    let parsed = serde_json::from_str::<Value>(&cleaned);
    match parsed {
        Ok(value) => Ok(value),
        Err(source) => Err(NormalizeError::MalformedOutput {
            text: cleaned,
            source,
        }),
    }
}
