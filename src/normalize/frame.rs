use super::NormalizeError;
use crate::types::RecordSet;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Value};

/// Column names per header line of the frame preamble.
pub const COLUMNS_PER_HEADER_LINE: usize = 4;

const INDENT: &[u8] = b"  ";

/// Field names of the first record, which set the header width.
fn header_fields(set: &RecordSet) -> Vec<&str> {
    set.rows
        .first()
        .map(|r| r.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Builds the export frame: a one-element array holding the column header,
/// split into `columns_N` entries, followed by the rows.
///
/// The header comes from the records themselves; `set.columns` plays no part.
pub fn frame(set: &RecordSet) -> Value {
    let mut body = Map::new();
    for (i, chunk) in header_fields(set).chunks(COLUMNS_PER_HEADER_LINE).enumerate() {
        body.insert(format!("columns_{i}"), Value::String(chunk.join(",")));
    }
    body.insert(
        "rows".to_string(),
        Value::Array(set.rows.iter().cloned().map(Value::Object).collect()),
    );
    Value::Array(vec![Value::Object(body)])
}

/// Pretty-prints the frame with 2-space indentation.
pub fn render(set: &RecordSet) -> Result<String, NormalizeError> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    let rendered = frame(set).serialize(&mut ser);
    if let Err(source) = rendered {
        return Err(NormalizeError::MalformedOutput {
            text: String::new(),
            source,
        });
    }
    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCREEN_COLUMNS;
    use serde_json::json;

    fn set_with_columns(n: usize) -> RecordSet {
        let mut rec = Map::new();
        for i in 0..n {
            rec.insert(format!("f{i}"), json!(i));
        }
        RecordSet::from_records(vec![rec])
    }

    #[test]
    fn twelve_columns_open_with_six_lines() {
        let mut rec = Map::new();
        for (i, col) in SCREEN_COLUMNS.iter().enumerate() {
            rec.insert(col.to_string(), json!(i));
        }
        let text = render(&RecordSet::from_records(vec![rec])).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "[");
        assert_eq!(lines[1], "  {");
        assert_eq!(lines[2], r#"    "columns_0": "name,volume,market_cap_calc,Perf.YTD","#);
        assert_eq!(lines[3], r#"    "columns_1": "Perf.W,Perf.1M,Perf.3M,Perf.6M","#);
        assert_eq!(lines[4], r#"    "columns_2": "Perf.Y,Perf.All,change,Value.Traded","#);
        assert_eq!(lines[5], r#"    "rows": ["#);
        assert_eq!(lines[6], "      {");
        assert_eq!(&lines[lines.len() - 3..], &["    ]", "  }", "]"]);
    }

    #[test]
    fn header_lines_grow_with_column_count() {
        for (columns, header_lines) in [(1, 1), (4, 1), (5, 2), (9, 3), (12, 3), (13, 4)] {
            let framed = frame(&set_with_columns(columns));
            let body = framed[0].as_object().unwrap();
            // every key but "rows" is a header line
            assert_eq!(body.len() - 1, header_lines, "{columns} columns");
        }
    }

    #[test]
    fn empty_rows_render_inline_without_header() {
        let set = RecordSet::new(vec!["name".into(), "volume".into()], Vec::new());
        let text = render(&set).unwrap();
        assert_eq!(text, "[\n  {\n    \"rows\": []\n  }\n]");
    }

    #[test]
    fn header_ignores_declared_columns() {
        let rec = json!({"name": "A", "volume": 10}).as_object().unwrap().clone();
        let declared = SCREEN_COLUMNS.iter().map(|c| c.to_string()).collect();
        let framed = frame(&RecordSet::new(declared, vec![rec]));
        assert_eq!(framed[0]["columns_0"], "name,volume");
        assert!(framed[0].get("columns_1").is_none());
    }
}
