//! Line-level CSV encoding.
//!
//! Every row is one physical line: values are always double-quoted, inner
//! quotes doubled, and CR/LF inside a value replaced by a space. Parsing is
//! lenient and also reads unquoted values, so rows written by hand or by
//! older tools survive a read/rewrite cycle.

use loupe_core::record::Column;

/// The header line, without trailing newline.
pub fn header_line() -> String {
  Column::ALL.iter().map(|c| c.name()).collect::<Vec<_>>().join(",")
}

/// Quote one value.
pub fn escape(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for c in value.chars() {
    match c {
      '"' => out.push_str("\"\""),
      '\r' | '\n' => out.push(' '),
      c => out.push(c),
    }
  }
  out.push('"');
  out
}

/// Quote and join a row, without trailing newline.
pub fn format_row<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
  values.into_iter().map(escape).collect::<Vec<_>>().join(",")
}

/// Split one line into unescaped values.
///
/// A `"` toggles quoting; inside quotes `""` is a literal quote. Commas
/// outside quotes separate values.
pub fn parse_line(line: &str) -> Vec<String> {
  let mut values = Vec::new();
  let mut current = String::new();
  let mut quoted = false;
  let mut chars = line.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '"' if quoted && chars.peek() == Some(&'"') => {
        current.push('"');
        chars.next();
      }
      '"' => quoted = !quoted,
      ',' if !quoted => values.push(std::mem::take(&mut current)),
      c => current.push(c),
    }
  }
  values.push(current);
  values
}

/// The unescaped first value of a line.
pub fn first_value(line: &str) -> String {
  parse_line(line).into_iter().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_line_handles_quotes_and_commas() {
    assert_eq!(parse_line(r#""a","b,c","d""e""#), vec!["a", "b,c", "d\"e"]);
  }

  #[test]
  fn parse_line_reads_unquoted_and_empty_values() {
    assert_eq!(parse_line("7,2024-05-01,,x"), vec!["7", "2024-05-01", "", "x"]);
    assert_eq!(parse_line(""), vec![""]);
  }

  #[test]
  fn escape_keeps_one_record_per_line() {
    assert_eq!(escape("say \"hi\""), r#""say ""hi""""#);
    assert_eq!(escape("two\r\nlines"), "\"two  lines\"");
  }

  #[test]
  fn formatted_row_parses_back() {
    let values = ["1", "a,b", "quote \"q\"", ""];
    let line = format_row(values);
    assert_eq!(parse_line(&line), values);
  }

  #[test]
  fn header_is_unquoted_column_list() {
    let header = header_line();
    assert!(header.starts_with("ID,Date,Style Category,Type,Source,"));
    assert!(header.ends_with(",Complexity,Notes"));
    assert_eq!(parse_line(&header).len(), Column::ALL.len());
  }

  #[test]
  fn first_value_is_unescaped() {
    assert_eq!(first_value(r#""12","x""#), "12");
    assert_eq!(first_value("12,x"), "12");
  }
}
