//! Paste reindentation.
//!
//! Multi-line pasted text keeps its relative nesting but is re-based onto
//! the destination line's indentation and the document's tab style.

use ropey::Rope;

use crate::{
  Tendril,
  position::Span,
  tab_style::TabStyle,
  text::{
    line_end,
    line_start,
    tabs_end,
  },
  transaction::{
    Result,
    Transaction,
  },
};
use quill_core::line_ending::normalize_line_endings;

/// Builds the reindented insertion for `content` at `cursor`.
///
/// Applies only when there is no selection and the cursor's line holds
/// nothing but blanks; otherwise `Ok(None)` and the host pastes verbatim.
pub fn paste(
  doc: &Rope,
  cursor: usize,
  selection: Option<Span>,
  style: &TabStyle,
  content: &str,
) -> Result<Option<Transaction>> {
  if selection.is_some_and(|span| !span.is_empty()) || content.is_empty() {
    return Ok(None);
  }

  let text = doc.slice(..);
  let line = text.char_to_line(cursor.min(text.len_chars()));
  if tabs_end(text, line) != line_end(text, line) {
    return Ok(None);
  }
  let prefix = text
    .slice(line_start(text, line)..tabs_end(text, line))
    .to_string();

  let content = normalize_line_endings(content);
  let mut lines: Vec<&str> = content.split('\n').collect();
  if content.ends_with('\n') {
    lines.pop();
  }

  let tab_char = style.tab_char();
  let leading = |line: &str| line.chars().take_while(|&ch| ch == tab_char).count();

  // The common indent to strip: the minimum leading run over non-blank
  // lines, with the first line voting only when it is indented at all.
  let mut first_has_tabs = false;
  let mut common: Option<usize> = None;
  for (idx, line) in lines.iter().copied().enumerate() {
    let tabs = leading(line);
    let blank = line.chars().all(|ch| ch == tab_char);
    if idx == 0 {
      if tabs != 0 {
        first_has_tabs = true;
        common = Some(tabs);
      }
    } else if !blank {
      common = Some(common.map_or(tabs, |min| min.min(tabs)));
    }
  }
  let common = common.unwrap_or(0);

  let mut out = String::new();
  for (idx, line) in lines.iter().copied().enumerate() {
    let own = leading(line);
    let first = idx == 0;
    let strip = if !(first && !first_has_tabs) && own < common {
      own
    } else {
      common
    };
    if first {
      // The first line continues the cursor's line, so it gets no
      // destination prefix.
      if first_has_tabs {
        out.push_str(&line[strip..]);
      } else {
        out.push_str(line);
      }
    } else {
      out.push('\n');
      out.push_str(&prefix);
      out.push_str(&line[strip..]);
    }
  }

  let cursor_after = cursor + out.chars().count();
  let tx = Transaction::insert(doc, cursor, Tendril::from(out.as_str()))?;
  Ok(Some(tx.with_cursor(cursor_after)))
}
