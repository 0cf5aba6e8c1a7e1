//! Line-comment toggling.

use ropey::Rope;

use crate::{
  Tendril,
  position::Span,
  text::{
    line_end,
    line_start,
    tabs_end,
  },
  transaction::{
    Change,
    Result,
    Transaction,
  },
};

/// What a toggle over a line range found out.
#[derive(Debug, PartialEq, Eq)]
struct CommentState {
  /// Counted lines, each with the index of its first non-blank char.
  lines:           Vec<(usize, usize)>,
  /// Every counted line already starts with the token.
  all_commented:   bool,
  /// Every counted commented line has a space right after the token.
  extra_spaces:    bool,
  /// Smallest leading-blank run among counted lines, in chars.
  min_indentation: usize,
}

fn find_line_comment(text: ropey::RopeSlice, first: usize, last: usize, token: &str) -> CommentState {
  let token_chars: Vec<char> = token.chars().collect();
  let mut lines = Vec::new();
  let mut all_commented = true;
  let mut extra_spaces = true;
  let mut min_indentation = usize::MAX;

  for line in first..=last {
    let ls = line_start(text, line);
    let le = line_end(text, line);
    let te = tabs_end(text, line);
    // Lines without content do not count and are never touched.
    if te == le {
      continue;
    }

    let commented = token_chars
      .iter()
      .enumerate()
      .all(|(i, &ch)| te + i < le && text.char(te + i) == ch);
    let after_token = te + token_chars.len();
    let extra_space = commented && after_token < le && text.char(after_token) == ' ';

    lines.push((line, te));
    all_commented &= commented;
    extra_spaces &= extra_space;
    min_indentation = min_indentation.min(te - ls);
  }

  CommentState {
    lines,
    all_commented,
    extra_spaces,
    min_indentation,
  }
}

/// Toggles the line comment `token` on every line the span touches.
///
/// A line whose first column the span's exclusive end merely touches is
/// left out. If every counted line is already commented the token is
/// removed (plus one space when all of them carry it), otherwise
/// `token + " "` is inserted at the counted lines' shared indentation
/// column. `Ok(None)` when the range holds no content lines.
pub fn toggle_line_comments(doc: &Rope, span: Span, token: &str) -> Result<Option<Transaction>> {
  let text = doc.slice(..);
  let (first, mut last) = span.line_range(text);
  if first != last && span.end == line_start(text, last) {
    last -= 1;
  }

  let state = find_line_comment(text, first, last, token);
  if state.lines.is_empty() {
    return Ok(None);
  }

  let token_len = token.chars().count();
  let mut changes: Vec<Change> = Vec::new();
  if state.all_commented {
    let extra = usize::from(state.extra_spaces);
    for &(_, token_start) in &state.lines {
      changes.push((token_start, token_start + token_len + extra, None));
    }
  } else {
    let insert = format!("{token} ");
    for &(line, _) in &state.lines {
      let at = line_start(text, line) + state.min_indentation;
      changes.push((at, at, Some(Tendril::from(insert.as_str()))));
    }
  }

  Ok(Some(Transaction::change(doc, changes)?))
}
