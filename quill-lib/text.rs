//! Line-level helpers shared by the indentation engine.

use std::borrow::Cow;

use quill_core::{
  chars::char_is_blank,
  line_ending::line_end_char_index,
};
use ropey::RopeSlice;

/// Char index of the first character of `line`.
#[inline]
pub fn line_start(text: RopeSlice, line: usize) -> usize {
  text.line_to_char(line)
}

/// Char index one past the last content character of `line` (before its
/// terminator).
#[inline]
pub fn line_end(text: RopeSlice, line: usize) -> usize {
  line_end_char_index(&text, line)
}

/// Char index just past the leading space/tab run of `line`.
pub fn tabs_end(text: RopeSlice, line: usize) -> usize {
  let end = line_end(text, line);
  let mut idx = line_start(text, line);
  while idx < end && char_is_blank(text.char(idx)) {
    idx += 1;
  }
  idx
}

/// The leading space/tab run of `line`.
pub fn leading_blanks(text: RopeSlice, line: usize) -> String {
  text
    .slice(line_start(text, line)..tabs_end(text, line))
    .to_string()
}

/// `line`'s text without its terminator.
pub fn line_str(text: RopeSlice, line: usize) -> Cow<'_, str> {
  Cow::from(text.slice(line_start(text, line)..line_end(text, line)))
}

/// Whether `line` holds nothing but spaces/tabs (or nothing at all).
pub fn line_is_blank(text: RopeSlice, line: usize) -> bool {
  tabs_end(text, line) == line_end(text, line)
}

/// Whether `line` has zero content characters.
pub fn line_is_empty(text: RopeSlice, line: usize) -> bool {
  line_start(text, line) == line_end(text, line)
}

/// Whether `pos` is the first character of its line (or the end of a
/// document whose last line is empty).
pub fn is_line_start(text: RopeSlice, pos: usize) -> bool {
  pos == text.line_to_char(text.char_to_line(pos.min(text.len_chars())))
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  #[test]
  fn tabs_end_stops_at_content_or_line_end() {
    let doc = Rope::from("  ab\n\t\t\nxy\n");
    let text = doc.slice(..);

    assert_eq!(tabs_end(text, 0), 2);
    assert_eq!(leading_blanks(text, 0), "  ");
    // all-blank line: the run ends at the line end, not the newline
    assert_eq!(tabs_end(text, 1), 7);
    assert!(line_is_blank(text, 1));
    assert!(!line_is_empty(text, 1));
    assert_eq!(tabs_end(text, 2), 8);
    assert_eq!(leading_blanks(text, 2), "");
  }

  #[test]
  fn line_str_strips_terminator() {
    let doc = Rope::from("if (x) {\n}\n");
    let text = doc.slice(..);
    assert_eq!(line_str(text, 0), "if (x) {");
    assert_eq!(line_str(text, 1), "}");
  }

  #[test]
  fn line_start_detection() {
    let doc = Rope::from("ab\ncd");
    let text = doc.slice(..);
    assert!(is_line_start(text, 0));
    assert!(is_line_start(text, 3));
    assert!(!is_line_start(text, 1));
    assert!(!is_line_start(text, 5));

    let doc = Rope::from("ab\n");
    assert!(is_line_start(doc.slice(..), 3));
  }
}
