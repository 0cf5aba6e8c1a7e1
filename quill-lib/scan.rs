//! Structural scans over code.
//!
//! All scans walk the buffer character by character, skipping anything the
//! [`ContextOracle`] classifies as comment or string, plus the contents of
//! single-quoted character literals. Only what survives that filter counts
//! toward bracket and parenthesis balance.

use ropey::RopeSlice;

use crate::{
  context::ContextOracle,
  text::is_line_start,
};
use quill_core::chars::char_is_identifier;

/// Character filter shared by every scan.
///
/// Tracks the single-quote state across calls, so a walk must feed it
/// consecutive indices in one direction.
struct CodeWalker<'a, O: ContextOracle> {
  text:            RopeSlice<'a>,
  oracle:          &'a O,
  in_char_literal: bool,
}

impl<'a, O: ContextOracle> CodeWalker<'a, O> {
  fn new(text: RopeSlice<'a>, oracle: &'a O) -> Self {
    Self {
      text,
      oracle,
      in_char_literal: false,
    }
  }

  /// The character at `idx` if it is plain code, `None` otherwise.
  fn code_char(&mut self, idx: usize) -> Option<char> {
    if !self.oracle.context_at(idx).is_plain() {
      return None;
    }
    let ch = self.text.char(idx);
    if ch == '\'' && !self.escaped(idx) {
      self.in_char_literal = !self.in_char_literal;
      return None;
    }
    if self.in_char_literal {
      return None;
    }
    Some(ch)
  }

  fn escaped(&self, idx: usize) -> bool {
    idx >= 1
      && self.text.char(idx - 1) == '\\'
      && !(idx >= 2 && self.text.char(idx - 2) == '\\')
  }
}

/// Finds the start of the innermost expression that is closed at `pos`.
///
/// Walks backward counting `()` and `[]` balance until it reaches a line
/// start with no unmatched closers, then skips that line's leading
/// `tab_char` run. Returns `None` when no such line exists before the
/// balance settles.
pub fn find_start_of_closed_expression<O: ContextOracle>(
  text: RopeSlice,
  oracle: &O,
  pos: usize,
  tab_char: char,
) -> Option<usize> {
  let len = text.len_chars();
  let mut walker = CodeWalker::new(text, oracle);
  let mut paren: i32 = 0;
  let mut bracket: i32 = 0;
  let mut idx = pos.min(len);

  loop {
    if idx < len {
      match walker.code_char(idx) {
        Some(')') => paren += 1,
        Some(']') => bracket += 1,
        Some('(') => paren -= 1,
        Some('[') => bracket -= 1,
        _ => {}
      }
    }
    if is_line_start(text, idx) && paren <= 0 && bracket <= 0 {
      let mut start = idx;
      while start < pos && start < len && text.char(start) == tab_char {
        start += 1;
      }
      return Some(start);
    }
    if idx == 0 {
      return None;
    }
    idx -= 1;
  }
}

/// Finds the `(` or `[` left unmatched between `until` and `pos`.
///
/// Walks backward from `pos` (exclusive) down to `until` (inclusive) and
/// returns the first opener whose closer was not seen.
pub fn find_open_expression_symbol<O: ContextOracle>(
  text: RopeSlice,
  oracle: &O,
  pos: usize,
  until: usize,
) -> Option<usize> {
  let mut walker = CodeWalker::new(text, oracle);
  let mut paren: i32 = 0;
  let mut bracket: i32 = 0;
  let mut idx = pos.min(text.len_chars());

  while idx > until {
    idx -= 1;
    if let Some(ch) = walker.code_char(idx) {
      match ch {
        ')' => paren += 1,
        ']' => bracket += 1,
        '(' => paren -= 1,
        '[' => bracket -= 1,
        _ => {}
      }
      if paren < 0 || bracket < 0 {
        return Some(idx);
      }
    }
  }
  None
}

/// Finds the `}` that closes the block containing `pos`, scanning forward
/// from `pos + 1`.
pub fn find_right_bracket_forward<O: ContextOracle>(
  text: RopeSlice,
  oracle: &O,
  pos: usize,
) -> Option<usize> {
  let mut walker = CodeWalker::new(text, oracle);
  let mut depth: u32 = 0;

  for idx in (pos + 1)..text.len_chars() {
    match walker.code_char(idx) {
      Some('{') => depth += 1,
      Some('}') => {
        if depth == 0 {
          return Some(idx);
        }
        depth -= 1;
      }
      _ => {}
    }
  }
  None
}

/// Finds the `{` that opens the block containing `pos`, scanning backward
/// from `pos - 1`.
pub fn find_left_bracket_backward<O: ContextOracle>(
  text: RopeSlice,
  oracle: &O,
  pos: usize,
) -> Option<usize> {
  let mut walker = CodeWalker::new(text, oracle);
  let mut depth: u32 = 0;

  for idx in (0..pos.min(text.len_chars())).rev() {
    match walker.code_char(idx) {
      Some('}') => depth += 1,
      Some('{') => {
        if depth == 0 {
          return Some(idx);
        }
        depth -= 1;
      }
      _ => {}
    }
  }
  None
}

/// The identifier range containing `pos`, or the empty range `pos..pos`
/// when the character there is not part of an identifier.
pub fn word_range_at(text: RopeSlice, pos: usize) -> std::ops::Range<usize> {
  if pos >= text.len_chars() || !char_is_identifier(text.char(pos)) {
    return pos..pos;
  }
  let mut start = pos;
  while start > 0 && char_is_identifier(text.char(start - 1)) {
    start -= 1;
  }
  let mut end = pos + 1;
  while end < text.len_chars() && char_is_identifier(text.char(end)) {
    end += 1;
  }
  start..end
}

/// The identifier containing `pos`, or an empty string.
pub fn token_at(text: RopeSlice, pos: usize) -> String {
  text.slice(word_range_at(text, pos)).to_string()
}
