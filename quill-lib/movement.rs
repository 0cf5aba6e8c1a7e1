//! Policy-independent cursor movement and whitespace-eating edits.
//!
//! The movement functions return the new cursor index; selection extension
//! is the host's concern (it keeps its own anchor). The backspace/delete
//! helpers return a [`Transaction`] like the indentation handlers do, with
//! `Ok(None)` meaning "use the default single-character behavior".

use ropey::{
  Rope,
  RopeSlice,
};

use crate::{
  position::Span,
  text::{
    is_line_start,
    line_end,
    line_start,
    tabs_end,
  },
  transaction::{
    Result,
    Transaction,
  },
};
use quill_core::chars::{
  char_is_blank,
  char_is_line_ending,
};

/// Ctrl+Down: the start of the blank line ending the current paragraph,
/// or the last line's start when no blank line follows.
pub fn paragraph_forward(text: RopeSlice, cursor: usize) -> usize {
  let len = text.len_chars();
  let mut pos = line_start(text, text.char_to_line(cursor.min(len)));
  let mut empty_line = false;
  let mut text_found = false;

  while pos < len {
    let ch = text.char(pos);
    let ends = char_is_line_ending(ch);
    if is_line_start(text, pos) {
      empty_line = true;
    }
    if !ends && !char_is_blank(ch) {
      empty_line = false;
      text_found = true;
    }
    if empty_line && text_found && ends {
      break;
    }
    pos += 1;
  }
  line_start(text, text.char_to_line(pos.min(len)))
}

/// Ctrl+Up: the first line of the paragraph above the preceding blank
/// line, or the document start.
pub fn paragraph_backward(text: RopeSlice, cursor: usize) -> usize {
  let len = text.len_chars();
  let ls = line_start(text, text.char_to_line(cursor.min(len)));
  if ls == 0 {
    return 0;
  }
  let mut pos = ls - 1;
  let mut empty_line = false;
  let mut text_found = false;

  while pos > 0 {
    let ch = text.char(pos);
    let ends = char_is_line_ending(ch);
    if ends {
      empty_line = true;
    }
    if !ends && !char_is_blank(ch) {
      empty_line = false;
      text_found = true;
    }
    if empty_line && text_found && is_line_start(text, pos) {
      break;
    }
    pos -= 1;
  }
  if empty_line {
    // Land on the first line after the blank separator.
    line_end(text, text.char_to_line(pos)) + 1
  } else {
    pos
  }
}

/// Home: first non-blank column, or true line start when already there.
pub fn smart_home(text: RopeSlice, cursor: usize) -> usize {
  let line = text.char_to_line(cursor.min(text.len_chars()));
  let first_non_blank = tabs_end(text, line);
  if cursor != first_non_blank {
    first_non_blank
  } else {
    line_start(text, line)
  }
}

/// End: one past the last non-blank column, or true line end when
/// already there.
pub fn smart_end(text: RopeSlice, cursor: usize) -> usize {
  let line = text.char_to_line(cursor.min(text.len_chars()));
  let ls = line_start(text, line);
  let le = line_end(text, line);
  let mut last_non_blank = le;
  while last_non_blank > ls && char_is_blank(text.char(last_non_blank - 1)) {
    last_non_blank -= 1;
  }
  if cursor != last_non_blank {
    last_non_blank
  } else {
    le
  }
}

/// Backspace with nothing but blanks between line start and cursor:
/// erase the whole run as one step.
pub fn smart_backspace(
  doc: &Rope,
  cursor: usize,
  selection: Option<Span>,
) -> Result<Option<Transaction>> {
  if selection.is_some_and(|span| !span.is_empty()) {
    return Ok(None);
  }
  let text = doc.slice(..);
  let line = text.char_to_line(cursor.min(text.len_chars()));
  let ls = line_start(text, line);
  if cursor == ls || !text.slice(ls..cursor).chars().all(char_is_blank) {
    return Ok(None);
  }
  let tx = Transaction::change(doc, [(ls, cursor, None)])?;
  Ok(Some(tx.with_cursor(ls)))
}

/// Delete with only blanks between cursor and line end: collapse the
/// blanks, the line break and the next line's indentation as one step.
pub fn smart_delete(
  doc: &Rope,
  cursor: usize,
  selection: Option<Span>,
) -> Result<Option<Transaction>> {
  if selection.is_some_and(|span| !span.is_empty()) {
    return Ok(None);
  }
  let text = doc.slice(..);
  let line = text.char_to_line(cursor.min(text.len_chars()));
  let ls = line_start(text, line);
  let le = line_end(text, line);
  if line + 1 >= text.len_lines() || le == text.len_chars() {
    return Ok(None);
  }
  if !text.slice(cursor..le).chars().all(char_is_blank) {
    return Ok(None);
  }
  let next_start = text.line_to_char(line + 1);
  let end = if cursor != ls {
    tabs_end(text, line + 1)
  } else {
    next_start
  };
  let tx = Transaction::change(doc, [(cursor, end, None)])?;
  Ok(Some(tx.with_cursor(cursor)))
}
