use std::ops::{
  Add,
  AddAssign,
};

use ropey::RopeSlice;

/// This is a single point in a text buffer.
/// 0-indexed as all things should be.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
  pub row: usize,
  pub col: usize,
}

impl AddAssign for Position {
  fn add_assign(&mut self, rhs: Self) {
    self.row += rhs.row;
    self.col += rhs.col;
  }
}

impl Add for Position {
  type Output = Position;

  fn add(mut self, rhs: Self) -> Self::Output {
    self += rhs;
    self
  }
}

impl Position {
  pub fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn zero() -> Self {
    Self { row: 0, col: 0 }
  }
}

impl From<(usize, usize)> for Position {
  fn from(value: (usize, usize)) -> Self {
    Position::new(value.0, value.1)
  }
}

/// Converts a character index into a `Position`, clamped to the buffer.
pub fn coords_at_pos(text: RopeSlice, pos: usize) -> Position {
  let pos = pos.min(text.len_chars());
  let row = text.char_to_line(pos);
  let col = pos - text.line_to_char(row);
  Position::new(row, col)
}

/// Converts a `(row, col)` pair to a character index.
///
/// If `row` exceeds the number of lines, the last line is used.
/// If `col` exceeds the number of characters on the line, the line end is
/// used. The result always denotes a valid location.
pub fn char_idx_at_coords(text: RopeSlice, coords: Position) -> usize {
  let row = coords.row.min(text.len_lines().saturating_sub(1));
  let line_start = text.line_to_char(row);
  let line_end = if row + 1 < text.len_lines() {
    text.line_to_char(row + 1)
  } else {
    text.len_chars()
  };
  (line_start + coords.col).min(line_end)
}

/// A selected span of characters, `start <= end`, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
  pub start: usize,
  pub end:   usize,
}

impl Span {
  pub fn new(start: usize, end: usize) -> Self {
    if start <= end {
      Self { start, end }
    } else {
      Self {
        start: end,
        end:   start,
      }
    }
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  /// The lines touched by this span, both ends inclusive.
  pub fn line_range(&self, text: RopeSlice) -> (usize, usize) {
    (
      text.char_to_line(self.start.min(text.len_chars())),
      text.char_to_line(self.end.min(text.len_chars())),
    )
  }
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  #[test]
  fn coords_round_trip() {
    let doc = Rope::from("ab\ncdef\n");
    let text = doc.slice(..);

    assert_eq!(coords_at_pos(text, 0), Position::zero());
    assert_eq!(coords_at_pos(text, 4), Position::new(1, 1));
    assert_eq!(char_idx_at_coords(text, Position::new(1, 1)), 4);
  }

  #[test]
  fn coords_are_clamped() {
    let doc = Rope::from("ab\ncd");
    let text = doc.slice(..);

    // past the end of a line
    assert_eq!(char_idx_at_coords(text, Position::new(0, 99)), 3);
    // past the last line
    assert_eq!(char_idx_at_coords(text, Position::new(99, 0)), 3);
    assert_eq!(coords_at_pos(text, 999), Position::new(1, 2));
  }

  #[test]
  fn span_normalizes_order() {
    let span = Span::new(7, 3);
    assert_eq!(span.start, 3);
    assert_eq!(span.end, 7);
  }

  #[test]
  fn span_line_range() {
    let doc = Rope::from("ab\ncd\nef\n");
    let span = Span::new(1, 7);
    assert_eq!(span.line_range(doc.slice(..)), (0, 2));
  }
}
