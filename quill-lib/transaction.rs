//! Edit plans applied to a document as one undoable step.
//!
//! Every engine operation computes its whole effect up front as a
//! [`Transaction`]: an ordered list of non-overlapping character-range
//! replacements, plus an optional cursor target. The host applies the
//! transaction atomically, so each keystroke handler contributes exactly
//! one undo step no matter how many ranges it touches.
//!
//! ```
//! use ropey::Rope;
//! use quill_lib::transaction::Transaction;
//!
//! let mut doc = Rope::from("hello world");
//! let tx = Transaction::change(&doc, [(6, 11, Some("rust".into()))]).unwrap();
//! tx.apply(&mut doc).unwrap();
//! assert_eq!(doc, "hello rust");
//! ```

use ropey::Rope;
use smallvec::SmallVec;
use thiserror::Error;

use crate::Tendril;

pub type Result<T> = std::result::Result<T, TransactionError>;

/// (from, to) replacement. `None` erases the range, `Some` replaces it.
pub type Change = (usize, usize, Option<Tendril>);

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionError {
  #[error("transaction length mismatch: expected {expected}, got {actual}")]
  LengthMismatch { expected: usize, actual: usize },
  #[error("invalid change range: start {from} is after end {to}")]
  InvalidRange { from: usize, to: usize },
  #[error("change range {from}..{to} is out of bounds for document length {len}")]
  RangeOutOfBounds {
    from: usize,
    to:   usize,
    len:  usize,
  },
  #[error("change range starting at {from} overlaps previous end {prev_end}")]
  OverlappingRange { prev_end: usize, from: usize },
}

/// An atomic set of replacements against a document of a known length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
  changes: SmallVec<[Change; 2]>,
  len:     usize,
  cursor:  Option<usize>,
}

impl Transaction {
  /// Builds a transaction from `(from, to, replacement)` tuples.
  ///
  /// Changes must be sorted by position and must not overlap; every range
  /// must lie inside `doc`.
  pub fn change(doc: &Rope, changes: impl IntoIterator<Item = Change>) -> Result<Self> {
    let len = doc.len_chars();
    let mut out: SmallVec<[Change; 2]> = SmallVec::new();
    let mut prev_end = 0;
    let mut first = true;

    for (from, to, text) in changes {
      if from > to {
        return Err(TransactionError::InvalidRange { from, to });
      }
      if to > len {
        return Err(TransactionError::RangeOutOfBounds { from, to, len });
      }
      if !first && from < prev_end {
        return Err(TransactionError::OverlappingRange { prev_end, from });
      }
      first = false;
      prev_end = to;
      out.push((from, to, text));
    }

    Ok(Self {
      changes: out,
      len,
      cursor: None,
    })
  }

  /// Convenience for a single insertion.
  pub fn insert(doc: &Rope, pos: usize, text: Tendril) -> Result<Self> {
    Self::change(doc, [(pos, pos, Some(text))])
  }

  pub fn with_cursor(mut self, cursor: usize) -> Self {
    self.cursor = Some(cursor);
    self
  }

  /// Cursor position after applying, when the operation decided one.
  pub fn cursor(&self) -> Option<usize> {
    self.cursor
  }

  pub fn changes(&self) -> &[Change] {
    &self.changes
  }

  pub fn is_empty(&self) -> bool {
    self.changes.is_empty()
  }

  /// Applies every change to `doc`.
  ///
  /// `doc` must be the same length the transaction was built against.
  pub fn apply(&self, doc: &mut Rope) -> Result<()> {
    if doc.len_chars() != self.len {
      return Err(TransactionError::LengthMismatch {
        expected: self.len,
        actual:   doc.len_chars(),
      });
    }

    // Back to front so earlier positions stay valid.
    for (from, to, text) in self.changes.iter().rev() {
      if from != to {
        doc.remove(*from..*to);
      }
      if let Some(text) = text {
        doc.insert(*from, text);
      }
    }
    Ok(())
  }

  /// Maps a pre-apply position into the post-apply document.
  ///
  /// Positions inside a replaced range land after its replacement text;
  /// insertions at the position itself push it right.
  pub fn map_pos(&self, pos: usize) -> usize {
    let mut delta = 0isize;
    for (from, to, text) in &self.changes {
      let ins = text.as_ref().map_or(0, |t| t.chars().count());
      if pos < *from {
        break;
      }
      if pos < *to {
        return (*from as isize + delta) as usize + ins;
      }
      delta += ins as isize - (*to - *from) as isize;
    }
    (pos as isize + delta) as usize
  }

  /// Builds the inverse transaction, in post-apply coordinates.
  ///
  /// `original` must be the document the transaction was built against.
  pub fn invert(&self, original: &Rope) -> Result<Transaction> {
    if original.len_chars() != self.len {
      return Err(TransactionError::LengthMismatch {
        expected: self.len,
        actual:   original.len_chars(),
      });
    }

    let mut inverse: SmallVec<[Change; 2]> = SmallVec::new();
    let mut delta = 0isize;
    for (from, to, text) in &self.changes {
      let ins = text.as_ref().map_or(0, |t| t.chars().count());
      let new_from = (*from as isize + delta) as usize;
      let removed = original.slice(*from..*to);
      let replacement = if from == to {
        None
      } else {
        Some(Tendril::from(removed.to_string().as_str()))
      };
      inverse.push((new_from, new_from + ins, replacement));
      delta += ins as isize - (*to - *from) as isize;
    }

    let new_len = (self.len as isize + delta) as usize;
    Ok(Transaction {
      changes: inverse,
      len:     new_len,
      cursor:  None,
    })
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn apply_multiple_changes() {
    let mut doc = Rope::from("one two three");
    let tx = Transaction::change(&doc, [
      (0, 3, Some("1".into())),
      (4, 7, None),
      (8, 8, Some("x".into())),
    ])
    .unwrap();
    tx.apply(&mut doc).unwrap();
    // the untouched spaces at 3 and 7 both survive
    assert_eq!(doc, "1  xthree");
  }

  #[test]
  fn rejects_overlap_and_bad_ranges() {
    let doc = Rope::from("abcdef");
    assert_eq!(
      Transaction::change(&doc, [(3, 1, None)]),
      Err(TransactionError::InvalidRange { from: 3, to: 1 })
    );
    assert_eq!(
      Transaction::change(&doc, [(0, 99, None)]),
      Err(TransactionError::RangeOutOfBounds {
        from: 0,
        to:   99,
        len:  6,
      })
    );
    assert_eq!(
      Transaction::change(&doc, [(0, 3, None), (2, 4, None)]),
      Err(TransactionError::OverlappingRange { prev_end: 3, from: 2 })
    );
  }

  #[test]
  fn apply_checks_length() {
    let doc = Rope::from("abc");
    let tx = Transaction::insert(&doc, 0, "x".into()).unwrap();
    let mut other = Rope::from("abcdef");
    assert_eq!(
      tx.apply(&mut other),
      Err(TransactionError::LengthMismatch {
        expected: 3,
        actual:   6,
      })
    );
  }

  #[test]
  fn map_pos_through_insert_and_delete() {
    let doc = Rope::from("abcdef");
    let tx = Transaction::change(&doc, [(1, 1, Some("xx".into())), (3, 5, None)]).unwrap();

    assert_eq!(tx.map_pos(0), 0);
    // insertion at the position pushes it right
    assert_eq!(tx.map_pos(1), 3);
    assert_eq!(tx.map_pos(2), 4);
    // inside the deleted range collapses to its start
    assert_eq!(tx.map_pos(4), 5);
    assert_eq!(tx.map_pos(6), 6);
  }

  #[test]
  fn invert_round_trips() {
    let original = Rope::from("fn main() {}");
    let tx = Transaction::change(&original, [
      (3, 7, Some("start".into())),
      (11, 12, None),
    ])
    .unwrap();

    let inverse = tx.invert(&original).unwrap();
    let mut doc = original.clone();
    tx.apply(&mut doc).unwrap();
    assert_eq!(doc, "fn start() {");
    inverse.apply(&mut doc).unwrap();
    assert_eq!(doc, original);
  }
}
