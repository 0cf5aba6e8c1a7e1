//! Lexical classification supplied by the host's syntax highlighter.
//!
//! The engine never computes highlighting itself; it only asks whether a
//! position sits inside a comment or a string so structural scans can skip
//! those characters. Highlighting is asynchronous on the host side, so the
//! answer is queried fresh for every character and never cached here.

use std::ops::Range;

/// Classification of a single buffer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexicalContext {
  #[default]
  Plain,
  Comment,
  String,
}

impl LexicalContext {
  #[inline]
  pub fn is_plain(&self) -> bool {
    matches!(self, LexicalContext::Plain)
  }
}

/// Answers "what is this character, lexically?" for the engine.
///
/// Implemented by the embedding editor on top of its highlighter.
pub trait ContextOracle {
  fn context_at(&self, char_idx: usize) -> LexicalContext;
}

/// Oracle for hosts without a highlighter: everything is plain code.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainContext;

impl ContextOracle for PlainContext {
  fn context_at(&self, _char_idx: usize) -> LexicalContext {
    LexicalContext::Plain
  }
}

/// Span-table oracle.
///
/// Positions not covered by any span are plain. Useful for hosts that
/// already track comment/string regions, and for tests.
#[derive(Debug, Default, Clone)]
pub struct SpanContext {
  spans: Vec<(Range<usize>, LexicalContext)>,
}

impl SpanContext {
  pub fn new(spans: impl IntoIterator<Item = (Range<usize>, LexicalContext)>) -> Self {
    Self {
      spans: spans.into_iter().collect(),
    }
  }
}

impl ContextOracle for SpanContext {
  fn context_at(&self, char_idx: usize) -> LexicalContext {
    self
      .spans
      .iter()
      .find(|(range, _)| range.contains(&char_idx))
      .map(|(_, context)| *context)
      .unwrap_or_default()
  }
}
