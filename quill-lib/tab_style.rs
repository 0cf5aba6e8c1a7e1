//! Indentation unit (character and width) and its detection from buffer
//! contents.

use std::{
  collections::BTreeMap,
  num::NonZeroUsize,
};

use ropey::RopeSlice;
use serde::Deserialize;

use crate::{
  language::Language,
  text::is_line_start,
};
use quill_core::chars::{
  char_is_blank,
  char_is_line_ending,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabChar {
  Space,
  Tab,
}

impl TabChar {
  pub fn as_char(&self) -> char {
    match self {
      TabChar::Space => ' ',
      TabChar::Tab => '\t',
    }
  }
}

/// One indentation level: which character, repeated how many times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabStyle {
  pub character: TabChar,
  pub width:     NonZeroUsize,
}

impl Default for TabStyle {
  fn default() -> Self {
    Self {
      character: TabChar::Space,
      width:     const { NonZeroUsize::new(2).unwrap() },
    }
  }
}

impl TabStyle {
  pub fn new(character: TabChar, width: NonZeroUsize) -> Self {
    Self { character, width }
  }

  pub fn tab_char(&self) -> char {
    self.character.as_char()
  }

  pub fn width(&self) -> usize {
    self.width.get()
  }

  /// One level of indentation as text.
  pub fn unit(&self) -> String {
    std::iter::repeat(self.tab_char()).take(self.width()).collect()
  }
}

/// Guesses the buffer's indentation style from its contents.
///
/// Bracket languages are walked structurally: only indentation on lines
/// following an opening `{` votes, label and preprocessor lines abstain,
/// and closing braces unwind one level. Other languages vote with every
/// change of leading whitespace outside strings and parentheses. Returns
/// `None` when the buffer gives no evidence either way.
pub fn detect(text: RopeSlice, language: &Language) -> Option<TabStyle> {
  let (chars, sizes) = if language.uses_bracket_heuristics() {
    bracket_walk(text)
  } else {
    plain_walk(text)
  };

  let character = match winner(&chars)? {
    '\t' => TabChar::Tab,
    _ => TabChar::Space,
  };
  let width = NonZeroUsize::new(winner(&sizes)?)?;
  Some(TabStyle { character, width })
}

type Votes<K> = BTreeMap<K, usize>;

fn winner<K: Copy + Ord>(votes: &Votes<K>) -> Option<K> {
  let mut best: Option<(K, usize)> = None;
  for (&key, &count) in votes {
    if best.is_none_or(|(_, c)| count > c) {
      best = Some((key, count));
    }
  }
  best.map(|(key, _)| key)
}

fn escaped(text: RopeSlice, idx: usize) -> bool {
  idx >= 1
    && text.char(idx - 1) == '\\'
    && !(idx >= 2 && text.char(idx - 2) == '\\')
}

fn bracket_walk(text: RopeSlice) -> (Votes<char>, Votes<usize>) {
  let len = text.len_chars();
  let mut tab_chars: Votes<char> = BTreeMap::new();
  let mut tab_sizes: Votes<usize> = BTreeMap::new();

  let mut tab_count: i64 = -1;
  let mut last_tab_count: i64 = 0;
  let mut last_tab_diff: i64 = -1;
  let mut last_char = '\0';
  let mut bracket_last_line = false;
  let mut line_comment = false;
  let mut block_comment = false;
  let mut single_quoted = false;
  let mut double_quoted = false;

  let mut i = 0;
  while i < len {
    let ch = text.char(i);

    if is_line_start(text, i) {
      line_comment = false;
      single_quoted = false;
      double_quoted = false;
      tab_count = 0;
      bracket_last_line = last_char == '{';
    }

    if bracket_last_line && tab_count != -1 {
      if char_is_blank(ch) {
        *tab_chars.entry(ch).or_insert(0) += 1;
        tab_count += 1;
        i += 1;
        continue;
      }

      // First non-blank of a line that follows a `{` line. Labels and
      // preprocessor lines do not follow block indentation, so skip
      // them without recording a vote.
      let line = text.char_to_line(i);
      let line_end = crate::text::line_end(text, line);
      let mut last_line_char = '\0';
      let mut j = i;
      while j < line_end {
        let c = text.char(j);
        if c == '(' {
          break;
        }
        if !char_is_blank(c) {
          last_line_char = c;
        }
        j += 1;
      }
      if last_line_char == ':' || ch == '#' {
        i = if line + 1 < text.len_lines() {
          text.line_to_char(line + 1)
        } else {
          len
        };
        continue;
      }
      if i < line_end {
        if tab_count != last_tab_count {
          let diff = (tab_count - last_tab_count).abs();
          *tab_sizes.entry(diff as usize).or_insert(0) += 1;
          last_tab_diff = diff;
        }
        last_tab_count = tab_count;
        last_char = '\0';
      }
    }

    let quoted = single_quoted || double_quoted;
    let in_comment = line_comment || block_comment;
    if block_comment {
      if ch == '*' && i + 1 < len && text.char(i + 1) == '/' {
        block_comment = false;
        i += 2;
        continue;
      }
    } else if !line_comment {
      if !single_quoted && ch == '"' && !escaped(text, i) {
        double_quoted = !double_quoted;
      } else if !double_quoted && ch == '\'' && !escaped(text, i) {
        single_quoted = !single_quoted;
      } else if !quoted && ch == '/' && i + 1 < len {
        match text.char(i + 1) {
          '/' => line_comment = true,
          '*' => block_comment = true,
          _ => {}
        }
      }
    }

    let plain = !in_comment && !quoted;
    if plain && ch == '}' && tab_count != -1 && last_tab_diff != -1 {
      last_tab_count -= last_tab_diff;
    }
    if plain && !char_is_blank(ch) && !char_is_line_ending(ch) {
      last_char = ch;
    }
    if !char_is_blank(ch) {
      tab_count = -1;
    }

    i += 1;
  }

  (tab_chars, tab_sizes)
}

fn plain_walk(text: RopeSlice) -> (Votes<char>, Votes<usize>) {
  let len = text.len_chars();
  let mut tab_chars: Votes<char> = BTreeMap::new();
  let mut tab_sizes: Votes<usize> = BTreeMap::new();

  let mut tab_count: i64 = -1;
  let mut last_tab_count: i64 = 0;
  let mut para_count: i64 = 0;
  let mut single_quoted = false;
  let mut double_quoted = false;

  for i in 0..len {
    let ch = text.char(i);

    if is_line_start(text, i) {
      tab_count = 0;
    }

    let quoted = single_quoted || double_quoted;
    if tab_count != -1 && para_count == 0 && !quoted {
      if char_is_blank(ch) {
        *tab_chars.entry(ch).or_insert(0) += 1;
        tab_count += 1;
        continue;
      }
      if !char_is_line_ending(ch) {
        if tab_count != last_tab_count {
          let diff = (tab_count - last_tab_count).abs();
          *tab_sizes.entry(diff as usize).or_insert(0) += 1;
        }
        last_tab_count = tab_count;
      }
    }

    if !single_quoted && ch == '"' && !escaped(text, i) {
      double_quoted = !double_quoted;
    } else if !double_quoted && ch == '\'' && !escaped(text, i) {
      single_quoted = !single_quoted;
    } else if !quoted {
      match ch {
        '(' => para_count += 1,
        ')' => para_count -= 1,
        _ => {}
      }
    }

    if !char_is_blank(ch) {
      tab_count = -1;
    }
  }

  (tab_chars, tab_sizes)
}
