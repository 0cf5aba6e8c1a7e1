use std::borrow::Cow;

use ropey::RopeSlice;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum LineEnding {
  /// CarriageReturn followed by LineFeed.
  Crlf,

  /// U+000A -- LineFeed
  LF,

  /// U+000D -- CarriageReturn
  CR,

  /// U+000B -- VerticalTab
  VT,

  /// U+000C -- FormFeed
  FF,

  /// U+0085 -- NextLine
  Nel,

  /// U+2028 -- Line Separator
  LS,

  /// U+2029 -- ParagraphSeparator
  PS,
}

impl LineEnding {
  #[inline]
  pub const fn len_chars(&self) -> usize {
    match self {
      Self::Crlf => 2,
      _ => 1,
    }
  }

  #[inline]
  pub const fn from_char(ch: char) -> Option<LineEnding> {
    match ch {
      '\u{000A}' => Some(LineEnding::LF),
      '\u{000B}' => Some(LineEnding::VT),
      '\u{000C}' => Some(LineEnding::FF),
      '\u{000D}' => Some(LineEnding::CR),
      '\u{0085}' => Some(LineEnding::Nel),
      '\u{2028}' => Some(LineEnding::LS),
      '\u{2029}' => Some(LineEnding::PS),
      _ => None,
    }
  }
}

/// Replaces every carriage-return variant (`\r\n` and lone `\r`) with `\n`.
///
/// Pasted text arrives with whatever line endings the source application
/// used; the engine normalizes before measuring indentation.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
  if !text.contains('\r') {
    return Cow::Borrowed(text);
  }

  let mut out = String::with_capacity(text.len());
  let mut chars = text.chars().peekable();
  while let Some(ch) = chars.next() {
    if ch == '\r' {
      if chars.peek() == Some(&'\n') {
        chars.next();
      }
      out.push('\n');
    } else {
      out.push(ch);
    }
  }
  Cow::Owned(out)
}

/// Char index one past the last content character of `line`, i.e. the
/// position of the line's terminator (or the slice end for the final line).
pub fn line_end_char_index(slice: &RopeSlice, line: usize) -> usize {
  let start = slice.line_to_char(line);
  start + slice.line(line).len_chars()
    - get_line_ending(&slice.line(line)).map_or(0, |le| le.len_chars())
}

/// The line ending of `line`, if it has one.
pub fn get_line_ending(line: &RopeSlice) -> Option<LineEnding> {
  let len = line.len_chars();
  if len == 0 {
    return None;
  }
  let last = line.char(len - 1);
  if last == '\n' && len >= 2 && line.char(len - 2) == '\r' {
    return Some(LineEnding::Crlf);
  }
  LineEnding::from_char(last)
}
