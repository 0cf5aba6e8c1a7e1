use crate::line_ending::LineEnding;

/// Space or horizontal tab.
///
/// Indentation decisions only ever reason about these two characters; wider
/// Unicode whitespace never participates in leading-blank runs.
#[inline]
pub fn char_is_blank(ch: char) -> bool {
  ch == ' ' || ch == '\t'
}

/// The token alphabet: ASCII letters, digits and underscore.
#[inline]
pub fn char_is_identifier(ch: char) -> bool {
  ch.is_ascii_alphanumeric() || ch == '_'
}

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  LineEnding::from_char(ch).is_some()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn blanks_are_space_and_tab_only() {
    assert!(char_is_blank(' '));
    assert!(char_is_blank('\t'));
    assert!(!char_is_blank('\n'));
    // No-break space is whitespace, but not a blank the engine indents with.
    assert!(!char_is_blank('\u{00A0}'));
  }

  #[test]
  fn identifier_chars_are_ascii() {
    assert!(char_is_identifier('a'));
    assert!(char_is_identifier('Z'));
    assert!(char_is_identifier('0'));
    assert!(char_is_identifier('_'));
    assert!(!char_is_identifier('-'));
    assert!(!char_is_identifier('é'));
  }

  #[test]
  fn line_endings() {
    assert!(char_is_line_ending('\n'));
    assert!(char_is_line_ending('\r'));
    assert!(!char_is_line_ending(' '));
  }
}
