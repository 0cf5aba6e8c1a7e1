//! Language identities and the line classifiers the indenter keys off.

use once_cell::sync::Lazy;
use regex_automata::meta::Regex;

/// How a language shapes its blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageKind {
  /// Curly-brace block structure; gets the full structural indenter.
  Bracket,
  /// Everything else; gets indentation continuation only.
  Plain,
}

static BRACKET_IDS: &[&str] = &[
  "chdr", "cpphdr", "c", "cpp", "objc", "java", "js", "ts", "proto",
  "c-sharp", "html", "cuda", "php", "rust", "swift", "go", "scala", "opencl",
];

static C_FAMILY_IDS: &[&str] = &["c", "chdr", "cpp", "cpphdr"];

/// A recognized source language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
  id:   String,
  kind: LanguageKind,
}

impl Language {
  /// Looks a language up by its identifier, e.g. `"cpp"` or `"python"`.
  ///
  /// Unknown identifiers yield a plain language with no comment token.
  pub fn from_id(id: &str) -> Self {
    let kind = if BRACKET_IDS.contains(&id) {
      LanguageKind::Bracket
    } else {
      LanguageKind::Plain
    };
    Self {
      id: id.to_owned(),
      kind,
    }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn kind(&self) -> LanguageKind {
    self.kind
  }

  pub fn is_bracket(&self) -> bool {
    self.kind == LanguageKind::Bracket
  }

  /// C and C++ sources and headers. These get the class/struct semicolon
  /// treatment when a block is completed.
  pub fn is_c_family(&self) -> bool {
    C_FAMILY_IDS.contains(&self.id.as_str())
  }

  /// Whether tab detection may use brace structure. HTML is a bracket
  /// language for editing purposes but its braces say nothing about
  /// indentation.
  pub fn uses_bracket_heuristics(&self) -> bool {
    self.is_bracket() && self.id != "html"
  }

  /// The line comment token for this language, if it has one.
  pub fn comment_token(&self) -> Option<&'static str> {
    if self.is_bracket() {
      return Some("//");
    }
    match self.id.as_str() {
      "cmake" | "makefile" | "python" | "python3" | "sh" | "perl" | "ruby"
      | "r" | "asm" | "automake" => Some("#"),
      "latex" | "matlab" | "octave" | "bibtex" => Some("%"),
      "fortran" => Some("!"),
      "pascal" => Some("//"),
      "lua" => Some("--"),
      _ => None,
    }
  }
}

static OPEN_BRACE_LINE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[ \t]*.*\{ *$").unwrap());

static NO_BRACE_STATEMENT: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[ \t]*(if|for|else if|while) *\(.*[^;}] *$").unwrap());

static BARE_ELSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*else *$").unwrap());

/// Whether `line` ends by opening a block, e.g. `if (x) {`.
///
/// `line` must not include its terminator.
pub fn open_brace_line(line: &str) -> bool {
  OPEN_BRACE_LINE.is_match(line)
}

/// Whether `line` is a braceless control statement, e.g. `if (x)` with no
/// trailing `{`, `;` or `}`.
pub fn no_brace_statement(line: &str) -> bool {
  NO_BRACE_STATEMENT.is_match(line)
}

/// Whether `line` is an `else` with nothing after it.
pub fn bare_else(line: &str) -> bool {
  BARE_ELSE.is_match(line)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn language_kinds() {
    assert!(Language::from_id("cpp").is_bracket());
    assert!(Language::from_id("rust").is_bracket());
    assert!(!Language::from_id("python").is_bracket());
    assert!(!Language::from_id("unknown-lang").is_bracket());
  }

  #[test]
  fn c_family_is_narrow() {
    assert!(Language::from_id("chdr").is_c_family());
    assert!(Language::from_id("cpphdr").is_c_family());
    assert!(!Language::from_id("java").is_c_family());
    assert!(!Language::from_id("rust").is_c_family());
  }

  #[test]
  fn html_opts_out_of_brace_heuristics() {
    assert!(Language::from_id("html").is_bracket());
    assert!(!Language::from_id("html").uses_bracket_heuristics());
    assert!(Language::from_id("c").uses_bracket_heuristics());
  }

  #[test]
  fn comment_tokens() {
    assert_eq!(Language::from_id("go").comment_token(), Some("//"));
    assert_eq!(Language::from_id("python3").comment_token(), Some("#"));
    assert_eq!(Language::from_id("matlab").comment_token(), Some("%"));
    assert_eq!(Language::from_id("fortran").comment_token(), Some("!"));
    assert_eq!(Language::from_id("lua").comment_token(), Some("--"));
    assert_eq!(Language::from_id("text"), Language::from_id("text"));
    assert_eq!(Language::from_id("text").comment_token(), None);
  }

  #[test]
  fn open_brace_lines() {
    assert!(open_brace_line("if (x) {"));
    assert!(open_brace_line("  } else { "));
    assert!(!open_brace_line("foo();"));
    assert!(!open_brace_line("if (x) { }"));
  }

  #[test]
  fn no_brace_statements() {
    assert!(no_brace_statement("  if (x)"));
    assert!(no_brace_statement("while (true) "));
    assert!(no_brace_statement("  else if (a == b)"));
    assert!(!no_brace_statement("if (x) foo();"));
    assert!(!no_brace_statement("foo(x)"));
  }

  #[test]
  fn bare_else_lines() {
    assert!(bare_else("  else"));
    assert!(bare_else("else "));
    assert!(!bare_else("else if (x)"));
    assert!(!bare_else("  } else"));
  }
}
