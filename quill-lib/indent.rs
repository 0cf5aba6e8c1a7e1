//! The per-keystroke indentation engine.
//!
//! Every handler inspects the buffer, computes its whole effect as one
//! [`Transaction`] and returns it with the new cursor position. `Ok(None)`
//! means the handler declined: the host performs its literal default
//! (insert the typed character, plain backspace, and so on). Nothing here
//! mutates the buffer directly.

use ropey::Rope;
use thiserror::Error;

use crate::{
  Tendril,
  config::EditorConfig,
  context::ContextOracle,
  language::{
    Language,
    bare_else,
    no_brace_statement,
    open_brace_line,
  },
  movement,
  position::Span,
  scan::{
    find_left_bracket_backward,
    find_open_expression_symbol,
    find_right_bracket_forward,
    find_start_of_closed_expression,
    token_at,
  },
  tab_style::TabStyle,
  text::{
    leading_blanks,
    line_end,
    line_is_empty,
    line_start,
    line_str,
    tabs_end,
  },
  transaction::{
    Change,
    Transaction,
    TransactionError,
  },
};
use quill_core::chars::{
  char_is_blank,
  char_is_line_ending,
};

pub type Result<T> = std::result::Result<T, IndentError>;

#[derive(Debug, Error)]
pub enum IndentError {
  #[error(transparent)]
  Transaction(#[from] TransactionError),
}

/// An input event the engine may want to handle smartly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEvent {
  Newline,
  IndentRight,
  IndentLeft,
  Backspace,
  Delete,
  OpenBrace,
  CloseBrace,
}

/// Dispatches an event to its handler.
#[allow(clippy::too_many_arguments)]
pub fn handle<O: ContextOracle>(
  event: EditEvent,
  doc: &Rope,
  oracle: &O,
  cursor: usize,
  selection: Option<Span>,
  style: &TabStyle,
  language: &Language,
  config: &EditorConfig,
) -> Result<Option<Transaction>> {
  match event {
    EditEvent::Newline => on_newline(doc, oracle, cursor, selection, style, language),
    EditEvent::IndentRight => indent_right(
      doc,
      cursor,
      selection,
      style,
      config.tab_key_indents_whole_line,
    ),
    EditEvent::IndentLeft => indent_left(doc, cursor, selection, style),
    EditEvent::Backspace => Ok(movement::smart_backspace(doc, cursor, selection)?),
    EditEvent::Delete => Ok(movement::smart_delete(doc, cursor, selection)?),
    EditEvent::OpenBrace => {
      if language.is_bracket() {
        on_open_brace(doc, oracle, cursor, selection, style)
      } else {
        Ok(None)
      }
    }
    EditEvent::CloseBrace => {
      if language.is_bracket() {
        on_close_brace(doc, oracle, cursor, selection, style)
      } else {
        Ok(None)
      }
    }
  }
}

/// The blank run surrounding the cursor, and where an Enter edit starts.
///
/// The replacement range is `erase_start..blanks_end`; when the run before
/// the cursor reaches the line start it is indentation and survives, so
/// the edit starts at the cursor instead.
struct NewlinePlan {
  erase_start: usize,
  blanks_end:  usize,
}

fn newline_plan(doc: &Rope, cursor: usize) -> NewlinePlan {
  let text = doc.slice(..);
  let line = text.char_to_line(cursor);
  let ls = line_start(text, line);
  let le = line_end(text, line);

  let mut blanks_end = cursor;
  while blanks_end < le && char_is_blank(text.char(blanks_end)) {
    blanks_end += 1;
  }
  let mut blanks_start = cursor;
  while blanks_start > ls && char_is_blank(text.char(blanks_start - 1)) {
    blanks_start -= 1;
  }
  let erase_start = if blanks_start == ls { cursor } else { blanks_start };
  NewlinePlan {
    erase_start,
    blanks_end,
  }
}

/// Enter. Picks the policy from the language; smart bracket behavior is
/// bypassed when the cursor sits inside a comment or string.
pub fn on_newline<O: ContextOracle>(
  doc: &Rope,
  oracle: &O,
  cursor: usize,
  selection: Option<Span>,
  style: &TabStyle,
  language: &Language,
) -> Result<Option<Transaction>> {
  if selection.is_some_and(|span| !span.is_empty()) {
    return Ok(None);
  }
  let in_code = cursor == 0 || oracle.context_at(cursor - 1).is_plain();
  if language.is_bracket() && in_code {
    on_newline_bracket(doc, oracle, cursor, style, language)
  } else {
    on_newline_basic(doc, cursor)
  }
}

/// Enter for non-brace languages: continue the larger of the current and
/// next line's indentation.
pub fn on_newline_basic(doc: &Rope, cursor: usize) -> Result<Option<Transaction>> {
  let text = doc.slice(..);
  let line = text.char_to_line(cursor);
  let ls = line_start(text, line);
  if cursor == ls {
    return Ok(None);
  }

  let plan = newline_plan(doc, cursor);
  let le = line_end(text, line);
  let line_tabs = if text
    .slice(ls..cursor)
    .chars()
    .all(char_is_blank)
  {
    text.slice(ls..cursor).to_string()
  } else {
    leading_blanks(text, line)
  };

  let tabs = if line + 1 < text.len_lines() && plan.blanks_end == le {
    let next_tabs = leading_blanks(text, line + 1);
    if next_tabs.chars().count() > line_tabs.chars().count() {
      next_tabs
    } else {
      line_tabs
    }
  } else {
    line_tabs
  };

  let insert = format!("\n{tabs}");
  let cursor_after = plan.erase_start + insert.chars().count();
  let tx = Transaction::change(doc, [(
    plan.erase_start,
    plan.blanks_end,
    Some(Tendril::from(insert.as_str())),
  )])?;
  Ok(Some(tx.with_cursor(cursor_after)))
}

/// Enter for brace languages.
///
/// Locates the enclosing statement, then branches on what precedes the
/// cursor: a fresh `{`, an unmatched `(`/`[`, a braceless control
/// statement, a `;` closing an implicit body, or a `:` label.
pub fn on_newline_bracket<O: ContextOracle>(
  doc: &Rope,
  oracle: &O,
  cursor: usize,
  style: &TabStyle,
  language: &Language,
) -> Result<Option<Transaction>> {
  let text = doc.slice(..);
  let len = text.len_chars();
  let line = text.char_to_line(cursor);
  let ls = line_start(text, line);
  let plan = newline_plan(doc, cursor);
  let scan_pos = plan.erase_start;
  let unit = style.unit();
  let width = style.width();

  let Some(stmt) = find_start_of_closed_expression(text, oracle, scan_pos, style.tab_char())
  else {
    return on_newline_basic(doc, cursor);
  };
  let stmt_line = text.char_to_line(stmt);
  let mut tabs = leading_blanks(text, stmt_line);

  let single = |insert: String, cursor_after: usize| -> Result<Option<Transaction>> {
    let tx = Transaction::change(doc, [(
      plan.erase_start,
      plan.blanks_end,
      Some(Tendril::from(insert.as_str())),
    )])?;
    Ok(Some(tx.with_cursor(cursor_after)))
  };

  // Cursor right after an opening brace.
  if scan_pos > 0 && text.char(scan_pos - 1) == '{' {
    let closer = find_right_bracket_forward(text, oracle, scan_pos - 1);
    let has_matching_bracket = closer.is_some_and(|pos| {
      leading_blanks(text, text.char_to_line(pos)).len() == tabs.len()
    });

    if plan.blanks_end < len && text.char(plan.blanks_end) == '}' {
      // `{|}`: open the block across three lines, cursor on the middle.
      let insert = format!("\n{tabs}{unit}\n{tabs}");
      return single(insert, plan.erase_start + 1 + tabs.chars().count() + width);
    }
    if !has_matching_bracket {
      let mut token = token_at(text, stmt);
      if token.is_empty() && language.is_c_family() && stmt_line > 0 {
        // `class X\n{` style: the statement starts on the brace's own
        // line, so look one line further up for the keyword.
        let retry = line_start(text, stmt_line) - 1;
        if let Some(above) =
          find_start_of_closed_expression(text, oracle, retry, style.tab_char())
        {
          token = token_at(text, above);
        }
      }
      let semicolon =
        language.is_c_family() && (token == "class" || token == "struct");
      let insert = format!(
        "\n{tabs}{unit}\n{tabs}}}{}",
        if semicolon { ";" } else { "" }
      );
      return single(insert, plan.erase_start + 1 + tabs.chars().count() + width);
    }
    let insert = format!("\n{tabs}{unit}");
    return single(insert, plan.erase_start + 1 + tabs.chars().count() + width);
  }

  let line_before = text.slice(ls..plan.erase_start).to_string();

  if let Some(open) = find_open_expression_symbol(text, oracle, scan_pos, stmt) {
    // Continuation: align one column past the unmatched opener.
    let open_line = text.char_to_line(open);
    let pad = open - tabs_end(text, open_line) + 1;
    tabs = format!("{}{}", leading_blanks(text, open_line), " ".repeat(pad));
  } else if no_brace_statement(&line_before) || bare_else(&line_before) {
    // Anticipate the single-statement body.
    let insert = format!("\n{tabs}{unit}");
    let cursor_after = plan.erase_start + insert.chars().count();
    return single(insert, cursor_after);
  } else if scan_pos > 0 && text.char(scan_pos - 1) == ';' {
    // A `;` may close an implicit single-statement body.
    if stmt_line > 0 && tabs.chars().count() >= width {
      let prev = line_str(text, stmt_line - 1);
      if !open_brace_line(&prev) && (no_brace_statement(&prev) || bare_else(&prev)) {
        let insert = format!("\n{}", leading_blanks(text, stmt_line - 1));
        let cursor_after = plan.erase_start + insert.chars().count();
        return single(insert, cursor_after);
      }
    }
  } else if scan_pos > 0 && text.char(scan_pos - 1) == ':' {
    // Label or access specifier. If the line carries one extra unit over
    // its enclosing block statement, the label dedents.
    let enclosing = find_left_bracket_backward(text, oracle, scan_pos - 1)
      .and_then(|lb| find_start_of_closed_expression(text, oracle, lb + 1, style.tab_char()));
    let dedents = enclosing.is_some_and(|start| {
      let start_tabs = leading_blanks(text, text.char_to_line(start));
      tabs.chars().count() == start_tabs.chars().count() + width
    });
    if dedents {
      if ls + width <= plan.erase_start {
        let insert = format!("\n{tabs}");
        let cursor_after = plan.erase_start - width + insert.chars().count();
        let tx = Transaction::change(doc, [
          (ls, ls + width, None),
          (
            plan.erase_start,
            plan.blanks_end,
            Some(Tendril::from(insert.as_str())),
          ),
        ])?;
        return Ok(Some(tx.with_cursor(cursor_after)));
      }
    } else {
      let insert = format!("\n{tabs}{unit}");
      let cursor_after = plan.erase_start + insert.chars().count();
      return single(insert, cursor_after);
    }
  }

  let insert = format!("\n{tabs}");
  let cursor_after = plan.erase_start + insert.chars().count();
  single(insert, cursor_after)
}

/// Typed `}` on a whitespace-only line prefix: dedent one unit first.
pub fn on_close_brace<O: ContextOracle>(
  doc: &Rope,
  oracle: &O,
  cursor: usize,
  selection: Option<Span>,
  style: &TabStyle,
) -> Result<Option<Transaction>> {
  if selection.is_some_and(|span| !span.is_empty()) {
    return Ok(None);
  }
  if cursor > 0 && !oracle.context_at(cursor - 1).is_plain() {
    return Ok(None);
  }

  let text = doc.slice(..);
  let line = text.char_to_line(cursor);
  let ls = line_start(text, line);
  let width = style.width();
  let run = cursor - ls;
  let all_tab_chars = text
    .slice(ls..cursor)
    .chars()
    .all(|ch| ch == style.tab_char());
  if !all_tab_chars || run < width {
    return Ok(None);
  }

  let tx = Transaction::change(doc, [
    (ls, ls + width, None),
    (cursor, cursor, Some(Tendril::from("}"))),
  ])?;
  Ok(Some(tx.with_cursor(cursor - width + 1)))
}

/// Typed `{` at the tabs-end of a line one unit deeper than a braceless
/// statement: the brace absorbs the anticipatory indent.
pub fn on_open_brace<O: ContextOracle>(
  doc: &Rope,
  oracle: &O,
  cursor: usize,
  selection: Option<Span>,
  style: &TabStyle,
) -> Result<Option<Transaction>> {
  if selection.is_some_and(|span| !span.is_empty()) {
    return Ok(None);
  }
  if cursor > 0 && !oracle.context_at(cursor - 1).is_plain() {
    return Ok(None);
  }

  let text = doc.slice(..);
  let line = text.char_to_line(cursor);
  if line == 0 || cursor != tabs_end(text, line) {
    return Ok(None);
  }
  let width = style.width();
  let tabs = leading_blanks(text, line);
  if tabs.chars().count() < width {
    return Ok(None);
  }
  let prev = line_str(text, line - 1);
  if open_brace_line(&prev) || !(no_brace_statement(&prev) || bare_else(&prev)) {
    return Ok(None);
  }
  if tabs.chars().count() - width != leading_blanks(text, line - 1).chars().count() {
    return Ok(None);
  }

  let tx = Transaction::change(doc, [(
    cursor - width,
    cursor,
    Some(Tendril::from("{")),
  )])?;
  Ok(Some(tx.with_cursor(cursor - width + 1)))
}

/// Tab.
pub fn indent_right(
  doc: &Rope,
  cursor: usize,
  selection: Option<Span>,
  style: &TabStyle,
  whole_line: bool,
) -> Result<Option<Transaction>> {
  let text = doc.slice(..);
  let unit = style.unit();
  let no_selection = selection.is_none_or(|span| span.is_empty());

  if !whole_line && no_selection {
    let tx = Transaction::insert(doc, cursor, Tendril::from(unit.as_str()))?;
    return Ok(Some(tx.with_cursor(cursor + style.width())));
  }

  let line = text.char_to_line(cursor);
  if no_selection && line_is_empty(text, line) {
    // Adopt the indentation of the nearest non-empty neighbor.
    let above = (0..line)
      .rev()
      .find(|&l| !line_is_empty(text, l))
      .map(|l| leading_blanks(text, l));
    let below = (line + 1..text.len_lines())
      .find(|&l| !line_is_empty(text, l))
      .map(|l| leading_blanks(text, l));
    let adopted = match (above, below) {
      (Some(a), Some(b)) => Some(if a.chars().count() < b.chars().count() { a } else { b }),
      (Some(a), None) => Some(a),
      (None, Some(b)) => Some(b),
      (None, None) => None,
    };
    if let Some(tabs) = adopted {
      if tabs.chars().count() >= style.width() {
        let cursor_after = cursor + tabs.chars().count();
        let tx = Transaction::insert(doc, cursor, Tendril::from(tabs.as_str()))?;
        return Ok(Some(tx.with_cursor(cursor_after)));
      }
    }
  }

  let (first, last) = selection
    .filter(|span| !span.is_empty())
    .map(|span| span.line_range(text))
    .unwrap_or((line, line));
  let sel_end = selection.filter(|span| !span.is_empty()).map(|span| span.end);

  let mut changes: Vec<Change> = Vec::new();
  for l in first..=last {
    let ls = line_start(text, l);
    // A selection that merely touches a line's first column does not
    // indent that line.
    if sel_end == Some(ls) {
      continue;
    }
    changes.push((ls, ls, Some(Tendril::from(unit.as_str()))));
  }
  if changes.is_empty() {
    return Ok(None);
  }
  let tx = Transaction::change(doc, changes)?;
  let cursor_after = tx.map_pos(cursor);
  Ok(Some(tx.with_cursor(cursor_after)))
}

/// Shift-Tab. Removes up to one unit of leading blanks from every line,
/// bounded by the smallest leading run; a touched line with content flush
/// at column zero aborts the whole outdent.
pub fn indent_left(
  doc: &Rope,
  cursor: usize,
  selection: Option<Span>,
  style: &TabStyle,
) -> Result<Option<Transaction>> {
  let text = doc.slice(..);
  let line = text.char_to_line(cursor);
  let (first, last) = selection
    .filter(|span| !span.is_empty())
    .map(|span| span.line_range(text))
    .unwrap_or((line, line));
  let sel_end = selection.filter(|span| !span.is_empty()).map(|span| span.end);

  let mut min_run: Option<usize> = None;
  for l in first..=last {
    let ls = line_start(text, l);
    // A selection that merely touches a line's first column does not
    // outdent that line.
    if sel_end == Some(ls) || line_is_empty(text, l) {
      continue;
    }
    let run = tabs_end(text, l) - ls;
    if run == 0 {
      return Ok(None);
    }
    min_run = Some(min_run.map_or(run, |m| m.min(run)));
  }
  let Some(min_run) = min_run else {
    return Ok(None);
  };
  let steps = min_run.min(style.width());

  let mut changes: Vec<Change> = Vec::new();
  for l in first..=last {
    let ls = line_start(text, l);
    if sel_end == Some(ls) || line_is_empty(text, l) {
      continue;
    }
    changes.push((ls, ls + steps, None));
  }
  let tx = Transaction::change(doc, changes)?;
  let cursor_after = tx.map_pos(cursor);
  Ok(Some(tx.with_cursor(cursor_after)))
}

/// Strips trailing blanks from every line and guarantees a final newline.
/// Used on save.
pub fn cleanup_whitespace(doc: &Rope) -> Result<Option<Transaction>> {
  let text = doc.slice(..);
  let mut changes: Vec<Change> = Vec::new();

  for line in 0..text.len_lines() {
    let ls = line_start(text, line);
    let le = line_end(text, line);
    let mut start = le;
    while start > ls && char_is_blank(text.char(start - 1)) {
      start -= 1;
    }
    if start < le {
      changes.push((start, le, None));
    }
  }

  let len = text.len_chars();
  if len > 0 && !char_is_line_ending(text.char(len - 1)) {
    changes.push((len, len, Some(Tendril::from("\n"))));
  }

  if changes.is_empty() {
    return Ok(None);
  }
  Ok(Some(Transaction::change(doc, changes)?))
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::context::PlainContext;

  fn style() -> TabStyle {
    TabStyle::default()
  }

  fn lang(id: &str) -> Language {
    Language::from_id(id)
  }

  fn apply(doc: &mut Rope, tx: Transaction) -> usize {
    let cursor = tx.cursor().unwrap_or(0);
    tx.apply(doc).unwrap();
    cursor
  }

  mod basic_newline {
    use super::*;

    #[test]
    fn copies_current_indentation() {
      let mut doc = Rope::from("  foo");
      let tx = on_newline_basic(&doc, 5).unwrap().unwrap();
      let cursor = apply(&mut doc, tx);
      assert_eq!(doc, "  foo\n  ");
      assert_eq!(cursor, 8);
    }

    #[test]
    fn adopts_deeper_next_line() {
      let mut doc = Rope::from("  foo\n    bar");
      let tx = on_newline_basic(&doc, 5).unwrap().unwrap();
      let cursor = apply(&mut doc, tx);
      assert_eq!(doc, "  foo\n    \n    bar");
      assert_eq!(cursor, 10);
    }

    #[test]
    fn collapses_surrounding_blanks() {
      let mut doc = Rope::from("  foo   bar");
      let tx = on_newline_basic(&doc, 7).unwrap().unwrap();
      let cursor = apply(&mut doc, tx);
      assert_eq!(doc, "  foo\n  bar");
      assert_eq!(cursor, 8);
    }

    #[test]
    fn declines_at_line_start() {
      let doc = Rope::from("foo");
      assert!(on_newline_basic(&doc, 0).unwrap().is_none());
    }
  }

  mod bracket_newline {
    use super::*;

    fn enter(doc: &mut Rope, cursor: usize, id: &str) -> usize {
      let tx = on_newline_bracket(doc, &PlainContext, cursor, &style(), &lang(id))
        .unwrap()
        .unwrap();
      apply(doc, tx)
    }

    #[test]
    fn opens_block_between_braces() {
      let mut doc = Rope::from("if (x) {}");
      let cursor = enter(&mut doc, 8, "c");
      assert_eq!(doc, "if (x) {\n  \n}");
      assert_eq!(cursor, 11);
    }

    #[test]
    fn synthesizes_closing_brace() {
      let mut doc = Rope::from("void f() {\n");
      let cursor = enter(&mut doc, 10, "c");
      assert_eq!(doc, "void f() {\n  \n}\n");
      assert_eq!(cursor, 13);
    }

    #[test]
    fn reuses_existing_closing_brace() {
      let mut doc = Rope::from("void f() {\nfoo();\n}\n");
      let cursor = enter(&mut doc, 10, "c");
      assert_eq!(doc, "void f() {\n  \nfoo();\n}\n");
      assert_eq!(cursor, 13);
    }

    #[test]
    fn class_gets_semicolon() {
      let mut doc = Rope::from("class A {");
      let cursor = enter(&mut doc, 9, "cpp");
      assert_eq!(doc, "class A {\n  \n};");
      assert_eq!(cursor, 12);
    }

    #[test]
    fn java_class_gets_no_semicolon() {
      let mut doc = Rope::from("class A {");
      let cursor = enter(&mut doc, 9, "java");
      assert_eq!(doc, "class A {\n  \n}");
      assert_eq!(cursor, 12);
    }

    #[test]
    fn continuation_aligns_past_opener() {
      let mut doc = Rope::from("foo(a,");
      let cursor = enter(&mut doc, 6, "c");
      assert_eq!(doc, "foo(a,\n    ");
      assert_eq!(cursor, 11);
    }

    #[test]
    fn braceless_if_indents_one_unit() {
      let mut doc = Rope::from("if (x)");
      let cursor = enter(&mut doc, 6, "c");
      assert_eq!(doc, "if (x)\n  ");
      assert_eq!(cursor, 9);
    }

    #[test]
    fn semicolon_closes_implicit_body() {
      let mut doc = Rope::from("if (x)\n  foo();");
      let cursor = enter(&mut doc, 15, "c");
      assert_eq!(doc, "if (x)\n  foo();\n");
      assert_eq!(cursor, 16);
    }

    #[test]
    fn access_specifier_dedents() {
      let mut doc = Rope::from("class A {\n  public:");
      let cursor = enter(&mut doc, 19, "cpp");
      assert_eq!(doc, "class A {\npublic:\n  ");
      assert_eq!(cursor, 20);
    }

    #[test]
    fn case_label_indents_body() {
      let mut doc = Rope::from("switch (x) {\ncase 1:");
      let cursor = enter(&mut doc, 20, "cpp");
      assert_eq!(doc, "switch (x) {\ncase 1:\n  ");
      assert_eq!(cursor, 23);
    }

    #[test]
    fn default_copies_statement_indent() {
      let mut doc = Rope::from("  foo()");
      let cursor = enter(&mut doc, 7, "c");
      assert_eq!(doc, "  foo()\n  ");
      assert_eq!(cursor, 10);
    }
  }

  mod braces {
    use super::*;

    #[test]
    fn close_brace_dedents_blank_prefix() {
      let mut doc = Rope::from("if (x) {\n  ");
      let tx = on_close_brace(&doc, &PlainContext, 11, None, &style())
        .unwrap()
        .unwrap();
      let cursor = apply(&mut doc, tx);
      assert_eq!(doc, "if (x) {\n}");
      assert_eq!(cursor, 10);
    }

    #[test]
    fn close_brace_removes_one_unit_only() {
      let mut doc = Rope::from("a {\n    ");
      let tx = on_close_brace(&doc, &PlainContext, 8, None, &style())
        .unwrap()
        .unwrap();
      let cursor = apply(&mut doc, tx);
      assert_eq!(doc, "a {\n  }");
      assert_eq!(cursor, 7);
    }

    #[test]
    fn close_brace_declines_after_content() {
      let doc = Rope::from("foo  ");
      assert!(
        on_close_brace(&doc, &PlainContext, 5, None, &style())
          .unwrap()
          .is_none()
      );
    }

    #[test]
    fn open_brace_absorbs_anticipatory_indent() {
      let mut doc = Rope::from("if (x)\n  ");
      let tx = on_open_brace(&doc, &PlainContext, 9, None, &style())
        .unwrap()
        .unwrap();
      let cursor = apply(&mut doc, tx);
      assert_eq!(doc, "if (x)\n{");
      assert_eq!(cursor, 8);
    }

    #[test]
    fn open_brace_declines_on_matching_depth() {
      // prev line is not one unit shallower
      let doc = Rope::from("foo();\n  ");
      assert!(
        on_open_brace(&doc, &PlainContext, 9, None, &style())
          .unwrap()
          .is_none()
      );
    }
  }

  mod tab {
    use super::*;

    #[test]
    fn inserts_unit_at_cursor_without_whole_line() {
      let mut doc = Rope::from("ab");
      let tx = indent_right(&doc, 1, None, &style(), false)
        .unwrap()
        .unwrap();
      let cursor = apply(&mut doc, tx);
      assert_eq!(doc, "a  b");
      assert_eq!(cursor, 3);
    }

    #[test]
    fn empty_line_adopts_neighbor_indent() {
      let mut doc = Rope::from("  a\n\n    b");
      let tx = indent_right(&doc, 4, None, &style(), true)
        .unwrap()
        .unwrap();
      let cursor = apply(&mut doc, tx);
      assert_eq!(doc, "  a\n  \n    b");
      assert_eq!(cursor, 6);
    }

    #[test]
    fn indents_selected_lines() {
      let mut doc = Rope::from("a\nb\nc\n");
      let tx = indent_right(&doc, 0, Some(Span::new(0, 3)), &style(), true)
        .unwrap()
        .unwrap();
      apply(&mut doc, tx);
      assert_eq!(doc, "  a\n  b\nc\n");
    }

    #[test]
    fn selection_touching_line_start_skips_it() {
      let mut doc = Rope::from("a\nb\nc\n");
      // selection ends exactly at line 2's first column
      let tx = indent_right(&doc, 0, Some(Span::new(0, 4)), &style(), true)
        .unwrap()
        .unwrap();
      apply(&mut doc, tx);
      assert_eq!(doc, "  a\n  b\nc\n");
    }

    #[test]
    fn outdent_respects_minimum_run() {
      let mut doc = Rope::from("  a\n    b\n");
      let tx = indent_left(&doc, 0, Some(Span::new(0, 9)), &style())
        .unwrap()
        .unwrap();
      apply(&mut doc, tx);
      assert_eq!(doc, "a\n  b\n");
    }

    #[test]
    fn outdent_aborts_on_flush_line() {
      let doc = Rope::from("  a\nb\n");
      assert!(
        indent_left(&doc, 0, Some(Span::new(0, 5)), &style())
          .unwrap()
          .is_none()
      );
    }

    #[test]
    fn outdent_skips_line_touched_by_selection_end() {
      let mut doc = Rope::from("  a\n  b\nc\n");
      // selection ends exactly at line 2's first column; the flush line
      // neither aborts the outdent nor gets touched
      let tx = indent_left(&doc, 0, Some(Span::new(0, 8)), &style())
        .unwrap()
        .unwrap();
      apply(&mut doc, tx);
      assert_eq!(doc, "a\nb\nc\n");
    }

    #[test]
    fn outdent_skips_empty_lines() {
      let mut doc = Rope::from("  a\n\n  b\n");
      let tx = indent_left(&doc, 0, Some(Span::new(0, 8)), &style())
        .unwrap()
        .unwrap();
      apply(&mut doc, tx);
      assert_eq!(doc, "a\n\nb\n");
    }
  }

  mod cleanup {
    use super::*;

    #[test]
    fn strips_trailing_blanks_and_adds_newline() {
      let mut doc = Rope::from("a  \nb\t\nc");
      let tx = cleanup_whitespace(&doc).unwrap().unwrap();
      tx.apply(&mut doc).unwrap();
      assert_eq!(doc, "a\nb\nc\n");
    }

    #[test]
    fn clean_document_untouched() {
      let doc = Rope::from("a\nb\n");
      assert!(cleanup_whitespace(&doc).unwrap().is_none());
    }
  }
}
