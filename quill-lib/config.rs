//! Editor configuration relevant to indentation and commenting.

use std::{
  collections::BTreeMap,
  num::NonZeroUsize,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::{
  language::Language,
  tab_style::{
    TabChar,
    TabStyle,
  },
};

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("tab_width must be a positive integer, got {width}")]
  InvalidTabWidth { width: usize },
}

/// Options read by the engine. Deserialized from the editor's TOML config.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
  pub tab_character:              TabChar,
  pub tab_width:                  usize,
  pub auto_detect_tab_style:      bool,
  pub tab_key_indents_whole_line: bool,
  /// Per-language comment prefix overrides, keyed by language id.
  pub comment_tokens:             BTreeMap<String, String>,
}

impl Default for EditorConfig {
  fn default() -> Self {
    Self {
      tab_character:              TabChar::Space,
      tab_width:                  2,
      auto_detect_tab_style:      true,
      tab_key_indents_whole_line: true,
      comment_tokens:             BTreeMap::new(),
    }
  }
}

impl EditorConfig {
  pub fn from_toml_str(source: &str) -> Result<Self> {
    let mut config: EditorConfig = toml::from_str(source)?;
    if config.tab_width == 0 {
      return Err(ConfigError::InvalidTabWidth { width: 0 });
    }
    // Empty overrides would make every line look commented; drop them.
    config.comment_tokens.retain(|id, token| {
      if token.is_empty() {
        warn!(language = %id, "ignoring empty comment token override");
        false
      } else {
        true
      }
    });
    Ok(config)
  }

  /// The style the configuration itself asks for.
  pub fn tab_style(&self) -> TabStyle {
    let width = NonZeroUsize::new(self.tab_width)
      .unwrap_or(const { NonZeroUsize::new(2).unwrap() });
    TabStyle::new(self.tab_character, width)
  }

  /// Resolves the style for a freshly opened document.
  ///
  /// Detection wins when enabled and conclusive, otherwise the configured
  /// style applies.
  pub fn effective_tab_style(&self, detected: Option<TabStyle>) -> TabStyle {
    if self.auto_detect_tab_style {
      if let Some(style) = detected {
        return style;
      }
    }
    self.tab_style()
  }

  /// The comment prefix for `language`, override first.
  pub fn comment_token_for<'a>(&'a self, language: &Language) -> Option<&'a str> {
    self
      .comment_tokens
      .get(language.id())
      .map(String::as_str)
      .or_else(|| language.comment_token())
  }
}
