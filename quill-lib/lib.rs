use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod comment;
pub mod config;
pub mod context;
pub mod indent;
pub mod language;
pub mod movement;
pub mod paste;
pub mod position;
pub mod scan;
pub mod tab_style;
pub mod text;
pub mod transaction;

pub type Tendril = SmartString<LazyCompact>;
