/* crates/trellis-engine/src/context.rs */

//! Per-pass context: editor/production flag, page state, device class, and
//! the named-flag set consulted by render conditions. The data context
//! itself is a plain `serde_json::Value` object of named scopes
//! (`product`, `cart`, `settings`, ...), handed to the engine unmodified.

use std::collections::HashMap;

/// Editor or production behavior, threaded through every call. Changes
/// wrapping and interactivity, never the logical tree shape produced from
/// non-editor-only data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
  Editor,
  Production,
}

impl RenderMode {
  pub fn is_editor(self) -> bool {
    matches!(self, Self::Editor)
  }
}

/// Named page/cart state controlling which slots are eligible to render
/// ("default", "emptyCart", ...). Orthogonal to [`ViewportMode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewMode(String);

impl ViewMode {
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for ViewMode {
  fn default() -> Self {
    Self("default".to_string())
  }
}

/// Device class controlling how an eligible slot's column span resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportMode {
  #[default]
  Desktop,
  Tablet,
  Mobile,
}

impl ViewportMode {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Desktop => "desktop",
      Self::Tablet => "tablet",
      Self::Mobile => "mobile",
    }
  }
}

/// Externally supplied named booleans ("menuOpen", "searchOpen", ...)
/// consulted by `metadata.renderCondition`. Unknown names are eligible.
#[derive(Debug, Clone, Default)]
pub struct RenderFlags {
  flags: HashMap<String, bool>,
}

impl RenderFlags {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
    self.flags.insert(name.into(), value);
    self
  }

  /// Absent flags default to eligible.
  pub fn is_enabled(&self, name: &str) -> bool {
    self.flags.get(name).copied().unwrap_or(true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn view_mode_defaults_to_default() {
    assert_eq!(ViewMode::default().as_str(), "default");
  }

  #[test]
  fn unknown_flag_is_eligible() {
    let flags = RenderFlags::new();
    assert!(flags.is_enabled("menuOpen"));
  }

  #[test]
  fn disabled_flag_blocks() {
    let mut flags = RenderFlags::new();
    flags.set("searchOpen", false);
    assert!(!flags.is_enabled("searchOpen"));
    flags.set("searchOpen", true);
    assert!(flags.is_enabled("searchOpen"));
  }

  #[test]
  fn viewport_names() {
    assert_eq!(ViewportMode::Desktop.as_str(), "desktop");
    assert_eq!(ViewportMode::Tablet.as_str(), "tablet");
    assert_eq!(ViewportMode::Mobile.as_str(), "mobile");
  }
}
