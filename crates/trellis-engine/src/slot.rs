/* crates/trellis-engine/src/slot.rs */

//! Slot descriptor model: the nodes of the declarative composition tree.
//! Descriptors load from a flat `id -> descriptor` JSON mapping; every
//! field except `id` and `type` is optional, and unknown `type` strings
//! must load (they render as labeled placeholders, never fail
//! deserialization).

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of slot types. Unrecognized strings are captured rather than
/// rejected so a malformed tree still renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotKind {
  Text,
  Html,
  Button,
  Image,
  Container,
  Grid,
  Flex,
  Component,
  Cms,
  StyleConfig,
  PluginWidget,
  Unknown(String),
}

impl SlotKind {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Text => "text",
      Self::Html => "html",
      Self::Button => "button",
      Self::Image => "image",
      Self::Container => "container",
      Self::Grid => "grid",
      Self::Flex => "flex",
      Self::Component => "component",
      Self::Cms => "cms",
      Self::StyleConfig => "style_config",
      Self::PluginWidget => "plugin_widget",
      Self::Unknown(s) => s,
    }
  }

  /// Composite kinds recurse into their children instead of rendering
  /// content of their own.
  pub fn is_composite(&self) -> bool {
    matches!(self, Self::Container | Self::Grid | Self::Flex)
  }
}

impl From<&str> for SlotKind {
  fn from(s: &str) -> Self {
    match s {
      "text" => Self::Text,
      "html" => Self::Html,
      "button" => Self::Button,
      "image" => Self::Image,
      "container" => Self::Container,
      "grid" => Self::Grid,
      "flex" => Self::Flex,
      "component" => Self::Component,
      "cms" => Self::Cms,
      "style_config" => Self::StyleConfig,
      "plugin_widget" => Self::PluginWidget,
      other => Self::Unknown(other.to_string()),
    }
  }
}

impl<'de> Deserialize<'de> for SlotKind {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    Ok(Self::from(s.as_str()))
  }
}

impl Serialize for SlotKind {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

/// Column span in the 12-unit grid: a fixed number, a pre-composed
/// responsive class string, or a mapping keyed by viewport-mode name.
/// An explicitly empty mapping opts the slot out of the standard wrapper.
/// Anything else (negative, fractional, boolean) is captured rather than
/// rejected so one bad span never fails the whole descriptor collection;
/// it resolves to full width with an issue recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum ColSpan {
  Fixed(u8),
  Classes(String),
  PerViewport(Map<String, Value>),
  Invalid(Value),
}

impl ColSpan {
  fn from_value(value: Value) -> Self {
    match value {
      Value::Number(ref n) => match n.as_u64() {
        Some(n) if n <= u64::from(u8::MAX) => Self::Fixed(n as u8),
        _ => Self::Invalid(value),
      },
      Value::String(s) => Self::Classes(s),
      Value::Object(map) => Self::PerViewport(map),
      other => Self::Invalid(other),
    }
  }
}

impl<'de> Deserialize<'de> for ColSpan {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(Self::from_value(Value::deserialize(deserializer)?))
  }
}

impl Serialize for ColSpan {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Fixed(n) => serializer.serialize_u8(*n),
      Self::Classes(s) => serializer.serialize_str(s),
      Self::PerViewport(map) => map.serialize(serializer),
      Self::Invalid(value) => value.serialize(serializer),
    }
  }
}

/// Grid coordinates used for sibling ordering, row-major.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridPosition {
  pub row: i64,
  pub col: i64,
}

/// Alternate button presentation selected when its condition evaluates
/// truthy against the data context. First matching state wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonState {
  pub condition: String,
  pub content: Option<String>,
  pub class_name: Option<String>,
  pub disabled: bool,
}

/// Open attribute bag carried by every slot. Keys the engine does not
/// model are retained in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotMetadata {
  /// Element tag override for text/html slots (`span`, `h2`, ...)
  pub display_tag: Option<String>,
  /// Conditional-display expression; absent or falsy means render nothing
  /// only when present-and-falsy (absent means always display)
  pub condition: Option<String>,
  pub resize_disabled: bool,
  /// Named flag consulted against the render-flag set ("menuOpen", ...)
  pub render_condition: Option<String>,
  /// Registered component name for `component` slots
  pub component: Option<String>,
  /// View modes this slot is eligible for; absent means all
  pub view_modes: Option<Vec<String>>,
  pub position: Option<GridPosition>,
  /// Absolutely-positioned slots bypass the standard wrapper
  pub absolute: bool,
  pub states: Vec<ButtonState>,
  /// CMS placement lookup key for `cms` slots
  pub placement_key: Option<String>,
  pub store_id: Option<String>,
  /// Plugin widget identity and pass-through configuration
  pub widget_id: Option<String>,
  pub widget_config: Option<Value>,
  /// Image link wrapping: both must resolve non-empty to wrap
  pub link_target: Option<String>,
  pub link_container: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Behavior hook attached to a rendered slot, production mode only.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Script {
  Named(String),
  Inline { code: String },
}

/// One node of the composition tree. The engine never mutates descriptors;
/// edits replace the whole collection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDescriptor {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: SlotKind,
  #[serde(default)]
  pub content: String,
  #[serde(default)]
  pub class_name: String,
  #[serde(default)]
  pub styles: Map<String, Value>,
  #[serde(default)]
  pub parent_id: Option<String>,
  #[serde(default)]
  pub col_span: Option<ColSpan>,
  #[serde(default)]
  pub metadata: SlotMetadata,
  #[serde(default)]
  pub script: Option<Script>,
}

impl SlotDescriptor {
  pub fn new(id: impl Into<String>, kind: SlotKind) -> Self {
    Self {
      id: id.into(),
      kind,
      content: String::new(),
      class_name: String::new(),
      styles: Map::new(),
      parent_id: None,
      col_span: None,
      metadata: SlotMetadata::default(),
      script: None,
    }
  }

  pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
    self.parent_id = Some(parent_id.into());
    self
  }

  pub fn with_content(mut self, content: impl Into<String>) -> Self {
    self.content = content.into();
    self
  }

  pub fn at(mut self, row: i64, col: i64) -> Self {
    self.metadata.position = Some(GridPosition { row, col });
    self
  }
}
