/* crates/trellis-template/src/helpers.rs */

use serde_json::Value;

/// Dotted-path lookup. Missing intermediate keys resolve to `None`.
pub fn resolve<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
  if path == "this" || path == "@index" {
    return data.get(path);
  }
  let mut current = data;
  for key in path.split('.') {
    current = current.get(key)?;
  }
  Some(current)
}

/// Truthiness for conditionals: null, `false`, zero, empty string and empty
/// sequence are falsy. A present-but-empty object is truthy.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        i != 0
      } else if let Some(f) = n.as_f64() {
        f != 0.0
      } else {
        true
      }
    }
    Value::String(s) => !s.is_empty(),
    Value::Array(arr) => !arr.is_empty(),
    Value::Object(_) => true,
  }
}

pub fn stringify(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Numeric coercion for comparison helpers. Strings that parse as numbers
/// compare as numbers, everything else refuses to compare.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

fn is_path_segment(segment: &str) -> bool {
  !segment.is_empty()
    && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A marker body qualifies as an interpolation path only if every dotted
/// segment is a plain identifier. Anything else is re-emitted as literal
/// text, which is what makes `process` idempotent over its own output.
pub(crate) fn is_valid_path(path: &str) -> bool {
  if path == "this" || path == "@index" {
    return true;
  }
  let rest = path.strip_prefix("this.").unwrap_or(path);
  !rest.is_empty() && rest.split('.').all(is_path_segment)
}

pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

const CSS_UNITLESS_PROPERTIES: &[&str] = &[
  "animation-iteration-count",
  "column-count",
  "columns",
  "flex",
  "flex-grow",
  "flex-shrink",
  "font-weight",
  "grid-column",
  "grid-column-end",
  "grid-column-start",
  "grid-row",
  "grid-row-end",
  "grid-row-start",
  "line-clamp",
  "line-height",
  "opacity",
  "order",
  "orphans",
  "tab-size",
  "widows",
  "z-index",
  "zoom",
];

/// Format one style value for serialization: bare numbers get `px` except
/// for unitless CSS properties, null/false/empty are dropped.
pub fn format_style_value(css_property: &str, value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::Bool(false) => None,
    Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        if i == 0 {
          Some("0".to_string())
        } else if CSS_UNITLESS_PROPERTIES.contains(&css_property) {
          Some(i.to_string())
        } else {
          Some(format!("{i}px"))
        }
      } else if let Some(f) = n.as_f64() {
        if f == 0.0 {
          Some("0".to_string())
        } else if CSS_UNITLESS_PROPERTIES.contains(&css_property) {
          if f.fract() == 0.0 {
            Some(format!("{}", f as i64))
          } else {
            Some(f.to_string())
          }
        } else if f.fract() == 0.0 {
          Some(format!("{}px", f as i64))
        } else {
          Some(format!("{f}px"))
        }
      } else {
        None
      }
    }
    Value::String(s) => {
      if s.is_empty() {
        None
      } else {
        Some(s.clone())
      }
    }
    _ => None,
  }
}
