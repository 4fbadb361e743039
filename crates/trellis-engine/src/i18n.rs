/* crates/trellis-engine/src/i18n.rs */

//! Translation lookup. Content shaped like a dotted lowercase identifier
//! (`common.welcome_back`) is treated as a translation key and resolved
//! through the external [`Translator`] instead of template evaluation.

use std::collections::HashMap;

use serde_json::Value;

pub trait Translator {
  /// `None` means the key is unresolved; the caller decides whether to
  /// show the raw key (editor) or nothing (production).
  fn translate(&self, key: &str, language: &str) -> Option<String>;
}

/// Null object: every key is unresolved.
#[derive(Debug, Default)]
pub struct NoTranslations;

impl Translator for NoTranslations {
  fn translate(&self, _key: &str, _language: &str) -> Option<String> {
    None
  }
}

/// In-memory translator over per-language nested tables, looked up by
/// dotted path. The shape a store backend typically ships to the client.
#[derive(Debug, Default)]
pub struct TableTranslator {
  tables: HashMap<String, Value>,
}

impl TableTranslator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_language(mut self, language: impl Into<String>, table: Value) -> Self {
    self.tables.insert(language.into(), table);
    self
  }
}

impl Translator for TableTranslator {
  fn translate(&self, key: &str, language: &str) -> Option<String> {
    let table = self.tables.get(language)?;
    match trellis_template::resolve(key, table)? {
      Value::String(s) => Some(s.clone()),
      _ => None,
    }
  }
}

fn is_key_segment(segment: &str) -> bool {
  let mut chars = segment.chars();
  match chars.next() {
    Some(c) if c.is_ascii_lowercase() || c == '_' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Heuristic for translation-key content: at least two dotted segments,
/// each a lowercase identifier. A bare identifier is never a key.
pub fn is_translation_key(content: &str) -> bool {
  let content = content.trim();
  let mut segments = content.split('.');
  let (Some(first), Some(second)) = (segments.next(), segments.next()) else {
    return false;
  };
  is_key_segment(first) && is_key_segment(second) && segments.all(is_key_segment)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn recognizes_dotted_keys() {
    assert!(is_translation_key("common.welcome_back"));
    assert!(is_translation_key("checkout.cart.empty_state"));
    assert!(is_translation_key(" common.title "));
  }

  #[test]
  fn rejects_non_keys() {
    assert!(!is_translation_key("Welcome back"));
    assert!(!is_translation_key("common"));
    assert!(!is_translation_key("Common.Title"));
    assert!(!is_translation_key("common..title"));
    assert!(!is_translation_key("1.2"));
    assert!(!is_translation_key("{{product.name}}"));
    assert!(!is_translation_key(""));
  }

  #[test]
  fn table_translator_lookup() {
    let translator = TableTranslator::new()
      .with_language("en", json!({"common": {"welcome_back": "Welcome back"}}))
      .with_language("de", json!({"common": {"welcome_back": "Willkommen zurück"}}));
    assert_eq!(
      translator.translate("common.welcome_back", "de"),
      Some("Willkommen zurück".to_string())
    );
    assert_eq!(translator.translate("common.missing", "en"), None);
    assert_eq!(translator.translate("common.welcome_back", "fr"), None);
  }

  #[test]
  fn non_string_leaf_is_unresolved() {
    let translator = TableTranslator::new().with_language("en", json!({"common": {"nested": {}}}));
    assert_eq!(translator.translate("common.nested", "en"), None);
  }

  #[test]
  fn null_translator() {
    assert_eq!(NoTranslations.translate("common.welcome_back", "en"), None);
  }
}
