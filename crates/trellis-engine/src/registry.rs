/* crates/trellis-engine/src/registry.rs */

//! Name -> render-capability map for complex, self-contained slot types
//! (product listings, search bars, ...). Registered at startup by external
//! component authors, consulted by identifier at dispatch time. Looking up
//! an unregistered name yields a placeholder, never an error.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::context::{RenderMode, ViewportMode};
use crate::editor::EditorCallbacks;
use crate::errors::RenderIssue;
use crate::node::RenderNode;
use crate::slot::SlotDescriptor;

/// Full invocation context for one component render.
pub struct ComponentInvocation<'a> {
  pub slot: &'a SlotDescriptor,
  /// Content/class strings with template variables already resolved
  pub content: String,
  pub class_name: String,
  pub data: &'a Value,
  /// All sibling descriptors, for local child lookup
  pub slots: &'a [SlotDescriptor],
  pub mode: RenderMode,
  pub viewport: ViewportMode,
  pub callbacks: &'a EditorCallbacks,
}

pub trait ComponentRender {
  /// Errors are caught at the slot boundary; sibling rendering continues.
  fn render(&self, inv: &ComponentInvocation<'_>) -> Result<RenderNode, RenderIssue>;
}

#[derive(Default)]
pub struct ComponentRegistry {
  entries: HashMap<String, Arc<dyn ComponentRender>>,
}

impl ComponentRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, name: impl Into<String>, capability: impl ComponentRender + 'static) {
    self.entries.insert(name.into(), Arc::new(capability));
  }

  pub fn has(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  pub fn get(&self, name: &str) -> Option<Arc<dyn ComponentRender>> {
    self.entries.get(name).cloned()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }
}
