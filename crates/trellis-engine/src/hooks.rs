/* crates/trellis-engine/src/hooks.rs */

//! Behavior hooks: named, sandboxed handlers bound to rendered slots in
//! production mode. Free-form inline code is refused unless the embedder
//! supplies an explicit [`InlineHookRunner`] capability; handlers receive
//! an explicit surface handle rather than querying any ambient document.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;

use crate::errors::RenderIssue;
use crate::slot::{Script, SlotDescriptor};

/// Handle to the mounted output region a hook operates on. Threaded into
/// every invocation explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceHandle {
  element_id: String,
}

impl SurfaceHandle {
  pub fn new(element_id: impl Into<String>) -> Self {
    Self { element_id: element_id.into() }
  }

  pub fn element_id(&self) -> &str {
    &self.element_id
  }
}

pub struct HookInvocation<'a> {
  pub surface: &'a SurfaceHandle,
  pub slot: &'a SlotDescriptor,
  /// Product scope of the data context, when present
  pub product: Option<&'a Value>,
  pub data: &'a Value,
}

/// Declared cleanup, invoked when the slot unmounts or its governing data
/// changes.
pub type HookCleanup = Box<dyn FnOnce()>;

pub trait SlotHook {
  fn attach(&self, inv: HookInvocation<'_>) -> Result<Option<HookCleanup>, String>;
}

/// Opt-in capability boundary for inline script bodies. Without it, an
/// inline script is refused with a warning.
pub trait InlineHookRunner {
  fn run(&self, code: &str, inv: HookInvocation<'_>) -> Result<Option<HookCleanup>, String>;
}

/// Closed name -> handler map consulted for `script` references.
#[derive(Default)]
pub struct HookRegistry {
  entries: HashMap<String, Arc<dyn SlotHook>>,
}

impl HookRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, name: impl Into<String>, hook: impl SlotHook + 'static) {
    self.entries.insert(name.into(), Arc::new(hook));
  }

  pub fn has(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  pub fn get(&self, name: &str) -> Option<Arc<dyn SlotHook>> {
    self.entries.get(name).cloned()
  }
}

/// Tracks live hook bindings per slot id, running declared cleanups when a
/// slot unmounts. Attach failures are caught at the slot boundary and
/// reported as issues; siblings are unaffected.
#[derive(Default)]
pub struct HookBinder {
  bound: HashMap<String, HookCleanup>,
}

impl HookBinder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_bound(&self, slot_id: &str) -> bool {
    self.bound.contains_key(slot_id)
  }

  /// Attach the slot's script, replacing (and cleaning up) any previous
  /// binding for the same slot. Call sites gate on production mode.
  pub fn attach(
    &mut self,
    registry: &HookRegistry,
    inline_runner: Option<&dyn InlineHookRunner>,
    script: &Script,
    inv: HookInvocation<'_>,
  ) -> Result<(), RenderIssue> {
    let slot_id = inv.slot.id.clone();
    self.detach(&slot_id);

    let (hook_name, outcome) = match script {
      Script::Named(name) => {
        let Some(hook) = registry.get(name) else {
          tracing::warn!(hook = %name, slot_id = %slot_id, "unknown hook name, skipped");
          return Ok(());
        };
        (name.clone(), hook.attach(inv))
      }
      Script::Inline { code } => match inline_runner {
        Some(runner) => ("inline".to_string(), runner.run(code, inv)),
        None => {
          tracing::warn!(slot_id = %slot_id, "inline script refused: no inline runner configured");
          return Ok(());
        }
      },
    };

    match outcome {
      Ok(Some(cleanup)) => {
        self.bound.insert(slot_id, cleanup);
        Ok(())
      }
      Ok(None) => Ok(()),
      Err(message) => {
        Err(RenderIssue::HookExecutionFailure { slot_id, hook: hook_name, message })
      }
    }
  }

  /// Run the slot's cleanup, if any.
  pub fn detach(&mut self, slot_id: &str) {
    if let Some(cleanup) = self.bound.remove(slot_id) {
      cleanup();
    }
  }

  /// Drop bindings for slots no longer mounted, running their cleanups.
  pub fn sync_mounted(&mut self, mounted: &HashSet<String>) {
    let gone: Vec<String> =
      self.bound.keys().filter(|id| !mounted.contains(*id)).cloned().collect();
    for slot_id in gone {
      self.detach(&slot_id);
    }
  }

  pub fn detach_all(&mut self) {
    let ids: Vec<String> = self.bound.keys().cloned().collect();
    for slot_id in ids {
      self.detach(&slot_id);
    }
  }
}
