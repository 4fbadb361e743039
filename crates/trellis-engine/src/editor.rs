/* crates/trellis-engine/src/editor.rs */

//! Editor-session plumbing: the optional callback set interactive
//! affordances dispatch through, and the coalescing write-back queue that
//! debounces rapid style/position edits before persistence. Rendering
//! never mutates the tree itself; callbacks hand a replacement collection
//! back through `set_tree`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::hooks::SurfaceHandle;
use crate::slot::SlotDescriptor;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

type ClickFn = dyn Fn(&str, &SurfaceHandle);
type ResizeFn = dyn Fn(&str, u8);
type DropFn = dyn Fn(&str, Option<&str>, usize);
type SlotFn = dyn Fn(&str);
type SetTreeFn = dyn Fn(Vec<SlotDescriptor>);
type PersistFn = dyn Fn(&str, &Value);

/// Every callback is optional; absence simply disables the corresponding
/// interaction, it never errors.
#[derive(Default)]
pub struct EditorCallbacks {
  pub on_element_click: Option<Box<ClickFn>>,
  pub on_grid_resize: Option<Box<ResizeFn>>,
  pub on_slot_drop: Option<Box<DropFn>>,
  pub on_slot_delete: Option<Box<SlotFn>>,
  pub on_resize_start: Option<Box<SlotFn>>,
  pub on_resize_end: Option<Box<SlotFn>>,
  pub set_tree: Option<Box<SetTreeFn>>,
  pub persist: Option<Box<PersistFn>>,
}

impl EditorCallbacks {
  pub fn element_clicked(&self, slot_id: &str, surface: &SurfaceHandle) {
    if let Some(cb) = &self.on_element_click {
      cb(slot_id, surface);
    }
  }

  pub fn grid_resized(&self, slot_id: &str, span: u8) {
    if let Some(cb) = &self.on_grid_resize {
      cb(slot_id, span);
    }
  }

  pub fn slot_dropped(&self, slot_id: &str, new_parent: Option<&str>, index: usize) {
    if let Some(cb) = &self.on_slot_drop {
      cb(slot_id, new_parent, index);
    }
  }

  pub fn slot_deleted(&self, slot_id: &str) {
    if let Some(cb) = &self.on_slot_delete {
      cb(slot_id);
    }
  }

  pub fn resize_started(&self, slot_id: &str) {
    if let Some(cb) = &self.on_resize_start {
      cb(slot_id);
    }
  }

  pub fn resize_ended(&self, slot_id: &str) {
    if let Some(cb) = &self.on_resize_end {
      cb(slot_id);
    }
  }

  pub fn replace_tree(&self, slots: Vec<SlotDescriptor>) {
    if let Some(cb) = &self.set_tree {
      cb(slots);
    }
  }

  pub fn persisted(&self, slot_id: &str, patch: &Value) {
    if let Some(cb) = &self.persist {
      cb(slot_id, patch);
    }
  }
}

/// Coalescing write-back queue: each edit enqueues a pending write keyed
/// by slot id; a flush after the debounce delay applies only the most
/// recent pending value per key. Writes superseded within the window are
/// dropped, only the latest is flushed.
#[derive(Debug)]
pub struct WriteQueue {
  delay: Duration,
  pending: HashMap<String, (Value, Instant)>,
}

impl WriteQueue {
  pub fn new() -> Self {
    Self::with_delay(DEFAULT_DEBOUNCE)
  }

  pub fn with_delay(delay: Duration) -> Self {
    Self { delay, pending: HashMap::new() }
  }

  /// Last write wins per slot id; the debounce window restarts.
  pub fn enqueue(&mut self, slot_id: impl Into<String>, patch: Value, now: Instant) {
    let slot_id = slot_id.into();
    if self.pending.insert(slot_id.clone(), (patch, now + self.delay)).is_some() {
      tracing::debug!(slot_id = %slot_id, "superseded pending write dropped");
    }
  }

  /// Drain writes whose debounce window has elapsed, ordered by slot id
  /// for deterministic flushing.
  pub fn flush_due(&mut self, now: Instant) -> Vec<(String, Value)> {
    let due: Vec<String> = self
      .pending
      .iter()
      .filter(|(_, (_, deadline))| *deadline <= now)
      .map(|(id, _)| id.clone())
      .collect();
    let mut flushed: Vec<(String, Value)> = due
      .into_iter()
      .filter_map(|id| self.pending.remove(&id).map(|(patch, _)| (id, patch)))
      .collect();
    flushed.sort_by(|(a, _), (b, _)| a.cmp(b));
    flushed
  }

  /// Drain due writes straight into the persistence callback.
  pub fn flush_due_into(&mut self, now: Instant, callbacks: &EditorCallbacks) {
    for (slot_id, patch) in self.flush_due(now) {
      callbacks.persisted(&slot_id, &patch);
    }
  }

  /// Drain everything regardless of deadline (editor teardown).
  pub fn flush_all(&mut self) -> Vec<(String, Value)> {
    let mut flushed: Vec<(String, Value)> =
      self.pending.drain().map(|(id, (patch, _))| (id, patch)).collect();
    flushed.sort_by(|(a, _), (b, _)| a.cmp(b));
    flushed
  }

  pub fn is_empty(&self) -> bool {
    self.pending.is_empty()
  }

  pub fn len(&self) -> usize {
    self.pending.len()
  }
}

impl Default for WriteQueue {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn absent_callbacks_are_noops() {
    let callbacks = EditorCallbacks::default();
    callbacks.element_clicked("a", &SurfaceHandle::new("el-a"));
    callbacks.grid_resized("a", 6);
    callbacks.slot_deleted("a");
    callbacks.replace_tree(Vec::new());
  }

  #[test]
  fn present_callback_fires() {
    use std::cell::Cell;
    use std::rc::Rc;
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let callbacks = EditorCallbacks {
      on_grid_resize: Some(Box::new(move |_, _| counter.set(counter.get() + 1))),
      ..Default::default()
    };
    callbacks.grid_resized("a", 4);
    assert_eq!(hits.get(), 1);
  }

  // -- WriteQueue --

  #[test]
  fn rapid_edits_coalesce_to_final_value() {
    let mut queue = WriteQueue::with_delay(Duration::from_millis(300));
    let t0 = Instant::now();
    queue.enqueue("hero", json!({"colSpan": 5}), t0);
    queue.enqueue("hero", json!({"colSpan": 6}), t0 + Duration::from_millis(50));
    queue.enqueue("hero", json!({"colSpan": 7}), t0 + Duration::from_millis(100));

    // Window restarted by the last edit: nothing due yet at +350ms
    assert!(queue.flush_due(t0 + Duration::from_millis(350)).is_empty());

    let flushed = queue.flush_due(t0 + Duration::from_millis(400));
    assert_eq!(flushed, vec![("hero".to_string(), json!({"colSpan": 7}))]);
    assert!(queue.is_empty());
  }

  #[test]
  fn coalesced_writes_reach_persist_once() {
    use std::cell::RefCell;
    use std::rc::Rc;
    let persisted: Rc<RefCell<Vec<(String, Value)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&persisted);
    let callbacks = EditorCallbacks {
      persist: Some(Box::new(move |id, patch| {
        sink.borrow_mut().push((id.to_string(), patch.clone()));
      })),
      ..Default::default()
    };

    let mut queue = WriteQueue::with_delay(Duration::from_millis(300));
    let t0 = Instant::now();
    queue.enqueue("hero", json!({"colSpan": 5}), t0);
    queue.enqueue("hero", json!({"colSpan": 6}), t0 + Duration::from_millis(50));
    queue.enqueue("hero", json!({"colSpan": 7}), t0 + Duration::from_millis(100));

    queue.flush_due_into(t0 + Duration::from_millis(400), &callbacks);
    assert_eq!(*persisted.borrow(), vec![("hero".to_string(), json!({"colSpan": 7}))]);

    // Nothing left: a second flush persists nothing more
    queue.flush_due_into(t0 + Duration::from_millis(800), &callbacks);
    assert_eq!(persisted.borrow().len(), 1);
  }

  #[test]
  fn independent_slots_flush_separately() {
    let mut queue = WriteQueue::with_delay(Duration::from_millis(100));
    let t0 = Instant::now();
    queue.enqueue("b", json!(2), t0);
    queue.enqueue("a", json!(1), t0);
    let flushed = queue.flush_due(t0 + Duration::from_millis(100));
    assert_eq!(flushed, vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))]);
  }

  #[test]
  fn not_due_writes_stay_pending() {
    let mut queue = WriteQueue::with_delay(Duration::from_millis(100));
    let t0 = Instant::now();
    queue.enqueue("a", json!(1), t0);
    assert!(queue.flush_due(t0 + Duration::from_millis(50)).is_empty());
    assert_eq!(queue.len(), 1);
  }

  #[test]
  fn flush_all_drains_immediately() {
    let mut queue = WriteQueue::with_delay(Duration::from_millis(100));
    queue.enqueue("a", json!(1), Instant::now());
    assert_eq!(queue.flush_all().len(), 1);
    assert!(queue.is_empty());
  }
}
