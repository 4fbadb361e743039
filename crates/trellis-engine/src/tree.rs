/* crates/trellis-engine/src/tree.rs */

//! Children-by-parent index over a flat descriptor collection. Built once
//! per render pass: O(n) construction, O(1) child lookup afterwards, so
//! the recursive walk never re-scans the full collection.

use std::collections::HashMap;

use crate::errors::TreeError;
use crate::slot::SlotDescriptor;

#[derive(Debug)]
pub struct SlotTree {
  slots: Vec<SlotDescriptor>,
  by_id: HashMap<String, usize>,
  // Child indices grouped by parent index; declaration order preserved
  children: HashMap<usize, Vec<usize>>,
  roots: Vec<usize>,
}

impl SlotTree {
  /// Index a descriptor collection. Duplicate ids and parent cycles are
  /// structural input defects and fail the build; a `parentId` that
  /// references no known slot leaves an orphan that no walk reaches.
  pub fn build(slots: Vec<SlotDescriptor>) -> Result<Self, TreeError> {
    let mut by_id = HashMap::with_capacity(slots.len());
    for (index, slot) in slots.iter().enumerate() {
      if by_id.insert(slot.id.clone(), index).is_some() {
        return Err(TreeError::DuplicateId(slot.id.clone()));
      }
    }

    // Parent-chain coloring: 0 unvisited, 1 in progress, 2 cleared
    let mut state = vec![0u8; slots.len()];
    for start in 0..slots.len() {
      if state[start] != 0 {
        continue;
      }
      let mut chain = Vec::new();
      let mut current = Some(start);
      while let Some(index) = current {
        match state[index] {
          1 => return Err(TreeError::Cycle(slots[index].id.clone())),
          2 => break,
          _ => {
            state[index] = 1;
            chain.push(index);
            current = slots[index].parent_id.as_deref().and_then(|p| by_id.get(p).copied());
          }
        }
      }
      for index in chain {
        state[index] = 2;
      }
    }

    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (index, slot) in slots.iter().enumerate() {
      match slot.parent_id.as_deref() {
        None => roots.push(index),
        Some(parent) => {
          if let Some(&parent_index) = by_id.get(parent) {
            children.entry(parent_index).or_default().push(index);
          }
          // Unknown parent -> orphan, intentionally unreachable
        }
      }
    }

    Ok(Self { slots, by_id, children, roots })
  }

  pub fn get(&self, id: &str) -> Option<&SlotDescriptor> {
    self.by_id.get(id).map(|&index| &self.slots[index])
  }

  pub fn contains(&self, id: &str) -> bool {
    self.by_id.contains_key(id)
  }

  /// Ordered children of `parent_id`; `None` yields the root slots.
  pub fn children_of(&self, parent_id: Option<&str>) -> impl Iterator<Item = &SlotDescriptor> {
    let indices = match parent_id {
      None => Some(&self.roots),
      Some(id) => self.by_id.get(id).and_then(|index| self.children.get(index)),
    };
    indices.into_iter().flatten().map(|&index| &self.slots[index])
  }

  /// The full descriptor collection in declaration order.
  pub fn slots(&self) -> &[SlotDescriptor] {
    &self.slots
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }
}
