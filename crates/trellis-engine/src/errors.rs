/* crates/trellis-engine/src/errors.rs */

use thiserror::Error;

/// Per-slot problems observed during a render pass. Issues are recorded on
/// the pass output and logged; they never abort rendering. The worst
/// observable effect of any of these is a missing or placeholder slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderIssue {
  #[error("template gap in slot `{slot_id}`: {detail}")]
  TemplateResolutionGap { slot_id: String, detail: String },
  #[error("unknown slot type `{kind}` on slot `{slot_id}`")]
  UnknownSlotType { slot_id: String, kind: String },
  #[error("no component registered under `{name}` (slot `{slot_id}`)")]
  UnknownComponentName { slot_id: String, name: String },
  #[error("invalid column span on slot `{slot_id}`: {detail}")]
  InvalidLayoutSpec { slot_id: String, detail: String },
  #[error("hook `{hook}` failed on slot `{slot_id}`: {message}")]
  HookExecutionFailure { slot_id: String, hook: String, message: String },
  #[error("component `{name}` failed on slot `{slot_id}`: {message}")]
  ComponentFailure { slot_id: String, name: String, message: String },
  #[error("stale async result for placement `{placement_key}` discarded")]
  StaleAsyncResult { placement_key: String },
}

/// Structural defects in the input descriptor collection, reported by
/// [`crate::tree::SlotTree::build`] before any render pass exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
  #[error("duplicate slot id `{0}`")]
  DuplicateId(String),
  #[error("parent cycle through slot `{0}`")]
  Cycle(String),
}
