/* crates/trellis-engine/src/lib.rs */

//! Trellis composition engine: turns a flat collection of typed slot
//! descriptors plus a JSON data context into structured presentation
//! output, in interactive editor mode or read-only production mode.
//! Malformed input never crashes a render pass.

pub mod cms;
pub mod context;
pub mod editor;
pub mod errors;
pub mod hooks;
pub mod i18n;
pub mod layout;
pub mod node;
pub mod registry;
pub mod render;
pub mod slot;
pub mod tree;

// Re-exports for ergonomic use
pub use cms::{CmsBroker, CmsRequest, CmsState};
pub use context::{RenderFlags, RenderMode, ViewMode, ViewportMode};
pub use editor::{EditorCallbacks, WriteQueue};
pub use errors::{RenderIssue, TreeError};
pub use hooks::{HookBinder, HookInvocation, HookRegistry, InlineHookRunner, SlotHook, SurfaceHandle};
pub use i18n::{NoTranslations, TableTranslator, Translator};
pub use layout::SpanSpec;
pub use node::{Element, RenderNode};
pub use registry::{ComponentInvocation, ComponentRegistry, ComponentRender};
pub use render::{HookBinding, RenderOutput, RenderParts, render};
pub use slot::{ColSpan, GridPosition, Script, SlotDescriptor, SlotKind, SlotMetadata};
pub use tree::SlotTree;

#[cfg(test)]
mod tests;
