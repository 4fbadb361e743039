/* crates/trellis-engine/src/tests/mod.rs */


use serde_json::Value;

use crate::cms::CmsBroker;
use crate::context::{RenderFlags, RenderMode, ViewMode, ViewportMode};
use crate::editor::EditorCallbacks;
use crate::i18n::NoTranslations;
use crate::registry::ComponentRegistry;
use crate::render::{RenderOutput, RenderParts, render};
use crate::tree::SlotTree;

/// One render pass with default collaborators.
fn pass(tree: &SlotTree, data: &Value, mode: RenderMode) -> RenderOutput {
  let mut cms = CmsBroker::new();
  pass_with(tree, data, mode, ViewportMode::Desktop, &ComponentRegistry::new(), &mut cms)
}

fn pass_with(
  tree: &SlotTree,
  data: &Value,
  mode: RenderMode,
  viewport: ViewportMode,
  registry: &ComponentRegistry,
  cms: &mut CmsBroker,
) -> RenderOutput {
  let flags = RenderFlags::new();
  let callbacks = EditorCallbacks::default();
  render(RenderParts {
    tree,
    data,
    view_mode: ViewMode::default(),
    viewport,
    mode,
    language: "en",
    flags: &flags,
    registry,
    translator: &NoTranslations,
    callbacks: &callbacks,
    cms,
  })
}
