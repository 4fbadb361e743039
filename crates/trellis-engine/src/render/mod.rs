/* crates/trellis-engine/src/render/mod.rs */

//! Render orchestrator: walks the indexed tree, filters and orders each
//! sibling group, resolves template strings, dispatches per slot kind,
//! applies dual-mode wrapping, and recurses into composites. No condition
//! inside the walk propagates an error out of a pass; the worst effect of
//! malformed input is a missing or placeholder slot.

mod wrap;

use std::collections::HashSet;

use serde_json::Value;

use crate::cms::{CmsBroker, CmsState};
use crate::context::{RenderFlags, RenderMode, ViewMode, ViewportMode};
use crate::editor::EditorCallbacks;
use crate::errors::RenderIssue;
use crate::i18n::{Translator, is_translation_key};
use crate::layout::{admissible, resolve_span};
use crate::node::{Element, RenderNode};
use crate::registry::{ComponentInvocation, ComponentRegistry};
use crate::slot::{ButtonState, Script, SlotDescriptor, SlotKind};
use crate::tree::SlotTree;

use wrap::wrap_slot;

/// Deterministic substitute for an empty or unresolved image source.
pub const IMAGE_PLACEHOLDER: &str =
  "data:image/gif;base64,R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==";

/// A behavior hook to bind after the output is mounted. Production-only;
/// the embedder locates the element by `data-slot-id` and attaches through
/// [`crate::hooks::HookBinder`].
#[derive(Debug, Clone, PartialEq)]
pub struct HookBinding {
  pub slot_id: String,
  pub script: Script,
}

/// Everything one render pass consumes. The snapshot is immutable; edits
/// replace the collection and trigger a new pass.
pub struct RenderParts<'a> {
  pub tree: &'a SlotTree,
  pub data: &'a Value,
  pub view_mode: ViewMode,
  pub viewport: ViewportMode,
  pub mode: RenderMode,
  pub language: &'a str,
  pub flags: &'a RenderFlags,
  pub registry: &'a ComponentRegistry,
  pub translator: &'a dyn Translator,
  pub callbacks: &'a EditorCallbacks,
  pub cms: &'a mut CmsBroker,
}

#[derive(Debug)]
pub struct RenderOutput {
  pub nodes: Vec<RenderNode>,
  pub issues: Vec<RenderIssue>,
  pub hook_bindings: Vec<HookBinding>,
}

impl RenderOutput {
  pub fn to_html(&self) -> String {
    self.nodes.iter().map(RenderNode::to_html).collect()
  }
}

/// Run one synchronous render pass over the snapshot.
pub fn render(parts: RenderParts<'_>) -> RenderOutput {
  let RenderParts {
    tree,
    data,
    view_mode,
    viewport,
    mode,
    language,
    flags,
    registry,
    translator,
    callbacks,
    cms,
  } = parts;
  cms.begin_pass();
  let mut renderer = Renderer {
    tree,
    data,
    view_mode,
    viewport,
    mode,
    language,
    flags,
    registry,
    translator,
    callbacks,
    cms,
    issues: Vec::new(),
    bindings: Vec::new(),
    warned: HashSet::new(),
  };
  let nodes = renderer.render_children(None);
  let Renderer { issues, bindings, cms, .. } = renderer;
  cms.end_pass();
  RenderOutput { nodes, issues, hook_bindings: bindings }
}

struct Renderer<'a> {
  tree: &'a SlotTree,
  data: &'a Value,
  view_mode: ViewMode,
  viewport: ViewportMode,
  mode: RenderMode,
  language: &'a str,
  flags: &'a RenderFlags,
  registry: &'a ComponentRegistry,
  translator: &'a dyn Translator,
  callbacks: &'a EditorCallbacks,
  cms: &'a mut CmsBroker,
  issues: Vec<RenderIssue>,
  bindings: Vec<HookBinding>,
  // "logged once": names already warned about this pass
  warned: HashSet<String>,
}

impl<'a> Renderer<'a> {
  fn render_children(&mut self, parent_id: Option<&str>) -> Vec<RenderNode> {
    let tree = self.tree;
    let siblings = admissible(tree.children_of(parent_id), &self.view_mode, self.flags);

    let mut out = Vec::new();
    for slot in siblings {
      if slot.kind == SlotKind::StyleConfig {
        // Metadata carrier only, looked up by other slots
        continue;
      }
      let Some(content) = self.render_slot(slot) else { continue };
      let span = resolve_span(slot, self.viewport, self.mode, &mut self.issues);
      out.push(wrap_slot(slot, content, &span, self.mode, self.viewport));
    }
    out
  }

  fn render_slot(&mut self, slot: &'a SlotDescriptor) -> Option<RenderNode> {
    // Conditional-display metadata: present and falsy means render nothing
    if let Some(condition) = &slot.metadata.condition
      && !trellis_template::evaluate(condition, self.data)
    {
      return None;
    }

    match &slot.kind {
      SlotKind::Text => self.render_text(slot, false),
      SlotKind::Html => self.render_text(slot, true),
      SlotKind::Button => self.render_button(slot),
      SlotKind::Image => self.render_image(slot),
      SlotKind::Container | SlotKind::Grid | SlotKind::Flex => self.render_composite(slot),
      SlotKind::Component => self.render_component(slot),
      SlotKind::Cms => self.render_cms(slot),
      SlotKind::PluginWidget => self.render_widget(slot),
      SlotKind::StyleConfig => None,
      SlotKind::Unknown(kind) => self.render_unknown(slot, kind),
    }
  }

  // -- string resolution --

  fn process_tracked(&mut self, slot_id: &str, template: &str) -> String {
    let (out, diagnostics) = trellis_template::process_with_diagnostics(template, self.data);
    for diagnostic in diagnostics {
      self.issues.push(RenderIssue::TemplateResolutionGap {
        slot_id: slot_id.to_string(),
        detail: format!("{:?}: {}", diagnostic.kind, diagnostic.directive),
      });
    }
    out
  }

  /// Content resolution shared by text-bearing kinds: translation-key
  /// shaped content goes through the translator (raw key shown in editor
  /// when unresolved, empty in production); everything else through the
  /// template processor.
  fn resolve_content(&mut self, slot_id: &str, content: &str) -> String {
    if is_translation_key(content) {
      return match self.translator.translate(content.trim(), self.language) {
        Some(translated) => translated,
        None if self.mode.is_editor() => content.trim().to_string(),
        None => String::new(),
      };
    }
    self.process_tracked(slot_id, content)
  }

  fn styled_element(&mut self, tag: &str, slot: &'a SlotDescriptor) -> Element {
    let mut element = Element::new(tag).class(self.process_tracked(&slot.id, &slot.class_name));
    for (property, value) in &slot.styles {
      let resolved = match value {
        Value::String(s) => Value::String(self.process_tracked(&slot.id, s)),
        other => other.clone(),
      };
      if let Some(formatted) = trellis_template::format_style_value(property, &resolved) {
        element = element.style(property.clone(), formatted);
      }
    }
    element
  }

  fn bind_hook(&mut self, slot: &'a SlotDescriptor) {
    if self.mode == RenderMode::Production
      && let Some(script) = &slot.script
    {
      self.bindings.push(HookBinding { slot_id: slot.id.clone(), script: script.clone() });
    }
  }

  fn warn_once(&mut self, key: String, message: &str) {
    if self.warned.insert(key.clone()) {
      tracing::warn!(subject = %key, "{message}");
    }
  }

  // -- per-kind rendering --

  fn render_text(&mut self, slot: &'a SlotDescriptor, raw: bool) -> Option<RenderNode> {
    let content = self.resolve_content(&slot.id, &slot.content);
    let tag = slot.metadata.display_tag.as_deref().unwrap_or("div");
    let element = self.styled_element(tag, slot);
    self.bind_hook(slot);
    let element =
      if raw { element.child(RenderNode::raw(content)) } else { element.text(content) };
    Some(element.into_node())
  }

  fn render_button(&mut self, slot: &'a SlotDescriptor) -> Option<RenderNode> {
    // First state whose condition holds overrides the base presentation
    let active: Option<&ButtonState> = slot
      .metadata
      .states
      .iter()
      .find(|state| trellis_template::evaluate(&state.condition, self.data));

    let content = match active.and_then(|s| s.content.as_deref()) {
      Some(content) => self.resolve_content(&slot.id, content),
      None => self.resolve_content(&slot.id, &slot.content),
    };
    let mut element = self.styled_element("button", slot).text(content);
    if let Some(class) = active.and_then(|s| s.class_name.as_deref()) {
      element = element.class(self.process_tracked(&slot.id, class));
    }
    if active.is_some_and(|s| s.disabled) {
      element = element.attr("disabled", "");
    }

    if self.mode == RenderMode::Production {
      // Domain actions (cart, wishlist, logout, navigation) resolve from
      // the named handler; editor buttons stay inert
      if let Some(Script::Named(action)) = &slot.script {
        element = element.attr("data-action", action.clone());
      }
      self.bind_hook(slot);
    }
    Some(element.into_node())
  }

  fn render_image(&mut self, slot: &'a SlotDescriptor) -> Option<RenderNode> {
    // Sources are paths, not prose; dotted filenames must not hit the
    // translation-key heuristic
    let source = self.process_tracked(&slot.id, &slot.content);
    let source = source.trim();
    // A half-resolved expression or whitespace-broken value is not a
    // usable source
    let unusable =
      source.is_empty() || source.contains("{{") || source.chars().any(char::is_whitespace);
    let mut element = self.styled_element("img", slot);
    if unusable {
      element = element.class("trellis-placeholder").attr("src", IMAGE_PLACEHOLDER);
    } else {
      element = element.attr("src", source);
    }
    let image = element.into_node();

    // Link-wrap only when both identities resolve non-empty
    let target = slot
      .metadata
      .link_target
      .as_deref()
      .map(|t| self.process_tracked(&slot.id, t))
      .filter(|t| !t.is_empty());
    let container = slot
      .metadata
      .link_container
      .as_deref()
      .map(|c| self.process_tracked(&slot.id, c))
      .filter(|c| !c.is_empty());
    match (target, container) {
      (Some(target), Some(container)) => Some(
        Element::new("a")
          .attr("href", target)
          .attr("data-container", container)
          .child(image)
          .into_node(),
      ),
      _ => Some(image),
    }
  }

  fn render_composite(&mut self, slot: &'a SlotDescriptor) -> Option<RenderNode> {
    let children = self.render_children(Some(&slot.id));
    if children.is_empty() {
      // Zero admissible children: absent, never an empty wrapper
      return None;
    }
    let kind_class = match slot.kind {
      SlotKind::Grid => "trellis-grid",
      SlotKind::Flex => "trellis-flex",
      _ => "trellis-container",
    };
    Some(self.styled_element("div", slot).class(kind_class).children(children).into_node())
  }

  fn render_component(&mut self, slot: &'a SlotDescriptor) -> Option<RenderNode> {
    let name = slot.metadata.component.as_deref().unwrap_or_default();
    let Some(capability) = self.registry.get(name) else {
      self.warn_once(format!("component:{name}"), "unregistered component name");
      self.issues.push(RenderIssue::UnknownComponentName {
        slot_id: slot.id.clone(),
        name: name.to_string(),
      });
      return self.placeholder(slot, &format!("Unknown component: {name}"));
    };

    let invocation = ComponentInvocation {
      slot,
      content: self.resolve_content(&slot.id, &slot.content),
      class_name: self.process_tracked(&slot.id, &slot.class_name),
      data: self.data,
      slots: self.tree.slots(),
      mode: self.mode,
      viewport: self.viewport,
      callbacks: self.callbacks,
    };
    match capability.render(&invocation) {
      Ok(node) => Some(node),
      Err(issue) => {
        // Caught at this slot's boundary; siblings render unaffected
        self.warn_once(format!("component-failure:{name}"), "component render failed");
        self.issues.push(RenderIssue::ComponentFailure {
          slot_id: slot.id.clone(),
          name: name.to_string(),
          message: issue.to_string(),
        });
        self.placeholder(slot, &format!("Component failed: {name}"))
      }
    }
  }

  fn render_cms(&mut self, slot: &'a SlotDescriptor) -> Option<RenderNode> {
    let placement_key = slot
      .metadata
      .placement_key
      .as_deref()
      .or((!slot.content.is_empty()).then_some(slot.content.as_str()))?;
    let store_id = slot.metadata.store_id.as_deref();
    match self.cms.state(placement_key, store_id) {
      CmsState::Resolved(content) => {
        Some(self.styled_element("div", slot).child(RenderNode::raw(content)).into_node())
      }
      CmsState::Pending if self.mode.is_editor() => Some(
        Element::new("div")
          .class("trellis-cms-loading")
          .text(format!("Loading content: {placement_key}"))
          .into_node(),
      ),
      CmsState::Missing if self.mode.is_editor() => Some(
        Element::new("div")
          .class("trellis-cms-empty")
          .text(format!("No content for: {placement_key}"))
          .into_node(),
      ),
      // Production renders nothing until content resolves
      CmsState::Pending | CmsState::Missing => None,
    }
  }

  fn render_widget(&mut self, slot: &'a SlotDescriptor) -> Option<RenderNode> {
    let widget_id = slot.metadata.widget_id.as_deref().unwrap_or_default();
    if self.mode.is_editor() {
      return self.placeholder(slot, &format!("Widget: {widget_id}"));
    }
    // Deferred mount: identity plus config passed through unmodified
    let mut element =
      self.styled_element("div", slot).class("trellis-widget").attr("data-widget-id", widget_id);
    if let Some(config) = &slot.metadata.widget_config {
      element = element.attr("data-widget-config", config.to_string());
    }
    Some(element.into_node())
  }

  fn render_unknown(&mut self, slot: &'a SlotDescriptor, kind: &str) -> Option<RenderNode> {
    self.warn_once(format!("type:{kind}"), "unknown slot type");
    self.issues.push(RenderIssue::UnknownSlotType {
      slot_id: slot.id.clone(),
      kind: kind.to_string(),
    });
    self.placeholder(slot, &format!("Unknown slot type: {kind}"))
  }

  /// Visible placeholder in editor mode, minimal fallback (nothing) in
  /// production.
  fn placeholder(&self, slot: &SlotDescriptor, label: &str) -> Option<RenderNode> {
    if self.mode.is_editor() {
      Some(
        Element::new("div")
          .class("trellis-placeholder-slot")
          .attr("data-slot-id", slot.id.clone())
          .text(label)
          .into_node(),
      )
    } else {
      None
    }
  }
}
