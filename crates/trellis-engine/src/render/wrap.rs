/* crates/trellis-engine/src/render/wrap.rs */

//! Dual-mode wrapping. Editor mode wraps every admissible, non-empty slot
//! with interactive affordances keyed by slot id and viewport; production
//! expresses the same span with minimal, non-interactive wrapping.
//! Bypassed slots (absolute positioning, explicitly empty span mapping)
//! are emitted directly.

use crate::context::{RenderMode, ViewportMode};
use crate::layout::SpanSpec;
use crate::node::{Element, RenderNode};
use crate::slot::SlotDescriptor;

pub(crate) fn wrap_slot(
  slot: &SlotDescriptor,
  content: RenderNode,
  span: &SpanSpec,
  mode: RenderMode,
  viewport: ViewportMode,
) -> RenderNode {
  match span {
    SpanSpec::Bypass => content,
    SpanSpec::Classes(classes) => {
      // Pre-composed responsive classes only reach this point in
      // production; the resolver collapses them for editor previews
      Element::new("div")
        .class(classes.clone())
        .attr("data-slot-id", slot.id.clone())
        .child(content)
        .into_node()
    }
    SpanSpec::Unit(span) => {
      let wrapper = Element::new("div").class(format!("trellis-col-{span}"));
      if mode.is_editor() {
        let mut wrapper = wrapper
          .class("trellis-slot")
          .attr("data-slot-id", slot.id.clone())
          .attr("data-viewport", viewport.as_str())
          .attr("data-span", span.to_string())
          .attr("draggable", "true");
        if slot.metadata.resize_disabled {
          wrapper = wrapper.attr("data-resizable", "false");
        }
        wrapper.child(content).into_node()
      } else {
        wrapper.attr("data-slot-id", slot.id.clone()).child(content).into_node()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::slot::SlotKind;

  fn content() -> RenderNode {
    RenderNode::text("x")
  }

  #[test]
  fn production_wrapper_is_minimal() {
    let slot = SlotDescriptor::new("hero", SlotKind::Text);
    let html = wrap_slot(
      &slot,
      content(),
      &SpanSpec::Unit(6),
      RenderMode::Production,
      ViewportMode::Desktop,
    )
    .to_html();
    assert_eq!(html, r#"<div class="trellis-col-6" data-slot-id="hero">x</div>"#);
  }

  #[test]
  fn editor_wrapper_carries_affordances() {
    let slot = SlotDescriptor::new("hero", SlotKind::Text);
    let html =
      wrap_slot(&slot, content(), &SpanSpec::Unit(6), RenderMode::Editor, ViewportMode::Tablet)
        .to_html();
    assert!(html.contains("trellis-slot"));
    assert!(html.contains(r#"data-slot-id="hero""#));
    assert!(html.contains(r#"data-viewport="tablet""#));
    assert!(html.contains(r#"data-span="6""#));
    assert!(html.contains(r#"draggable="true""#));
  }

  #[test]
  fn resize_disabled_marks_wrapper() {
    let mut slot = SlotDescriptor::new("hero", SlotKind::Text);
    slot.metadata.resize_disabled = true;
    let html =
      wrap_slot(&slot, content(), &SpanSpec::Unit(12), RenderMode::Editor, ViewportMode::Desktop)
        .to_html();
    assert!(html.contains(r#"data-resizable="false""#));
  }

  #[test]
  fn bypass_emits_content_directly() {
    let slot = SlotDescriptor::new("overlay", SlotKind::Text);
    let node = wrap_slot(
      &slot,
      content(),
      &SpanSpec::Bypass,
      RenderMode::Editor,
      ViewportMode::Desktop,
    );
    assert_eq!(node, RenderNode::text("x"));
  }

  #[test]
  fn responsive_classes_pass_through_in_production() {
    let slot = SlotDescriptor::new("a", SlotKind::Text);
    let html = wrap_slot(
      &slot,
      content(),
      &SpanSpec::Classes("col-12 col-md-6".to_string()),
      RenderMode::Production,
      ViewportMode::Desktop,
    )
    .to_html();
    assert_eq!(html, r#"<div class="col-12 col-md-6" data-slot-id="a">x</div>"#);
  }
}
