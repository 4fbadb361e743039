/* crates/trellis-engine/src/layout.rs */

//! Visibility and layout resolution for one sibling group: view-mode
//! filter, render-condition filter, stable grid-order sort, and column
//! span resolution for the active viewport. Pure functions, issues are
//! reported through the sink instead of errors.

use serde_json::Value;

use crate::context::{RenderFlags, RenderMode, ViewMode, ViewportMode};
use crate::errors::RenderIssue;
use crate::slot::{ColSpan, GridPosition, SlotDescriptor};

pub const FULL_WIDTH: u8 = 12;

/// Concrete layout decision for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanSpec {
  /// Concrete span in [1, 12]
  Unit(u8),
  /// Pre-composed responsive class string, passed through in production
  Classes(String),
  /// Slot opts out of the standard wrapper (absolute positioning or an
  /// explicitly empty span mapping)
  Bypass,
}

/// Filter a sibling group by view mode and render condition, then order
/// by grid position (row-major, stable for ties).
pub fn admissible<'a, I>(
  siblings: I,
  view_mode: &ViewMode,
  flags: &RenderFlags,
) -> Vec<&'a SlotDescriptor>
where
  I: IntoIterator<Item = &'a SlotDescriptor>,
{
  let mut eligible: Vec<&SlotDescriptor> = siblings
    .into_iter()
    .filter(|slot| {
      // No declared restriction -> eligible for every view mode
      match &slot.metadata.view_modes {
        None => true,
        Some(modes) => modes.iter().any(|m| m == view_mode.as_str()),
      }
    })
    .filter(|slot| {
      match &slot.metadata.render_condition {
        None => true,
        Some(name) => flags.is_enabled(name),
      }
    })
    .collect();

  eligible.sort_by_key(|slot| {
    let GridPosition { row, col } = slot.metadata.position.unwrap_or_default();
    (row, col)
  });
  eligible
}

/// Resolve a slot's column span for the active viewport. Never fails:
/// unparseable specs fall back to full width and record an issue.
pub fn resolve_span(
  slot: &SlotDescriptor,
  viewport: ViewportMode,
  mode: RenderMode,
  issues: &mut Vec<RenderIssue>,
) -> SpanSpec {
  if slot.metadata.absolute {
    return SpanSpec::Bypass;
  }

  match &slot.col_span {
    None => SpanSpec::Unit(FULL_WIDTH),
    Some(ColSpan::Fixed(n)) => SpanSpec::Unit(clamp_span(*n, &slot.id, issues)),
    Some(ColSpan::PerViewport(map)) => {
      if map.is_empty() {
        // Explicitly empty mapping bypasses the wrapper entirely
        return SpanSpec::Bypass;
      }
      let chosen = map
        .get(viewport.as_str())
        .or_else(|| map.get("default"))
        .or_else(|| map.values().next());
      match chosen.and_then(Value::as_u64) {
        Some(n) if n >= 1 && n <= u64::from(FULL_WIDTH) => SpanSpec::Unit(n as u8),
        _ => {
          issues.push(RenderIssue::InvalidLayoutSpec {
            slot_id: slot.id.clone(),
            detail: format!("no usable span for viewport `{}`", viewport.as_str()),
          });
          SpanSpec::Unit(FULL_WIDTH)
        }
      }
    }
    Some(ColSpan::Invalid(value)) => {
      issues.push(RenderIssue::InvalidLayoutSpec {
        slot_id: slot.id.clone(),
        detail: format!("unrecognized span value `{value}`"),
      });
      SpanSpec::Unit(FULL_WIDTH)
    }
    Some(ColSpan::Classes(classes)) => {
      if mode.is_editor() {
        // Editor previews have no real responsive surface; collapse the
        // expression to the single value the active viewport implies
        SpanSpec::Unit(reduce_classes(classes, viewport, &slot.id, issues))
      } else {
        SpanSpec::Classes(classes.clone())
      }
    }
  }
}

fn clamp_span(n: u8, slot_id: &str, issues: &mut Vec<RenderIssue>) -> u8 {
  if (1..=FULL_WIDTH).contains(&n) {
    n
  } else {
    issues.push(RenderIssue::InvalidLayoutSpec {
      slot_id: slot_id.to_string(),
      detail: format!("span {n} outside 1..=12"),
    });
    FULL_WIDTH
  }
}

// Breakpoint tiers for `col-*` class strings. Base covers xs/sm.
#[derive(Default)]
struct Tiers {
  base: Option<u8>,
  md: Option<u8>,
  lg: Option<u8>,
}

fn parse_col_classes(classes: &str) -> Tiers {
  let mut tiers = Tiers::default();
  for token in classes.split_whitespace() {
    let Some(rest) = token.strip_prefix("col-") else { continue };
    let (tier, digits) = match rest.split_once('-') {
      Some((bp, digits)) => (bp, digits),
      None => ("", rest),
    };
    let Ok(n) = digits.parse::<u8>() else { continue };
    if !(1..=FULL_WIDTH).contains(&n) {
      continue;
    }
    match tier {
      "" | "xs" | "sm" => tiers.base = Some(n),
      "md" => tiers.md = Some(n),
      "lg" | "xl" | "xxl" => tiers.lg = Some(n),
      _ => {}
    }
  }
  tiers
}

fn reduce_classes(
  classes: &str,
  viewport: ViewportMode,
  slot_id: &str,
  issues: &mut Vec<RenderIssue>,
) -> u8 {
  let tiers = parse_col_classes(classes);
  let resolved = match viewport {
    ViewportMode::Mobile => tiers.base,
    ViewportMode::Tablet => tiers.md.or(tiers.base),
    ViewportMode::Desktop => tiers.lg.or(tiers.md).or(tiers.base),
  };
  resolved.unwrap_or_else(|| {
    issues.push(RenderIssue::InvalidLayoutSpec {
      slot_id: slot_id.to_string(),
      detail: format!("unparseable responsive classes `{classes}`"),
    });
    FULL_WIDTH
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::slot::SlotKind;
  use serde_json::json;

  fn slot(id: &str) -> SlotDescriptor {
    SlotDescriptor::new(id, SlotKind::Text)
  }

  fn span_of(slot: &SlotDescriptor, viewport: ViewportMode, mode: RenderMode) -> SpanSpec {
    let mut issues = Vec::new();
    resolve_span(slot, viewport, mode, &mut issues)
  }

  // -- admissible --

  #[test]
  fn no_view_mode_restriction_is_always_eligible() {
    let a = slot("a");
    let out = admissible([&a], &ViewMode::new("emptyCart"), &RenderFlags::new());
    assert_eq!(out.len(), 1);
  }

  #[test]
  fn view_mode_filter_drops_mismatches() {
    let mut a = slot("a");
    a.metadata.view_modes = Some(vec!["default".to_string()]);
    let mut b = slot("b");
    b.metadata.view_modes = Some(vec!["default".to_string(), "emptyCart".to_string()]);
    let out = admissible([&a, &b], &ViewMode::new("emptyCart"), &RenderFlags::new());
    let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["b"]);
  }

  #[test]
  fn render_condition_filter() {
    let mut a = slot("a");
    a.metadata.render_condition = Some("menuOpen".to_string());
    let mut flags = RenderFlags::new();

    // Unknown identifier defaults to eligible
    assert_eq!(admissible([&a], &ViewMode::default(), &flags).len(), 1);

    flags.set("menuOpen", false);
    assert_eq!(admissible([&a], &ViewMode::default(), &flags).len(), 0);
  }

  #[test]
  fn grid_order_sort_row_major() {
    let a = slot("r2c1").at(2, 1);
    let b = slot("r1c2").at(1, 2);
    let c = slot("r1c1").at(1, 1);
    let out = admissible([&a, &b, &c], &ViewMode::default(), &RenderFlags::new());
    let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["r1c1", "r1c2", "r2c1"]);
  }

  #[test]
  fn grid_order_ties_keep_declaration_order() {
    let a = slot("first").at(1, 1);
    let b = slot("second").at(1, 1);
    let out = admissible([&a, &b], &ViewMode::default(), &RenderFlags::new());
    let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["first", "second"]);
  }

  // -- resolve_span --

  #[test]
  fn absent_col_span_is_full_width() {
    assert_eq!(
      span_of(&slot("a"), ViewportMode::Desktop, RenderMode::Production),
      SpanSpec::Unit(12)
    );
  }

  #[test]
  fn fixed_span_used_directly() {
    let mut s = slot("a");
    s.col_span = Some(ColSpan::Fixed(6));
    assert_eq!(span_of(&s, ViewportMode::Desktop, RenderMode::Production), SpanSpec::Unit(6));
  }

  #[test]
  fn fixed_span_out_of_range_falls_back() {
    let mut s = slot("a");
    s.col_span = Some(ColSpan::Fixed(0));
    let mut issues = Vec::new();
    assert_eq!(
      resolve_span(&s, ViewportMode::Desktop, RenderMode::Production, &mut issues),
      SpanSpec::Unit(12)
    );
    assert!(matches!(&issues[0], RenderIssue::InvalidLayoutSpec { slot_id, .. } if slot_id == "a"));
  }

  #[test]
  fn malformed_span_value_falls_back_full_width() {
    for bad in [json!(-1), json!(6.5), json!(true)] {
      let mut s = slot("a");
      s.col_span = serde_json::from_value(bad).ok();
      assert!(matches!(s.col_span, Some(ColSpan::Invalid(_))));
      let mut issues = Vec::new();
      assert_eq!(
        resolve_span(&s, ViewportMode::Desktop, RenderMode::Production, &mut issues),
        SpanSpec::Unit(12)
      );
      assert!(matches!(&issues[0], RenderIssue::InvalidLayoutSpec { slot_id, .. } if slot_id == "a"));
    }
  }

  #[test]
  fn per_viewport_lookup_then_default_then_first() {
    let mut s = slot("a");
    s.col_span = serde_json::from_value(json!({"default": 12, "tablet": 6})).ok();

    assert_eq!(span_of(&s, ViewportMode::Tablet, RenderMode::Production), SpanSpec::Unit(6));
    // Undeclared viewport resolves to the declared default
    assert_eq!(span_of(&s, ViewportMode::Desktop, RenderMode::Production), SpanSpec::Unit(12));

    // Neither viewport nor default -> first declared value
    s.col_span = serde_json::from_value(json!({"mobile": 4})).ok();
    assert_eq!(span_of(&s, ViewportMode::Desktop, RenderMode::Production), SpanSpec::Unit(4));
  }

  #[test]
  fn per_viewport_garbage_value_falls_back() {
    let mut s = slot("a");
    s.col_span = serde_json::from_value(json!({"desktop": "wide"})).ok();
    let mut issues = Vec::new();
    assert_eq!(
      resolve_span(&s, ViewportMode::Desktop, RenderMode::Production, &mut issues),
      SpanSpec::Unit(12)
    );
    assert_eq!(issues.len(), 1);
  }

  #[test]
  fn empty_mapping_bypasses_wrapper() {
    let mut s = slot("a");
    s.col_span = serde_json::from_value(json!({})).ok();
    assert_eq!(span_of(&s, ViewportMode::Desktop, RenderMode::Production), SpanSpec::Bypass);
  }

  #[test]
  fn absolute_slot_bypasses_wrapper() {
    let mut s = slot("a");
    s.metadata.absolute = true;
    s.col_span = Some(ColSpan::Fixed(6));
    assert_eq!(span_of(&s, ViewportMode::Desktop, RenderMode::Production), SpanSpec::Bypass);
  }

  #[test]
  fn classes_pass_through_in_production() {
    let mut s = slot("a");
    s.col_span = Some(ColSpan::Classes("col-12 col-md-6 col-lg-4".to_string()));
    assert_eq!(
      span_of(&s, ViewportMode::Desktop, RenderMode::Production),
      SpanSpec::Classes("col-12 col-md-6 col-lg-4".to_string())
    );
  }

  #[test]
  fn classes_collapse_in_editor() {
    let mut s = slot("a");
    s.col_span = Some(ColSpan::Classes("col-12 col-md-6 col-lg-4".to_string()));
    assert_eq!(span_of(&s, ViewportMode::Mobile, RenderMode::Editor), SpanSpec::Unit(12));
    assert_eq!(span_of(&s, ViewportMode::Tablet, RenderMode::Editor), SpanSpec::Unit(6));
    assert_eq!(span_of(&s, ViewportMode::Desktop, RenderMode::Editor), SpanSpec::Unit(4));
  }

  #[test]
  fn classes_fallback_chain_in_editor() {
    let mut s = slot("a");
    s.col_span = Some(ColSpan::Classes("col-8".to_string()));
    // No md/lg declared: every viewport falls back to base
    assert_eq!(span_of(&s, ViewportMode::Tablet, RenderMode::Editor), SpanSpec::Unit(8));
    assert_eq!(span_of(&s, ViewportMode::Desktop, RenderMode::Editor), SpanSpec::Unit(8));
  }

  #[test]
  fn unparseable_classes_fall_back_full_width() {
    let mut s = slot("a");
    s.col_span = Some(ColSpan::Classes("banner shiny".to_string()));
    let mut issues = Vec::new();
    assert_eq!(
      resolve_span(&s, ViewportMode::Desktop, RenderMode::Editor, &mut issues),
      SpanSpec::Unit(12)
    );
    assert_eq!(issues.len(), 1);
  }
}
