/* crates/trellis-engine/src/node.rs */

//! Structured render output. A pass produces a tree of [`RenderNode`]s
//! that both modes (and tests) can inspect; [`RenderNode::to_html`]
//! serializes it for an HTML surface.

use trellis_template::escape_html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
  Element(Element),
  Text(String),
  RawHtml(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub tag: String,
  pub classes: Vec<String>,
  // Pre-formatted property/value pairs, serialized `prop:value`
  pub styles: Vec<(String, String)>,
  pub attrs: Vec<(String, String)>,
  pub children: Vec<RenderNode>,
}

const VOID_ELEMENTS: &[&str] =
  &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr"];

impl Element {
  pub fn new(tag: impl Into<String>) -> Self {
    Self {
      tag: tag.into(),
      classes: Vec::new(),
      styles: Vec::new(),
      attrs: Vec::new(),
      children: Vec::new(),
    }
  }

  pub fn class(mut self, class: impl Into<String>) -> Self {
    let class = class.into();
    if !class.is_empty() {
      self.classes.push(class);
    }
    self
  }

  pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
    self.styles.push((property.into(), value.into()));
    self
  }

  pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.attrs.push((name.into(), value.into()));
    self
  }

  pub fn child(mut self, node: RenderNode) -> Self {
    self.children.push(node);
    self
  }

  pub fn children(mut self, nodes: impl IntoIterator<Item = RenderNode>) -> Self {
    self.children.extend(nodes);
    self
  }

  pub fn text(self, text: impl Into<String>) -> Self {
    self.child(RenderNode::Text(text.into()))
  }

  pub fn into_node(self) -> RenderNode {
    RenderNode::Element(self)
  }
}

impl RenderNode {
  pub fn text(value: impl Into<String>) -> Self {
    Self::Text(value.into())
  }

  pub fn raw(value: impl Into<String>) -> Self {
    Self::RawHtml(value.into())
  }

  pub fn to_html(&self) -> String {
    let mut out = String::new();
    self.write_html(&mut out);
    out
  }

  fn write_html(&self, out: &mut String) {
    match self {
      Self::Text(text) => out.push_str(&escape_html(text)),
      Self::RawHtml(html) => out.push_str(html),
      Self::Element(el) => {
        out.push('<');
        out.push_str(&el.tag);
        if !el.classes.is_empty() {
          out.push_str(" class=\"");
          out.push_str(&escape_html(&el.classes.join(" ")));
          out.push('"');
        }
        if !el.styles.is_empty() {
          let css: Vec<String> =
            el.styles.iter().map(|(prop, value)| format!("{prop}:{value}")).collect();
          out.push_str(" style=\"");
          out.push_str(&escape_html(&css.join(";")));
          out.push('"');
        }
        for (name, value) in &el.attrs {
          out.push(' ');
          out.push_str(name);
          out.push_str("=\"");
          out.push_str(&escape_html(value));
          out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&el.tag.as_str()) {
          return;
        }
        for child in &el.children {
          child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_is_escaped() {
    assert_eq!(RenderNode::text("<b>&").to_html(), "&lt;b&gt;&amp;");
  }

  #[test]
  fn raw_html_passes_through() {
    assert_eq!(RenderNode::raw("<b>hi</b>").to_html(), "<b>hi</b>");
  }

  #[test]
  fn element_with_classes_styles_attrs() {
    let node = Element::new("div")
      .class("card")
      .class("wide")
      .style("margin-top", "16px")
      .attr("data-slot", "hero")
      .text("hi")
      .into_node();
    assert_eq!(
      node.to_html(),
      r#"<div class="card wide" style="margin-top:16px" data-slot="hero">hi</div>"#
    );
  }

  #[test]
  fn empty_class_is_skipped() {
    let node = Element::new("span").class("").text("x").into_node();
    assert_eq!(node.to_html(), "<span>x</span>");
  }

  #[test]
  fn multiple_styles_joined() {
    let node =
      Element::new("div").style("margin-top", "16px").style("opacity", "0.5").into_node();
    assert_eq!(node.to_html(), r#"<div style="margin-top:16px;opacity:0.5"></div>"#);
  }

  #[test]
  fn void_element_has_no_closing_tag() {
    let node = Element::new("img").attr("src", "a.png").into_node();
    assert_eq!(node.to_html(), r#"<img src="a.png">"#);
  }

  #[test]
  fn attribute_values_escaped() {
    let node = Element::new("div").attr("title", "a\"b").into_node();
    assert_eq!(node.to_html(), r#"<div title="a&quot;b"></div>"#);
  }

  #[test]
  fn nested_children() {
    let node = Element::new("ul")
      .child(Element::new("li").text("a").into_node())
      .child(Element::new("li").text("b").into_node())
      .into_node();
    assert_eq!(node.to_html(), "<ul><li>a</li><li>b</li></ul>");
  }
}
