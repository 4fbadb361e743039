/* crates/trellis-template/src/lib.rs */

//! Embedded `{{...}}` template language: interpolation, `#each` iteration
//! with `this` / `@index` aliases, `#if` / `#unless` conditionals with
//! comparison helpers. Pure string-in/string-out, evaluated against a
//! `serde_json::Value` data context.
//!
//! Malformed input never fails: unresolved paths become empty strings,
//! unparseable markers stay literal text, structural problems surface as
//! [`ParseDiagnostic`]s. Because every valid marker is consumed by a pass
//! and invalid ones are emitted verbatim, `process` is idempotent over its
//! own output.

mod ast;
mod helpers;
mod parser;
mod render;
mod token;

pub use helpers::{escape_html, format_style_value, is_truthy, resolve, stringify};
pub use parser::{DiagnosticKind, ParseDiagnostic};

use parser::{parse_condition, parse_with_diagnostics};
use render::{eval_condition, render};
use serde_json::Value;
use token::tokenize;

/// Evaluate `template` against `data`, substituting every recognized
/// `{{...}}` construct. Missing paths resolve to the empty string.
pub fn process(template: &str, data: &Value) -> String {
  process_with_diagnostics(template, data).0
}

/// Like [`process`] but also returns parse diagnostics for malformed
/// templates (unclosed blocks, orphan closers, unknown helpers).
pub fn process_with_diagnostics(template: &str, data: &Value) -> (String, Vec<ParseDiagnostic>) {
  // Fast path: nothing to substitute
  if !template.contains(token::MARKER_OPEN) {
    return (template.to_string(), Vec::new());
  }
  let tokens = tokenize(template);
  let mut diagnostics = Vec::new();
  let ast = parse_with_diagnostics(&tokens, &mut diagnostics);
  (render(&ast, data), diagnostics)
}

/// Evaluate a display condition. A braced expression is processed and
/// truthy when the result is a non-empty string other than `"false"`;
/// anything else is treated as a bare condition (dotted path or helper
/// call). Unparseable expressions are false.
pub fn evaluate(expr: &str, data: &Value) -> bool {
  let expr = expr.trim();
  if expr.is_empty() {
    return false;
  }
  if expr.contains(token::MARKER_OPEN) {
    let out = process(expr, data);
    let out = out.trim();
    return !out.is_empty() && out != "false";
  }
  let mut diagnostics = Vec::new();
  match parse_condition(expr, &mut diagnostics) {
    Some(cond) => eval_condition(&cond, data),
    None => false,
  }
}

#[cfg(test)]
mod tests;
