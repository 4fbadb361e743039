/* crates/trellis-template/src/parser.rs */

use crate::ast::{AstNode, Condition, Operand};
use crate::helpers::is_valid_path;
use crate::token::Token;

/// Comparison helpers usable inside `{{#if (...)}}` conditions.
pub(crate) const KNOWN_HELPERS: &[&str] = &["gt", "lt", "eq"];

/// Diagnostic emitted when block directives are mismatched, unclosed, or
/// reference an unknown helper. Informational only: rendering always
/// completes regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
  pub kind: DiagnosticKind,
  pub directive: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
  /// Block-close directive without a matching open (e.g. orphan `{{/if}}`)
  UnmatchedBlockClose,
  /// Block-open directive that reached EOF without matching close
  UnclosedBlock,
  /// Helper name not in the known set; the condition evaluates false
  UnknownHelper,
}

#[cfg(test)]
fn parse(tokens: &[Token]) -> Vec<AstNode> {
  let mut diagnostics = Vec::new();
  parse_with_diagnostics(tokens, &mut diagnostics)
}

pub(crate) fn parse_with_diagnostics(
  tokens: &[Token],
  diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<AstNode> {
  let mut pos = 0;
  parse_until(tokens, &mut pos, &|_| false, diagnostics)
}

fn is_block_close(body: &str) -> bool {
  matches!(body, "/each" | "/if" | "/unless")
}

pub(crate) fn parse_condition(
  expr: &str,
  diagnostics: &mut Vec<ParseDiagnostic>,
) -> Option<Condition> {
  let expr = expr.trim();
  if let Some(inner) = expr.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
    let mut parts = inner.split_whitespace();
    let name = parts.next()?.to_string();
    let mut args = Vec::new();
    for part in parts {
      if let Ok(n) = part.parse::<f64>() {
        args.push(Operand::Number(n));
      } else if is_valid_path(part) {
        args.push(Operand::Path(part.to_string()));
      } else {
        return None;
      }
    }
    if !KNOWN_HELPERS.contains(&name.as_str()) {
      diagnostics.push(ParseDiagnostic {
        kind: DiagnosticKind::UnknownHelper,
        directive: name.clone(),
      });
    }
    Some(Condition::Helper { name, args })
  } else if is_valid_path(expr) {
    Some(Condition::Path(expr.to_string()))
  } else {
    None
  }
}

fn parse_until(
  tokens: &[Token],
  pos: &mut usize,
  stop: &dyn Fn(&str) -> bool,
  diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<AstNode> {
  let mut nodes = Vec::new();

  while *pos < tokens.len() {
    match &tokens[*pos] {
      Token::Text(value) => {
        nodes.push(AstNode::Text(value.clone()));
        *pos += 1;
      }
      Token::Marker { body, raw } => {
        if stop(body) {
          return nodes;
        }

        if let Some(path) = body.strip_prefix("#each ") {
          let path = path.trim();
          if !is_valid_path(path) {
            nodes.push(AstNode::Text(raw.clone()));
            *pos += 1;
            continue;
          }
          let path = path.to_string();
          *pos += 1;
          let block = parse_until(tokens, pos, &|d| d == "/each", diagnostics);
          let closed = *pos < tokens.len();
          if closed {
            *pos += 1;
          } else {
            diagnostics.push(ParseDiagnostic {
              kind: DiagnosticKind::UnclosedBlock,
              directive: format!("#each {path}"),
            });
          }
          nodes.push(AstNode::Each { path, body: block });
        } else if let Some(expr) = body.strip_prefix("#if ") {
          let Some(cond) = parse_condition(expr, diagnostics) else {
            nodes.push(AstNode::Text(raw.clone()));
            *pos += 1;
            continue;
          };
          *pos += 1;
          let block = parse_until(tokens, pos, &|d| d == "/if", diagnostics);
          let closed = *pos < tokens.len();
          if closed {
            *pos += 1;
          } else {
            diagnostics.push(ParseDiagnostic {
              kind: DiagnosticKind::UnclosedBlock,
              directive: format!("#if {}", expr.trim()),
            });
          }
          nodes.push(AstNode::If { cond, body: block });
        } else if let Some(expr) = body.strip_prefix("#unless ") {
          let Some(cond) = parse_condition(expr, diagnostics) else {
            nodes.push(AstNode::Text(raw.clone()));
            *pos += 1;
            continue;
          };
          *pos += 1;
          let block = parse_until(tokens, pos, &|d| d == "/unless", diagnostics);
          let closed = *pos < tokens.len();
          if closed {
            *pos += 1;
          } else {
            diagnostics.push(ParseDiagnostic {
              kind: DiagnosticKind::UnclosedBlock,
              directive: format!("#unless {}", expr.trim()),
            });
          }
          nodes.push(AstNode::Unless { cond, body: block });
        } else if is_block_close(body) {
          diagnostics.push(ParseDiagnostic {
            kind: DiagnosticKind::UnmatchedBlockClose,
            directive: body.clone(),
          });
          *pos += 1;
        } else if is_valid_path(body) {
          nodes.push(AstNode::Interp { path: body.clone() });
          *pos += 1;
        } else {
          // Not a directive the language knows -- literal text, verbatim
          nodes.push(AstNode::Text(raw.clone()));
          *pos += 1;
        }
      }
    }
  }

  nodes
}
