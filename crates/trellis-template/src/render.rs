/* crates/trellis-template/src/render.rs */

use serde_json::Value;

use crate::ast::{AstNode, Condition, Operand};
use crate::helpers::{as_number, is_truthy, resolve, stringify};

pub(crate) fn render(nodes: &[AstNode], data: &Value) -> String {
  let mut out = String::new();

  for node in nodes {
    match node {
      AstNode::Text(value) => out.push_str(value),

      AstNode::Interp { path } => {
        if let Some(value) = resolve(path, data) {
          out.push_str(&stringify(value));
        }
        // Missing path -> empty string, never an error
      }

      AstNode::Each { path, body } => {
        if let Some(Value::Array(arr)) = resolve(path, data) {
          for (index, item) in arr.iter().enumerate() {
            // Layer `this` / `@index` over the outer scope
            let scoped = if let Value::Object(map) = data {
              let mut new_map = map.clone();
              new_map.insert("this".to_string(), item.clone());
              new_map.insert("@index".to_string(), Value::from(index));
              Value::Object(new_map)
            } else {
              let mut new_map = serde_json::Map::new();
              new_map.insert("this".to_string(), item.clone());
              new_map.insert("@index".to_string(), Value::from(index));
              Value::Object(new_map)
            };
            out.push_str(&render(body, &scoped));
          }
        }
      }

      AstNode::If { cond, body } => {
        if eval_condition(cond, data) {
          out.push_str(&render(body, data));
        }
      }

      AstNode::Unless { cond, body } => {
        if !eval_condition(cond, data) {
          out.push_str(&render(body, data));
        }
      }
    }
  }

  out
}

fn operand_number(operand: &Operand, data: &Value) -> Option<f64> {
  match operand {
    Operand::Number(n) => Some(*n),
    Operand::Path(path) => resolve(path, data).and_then(as_number),
  }
}

pub(crate) fn eval_condition(cond: &Condition, data: &Value) -> bool {
  match cond {
    Condition::Path(path) => resolve(path, data).is_some_and(is_truthy),
    Condition::Helper { name, args } => {
      let [a, b] = args.as_slice() else { return false };
      let (Some(a), Some(b)) = (operand_number(a, data), operand_number(b, data)) else {
        return false;
      };
      match name.as_str() {
        "gt" => a > b,
        "lt" => a < b,
        "eq" => a == b,
        _ => false,
      }
    }
  }
}
