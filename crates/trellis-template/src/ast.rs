/* crates/trellis-template/src/ast.rs */

#[derive(Debug)]
pub(crate) enum AstNode {
  Text(String),
  Interp { path: String },
  Each { path: String, body: Vec<AstNode> },
  If { cond: Condition, body: Vec<AstNode> },
  Unless { cond: Condition, body: Vec<AstNode> },
}

#[derive(Debug)]
pub(crate) enum Condition {
  Path(String),
  Helper { name: String, args: Vec<Operand> },
}

#[derive(Debug)]
pub(crate) enum Operand {
  Path(String),
  Number(f64),
}
