/* crates/trellis-template/src/token.rs */

#[derive(Debug)]
pub(crate) enum Token {
  Text(String),
  // body: trimmed directive between the braces; raw: the original source
  // span including braces, re-emitted verbatim when the body is invalid
  Marker { body: String, raw: String },
}

pub(crate) const MARKER_OPEN: &str = "{{";
pub(crate) const MARKER_CLOSE: &str = "}}";

pub(crate) fn tokenize(template: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut pos = 0;

  while pos < template.len() {
    if let Some(rel) = template[pos..].find(MARKER_OPEN) {
      let marker_start = pos + rel;
      if marker_start > pos {
        tokens.push(Token::Text(template[pos..marker_start].to_string()));
      }
      let after_open = marker_start + MARKER_OPEN.len();
      if let Some(close_rel) = template[after_open..].find(MARKER_CLOSE) {
        let raw = template[marker_start..after_open + close_rel + MARKER_CLOSE.len()].to_string();
        let body = template[after_open..after_open + close_rel].trim().to_string();
        tokens.push(Token::Marker { body, raw });
        pos = after_open + close_rel + MARKER_CLOSE.len();
      } else {
        // Unclosed marker -- treat rest as text
        tokens.push(Token::Text(template[marker_start..].to_string()));
        break;
      }
    } else {
      tokens.push(Token::Text(template[pos..].to_string()));
      break;
    }
  }

  tokens
}
