//! Field extraction from JSON payloads.
//!
//! A payload is only considered when its first byte opens an object or an
//! array and the whole payload parses. Anything else, including unknown
//! field names, is reported as absent.

use serde_json::Value;

use crate::descriptor::{LEGACY_OBJ_FIELD, LEGACY_VALUE_FIELD, OBJ_FIELD, VALUE_FIELD};

const INDENT: &[u8] = b"  ";

/// A payload parsed once for all fields requested in one extraction call.
pub struct JsonEvent<'a> {
    raw: &'a [u8],
    doc: Value,
}

impl<'a> JsonEvent<'a> {
    pub fn parse(payload: &'a [u8]) -> Option<Self> {
        if !matches!(payload.first(), Some(b'{') | Some(b'[')) {
            return None;
        }
        serde_json::from_slice(payload)
            .ok()
            .map(|doc| JsonEvent { raw: payload, doc })
    }

    /// Value of `field` with its optional argument.
    pub fn field(&self, field: &str, arg: Option<&str>) -> Option<String> {
        match field {
            VALUE_FIELD | LEGACY_VALUE_FIELD => self.string_at(arg?),
            OBJ_FIELD | LEGACY_OBJ_FIELD => reindent(self.raw),
            _ => None,
        }
    }

    /// The string stored at `/x/y/z`. The leading slash is optional; array
    /// levels are addressed by index. Non-string targets are absent.
    fn string_at(&self, path: &str) -> Option<String> {
        let pointer = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        self.doc.pointer(&pointer)?.as_str().map(str::to_string)
    }
}

/// Re-indents a validated JSON document by two spaces per level.
///
/// Only whitespace between tokens changes: numbers, escapes and repeated keys
/// are copied as written, empty containers stay `{}`/`[]`, and whitespace
/// after the closing bracket is kept.
pub fn reindent(raw: &[u8]) -> Option<String> {
    let mut out = Vec::with_capacity(raw.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut just_opened = false;
    let mut closed = false;

    for &b in raw {
        if in_string {
            out.push(b);
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
            if closed {
                out.push(b);
            }
            continue;
        }

        if just_opened {
            just_opened = false;
            if matches!(b, b'}' | b']') {
                depth = depth.saturating_sub(1);
                out.push(b);
                closed = depth == 0;
                continue;
            }
            newline(&mut out, depth);
        }

        match b {
            b'"' => {
                in_string = true;
                out.push(b);
            }
            b'{' | b'[' => {
                out.push(b);
                depth += 1;
                just_opened = true;
            }
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                newline(&mut out, depth);
                out.push(b);
                closed = depth == 0;
            }
            b',' => {
                out.push(b);
                newline(&mut out, depth);
            }
            b':' => out.extend_from_slice(b": "),
            _ => out.push(b),
        }
    }
    String::from_utf8(out).ok()
}

fn newline(out: &mut Vec<u8>, depth: usize) {
    out.push(b'\n');
    for _ in 0..depth {
        out.extend_from_slice(INDENT);
    }
}

/// Convenience for a single field on a raw payload.
pub fn extract_field(field: &str, arg: Option<&str>, payload: &[u8]) -> Option<String> {
    JsonEvent::parse(payload)?.field(field, arg)
}
