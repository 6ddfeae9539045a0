//! Punctuation of the pipeline descriptor grammar.
//!
//! ```text
//! descriptor := segment ( "/" segment )*
//! segment    := kind ( "=" option ( "," option )* )?
//! option     := name ":" token
//! token      := scalar | "[" token ( "," token )* "]"
//! ```

use crate::foundation::error::{TransformError, TransformResult};

pub const SEGMENT_SEPARATOR: char = '/';
pub const KIND_SEPARATOR: char = '=';
pub const OPTION_SEPARATOR: char = ',';
pub const KEY_VALUE_SEPARATOR: char = ':';
pub const LIST_OPEN: char = '[';
pub const LIST_CLOSE: char = ']';
pub const LIST_SEPARATOR: char = ',';

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn is_reserved(b: u8) -> bool {
    matches!(
        b,
        b'%' | b'/' | b',' | b':' | b'=' | b'[' | b']' | b'?' | b'#' | b'"'
    ) || b.is_ascii_whitespace()
        || b.is_ascii_control()
        || !b.is_ascii()
}

/// Percent-escape every byte the grammar reserves, leaving everything else as-is.
pub fn escape(raw: &str) -> String {
    if !raw.bytes().any(is_reserved) {
        return raw.to_owned();
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for b in raw.bytes() {
        if is_reserved(b) {
            out.push('%');
            out.push(HEX[usize::from(b >> 4)] as char);
            out.push(HEX[usize::from(b & 0x0f)] as char);
        } else {
            out.push(b as char);
        }
    }
    out
}

/// A token that can be written without escaping: non-empty and free of reserved bytes.
pub fn is_plain_token(token: &str) -> bool {
    !token.is_empty() && !token.bytes().any(is_reserved)
}

/// Option names and operation kinds are snake_case wire tokens: `[a-z][a-z0-9_]*`.
pub fn is_wire_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_lowercase() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

pub fn check_wire_name(name: &str) -> TransformResult<()> {
    if is_wire_name(name) {
        Ok(())
    } else {
        Err(TransformError::InvalidOptionName(name.to_owned()))
    }
}
