//! PDF literal string helpers.

/// Escape bytes for use inside a PDF literal string (without the parentheses).
///
/// Backslash, both parentheses and carriage return are escaped; everything else
/// is passed through byte for byte.
pub fn escape_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 8);
    for &b in data {
        match b {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(b),
        }
    }
    out
}

/// Wrap text as a complete PDF literal string: `(escaped)`.
pub fn literal_string(text: &str) -> String {
    let escaped = escape_bytes(text.as_bytes());
    format!("({})", String::from_utf8_lossy(&escaped))
}
