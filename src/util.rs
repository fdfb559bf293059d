//! Charset handling for raw content bytes.

use std::borrow::Cow;

/// Decode bytes to a string, handling legacy encodings.
///
/// 1. UTF-8 (a byte order mark is honored and stripped)
/// 2. The hinted encoding, when the bytes are not valid UTF-8
/// 3. Windows-1252, a superset of ISO-8859-1
///
/// Valid UTF-8 input is returned borrowed.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find a `charset=` declaration near the start of markup.
///
/// Matches both `<meta charset="x">` and the `content="text/html; charset=x"`
/// form. Only the first 1024 bytes are checked.
pub fn sniff_charset(bytes: &[u8]) -> Option<&str> {
    const NEEDLE: &[u8] = b"charset=";

    let prefix = &bytes[..bytes.len().min(1024)];
    let pos = prefix
        .windows(NEEDLE.len())
        .position(|w| w.eq_ignore_ascii_case(NEEDLE))?;
    let mut value = &prefix[pos + NEEDLE.len()..];

    if let Some((&quote, rest)) = value.split_first()
        && (quote == b'"' || quote == b'\'')
    {
        value = rest;
    }
    let end = value
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(value.len());

    std::str::from_utf8(&value[..end])
        .ok()
        .filter(|label| !label.is_empty())
}
