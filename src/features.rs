//! Lexical URL features.
//!
//! Pure string transforms with no failure path: every input, however
//! malformed, yields a value for each field. An empty string scores as
//! length 0, no special characters, not an IP host.

/// Character count of the raw URL (code points, not bytes).
pub fn url_length(url: &str) -> u32 {
    url.chars().count() as u32
}

/// Whether the literal substring `https` occurs anywhere in the URL.
///
/// Deliberately not scheme-aware: `http://a.com/https-page` matches too.
/// The model was trained on this exact signal, so it stays a substring test.
pub fn contains_https(url: &str) -> u8 {
    u8::from(url.contains("https"))
}

/// Count of characters that are neither letters nor digits
/// (Unicode alphanumeric, matching the training data).
pub fn special_char_count(url: &str) -> u32 {
    url.chars().filter(|c| !c.is_alphanumeric()).count() as u32
}

/// Whether the URL's host segment is a 4-dot-separated all-numeric string.
///
/// The host is taken positionally as the third `/`-separated segment, which
/// assumes a `scheme://host/...` shape. Anything that does not parse that
/// way — too few segments, empty or non-numeric parts, wrong part count —
/// is reported as not-an-IP, never as an error.
pub fn is_ip_address(url: &str) -> bool {
    let Some(host) = url.split('/').nth(2) else {
        return false;
    };
    let parts: Vec<&str> = host.split('.').collect();
    parts.len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}
