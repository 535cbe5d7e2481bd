/// Check whether `scheme` matches `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
pub fn is_valid_scheme(scheme: &str) -> bool {
    let bytes = scheme.as_bytes();
    match bytes.split_first() {
        Some((first, rest)) => {
            first.is_ascii_alphabetic()
                && rest
                    .iter()
                    .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
        }
        None => false,
    }
}

/// Split a leading `scheme:` off `input`.
///
/// A candidate scheme is the text before the first `:`. It is accepted only
/// when it contains no `/` and is syntactically valid; otherwise the whole
/// input is returned as the remainder.
pub fn split_scheme(input: &str) -> (Option<&str>, &str) {
    let Some(colon) = memchr::memchr(b':', input.as_bytes()) else {
        return (None, input);
    };
    let candidate = &input[..colon];
    if memchr::memchr(b'/', candidate.as_bytes()).is_none() && is_valid_scheme(candidate) {
        (Some(candidate), &input[colon + 1..])
    } else {
        (None, input)
    }
}

/// Check for text shaped like `scheme://` whose scheme is not valid,
/// e.g. `1http://` or `://`.
pub fn has_malformed_scheme(input: &str) -> bool {
    let Some(colon) = memchr::memchr(b':', input.as_bytes()) else {
        return false;
    };
    let candidate = &input[..colon];
    memchr::memchr(b'/', candidate.as_bytes()).is_none()
        && input[colon + 1..].starts_with("//")
        && !is_valid_scheme(candidate)
}
