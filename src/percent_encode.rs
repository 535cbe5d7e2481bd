use crate::checkers::has_valid_escapes;
use crate::compat::{Cow, String};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Path percent-encode set
/// C0 control + space, ", #, <, >, ?, `, {, }, ^ and % itself.
/// Decoded paths are stored, so a literal % must survive re-encoding.
pub const PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Userinfo percent-encode set
/// Path + /, :, ;, =, @, [, \, ], |
/// First path segment of a URL written without authority, where a `:` would
/// read as a scheme delimiter.
pub const FIRST_SEGMENT_SET: &AsciiSet = &PATH_SET.add(b':');

pub const USERINFO_SET: &AsciiSet = &PATH_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'|');

/// Host percent-encode set
/// Path + /, @, \, |. Brackets and colons stay for IPv6 literals.
pub const HOST_SET: &AsciiSet = &PATH_SET.add(b'/').add(b'@').add(b'\\').add(b'|');

/// Write percent-encoded string directly to buffer
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    buffer.reserve(input.len());
    for chunk in utf8_percent_encode(input, encode_set) {
        buffer.push_str(chunk);
    }
}

/// Decode a percent-encoded URL component.
/// Returns None on a malformed escape or when the result is not UTF-8.
pub fn percent_decode(input: &str) -> Option<String> {
    if !has_valid_escapes(input) {
        return None;
    }
    percent_decode_str(input)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

/// Form-encode a query key or value into `buffer`.
/// Unreserved bytes pass through, space becomes `+`, the rest is `%XX`.
pub fn form_encode_into(buffer: &mut String, input: &str) {
    use core::fmt::Write;

    buffer.reserve(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                buffer.push(byte as char);
            }
            b' ' => buffer.push('+'),
            _ => {
                let _ = write!(buffer, "%{byte:02X}");
            }
        }
    }
}

/// Decode a form-encoded query key or value.
/// Malformed escapes are kept literally and invalid UTF-8 is replaced.
pub fn form_decode(input: &str) -> String {
    let spaced: Cow<'_, str> = if memchr::memchr(b'+', input.as_bytes()).is_some() {
        Cow::Owned(input.replace('+', " "))
    } else {
        Cow::Borrowed(input)
    };
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
