/// Prune fragment (#hash) from URL string
/// Returns (`url_without_fragment`, `fragment_without_hash`)
pub fn prune_fragment(input: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'#', input.as_bytes()).map_or((input, None), |pos| {
        (&input[..pos], Some(&input[pos + 1..]))
    })
}

/// Prune query (?search) from a URL string that no longer has a fragment
/// Returns (`url_without_query`, `query_without_question_mark`)
pub fn prune_query(input: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'?', input.as_bytes()).map_or((input, None), |pos| {
        (&input[..pos], Some(&input[pos + 1..]))
    })
}

/// Split `//authority/path` into the authority and the path (with its slash).
/// Returns None when `input` does not start with `//`.
pub fn split_authority(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix("//")?;
    Some(
        memchr::memchr(b'/', rest.as_bytes())
            .map_or((rest, ""), |pos| (&rest[..pos], &rest[pos..])),
    )
}

/// Map an empty optional component to None
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_fragment() {
        assert_eq!(prune_fragment("/a?b#c#d"), ("/a?b", Some("c#d")));
        assert_eq!(prune_fragment("/a"), ("/a", None));
        assert_eq!(prune_fragment("#"), ("", Some("")));
    }

    #[test]
    fn test_prune_query() {
        assert_eq!(prune_query("/a?b?c"), ("/a", Some("b?c")));
        assert_eq!(prune_query("?x"), ("", Some("x")));
        assert_eq!(prune_query("/a"), ("/a", None));
    }

    #[test]
    fn test_split_authority() {
        assert_eq!(split_authority("//host/path"), Some(("host", "/path")));
        assert_eq!(split_authority("//host"), Some(("host", "")));
        assert_eq!(split_authority("/path"), None);
        assert_eq!(split_authority("path"), None);
    }
}
