use crate::compat::{String, ToString, Vec};
use crate::percent_encode::form_decode;
use crate::query::{QueryMap, QueryValue};

/// Deepest bracket nesting kept from a key; further groups are ignored.
pub const MAX_NESTING: usize = 64;

/// Decode a raw query string (no leading `?`) into a [`QueryMap`].
///
/// Pairs are `&`-separated and split at the first `=`. A pair without `=`
/// decodes to [`QueryValue::Null`]. Bracketed keys nest: `a[b]=1` gives
/// `{a: {b: "1"}}` and `a[]=1&a[]=2` gives `{a: ["1", "2"]}`.
///
/// Each key lookup is a linear scan of [`QueryMap`], so parsing is
/// quadratic in the number of distinct keys.
pub fn parse_query(raw: &str) -> QueryMap {
    let mut map = QueryMap::new();

    for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, QueryValue::String(form_decode(value))),
            None => (pair, QueryValue::Null),
        };
        let (base, segments) = split_key(raw_key);
        let segments: Vec<String> = segments.into_iter().map(form_decode).collect();
        assign(&mut map, form_decode(base), &segments, value);
    }

    map.collapse_lists()
}

/// Split `a[b][]` into `("a", ["b", ""])`.
///
/// The key stays plain when it starts with `[` or its first `[` is never
/// closed. Anything after the last complete `[...]` group is dropped, as is
/// every group past [`MAX_NESTING`].
fn split_key(key: &str) -> (&str, Vec<&str>) {
    let mut segments = Vec::new();
    let Some(open) = key.find('[').filter(|&open| open > 0) else {
        return (key, segments);
    };

    let mut pos = open;
    while segments.len() < MAX_NESTING && key[pos..].starts_with('[') {
        let Some(len) = key[pos + 1..].find(']') else {
            break;
        };
        segments.push(&key[pos + 1..pos + 1 + len]);
        pos += len + 2;
    }

    if segments.is_empty() {
        (key, segments)
    } else {
        (&key[..open], segments)
    }
}

/// Store `value` under `key` followed by the nested `segments`.
/// An empty segment appends at the next integer index; the pair is dropped
/// when no index is left.
fn assign(map: &mut QueryMap, key: String, segments: &[String], value: QueryValue) {
    let Some((next, rest)) = segments.split_first() else {
        map.insert(key, value);
        return;
    };

    if !matches!(map.get_mut(&key), Some(QueryValue::Map(_))) {
        map.insert(key.clone(), QueryMap::new());
    }
    if let Some(QueryValue::Map(child)) = map.get_mut(&key) {
        let child_key = if next.is_empty() {
            let Some(index) = next_index(child) else {
                return;
            };
            index.to_string()
        } else {
            next.clone()
        };
        assign(child, child_key, rest, value);
    }
}

/// One past the largest integer key, 0 for none, None past `usize::MAX`.
fn next_index(map: &QueryMap) -> Option<usize> {
    map.keys()
        .filter_map(|k| k.parse::<usize>().ok())
        .max()
        .map_or(Some(0), |max| max.checked_add(1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compat::ToString;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("a"), ("a", vec![]));
        assert_eq!(split_key("a[]"), ("a", vec![""]));
        assert_eq!(split_key("a[b][c]"), ("a", vec!["b", "c"]));
        assert_eq!(split_key("a[b]x[c]"), ("a", vec!["b"]));
        assert_eq!(split_key("a[b"), ("a[b", vec![]));
        assert_eq!(split_key("[a]"), ("[a]", vec![]));
        assert_eq!(split_key("a[b][c"), ("a", vec!["b"]));
    }

    #[test]
    fn test_parse_plain() {
        let map = parse_query("foo=bar&lorem=ipsum");
        let entries: Vec<(&str, &QueryValue)> = map.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("foo", &QueryValue::from("bar")),
                ("lorem", &QueryValue::from("ipsum"))
            ]
        );
    }

    #[test]
    fn test_parse_null_and_empty() {
        let map = parse_query("a&b=");
        assert_eq!(map.get("a").unwrap(), &QueryValue::Null);
        assert_eq!(map.get("b").unwrap(), &QueryValue::from(""));
    }

    #[test]
    fn test_parse_duplicate_keys_overwrite_in_place() {
        let map = parse_query("a=1&b=2&a=3");
        assert_eq!(map.to_string(), "a=3&b=2");
    }

    #[test]
    fn test_parse_append_brackets() {
        let map = parse_query("a[]=1&a[]=2");
        assert_eq!(map.get("a").unwrap(), &QueryValue::from(vec!["1", "2"]));
    }

    #[test]
    fn test_parse_indexed_brackets() {
        let map = parse_query("baz[0]=zero&baz[1]=one");
        assert_eq!(map.get("baz").unwrap(), &QueryValue::from(vec!["zero", "one"]));
    }

    #[test]
    fn test_parse_keyed_brackets() {
        let map = parse_query("a[b]=1&a[c][]=x&a[c][]=y");
        let inner = map.get("a").unwrap().as_map().unwrap();
        assert_eq!(inner.get("b").unwrap(), &QueryValue::from("1"));
        assert_eq!(inner.get("c").unwrap(), &QueryValue::from(vec!["x", "y"]));
    }

    #[test]
    fn test_parse_sparse_indexes_stay_a_map() {
        let map = parse_query("a[1]=x&a[0]=y");
        let inner = map.get("a").unwrap().as_map().unwrap();
        assert_eq!(inner.keys().collect::<Vec<_>>(), vec!["1", "0"]);
    }

    #[test]
    fn test_parse_append_after_index() {
        let map = parse_query("a[5]=x&a[]=y");
        let inner = map.get("a").unwrap().as_map().unwrap();
        assert_eq!(inner.get("6").unwrap(), &QueryValue::from("y"));
    }

    #[test]
    fn test_parse_scalar_replaced_by_nested() {
        let map = parse_query("a=1&b=2&a[x]=3");
        assert_eq!(map.to_string(), "a[x]=3&b=2");
    }

    #[test]
    fn test_parse_decodes_segments_after_splitting() {
        let map = parse_query("a%5Bb%5D=1&c[d+e]=2");
        assert_eq!(map.get("a[b]").unwrap(), &QueryValue::from("1"));
        let inner = map.get("c").unwrap().as_map().unwrap();
        assert_eq!(inner.get("d e").unwrap(), &QueryValue::from("2"));
    }

    #[test]
    fn test_parse_append_after_largest_index() {
        let query = crate::compat::format!("a[{}]=x&a[]=y&b=1", usize::MAX);
        let map = parse_query(&query);
        let inner = map.get("a").unwrap().as_map().unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(
            inner.get(&usize::MAX.to_string()).unwrap(),
            &QueryValue::from("x")
        );
        assert_eq!(map.get("b").unwrap(), &QueryValue::from("1"));
    }

    #[test]
    fn test_split_key_caps_nesting() {
        let key = crate::compat::format!("a{}", "[]".repeat(10_000));
        let (base, segments) = split_key(&key);
        assert_eq!(base, "a");
        assert_eq!(segments.len(), MAX_NESTING);
    }

    #[test]
    fn test_parse_deep_nesting() {
        let query = crate::compat::format!("a{}=x", "[]".repeat(10_000));
        let map = parse_query(&query);

        let mut depth = 0;
        let mut value = map.get("a").unwrap();
        while let Some(items) = value.as_list() {
            assert_eq!(items.len(), 1);
            value = &items[0];
            depth += 1;
        }
        assert_eq!(depth, MAX_NESTING);
        assert_eq!(value, &QueryValue::from("x"));

        let serialized = map.to_string();
        assert_eq!(serialized.matches("[0]").count(), MAX_NESTING);
        assert_eq!(parse_query(&serialized), map);
    }

    #[test]
    fn test_parse_skips_empty_pairs() {
        let map = parse_query("&&&key=value&&&");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_parse_equals_in_value() {
        let map = parse_query("key=value=with=equals");
        assert_eq!(map.get("key").unwrap(), &QueryValue::from("value=with=equals"));
    }
}
