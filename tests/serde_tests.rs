#![cfg(feature = "serde")]
#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Serde support behind the `serde` feature
use serde::{Deserialize, Serialize};
use urlmodel::{QueryMap, QueryValue, UrlModel};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Link {
    href: UrlModel,
}

#[test]
fn test_url_model_as_string() {
    let link = Link {
        href: UrlModel::parse("https://example.com/a?b=c").unwrap(),
    };
    let json = serde_json::to_string(&link).unwrap();
    assert_eq!(json, r#"{"href":"https://example.com/a?b=c"}"#);

    let back: Link = serde_json::from_str(&json).unwrap();
    assert_eq!(back, link);
}

#[test]
fn test_invalid_url_fails_to_deserialize() {
    let result: Result<Link, _> = serde_json::from_str(r#"{"href":"//example.com:xx"}"#);
    assert!(result.is_err());
}

#[test]
fn test_query_map_keeps_order() {
    let map = QueryMap::parse("z=1&a[]=x&a[]=y&flag");
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"z":"1","a":["x","y"],"flag":null}"#);

    let back: QueryMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
    assert_eq!(back.get("flag").unwrap(), &QueryValue::Null);
}
