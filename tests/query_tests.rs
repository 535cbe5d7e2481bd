#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Query parameter accessors on `UrlModel`
use urlmodel::{Error, QueryMap, QueryValue, UrlModel};

fn parse(input: &str) -> UrlModel {
    UrlModel::parse(input).unwrap()
}

#[test]
fn test_has() {
    let url = parse("/?a=1&flag&empty=");
    assert!(url.has_query_param("a"));
    assert!(url.has_query_param("flag"));
    assert!(url.has_query_param("empty"));
    assert!(!url.has_query_param("missing"));
}

#[test]
fn test_get_strict() {
    let url = parse("/?flag");
    assert_eq!(url.query_param("flag").unwrap(), &QueryValue::Null);
    assert_eq!(
        url.query_param("missing"),
        Err(Error::UndefinedParameter("missing".to_string()))
    );
}

#[test]
fn test_get_lenient() {
    let url = parse("/?a=1&flag");
    let default = QueryValue::from("fallback");
    assert_eq!(url.query_param_or("a", &default), &QueryValue::from("1"));
    assert_eq!(url.query_param_or("flag", &default), &QueryValue::Null);
    assert_eq!(url.query_param_or("missing", &default), &default);
    assert_eq!(
        url.query_param_or("missing", &QueryValue::Null),
        &QueryValue::Null
    );
}

#[test]
fn test_has_get_consistency() {
    let url = parse("/?a=1&b[]=x&c");
    let default = QueryValue::from("d");
    for key in ["a", "b", "c", "x", "b[]", ""] {
        if !url.has_query_param(key) {
            assert_eq!(url.query_param_or(key, &default), &default);
            assert!(url.query_param(key).is_err());
        } else {
            assert!(url.query_param(key).is_ok());
        }
    }
}

#[test]
fn test_set_overwrites_in_place() {
    let mut url = parse("/?a=1&b=2");
    url.set_query_param("a", "3");
    url.set_query_param("c", QueryValue::Null);
    assert_eq!(url.build(), "/?a=3&b=2&c");
}

#[test]
fn test_set_nested_values() {
    let mut url = parse("/search");
    url.set_query_param("tags", vec!["rust", "url"]);
    let mut filter = QueryMap::new();
    filter.insert("lang", "en");
    url.set_query_param("filter", filter);
    assert_eq!(
        url.build(),
        "/search?tags[0]=rust&tags[1]=url&filter[lang]=en"
    );
}

#[test]
fn test_add_preserves_input_order() {
    let mut url = parse("/?b=old");
    url.add_query_params([("c", "1"), ("a", "2"), ("b", "new")]);
    let keys: Vec<&str> = url.query().keys().collect();
    assert_eq!(keys, vec!["b", "c", "a"]);
    assert_eq!(url.query_string(), "b=new&c=1&a=2");
}

#[test]
fn test_remove() {
    let mut url = parse("/?a=1&b=2");
    url.remove_query_param("a");
    assert_eq!(url.build(), "/?b=2");
    url.remove_query_param("a");
    assert_eq!(url.build(), "/?b=2");
}

#[test]
fn test_remove_all_is_idempotent() {
    let mut url = parse("/p?a=1&b=2#f");
    url.remove_all_query_params();
    assert!(url.query().is_empty());
    url.remove_all_query_params();
    assert!(url.query().is_empty());
    assert_eq!(url.build(), "/p#f");
}

#[test]
fn test_query_mut() {
    let mut url = parse("/?a=1");
    if let Some(value) = url.query_mut().get_mut("a") {
        *value = QueryValue::from("2");
    }
    assert_eq!(url.build(), "/?a=2");
}

#[test]
fn test_nested_parse_and_build() {
    let url = parse("/?user[name]=Ann&user[roles][]=admin&user[roles][]=dev");
    let user = url.query_param("user").unwrap().as_map().unwrap();
    assert_eq!(user.get("name").unwrap().as_str(), Some("Ann"));
    assert_eq!(
        user.get("roles").unwrap(),
        &QueryValue::from(vec!["admin", "dev"])
    );
    assert_eq!(
        url.build(),
        "/?user[name]=Ann&user[roles][0]=admin&user[roles][1]=dev"
    );
}

#[test]
fn test_form_encoding() {
    let mut url = parse("/");
    url.set_query_param("q", "a b&c");
    url.set_query_param("é", "ü");
    assert_eq!(url.build(), "/?q=a+b%26c&%C3%A9=%C3%BC");

    let reparsed = parse(&url.build());
    assert_eq!(reparsed.query(), url.query());
}

#[test]
fn test_query_map_display_and_parse() {
    let map = QueryMap::parse("?x=1&y");
    assert_eq!(map.to_string(), "x=1&y");
    assert_eq!(QueryMap::from("x=1&y"), map);
}
