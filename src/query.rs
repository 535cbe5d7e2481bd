use crate::compat::{String, ToString, Vec};
use crate::error::{Error, Result};
use crate::percent_encode::form_encode_into;

/// A query parameter value.
///
/// Plain `key=value` pairs decode to [`QueryValue::String`], a bare `key`
/// decodes to [`QueryValue::Null`] and bracketed keys (`a[]=1`, `a[b]=2`)
/// decode to nested lists and maps.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum QueryValue {
    Null,
    String(String),
    List(Vec<QueryValue>),
    Map(QueryMap),
}

impl QueryValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[QueryValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&QueryMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<QueryMap> for QueryValue {
    fn from(map: QueryMap) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered mapping of query keys to values.
///
/// Insertion order is kept and shows up in the serialized query string.
/// Overwriting an existing key keeps its position. Lookups scan the entries
/// linearly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QueryMap {
    #[cfg_attr(feature = "serde", serde(with = "entries"))]
    params: Vec<(String, QueryValue)>,
}

impl QueryMap {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Parse from a query string (with or without leading `?`)
    pub fn parse(query: &str) -> Self {
        crate::parser::parse_query(query.strip_prefix('?').unwrap_or(query))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Check if a key exists, including keys whose value is [`QueryValue::Null`].
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }

    /// Get the value for a key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedParameter`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&QueryValue> {
        self.find(key)
            .ok_or_else(|| Error::UndefinedParameter(key.to_string()))
    }

    /// Get the value for a key, or `default` if the key is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a QueryValue) -> &'a QueryValue {
        self.find(key).unwrap_or(default)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut QueryValue> {
        self.params
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Insert or overwrite a key. An existing key keeps its position.
    ///
    /// Runs in time linear in [`QueryMap::len`], so building a map of `n`
    /// distinct keys one by one is quadratic.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.params.push((key, value)),
        }
    }

    /// Insert every pair in iteration order.
    pub fn extend<K, V, I>(&mut self, params: I)
    where
        K: Into<String>,
        V: Into<QueryValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in params {
            self.insert(key, value);
        }
    }

    /// Remove a key. Does nothing if the key is absent.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        let pos = self.params.iter().position(|(k, _)| k == key)?;
        Some(self.params.remove(pos).1)
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &QueryValue> {
        self.params.iter().map(|(_, v)| v)
    }

    fn find(&self, key: &str) -> Option<&QueryValue> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Turn maps keyed exactly `0..n` (in order) into lists, recursively.
    pub(crate) fn collapse_lists(self) -> Self {
        self.params
            .into_iter()
            .map(|(k, v)| (k, collapse_value(v)))
            .collect()
    }

    /// Serialize into `buffer` without a leading `?`.
    pub fn serialize_into(&self, buffer: &mut String) {
        let mut first = true;
        for (key, value) in &self.params {
            let mut name = String::with_capacity(key.len());
            form_encode_into(&mut name, key);
            serialize_value(buffer, &name, value, &mut first);
        }
    }
}

fn collapse_value(value: QueryValue) -> QueryValue {
    match value {
        QueryValue::Map(map) => {
            let is_sequence = map
                .keys()
                .enumerate()
                .all(|(i, k)| k.parse::<usize>().is_ok_and(|n| n == i) && is_canonical_index(k));
            let map = map.collapse_lists();
            if is_sequence && !map.is_empty() {
                QueryValue::List(map.params.into_iter().map(|(_, v)| v).collect())
            } else {
                QueryValue::Map(map)
            }
        }
        other => other,
    }
}

/// `"01"` and `"+1"` parse as 1 but do not serialize back to themselves.
fn is_canonical_index(key: &str) -> bool {
    key.bytes().all(|b| b.is_ascii_digit()) && (key == "0" || !key.starts_with('0'))
}

/// Write `name=value` pairs for one value; `name` is already encoded.
fn serialize_value(buffer: &mut String, name: &str, value: &QueryValue, first: &mut bool) {
    match value {
        QueryValue::Null => {
            push_separator(buffer, first);
            buffer.push_str(name);
        }
        QueryValue::String(s) => {
            push_separator(buffer, first);
            buffer.push_str(name);
            buffer.push('=');
            form_encode_into(buffer, s);
        }
        QueryValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                let nested = crate::compat::format!("{name}[{i}]");
                serialize_value(buffer, &nested, item, first);
            }
        }
        QueryValue::Map(map) => {
            for (key, item) in &map.params {
                let mut nested = String::with_capacity(name.len() + key.len() + 2);
                nested.push_str(name);
                nested.push('[');
                form_encode_into(&mut nested, key);
                nested.push(']');
                serialize_value(buffer, &nested, item, first);
            }
        }
    }
}

fn push_separator(buffer: &mut String, first: &mut bool) {
    if !*first {
        buffer.push('&');
    }
    *first = false;
}

impl core::fmt::Display for QueryMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut buffer = String::new();
        self.serialize_into(&mut buffer);
        f.write_str(&buffer)
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl From<&str> for QueryMap {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// Serde adapter: an ordered JSON-style object for the pair list.
#[cfg(feature = "serde")]
mod entries {
    use super::QueryValue;
    use crate::compat::{String, Vec};
    use core::fmt;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        params: &[(String, QueryValue)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(params.len()))?;
        for (k, v) in params {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, QueryValue)>, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Vec<(String, QueryValue)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of query parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut params: Vec<(String, QueryValue)> = Vec::new();
                while let Some((key, value)) = access.next_entry::<String, QueryValue>()? {
                    match params.iter_mut().find(|(k, _)| *k == key) {
                        Some(slot) => slot.1 = value,
                        None => params.push((key, value)),
                    }
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
