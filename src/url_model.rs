use crate::builder;
use crate::compat::{String, ToOwned, ToString};
use crate::error::{Error, Result};
use crate::helpers::non_empty;
use crate::query::{QueryMap, QueryValue};
use crate::types::{BuildMode, Format};

/// A mutable URL value.
///
/// Holds scheme, credentials, host, port, path, query parameters and fragment
/// as separate components, plus the [`Format`] that [`UrlModel::build`]
/// prefers. Parse one with [`UrlModel::parse`], change it through the
/// setters, and serialize it with one of the build methods or `Display`.
///
/// `UrlModel` is not internally synchronized; apply external locking if an
/// instance is shared between threads.
///
/// # Examples
///
/// ```
/// use urlmodel::UrlModel;
///
/// let mut url = UrlModel::parse("https://example.com/search?q=rust").unwrap();
/// url.set_query_param("page", "2");
/// url.set_fragment(Some("results"));
/// assert_eq!(url.build(), "https://example.com/search?q=rust&page=2#results");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlModel {
    pub(crate) scheme: Option<String>,
    pub(crate) user: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path: String,
    pub(crate) query: QueryMap,
    pub(crate) fragment: Option<String>,
    pub(crate) preferred_format: Format,
}

impl UrlModel {
    /// Create an empty model: no scheme, no host, empty path and query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when the scheme or authority is
    /// malformed, the port is not a number, or a percent escape is invalid.
    pub fn parse(input: &str) -> Result<Self> {
        crate::parser::parse_url(input)
    }

    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.set_scheme(Some(scheme));
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.set_host(Some(host));
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.set_path(path);
        self
    }

    pub fn with_fragment(mut self, fragment: &str) -> Self {
        self.set_fragment(Some(fragment));
        self
    }

    pub fn with_preferred_format(mut self, format: Format) -> Self {
        self.preferred_format = format;
        self
    }

    // Getters

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &QueryMap {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryMap {
        &mut self.query
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn preferred_format(&self) -> Format {
        self.preferred_format
    }

    /// Host followed by `:port` when a port is set; empty without a host.
    pub fn full_host(&self) -> String {
        match (&self.host, self.port) {
            (Some(host), Some(port)) => crate::compat::format!("{host}:{port}"),
            (Some(host), None) => host.clone(),
            (None, _) => String::new(),
        }
    }

    /// `user[:password]`, or None when neither credential is set.
    pub fn user_info(&self) -> Option<String> {
        match (&self.user, &self.password) {
            (None, None) => None,
            (user, None) => user.clone(),
            (user, Some(password)) => Some(crate::compat::format!(
                "{}:{password}",
                user.as_deref().unwrap_or_default()
            )),
        }
    }

    /// Encoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        self.query.to_string()
    }

    // Setters. Optional components are cleared by None or an empty string.

    pub fn set_scheme(&mut self, scheme: Option<&str>) {
        self.scheme = owned(scheme);
    }

    pub fn set_user(&mut self, user: Option<&str>) {
        self.user = owned(user);
    }

    pub fn set_password(&mut self, password: Option<&str>) {
        self.password = owned(password);
    }

    pub fn set_host(&mut self, host: Option<&str>) {
        self.host = owned(host);
    }

    pub fn set_port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    pub fn set_path(&mut self, path: &str) {
        path.clone_into(&mut self.path);
    }

    pub fn set_query(&mut self, query: QueryMap) {
        self.query = query;
    }

    /// Replace the query with a decoded raw query string.
    pub fn set_query_string(&mut self, query: &str) {
        self.query = QueryMap::parse(query);
    }

    pub fn set_fragment(&mut self, fragment: Option<&str>) {
        self.fragment = owned(fragment);
    }

    pub fn set_preferred_format(&mut self, format: Format) {
        self.preferred_format = format;
    }

    // Query parameters

    /// True if `key` is present, even with a [`QueryValue::Null`] value.
    pub fn has_query_param(&self, key: &str) -> bool {
        self.query.contains_key(key)
    }

    /// Get a query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedParameter`] if the key is absent.
    /// Check [`UrlModel::has_query_param`] first or use
    /// [`UrlModel::query_param_or`].
    pub fn query_param(&self, key: &str) -> Result<&QueryValue> {
        self.query.get(key)
    }

    /// Get a query parameter, or `default` when it is absent.
    pub fn query_param_or<'a>(&'a self, key: &str, default: &'a QueryValue) -> &'a QueryValue {
        self.query.get_or(key, default)
    }

    pub fn set_query_param(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.query.insert(key, value);
    }

    /// Set every pair in iteration order.
    pub fn add_query_params<K, V, I>(&mut self, params: I)
    where
        K: Into<String>,
        V: Into<QueryValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.query.extend(params);
    }

    pub fn remove_query_param(&mut self, key: &str) {
        self.query.remove(key);
    }

    pub fn remove_all_query_params(&mut self) {
        self.query.clear();
    }

    // Building

    /// Serialize in the preferred format.
    ///
    /// Absolute output needs both a host and [`Format::Absolute`]; anything
    /// else yields path, query and fragment only.
    pub fn build(&self) -> String {
        builder::build(self)
    }

    /// Serialize with scheme and authority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteUrl`] when no host is set.
    pub fn build_absolute(&self) -> Result<String> {
        builder::build_absolute(self)
    }

    /// Serialize path, query and fragment only.
    pub fn build_relative(&self) -> String {
        builder::build_relative(self)
    }

    /// Serialize in an explicit mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteUrl`] for [`BuildMode::Absolute`] without a
    /// host.
    pub fn build_with(&self, mode: BuildMode) -> Result<String> {
        match mode {
            BuildMode::Auto => Ok(self.build()),
            BuildMode::Absolute => self.build_absolute(),
            BuildMode::Relative => Ok(self.build_relative()),
        }
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    non_empty(value).map(ToString::to_string)
}

impl core::fmt::Display for UrlModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.build())
    }
}

impl core::str::FromStr for UrlModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for UrlModel {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UrlModel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UrlModel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let input = <crate::compat::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&input).map_err(serde::de::Error::custom)
    }
}
