use crate::compat::{String, ToOwned, ToString, Vec, format};
use crate::error::Result;
use crate::url_model::UrlModel;

/// Request metadata needed to rebuild the URL being served.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInfo {
    /// Path, query and fragment as requested, e.g. `/index.php?page=2`
    pub request_path: String,
    /// Host with optional port, e.g. `example.com:8080`
    pub host: Option<String>,
    pub is_secure: bool,
}

/// Source of [`RequestInfo`], such as a server environment.
pub trait RequestSource {
    fn request_info(&self) -> RequestInfo;
}

impl RequestSource for RequestInfo {
    fn request_info(&self) -> RequestInfo {
        self.clone()
    }
}

/// Single-slot cache of the current URL.
///
/// The URL is resolved from a [`RequestSource`] on first access and kept
/// until [`CurrentUrl::invalidate`]. Instances are independent; own one per
/// request or per context that needs it.
#[derive(Debug, Clone, Default)]
pub struct CurrentUrl {
    default_host: Option<String>,
    cached: Option<UrlModel>,
}

impl CurrentUrl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `host` when the request carries no host of its own.
    pub fn with_default_host(host: &str) -> Self {
        Self {
            default_host: Some(host.to_string()).filter(|h| !h.is_empty()),
            cached: None,
        }
    }

    pub fn default_host(&self) -> Option<&str> {
        self.default_host.as_deref()
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Drop the cached URL; the next [`CurrentUrl::get`] resolves it again.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// The current URL, resolved from `source` if nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) when the
    /// request metadata does not form a valid URL. Nothing is cached then.
    pub fn get(&mut self, source: &impl RequestSource) -> Result<&UrlModel> {
        let url = match self.cached.take() {
            Some(url) => url,
            None => self.resolve(&source.request_info())?,
        };
        Ok(&*self.cached.insert(url))
    }

    /// Build `url` as an absolute URL, taking scheme, host and port from the
    /// current URL when `url` has no host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteUrl`](crate::Error::IncompleteUrl) when
    /// neither `url` nor the current URL has a host.
    pub fn absolute(&mut self, source: &impl RequestSource, url: &UrlModel) -> Result<String> {
        if url.host().is_some() {
            return url.build_absolute();
        }

        let current = self.get(source)?;
        let mut resolved = url.clone();
        if resolved.scheme().is_none() {
            resolved.set_scheme(current.scheme());
        }
        resolved.set_host(current.host());
        resolved.set_port(current.port());
        resolved.build_absolute()
    }

    fn resolve(&self, info: &RequestInfo) -> Result<UrlModel> {
        let host = info
            .host
            .as_deref()
            .filter(|h| !h.is_empty())
            .or(self.default_host.as_deref());

        let Some(host) = host else {
            return UrlModel::parse(&info.request_path);
        };

        let scheme = if info.is_secure { "https" } else { "http" };
        let separator = if info.request_path.is_empty() || info.request_path.starts_with('/') {
            ""
        } else {
            "/"
        };
        UrlModel::parse(&format!(
            "{scheme}://{host}{separator}{}",
            info.request_path
        ))
    }
}

/// CGI-style server variables (`REQUEST_URI`, `HTTP_HOST`, ...).
///
/// Path precedence: `REQUEST_URI`, then the rewrite-engine variables
/// `HTTP_X_ORIGINAL_URL` and `HTTP_X_REWRITE_URL`, then `SCRIPT_NAME` and
/// finally `PHP_SELF`, the last two joined with `QUERY_STRING`.
/// Host precedence: first `HTTP_X_FORWARDED_HOST` entry, `HTTP_HOST`,
/// `SERVER_NAME`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerVariables {
    vars: Vec<(String, String)>,
}

impl ServerVariables {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn set(&mut self, name: &str, value: &str) {
        match self.vars.iter().position(|(k, _)| k == name) {
            Some(pos) => value.clone_into(&mut self.vars[pos].1),
            None => self.vars.push((name.to_string(), value.to_string())),
        }
    }

    /// A variable's value; empty values count as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    fn request_path(&self) -> String {
        if let Some(uri) = ["REQUEST_URI", "HTTP_X_ORIGINAL_URL", "HTTP_X_REWRITE_URL"]
            .into_iter()
            .find_map(|name| self.get(name))
        {
            return strip_authority(uri);
        }

        let script = self.get("SCRIPT_NAME").or_else(|| self.get("PHP_SELF"));
        match (script, self.get("QUERY_STRING")) {
            (Some(script), Some(query)) => format!("{script}?{query}"),
            (Some(script), None) => script.to_string(),
            (None, _) => String::new(),
        }
    }

    fn host(&self) -> Option<String> {
        let forwarded = self
            .get("HTTP_X_FORWARDED_HOST")
            .and_then(|hosts| hosts.split(',').next())
            .map(str::trim)
            .filter(|h| !h.is_empty());
        forwarded
            .or_else(|| self.get("HTTP_HOST"))
            .or_else(|| self.get("SERVER_NAME"))
            .map(ToString::to_string)
    }

    fn is_secure(&self) -> bool {
        self.get("HTTPS")
            .is_some_and(|https| !https.eq_ignore_ascii_case("off"))
            || self
                .get("HTTP_X_FORWARDED_PROTO")
                .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
            || self.get("SERVER_PORT") == Some("443")
    }
}

/// Keep path, query and fragment of a request URI sent in absolute form.
/// A path starting with `//` carries no scheme and is kept as sent.
fn strip_authority(uri: &str) -> String {
    match UrlModel::parse(uri) {
        Ok(url) if url.scheme().is_some() && url.host().is_some() => url.build_relative(),
        _ => uri.to_string(),
    }
}

impl RequestSource for ServerVariables {
    fn request_info(&self) -> RequestInfo {
        RequestInfo {
            request_path: self.request_path(),
            host: self.host(),
            is_secure: self.is_secure(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ServerVariables {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (name, value) in iter {
            vars.set(name, value);
        }
        vars
    }
}
