mod query;

pub use query::parse_query;

use crate::compat::{String, ToString};
use crate::error::{Error, Result};
use crate::percent_encode::percent_decode;
use crate::url_components::UrlComponents;
use crate::url_model::UrlModel;

/// Parse a URL string into a [`UrlModel`].
///
/// Host, credentials and path are percent-decoded, the query is decoded into
/// a [`QueryMap`](crate::QueryMap) and the scheme and fragment are kept as
/// written.
pub fn parse_url(input: &str) -> Result<UrlModel> {
    let components = UrlComponents::split(input)?;

    let decode = |part: &str| percent_decode(part).ok_or_else(|| Error::invalid_url(input));
    let decode_opt = |part: Option<&str>| part.map(&decode).transpose();

    let mut url = UrlModel::new();
    url.scheme = components.scheme.map(ToString::to_string);
    url.user = decode_opt(components.user)?;
    url.password = decode_opt(components.password)?;
    url.host = decode_opt(components.host)?;
    url.port = components.port;
    url.path = decode(components.path)?;
    url.query = components.query.map(parse_query).unwrap_or_default();
    url.fragment = components.fragment.map(String::from);
    Ok(url)
}
