use crate::compat::String;

/// Errors produced while parsing, building or querying a URL model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input could not be split into URL components.
    /// Carries the offending input.
    InvalidUrl(String),
    /// An absolute URL was requested but no host is set
    IncompleteUrl,
    /// A query parameter was requested strictly but is not present
    UndefinedParameter(String),
}

impl Error {
    pub(crate) fn invalid_url(input: &str) -> Self {
        Self::InvalidUrl(input.into())
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidUrl(input) => write!(f, "Invalid URL: {input:?}"),
            Self::IncompleteUrl => f.write_str("Incomplete URL: no host to build an absolute URL"),
            Self::UndefinedParameter(key) => write!(f, "Undefined query parameter: {key:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for URL model operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::ToString;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::invalid_url("//example.com:xx").to_string(),
            "Invalid URL: \"//example.com:xx\""
        );
        assert_eq!(
            Error::UndefinedParameter("foo".into()).to_string(),
            "Undefined query parameter: \"foo\""
        );
    }
}
