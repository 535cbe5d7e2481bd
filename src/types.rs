/// Output format preferred by [`UrlModel::build`](crate::UrlModel::build)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// Emit scheme and authority whenever a host is known
    #[default]
    Absolute,
    /// Emit only path, query and fragment
    Relative,
}

/// Explicit output mode for [`UrlModel::build_with`](crate::UrlModel::build_with)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildMode {
    /// Follow the model's preferred format
    #[default]
    Auto,
    Absolute,
    Relative,
}

impl From<Format> for BuildMode {
    fn from(format: Format) -> Self {
        match format {
            Format::Absolute => Self::Absolute,
            Format::Relative => Self::Relative,
        }
    }
}
