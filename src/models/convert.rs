use serde::Serialize;

/// A link that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertError {
    /// 1-based position of the token in the input
    pub index: usize,
    /// The original token text
    pub value: String,
    pub message: String,
}

/// Result of converting one batch of links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertResponse {
    /// Newline-joined entries for the `proxies:` section
    pub proxy_lines: String,
    /// Newline-joined names for a proxy group's `proxies:` list
    pub group_lines: String,
    pub errors: Vec<ConvertError>,
}
