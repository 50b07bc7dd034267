//! Parsing of catalog URLs and resolution of the dispatch host.

/// Error type for source URL failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL has no host: {0}")]
    MissingHost(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<UrlError> for stanza_core::Error {
    fn from(err: UrlError) -> Self {
        stanza_core::Error::InvalidUrl(err.to_string())
    }
}

/// Parse a catalog entry into a fetchable URL.
///
/// Catalog entries must be absolute `http`/`https` URLs with a host.
/// Surrounding whitespace is ignored and any fragment is dropped.
pub fn parse_source_url(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = url::Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(format!("{trimmed}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::MissingHost(trimmed.to_string()));
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// The host string used to pick an extraction rule.
///
/// The `url` crate already lowercases domain hosts, so this is an exact key.
pub fn source_host(input: &str) -> Result<String, UrlError> {
    let parsed = parse_source_url(input)?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| UrlError::MissingHost(input.trim().to_string()))
}
