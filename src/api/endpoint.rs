//! Endpoint derivation from the configured base URL

use crate::error::ConfigError;
use url::Url;

/// Path appended to the base URL
pub const COMMUTING_PATH: [&str; 2] = ["sf", "commuting"];

/// Build `<base-url>/sf/commuting` from the configured base URL.
///
/// The base may carry a path prefix and a trailing slash. Anything that is
/// not an absolute http(s) URL is a configuration error.
pub fn commuting_endpoint(base: Option<&str>) -> Result<Url, ConfigError> {
    let raw = base.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(COMMUTING_PATH);
    Ok(url)
}
