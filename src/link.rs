// Pure helpers for recognising and normalising links. Nothing in here
// touches the network.

use percent_encoding::percent_decode_str;
use url::Url;

/// Host serving VK short links.
pub const SHORT_DOMAIN: &str = "vk.cc";

const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Trim user input and prepend `https://` when it carries no scheme.
///
/// Input that parses as an absolute hierarchical URL is returned as-is, so
/// the prefix is never added twice. `host:port/path` forms parse as an opaque
/// URL with the host as "scheme" and are treated as scheme-less.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(url) if !url.cannot_be_a_base() => trimmed.to_string(),
        _ => format!("{DEFAULT_SCHEME_PREFIX}{trimmed}"),
    }
}

/// Path of `url` with leading slashes stripped and percent-decoded, if
/// non-empty. The query encoder re-encodes it on the way out.
pub fn link_key(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let raw = parsed.path().trim_start_matches('/');
    let key = percent_decode_str(raw).decode_utf8_lossy();
    if key.is_empty() {
        None
    } else {
        Some(key.into_owned())
    }
}

/// True when `url` is a vk.cc link with a key.
pub fn is_short_link(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    parsed.host_str() == Some(SHORT_DOMAIN) && link_key(url).is_some()
}
