use percent_encoding::percent_decode_str;
use url::Url;

use crate::SnippetError;

/// The resource path and raw query pairs of a request URL, relative to a service root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecomposedUrl {
    /// Percent-decoded, non-empty path elements below the service root.
    pub(crate) segments: Vec<String>,
    /// Percent-decoded `(key, value)` pairs, in query-string order.
    pub(crate) query: Vec<(String, String)>,
}

/// Percent-decodes `raw`, invalid UTF-8 sequences become `U+FFFD`.
fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Splits a request URL into its resource path elements and query pairs.
///
/// Without service root the whole URL path is the resource path.
/// `+` is kept as is in query values, OData expressions use it literally.
/// Percent-encoded bytes that are not valid UTF-8 are replaced by `U+FFFD`.
pub(crate) fn decompose(
    url: &Url,
    service_root: Option<&Url>,
) -> Result<DecomposedUrl, SnippetError> {
    let path = match service_root {
        Some(root) => strip_service_root(url, root)?,
        None => url.path(),
    };

    let segments = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(decode)
        .collect();

    let query = split_query(url.query().unwrap_or_default());

    Ok(DecomposedUrl { segments, query })
}

/// Splits a raw query string into percent-decoded `(key, value)` pairs.
///
/// Invalid UTF-8 is replaced the same way as in [`decompose`].
pub(crate) fn split_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn strip_service_root<'u>(url: &'u Url, root: &Url) -> Result<&'u str, SnippetError> {
    let mismatch = || SnippetError::ServiceRootMismatch {
        url: url.to_string(),
        service_root: root.to_string(),
    };
    if url.origin() != root.origin() {
        return Err(mismatch());
    }

    let root_path = root.path().trim_end_matches('/');
    let rest = url.path().strip_prefix(root_path).ok_or_else(mismatch)?;
    if rest.is_empty() || rest.starts_with('/') {
        Ok(rest)
    } else {
        // `/v1.0x/me` is not below `/v1.0`
        Err(mismatch())
    }
}
