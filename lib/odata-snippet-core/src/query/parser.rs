use http::HeaderName;
use http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HOST};
use tracing::{debug, warn};

use super::{QueryOption, QueryOptionKind, QueryOptions};
use crate::SnippetError;
use crate::request::{RequestHeaders, split_query};

/// Headers handled by the client library itself, never emitted as options.
pub(crate) const DEFAULT_RESERVED_HEADERS: [HeaderName; 4] =
    [HOST, CONTENT_LENGTH, CONTENT_TYPE, AUTHORIZATION];

impl QueryOptions {
    /// Parses a raw query string and the request headers.
    ///
    /// Unknown query keys are ignored. The default reserved headers
    /// (`Host`, `Content-Length`, `Content-Type`, `Authorization`) are skipped.
    ///
    /// # Errors
    ///
    /// - [`SnippetError::MalformedQueryOption`] when `$skip`/`$top` is not a
    ///   non-negative integer, or `$count` is not a boolean
    /// - [`SnippetError::InvalidHeaderName`] when a header name is invalid
    ///
    /// # Example
    ///
    /// ```rust
    /// use odata_snippet_core::{QueryOption, QueryOptionKind, QueryOptions, RequestHeaders};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let headers = RequestHeaders::new().add_header("Prefer", "kenya-timezone");
    /// let options = QueryOptions::parse("$top=5&$select=displayName,givenName", &headers)?;
    ///
    /// assert_eq!(options.get(QueryOptionKind::Top), Some(&QueryOption::Top(5)));
    /// assert_eq!(options.len(), 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(query: &str, headers: &RequestHeaders) -> Result<Self, SnippetError> {
        Self::from_parts(&split_query(query), headers, &DEFAULT_RESERVED_HEADERS)
    }

    pub(crate) fn from_parts(
        query: &[(String, String)],
        headers: &RequestHeaders,
        reserved: &[HeaderName],
    ) -> Result<Self, SnippetError> {
        let mut result = Self::default();

        for (key, value) in query {
            let Some(kind) = QueryOptionKind::from_query_key(key) else {
                debug!(%key, "ignoring unrecognized query option");
                continue;
            };
            let Some(option) = parse_option(kind, value)? else {
                debug!(%kind, "ignoring empty query option");
                continue;
            };
            if let Some(previous) = result.options.insert(kind, option) {
                warn!(%kind, ?previous, "duplicated query option, keeping the last value");
            }
        }

        for (name, value) in headers.iter() {
            let header = HeaderName::from_bytes(name.as_bytes())?;
            if reserved.contains(&header) {
                debug!(%header, "skipping reserved header");
                continue;
            }
            result.headers.push(QueryOption::Header {
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        Ok(result)
    }
}

fn parse_option(kind: QueryOptionKind, value: &str) -> Result<Option<QueryOption>, SnippetError> {
    let malformed = || SnippetError::MalformedQueryOption {
        option: kind.to_string(),
        value: value.to_string(),
    };
    let trimmed = value.trim();

    let option = match kind {
        QueryOptionKind::Skip => {
            let count = parse_count(trimmed).ok_or_else(malformed)?;
            Some(QueryOption::Skip(count))
        }
        QueryOptionKind::Top => {
            let count = parse_count(trimmed).ok_or_else(malformed)?;
            Some(QueryOption::Top(count))
        }
        QueryOptionKind::Count => {
            let flag = if trimmed.eq_ignore_ascii_case("true") {
                true
            } else if trimmed.eq_ignore_ascii_case("false") {
                false
            } else {
                return Err(malformed());
            };
            Some(QueryOption::Count(flag))
        }
        QueryOptionKind::Select => {
            let fields = trimmed
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>();
            (!fields.is_empty()).then_some(QueryOption::Select(fields))
        }
        QueryOptionKind::Search => {
            let term = trimmed
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(trimmed);
            (!term.is_empty()).then(|| QueryOption::Search(term.to_string()))
        }
        QueryOptionKind::Filter => {
            (!trimmed.is_empty()).then(|| QueryOption::Filter(trimmed.to_string()))
        }
        QueryOptionKind::OrderBy => {
            (!trimmed.is_empty()).then(|| QueryOption::OrderBy(trimmed.to_string()))
        }
        QueryOptionKind::Expand => {
            (!trimmed.is_empty()).then(|| QueryOption::Expand(trimmed.to_string()))
        }
        QueryOptionKind::Header => None,
    };
    Ok(option)
}

/// Only plain digits: `-1`, `+1`, `1.5` and `abc` are rejected.
fn parse_count(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
