use mime::Mime;
use tracing::debug;

use crate::SnippetError;

/// The parsed body of a captured request.
///
/// The body is not validated against the schema; only its JSON syntax is
/// checked so that generators can walk its members.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A JSON document, for requests without content type or with a JSON one.
    Json(serde_json::Value),
    /// Any other content, kept verbatim.
    Text(String),
}

impl RequestBody {
    /// Parses a raw body according to its `Content-Type`.
    ///
    /// A body without content type, with `application/json` or with a `+json`
    /// suffix is parsed as JSON. An empty body is no body.
    pub(crate) fn parse(
        raw: &str,
        content_type: Option<&str>,
    ) -> Result<Option<Self>, SnippetError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let content_type = content_type.and_then(|value| match value.parse::<Mime>() {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                debug!(%value, %error, "unparsable content type, assuming JSON");
                None
            }
        });
        let is_json = content_type.as_ref().is_none_or(|parsed| {
            parsed.essence_str() == mime::APPLICATION_JSON.essence_str()
                || parsed.suffix().is_some_and(|suffix| suffix == mime::JSON)
        });

        let body = if is_json {
            Self::Json(serde_json::from_str(raw)?)
        } else {
            Self::Text(raw.to_string())
        };
        Ok(Some(body))
    }

    /// The JSON document, if the body is JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}
