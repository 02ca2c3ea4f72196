/// Errors that can occur while building a [`RequestModel`](crate::RequestModel)
/// or resolving names against it.
///
/// Every error aborts the construction: no partial model and no best-effort
/// snippet is ever produced. Resolution is deterministic, retrying cannot help.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SnippetError {
    /// URL parsing error.
    ///
    /// Occurs when the request URL or the configured service root is not an absolute URL.
    UrlError(url::ParseError),

    /// Invalid HTTP header name.
    ///
    /// Occurs when a captured or reserved header name contains invalid characters.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// The request body is announced as JSON but cannot be parsed.
    #[display("Malformed JSON request body: {_0}")]
    MalformedBody(serde_json::Error),

    /// The request URL addresses the service root itself.
    ///
    /// Occurs when no resource path remains once the service root is stripped.
    #[display("The request does not address any resource below the service root")]
    EmptyPath,

    /// The request URL is not located below the configured service root.
    #[display("URL '{url}' is not below the service root '{service_root}'")]
    #[from(skip)]
    ServiceRootMismatch {
        /// The request URL.
        url: String,
        /// The configured service root.
        service_root: String,
    },

    /// A path identifier cannot be matched against the current type context.
    ///
    /// Occurs when no resolution rule (root, key, navigation, property, cast,
    /// bound operation) applies.
    #[display("Cannot resolve '{identifier}' at position {position}")]
    #[from(skip)]
    SchemaResolution {
        /// The offending identifier.
        identifier: String,
        /// Zero-based position of the identifier in the path.
        position: usize,
    },

    /// A path element denotes a segment kind that is not supported.
    ///
    /// Occurs for system segments such as `$value`, `$count` or `$ref`.
    #[display("Unsupported segment '{identifier}' at position {position}")]
    #[from(skip)]
    UnsupportedSegmentKind {
        /// The offending identifier.
        identifier: String,
        /// Zero-based position of the identifier in the path.
        position: usize,
    },

    /// A query option value cannot be parsed.
    ///
    /// Occurs when `$skip`/`$top` is not a non-negative integer or `$count` is not a boolean.
    #[display("Malformed query option {option}: '{value}'")]
    #[from(skip)]
    MalformedQueryOption {
        /// The option name, e.g. `$top`.
        option: String,
        /// The raw value.
        value: String,
    },

    /// A bound operation is reachable by name but not with the request method.
    ///
    /// Occurs when a function is addressed with a write verb, or an action with a read verb.
    #[display("The {kind} '{operation}' at position {position} cannot be invoked with {method}")]
    #[from(skip)]
    VerbMismatch {
        /// The operation name.
        operation: String,
        /// `action` or `function`.
        kind: String,
        /// The request method.
        method: String,
        /// Zero-based position of the operation in the path.
        position: usize,
    },
}
