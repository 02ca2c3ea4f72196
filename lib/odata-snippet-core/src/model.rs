//! The snippet model of a captured request.
//!
//! [`RequestModel`] gathers everything a snippet generator needs: the HTTP
//! method, the resolved path segments, the query options and headers, and the
//! parsed body. It borrows the [`SchemaGraph`] it was resolved against so
//! class names can be looked up while generating code.

use http::{HeaderName, Method};
use tracing::debug;
use url::Url;

use crate::SnippetError;
use crate::class_name::class_name_of;
use crate::language::ExpressionProvider;
use crate::naming::{singularize, to_lower_camel, unqualified};
use crate::query::{DEFAULT_RESERVED_HEADERS, QueryOption, QueryOptions, generate_query_section};
use crate::request::{CapturedRequest, RequestBody, decompose};
use crate::schema::SchemaGraph;
use crate::segment::{PathSegment, SegmentKind, resolve_segments};

/// A captured request resolved against a schema graph.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use odata_snippet_core::{CapturedRequest, JavaScriptExpressions, RequestModel, SchemaGraph};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = SchemaGraph::builder()
///     .namespace("microsoft.graph")
///     .entity_type("user", |ty| ty.property("displayName", "Edm.String"))
///     .entity_set("users", "user")
///     .build()?;
///
/// let request = CapturedRequest::new(
///     Method::GET,
///     "https://graph.microsoft.com/v1.0/users?$select=displayName&$top=5",
/// )?;
/// let model = RequestModel::builder(&schema)
///     .with_service_root("https://graph.microsoft.com/v1.0")?
///     .build(&request)?;
///
/// assert_eq!(model.response_variable_name(), "users");
/// assert_eq!(
///     model.query_section(&JavaScriptExpressions),
///     "\n\t.select('displayName')\n\t.top(5)"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestModel<'s> {
    method: Method,
    segments: Vec<PathSegment>,
    options: QueryOptions,
    body: Option<RequestBody>,
    schema: &'s SchemaGraph,
}

impl<'s> RequestModel<'s> {
    /// Starts building a model against `schema`.
    pub fn builder(schema: &'s SchemaGraph) -> RequestModelBuilder<'s> {
        RequestModelBuilder::new(schema)
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The resolved path segments, never empty.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The segment addressed by the request.
    pub fn last_segment(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The query options and emitted headers.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// The emitted headers, in request order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.options.headers().filter_map(|option| match option {
            QueryOption::Header { name, value } => Some((name.as_str(), value.as_str())),
            _ => None,
        })
    }

    /// The parsed request body.
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// The schema graph the path was resolved against.
    pub fn schema(&self) -> &'s SchemaGraph {
        self.schema
    }

    /// Generates the query section with the given provider.
    pub fn query_section(&self, provider: &dyn ExpressionProvider) -> String {
        generate_query_section(&self.options, provider)
    }

    /// Computes the qualified class name of `path`, starting at the last segment.
    ///
    /// See [`class_name_of`] for the lookup rules.
    ///
    /// # Errors
    ///
    /// Fails with [`SnippetError::SchemaResolution`] when an identifier of `path`
    /// cannot be matched.
    pub fn class_name<S: AsRef<str>>(&self, path: &[S]) -> Result<String, SnippetError> {
        let segment = self.last_segment().ok_or(SnippetError::EmptyPath)?;
        class_name_of(segment, path, self.schema)
    }

    /// The variable name holding the response in generated code.
    ///
    /// Keys and casts are skipped: `/users/{id}` gives `user`,
    /// `/me/messages` gives `messages`, `/me/sendMail` gives `sendMail`.
    pub fn response_variable_name(&self) -> String {
        let Some(segment) = self.last_segment() else {
            return String::new();
        };
        let keyed = self
            .segments
            .iter()
            .rev()
            .take_while(|segment| matches!(segment.kind(), SegmentKind::Key | SegmentKind::Cast))
            .any(|segment| segment.kind() == SegmentKind::Key);

        let name = unqualified(segment.name());
        let name = if keyed { singularize(name) } else { name.to_string() };
        to_lower_camel(&name)
    }
}

/// Builder for [`RequestModel`].
///
/// # Default Configuration
///
/// - **Service root**: none, the whole URL path is the resource path
/// - **Reserved headers**: `Host`, `Content-Length`, `Content-Type`, `Authorization`
#[derive(Debug, Clone)]
pub struct RequestModelBuilder<'s> {
    schema: &'s SchemaGraph,
    service_root: Option<Url>,
    reserved_headers: Vec<HeaderName>,
}

impl<'s> RequestModelBuilder<'s> {
    fn new(schema: &'s SchemaGraph) -> Self {
        Self {
            schema,
            service_root: None,
            reserved_headers: DEFAULT_RESERVED_HEADERS.to_vec(),
        }
    }

    /// Sets the service root stripped from request paths,
    /// e.g. `https://graph.microsoft.com/v1.0`.
    ///
    /// # Errors
    ///
    /// Fails with [`SnippetError::UrlError`] when `service_root` is not an absolute URL.
    pub fn with_service_root(mut self, service_root: &str) -> Result<Self, SnippetError> {
        let url = Url::parse(service_root)?;
        self.service_root = Some(url);
        Ok(self)
    }

    /// Adds a header that is never emitted in the query section,
    /// in addition to the default reserved headers.
    ///
    /// # Errors
    ///
    /// Fails with [`SnippetError::InvalidHeaderName`] when `name` is not a valid header name.
    pub fn with_reserved_header(mut self, name: &str) -> Result<Self, SnippetError> {
        let header = HeaderName::from_bytes(name.as_bytes())?;
        if !self.reserved_headers.contains(&header) {
            self.reserved_headers.push(header);
        }
        Ok(self)
    }

    /// Resolves `request` into a [`RequestModel`].
    ///
    /// # Errors
    ///
    /// - [`SnippetError::ServiceRootMismatch`] when the URL is not below the service root
    /// - [`SnippetError::EmptyPath`] when the URL addresses the service root itself
    /// - [`SnippetError::SchemaResolution`], [`SnippetError::VerbMismatch`] or
    ///   [`SnippetError::UnsupportedSegmentKind`] when the path cannot be resolved
    /// - [`SnippetError::MalformedQueryOption`] when a query option value is invalid
    /// - [`SnippetError::InvalidHeaderName`] when a captured header name is invalid
    /// - [`SnippetError::MalformedBody`] when a JSON body cannot be parsed
    pub fn build(&self, request: &CapturedRequest) -> Result<RequestModel<'s>, SnippetError> {
        let decomposed = decompose(request.url(), self.service_root.as_ref())?;
        let segments = resolve_segments(&decomposed.segments, self.schema, request.method())?;
        let options =
            QueryOptions::from_parts(&decomposed.query, request.headers(), &self.reserved_headers)?;
        let body = match request.body() {
            Some(raw) => RequestBody::parse(raw, request.headers().get("Content-Type"))?,
            None => None,
        };

        debug!(
            method = %request.method(),
            segments = segments.len(),
            options = options.len(),
            has_body = body.is_some(),
            "built request model"
        );
        Ok(RequestModel {
            method: request.method().clone(),
            segments,
            options,
            body,
            schema: self.schema,
        })
    }
}
