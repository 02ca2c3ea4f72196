//! # OData Snippet Core
//!
//! Turn a captured OData request into the building blocks of a client-library
//! code snippet.
//!
//! A request like `GET /me/messages?$select=subject&$top=5` is:
//! - resolved against a [`SchemaGraph`] into typed [`PathSegment`]s
//!   (singleton `me`, navigation property `messages`);
//! - split into [`QueryOptions`], rendered by an [`ExpressionProvider`] as a
//!   query section such as `.select('subject').top(5)`;
//! - queried for the class name of any identifier found in its body, with
//!   [`class_name_of`].
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use odata_snippet_core::{CapturedRequest, Language, RequestModel, SchemaGraph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaGraph::builder()
//!     .namespace("microsoft.graph")
//!     .complex_type("itemBody", |ty| ty.property("content", "Edm.String"))
//!     .entity_type("message", |ty| {
//!         ty.property("subject", "Edm.String")
//!             .property("body", "itemBody")
//!     })
//!     .entity_type("user", |ty| ty.navigation("messages", "Collection(message)"))
//!     .singleton("me", "user")
//!     .build()?;
//!
//! let request = CapturedRequest::new(
//!     Method::GET,
//!     "https://graph.microsoft.com/v1.0/me/messages?$select=subject&$top=5",
//! )?
//! .with_header("Prefer", "outlook.body-content-type=\"text\"");
//!
//! let model = RequestModel::builder(&schema)
//!     .with_service_root("https://graph.microsoft.com/v1.0")?
//!     .build(&request)?;
//!
//! let section = model.query_section(Language::JavaScript.provider());
//! assert_eq!(
//!     section,
//!     "\n\t.select('subject')\n\t.top(5)\n\t.header('Prefer','outlook.body-content-type=\"text\"')"
//! );
//!
//! assert_eq!(model.class_name(&["messages", "body"])?, "microsoft.graph.itemBody");
//! # Ok(())
//! # }
//! ```
//!
//! ## Path resolution
//!
//! See [`resolve_segments`] for the rules: roots, keys (`{id}`, `'42'`,
//! `users('42')`), navigation and structural properties, casts to derived
//! types, and bound actions and functions checked against the request method.
//!
//! ## Query options
//!
//! Options are always emitted in canonical order, whatever their order in the
//! request: `$select`, `$filter`, `$search`, `$orderby`, `$skip`, `$top`,
//! `$count`, `$expand`, then headers in request order. `Host`,
//! `Content-Length`, `Content-Type` and `Authorization` are never emitted.
//!
//! ## Error Handling
//!
//! - [`SnippetError`] - request resolution errors
//! - [`SchemaError`] - schema graph construction errors
//! - [`UnknownLanguage`] - unsupported language name

mod class_name;
mod error;
#[cfg(test)]
mod fixtures;
mod language;
mod model;
mod naming;
mod query;
mod request;
mod schema;
mod segment;

pub use self::class_name::class_name_of;
pub use self::error::SnippetError;
pub use self::language::{
    CSharpExpressions, ExpressionProvider, JavaExpressions, JavaScriptExpressions, Language,
    UnknownLanguage,
};
pub use self::model::{RequestModel, RequestModelBuilder};
pub use self::query::{
    QueryOption, QueryOptionKind, QueryOptions, generate_query_section, join_list,
};
pub use self::request::{CapturedRequest, RequestBody, RequestHeaders};
pub use self::schema::{
    BoundOperation, OperationDefinition, OperationIndex, OperationKind, RootEntry, RootKind,
    SchemaError, SchemaGraph, SchemaGraphBuilder, SchemaType, TypeDefinition, TypeIndex, TypeKind,
    TypeRef,
};
pub use self::segment::{PathSegment, SegmentKind, SegmentTarget, resolve_segments};
