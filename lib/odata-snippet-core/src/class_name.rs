//! Qualified class names for identifiers found in a request.
//!
//! Snippet generators need the type of each object they declare: the resource
//! addressed by the path, an action parameter carried by the body, or a member
//! nested deeper in that body. [`class_name_of`] answers that by walking the
//! identifier chain from the last resolved path segment.

use tracing::debug;

use crate::SnippetError;
use crate::naming::{singularize, unqualified};
use crate::schema::{SchemaGraph, TypeIndex, TypeRef};
use crate::segment::PathSegment;

/// Computes the qualified type name denoted by `path`, starting at `segment`.
///
/// The first identifier is matched, in order, against:
/// - a parameter of the segment's action or function (`message` of `sendMail`);
/// - the name of the addressed resource, plural or singular, or of its type
///   (`users`, `user` for `/users/{id}`; `members`, `user` for a cast to
///   `microsoft.graph.user`);
/// - a member of the segment's type;
/// - an entity set or singleton of the service root (`users`).
///
/// Each following identifier is a navigation or structural property of the
/// previous type, its base types or, failing that, its derived types.
/// Collection-valued results yield their element type name. An empty `path`
/// yields the segment's own type name.
///
/// # Errors
///
/// Fails with [`SnippetError::SchemaResolution`] naming the identifier and its
/// position in `path` when an identifier cannot be matched.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use odata_snippet_core::{SchemaGraph, class_name_of, resolve_segments};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = SchemaGraph::builder()
///     .namespace("microsoft.graph")
///     .complex_type("emailAddress", |ty| ty.property("address", "Edm.String"))
///     .complex_type("recipient", |ty| ty.property("emailAddress", "emailAddress"))
///     .entity_type("message", |ty| ty.property("toRecipients", "Collection(recipient)"))
///     .entity_type("user", |ty| ty.navigation("messages", "Collection(message)"))
///     .singleton("me", "user")
///     .build()?;
///
/// let segments = resolve_segments(&["me", "messages"], &schema, &Method::POST)?;
/// let last = segments.last().expect("a segment");
///
/// let name = class_name_of(last, &["messages", "toRecipients", "emailAddress"], &schema)?;
/// assert_eq!(name, "microsoft.graph.emailAddress");
/// # Ok(())
/// # }
/// ```
pub fn class_name_of<S: AsRef<str>>(
    segment: &PathSegment,
    path: &[S],
    schema: &SchemaGraph,
) -> Result<String, SnippetError> {
    let unresolved = |identifier: &str, position: usize| SnippetError::SchemaResolution {
        identifier: identifier.to_string(),
        position,
    };

    let Some((first, rest)) = path.split_first() else {
        return segment
            .type_name(schema)
            .ok_or_else(|| unresolved(segment.identifier(), segment.position()));
    };
    let first = first.as_ref();

    let mut current =
        resolve_first(segment, first, schema).ok_or_else(|| unresolved(first, 0))?;
    for (offset, identifier) in rest.iter().enumerate() {
        let identifier = identifier.as_ref();
        current = find_member(schema, current.index, identifier)
            .ok_or_else(|| unresolved(identifier, offset + 1))?;
    }

    let name = schema.ty(current.index).qualified_name();
    debug!(segment = segment.identifier(), %name, "resolved class name");
    Ok(name)
}

fn resolve_first(segment: &PathSegment, identifier: &str, schema: &SchemaGraph) -> Option<TypeRef> {
    if let Some(parameter) = segment
        .operation()
        .and_then(|index| schema.operation(index).parameter(identifier))
    {
        return Some(parameter);
    }

    if let Some(own) = segment.result_type() {
        if names_resource(segment, own, identifier, schema) {
            return Some(own);
        }
        if let Some(member) = find_member(schema, own.index, identifier) {
            return Some(member);
        }
    }
    schema.root(identifier).map(|root| root.type_ref())
}

fn names_resource(
    segment: &PathSegment,
    own: TypeRef,
    identifier: &str,
    schema: &SchemaGraph,
) -> bool {
    let name = unqualified(segment.name());
    identifier == segment.identifier()
        || identifier == name
        || identifier == singularize(name)
        || identifier == schema.ty(own.index).name()
}

/// Members of the type and its bases first, then members only found on derived types.
fn find_member(schema: &SchemaGraph, ty: TypeIndex, name: &str) -> Option<TypeRef> {
    schema.find_member(ty, name).or_else(|| {
        schema
            .derived_types(ty)
            .find_map(|derived| schema.find_member(derived, name))
    })
}
