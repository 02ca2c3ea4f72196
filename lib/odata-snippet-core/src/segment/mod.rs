//! Resolved path segments.
//!
//! A request path such as `/me/messages/{id}/attachments` is resolved into a
//! sequence of [`PathSegment`]s, each tagged with its [`SegmentKind`] and the
//! schema type it produces. See [`resolve_segments`] for the resolution rules.

use crate::schema::{OperationIndex, SchemaGraph, TypeIndex, TypeRef};

mod resolver;
pub use self::resolver::resolve_segments;

/// The kind of a resolved path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SegmentKind {
    /// An entity set at the service root, e.g. `users`.
    EntitySetRoot,
    /// A singleton at the service root, e.g. `me`.
    Singleton,
    /// A key addressing one entity of a collection, e.g. `{id}`.
    Key,
    /// A navigation property, e.g. `messages`.
    NavigationProperty,
    /// A structural property, e.g. `body`.
    StructuralProperty,
    /// A cast to a derived type, e.g. `microsoft.graph.group`.
    Cast,
    /// A bound action, e.g. `sendMail`.
    Action,
    /// A bound function, e.g. `delta()`.
    Function,
}

/// What a segment resolved to in the schema graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTarget {
    /// A schema type.
    Type(TypeIndex),
    /// A bound action or function.
    Operation(OperationIndex),
}

/// One resolved element of a resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub(crate) identifier: String,
    pub(crate) name: String,
    pub(crate) kind: SegmentKind,
    pub(crate) target: SegmentTarget,
    pub(crate) result: Option<TypeRef>,
    pub(crate) position: usize,
    pub(crate) arguments: Option<String>,
}

impl PathSegment {
    /// The raw identifier, e.g. `messages`, `{id}` or `sendMail`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The name the addressed resource goes by.
    ///
    /// The identifier itself, except for keys and casts which take the name of
    /// the segment they apply to: `users` for `{id}` in `/users/{id}`, `members`
    /// for `microsoft.graph.user` in `/groups/{id}/members/microsoft.graph.user`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The segment kind.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// The resolved type or operation.
    pub fn target(&self) -> SegmentTarget {
        self.target
    }

    /// The type produced by this segment.
    ///
    /// `None` only for an action or function without return type.
    pub fn result_type(&self) -> Option<TypeRef> {
        self.result
    }

    /// Whether this segment produces a collection.
    pub fn is_collection(&self) -> bool {
        self.result.is_some_and(|ty| ty.collection)
    }

    /// Zero-based position in the resolved segment sequence.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The raw argument list of a function call, e.g. `startDateTime='...'`.
    pub fn arguments(&self) -> Option<&str> {
        self.arguments.as_deref()
    }

    /// The bound operation, for action and function segments.
    pub fn operation(&self) -> Option<OperationIndex> {
        match self.target {
            SegmentTarget::Operation(index) => Some(index),
            SegmentTarget::Type(_) => None,
        }
    }

    /// Qualified name of the produced element type, e.g. `microsoft.graph.message`.
    pub fn type_name(&self, schema: &SchemaGraph) -> Option<String> {
        self.result.map(|ty| schema.ty(ty.index).qualified_name())
    }
}
