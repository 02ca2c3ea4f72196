use std::fmt;

use indexmap::IndexMap;

/// Stable index of a type inside a [`SchemaGraph`](super::SchemaGraph) type table.
///
/// Indices are only minted by the [`SchemaGraphBuilder`](super::SchemaGraphBuilder),
/// so an index is always valid for the graph that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIndex(pub(super) usize);

/// Stable index of a bound operation inside a [`SchemaGraph`](super::SchemaGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationIndex(pub(super) usize);

/// A resolved reference to a type, either single-valued or a collection of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// The element type.
    pub index: TypeIndex,
    /// Whether the reference is `Collection(...)`.
    pub collection: bool,
}

impl TypeRef {
    pub(crate) fn single(index: TypeIndex) -> Self {
        Self {
            index,
            collection: false,
        }
    }

    pub(crate) fn collection(index: TypeIndex) -> Self {
        Self {
            index,
            collection: true,
        }
    }
}

/// The kind of a schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TypeKind {
    /// `Edm.*` primitive types.
    Primitive,
    /// Structured type without identity.
    Complex,
    /// Structured type with identity, addressable through entity sets.
    Entity,
    /// Enumeration type.
    Enum,
}

impl TypeKind {
    /// Complex and entity types carry properties.
    pub fn is_structured(self) -> bool {
        matches!(self, Self::Complex | Self::Entity)
    }
}

/// A type definition of the schema graph.
#[derive(Debug, Clone)]
pub struct SchemaType {
    pub(super) name: String,
    pub(super) namespace: String,
    pub(super) kind: TypeKind,
    pub(super) base: Option<TypeIndex>,
    pub(super) properties: IndexMap<String, TypeRef>,
    pub(super) navigation: IndexMap<String, TypeRef>,
}

impl SchemaType {
    /// Simple name, e.g. `user`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace, e.g. `microsoft.graph`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Namespace-qualified name, e.g. `microsoft.graph.user`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// The kind of this type.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// The direct base type, if any.
    pub fn base(&self) -> Option<TypeIndex> {
        self.base
    }

    /// Structural properties declared on this type (not inherited ones), in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, TypeRef)> + '_ {
        self.properties.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Navigation properties declared on this type (not inherited ones), in declaration order.
    pub fn navigation_properties(&self) -> impl Iterator<Item = (&str, TypeRef)> + '_ {
        self.navigation.iter().map(|(name, ty)| (name.as_str(), *ty))
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// What an entry of the service root denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// A collection of entities.
    EntitySet,
    /// A single, named entity.
    Singleton,
}

/// An entity set or a singleton exposed at the service root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootEntry {
    /// Entity set or singleton.
    pub kind: RootKind,
    /// The element type.
    pub ty: TypeIndex,
}

impl RootEntry {
    /// The type reference addressed by this root, collection for entity sets.
    pub fn type_ref(&self) -> TypeRef {
        match self.kind {
            RootKind::EntitySet => TypeRef::collection(self.ty),
            RootKind::Singleton => TypeRef::single(self.ty),
        }
    }
}
