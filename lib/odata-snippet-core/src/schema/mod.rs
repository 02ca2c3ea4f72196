//! The schema graph: types, properties, navigation edges and bound operations.
//!
//! The graph is a flat table of type definitions indexed by [`TypeIndex`].
//! Properties and navigation edges store indices into that table rather than
//! owning their targets, so cyclic relationships (a user has a manager who is
//! a user) need no special handling.
//!
//! Loading a schema description (CSDL, `$metadata`) is left to the caller,
//! which feeds definitions through [`SchemaGraphBuilder`].

use std::collections::HashMap;

use indexmap::IndexMap;

mod builder;
pub use self::builder::{OperationDefinition, SchemaGraphBuilder, TypeDefinition};

mod error;
pub use self::error::SchemaError;

mod operation;
pub use self::operation::{BoundOperation, OperationKind};

mod types;
pub use self::types::{
    OperationIndex, RootEntry, RootKind, SchemaType, TypeIndex, TypeKind, TypeRef,
};

/// Read-only graph of every type, root and bound operation of a service.
///
/// A graph is built once and shared by reference with every resolution call.
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    types: Vec<SchemaType>,
    by_name: HashMap<String, TypeIndex>,
    roots: IndexMap<String, RootEntry>,
    operations: Vec<BoundOperation>,
    operations_by_name: IndexMap<String, Vec<OperationIndex>>,
}

impl SchemaGraph {
    /// Creates a new [`SchemaGraphBuilder`].
    pub fn builder() -> SchemaGraphBuilder {
        SchemaGraphBuilder::default()
    }

    /// Returns the type stored at `index`.
    #[allow(clippy::indexing_slicing)] // indices are only minted by the builder of this graph
    pub fn ty(&self, index: TypeIndex) -> &SchemaType {
        &self.types[index.0]
    }

    /// Returns the operation stored at `index`.
    #[allow(clippy::indexing_slicing)] // indices are only minted by the builder of this graph
    pub fn operation(&self, index: OperationIndex) -> &BoundOperation {
        &self.operations[index.0]
    }

    /// Looks up a type by its qualified name, e.g. `microsoft.graph.user`.
    pub fn type_by_name(&self, qualified_name: &str) -> Option<TypeIndex> {
        self.by_name.get(qualified_name).copied()
    }

    /// Looks up an entity set or singleton exposed at the service root.
    pub fn root(&self, name: &str) -> Option<RootEntry> {
        self.roots.get(name).copied()
    }

    /// The type itself followed by its base types, closest first.
    pub fn base_chain(&self, index: TypeIndex) -> impl Iterator<Item = TypeIndex> + '_ {
        std::iter::successors(Some(index), |current| self.ty(*current).base)
    }

    /// Checks whether `candidate` is `base` or derives from it.
    pub fn is_same_or_derived(&self, candidate: TypeIndex, base: TypeIndex) -> bool {
        self.base_chain(candidate).any(|ancestor| ancestor == base)
    }

    /// Every type strictly deriving from `base`, in definition order.
    pub fn derived_types(&self, base: TypeIndex) -> impl Iterator<Item = TypeIndex> + '_ {
        (0..self.types.len())
            .map(TypeIndex)
            .filter(move |candidate| {
                *candidate != base && self.is_same_or_derived(*candidate, base)
            })
    }

    /// Finds a navigation property on the type or any of its base types.
    pub fn find_navigation(&self, index: TypeIndex, name: &str) -> Option<TypeRef> {
        self.base_chain(index)
            .find_map(|ty| self.ty(ty).navigation.get(name).copied())
    }

    /// Finds a structural property on the type or any of its base types.
    pub fn find_property(&self, index: TypeIndex, name: &str) -> Option<TypeRef> {
        self.base_chain(index)
            .find_map(|ty| self.ty(ty).properties.get(name).copied())
    }

    /// Finds a member, navigation first then structural, on the type or its base types.
    pub fn find_member(&self, index: TypeIndex, name: &str) -> Option<TypeRef> {
        self.find_navigation(index, name)
            .or_else(|| self.find_property(index, name))
    }

    /// Every operation named `identifier` (simple or qualified) that can be
    /// bound to `binding`, whatever its verb.
    pub fn bound_operations<'a>(
        &'a self,
        identifier: &'a str,
        binding: TypeRef,
    ) -> impl Iterator<Item = OperationIndex> + 'a {
        let simple = identifier.rsplit('.').next().unwrap_or(identifier);
        self.operations_by_name
            .get(simple)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |index| {
                let operation = self.operation(*index);
                let declared = operation.binding();
                operation.is_named(identifier)
                    && declared.collection == binding.collection
                    && self.is_same_or_derived(binding.index, declared.index)
            })
    }
}
