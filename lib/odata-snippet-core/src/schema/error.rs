/// Errors raised while building a [`SchemaGraph`](super::SchemaGraph).
///
/// These only occur when the external schema loader feeds inconsistent
/// definitions into the [`SchemaGraphBuilder`](super::SchemaGraphBuilder).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum SchemaError {
    /// A type reference names a type that was never defined.
    #[display("Unknown type '{reference}' referenced by {context}")]
    UnknownType {
        /// The unresolved reference, as written.
        reference: String,
        /// Where the reference was found, e.g. `property 'body' of microsoft.graph.message`.
        context: String,
    },

    /// Two types share the same qualified name.
    #[display("Duplicate type '{name}'")]
    DuplicateType {
        /// The qualified name defined twice.
        name: String,
    },

    /// Two entity sets or singletons share the same name.
    #[display("Duplicate entity set or singleton '{name}'")]
    DuplicateRoot {
        /// The root name defined twice.
        name: String,
    },

    /// A type is its own (transitive) base type.
    #[display("Inheritance cycle through '{name}'")]
    InheritanceCycle {
        /// A qualified type name on the cycle.
        name: String,
    },

    /// A type reference is not a valid `Namespace.Type` or `Collection(Namespace.Type)` string.
    #[display("Invalid type reference '{reference}'")]
    InvalidTypeReference {
        /// The malformed reference.
        reference: String,
    },
}
