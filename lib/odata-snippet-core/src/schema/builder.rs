use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use super::operation::{BoundOperation, OperationKind};
use super::types::{OperationIndex, RootEntry, RootKind, SchemaType, TypeIndex, TypeKind, TypeRef};
use super::{SchemaError, SchemaGraph};

const EDM_NAMESPACE: &str = "Edm";

/// Primitive types always present in a [`SchemaGraph`].
const EDM_PRIMITIVES: &[&str] = &[
    "Binary",
    "Boolean",
    "Byte",
    "Date",
    "DateTimeOffset",
    "Decimal",
    "Double",
    "Duration",
    "Guid",
    "Int16",
    "Int32",
    "Int64",
    "SByte",
    "Single",
    "Stream",
    "String",
    "TimeOfDay",
];

/// Definition of a structured or enumeration type, used with [`SchemaGraphBuilder`].
///
/// Type references are CSDL strings: `Edm.String`, `microsoft.graph.user`,
/// `Collection(microsoft.graph.recipient)`. Unqualified names are resolved
/// against the builder namespace in effect when the type was added.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    name: String,
    namespace: String,
    kind: TypeKind,
    base: Option<String>,
    properties: Vec<(String, String)>,
    navigation: Vec<(String, String)>,
}

impl TypeDefinition {
    fn new(name: impl Into<String>, namespace: &str, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.to_string(),
            kind,
            base: None,
            properties: Vec::new(),
            navigation: Vec::new(),
        }
    }

    /// Sets the base type.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Adds a structural property.
    pub fn property(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.properties.push((name.into(), ty.into()));
        self
    }

    /// Adds a navigation property.
    pub fn navigation(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.navigation.push((name.into(), target.into()));
        self
    }
}

/// Definition of a bound action or function, used with [`SchemaGraphBuilder`].
#[derive(Debug, Clone)]
pub struct OperationDefinition {
    name: String,
    namespace: String,
    kind: OperationKind,
    binding: String,
    parameters: Vec<(String, String)>,
    return_type: Option<String>,
}

impl OperationDefinition {
    /// Adds a non-binding parameter.
    pub fn parameter(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.parameters.push((name.into(), ty.into()));
        self
    }

    /// Sets the return type.
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }
}

#[derive(Debug, Clone)]
struct RootDefinition {
    name: String,
    namespace: String,
    kind: RootKind,
    ty: String,
}

/// Builder for an immutable [`SchemaGraph`].
///
/// The schema loader (CSDL reader, fixture, ...) feeds definitions in any
/// order; references are only resolved by [`SchemaGraphBuilder::build`], so
/// cyclic navigation between types is fine.
///
/// # Example
///
/// ```rust
/// use odata_snippet_core::SchemaGraph;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = SchemaGraph::builder()
///     .namespace("microsoft.graph")
///     .entity_type("user", |ty| {
///         ty.property("displayName", "Edm.String")
///             .navigation("manager", "user")
///     })
///     .entity_set("users", "user")
///     .build()?;
///
/// assert!(schema.root("users").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SchemaGraphBuilder {
    namespace: String,
    types: Vec<TypeDefinition>,
    roots: Vec<RootDefinition>,
    operations: Vec<OperationDefinition>,
}

impl Default for SchemaGraphBuilder {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            types: Vec::new(),
            roots: Vec::new(),
            operations: Vec::new(),
        }
    }
}

impl SchemaGraphBuilder {
    /// Sets the namespace used for subsequently added definitions.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Adds an entity type.
    pub fn entity_type(
        self,
        name: impl Into<String>,
        configure: impl FnOnce(TypeDefinition) -> TypeDefinition,
    ) -> Self {
        self.add_type(name, TypeKind::Entity, configure)
    }

    /// Adds a complex type.
    pub fn complex_type(
        self,
        name: impl Into<String>,
        configure: impl FnOnce(TypeDefinition) -> TypeDefinition,
    ) -> Self {
        self.add_type(name, TypeKind::Complex, configure)
    }

    /// Adds an enumeration type.
    pub fn enum_type(self, name: impl Into<String>) -> Self {
        self.add_type(name, TypeKind::Enum, |ty| ty)
    }

    fn add_type(
        mut self,
        name: impl Into<String>,
        kind: TypeKind,
        configure: impl FnOnce(TypeDefinition) -> TypeDefinition,
    ) -> Self {
        let definition = configure(TypeDefinition::new(name, &self.namespace, kind));
        self.types.push(definition);
        self
    }

    /// Exposes an entity set at the service root.
    pub fn entity_set(self, name: impl Into<String>, element: impl Into<String>) -> Self {
        self.add_root(name, RootKind::EntitySet, element)
    }

    /// Exposes a singleton at the service root.
    pub fn singleton(self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.add_root(name, RootKind::Singleton, ty)
    }

    fn add_root(mut self, name: impl Into<String>, kind: RootKind, ty: impl Into<String>) -> Self {
        self.roots.push(RootDefinition {
            name: name.into(),
            namespace: self.namespace.clone(),
            kind,
            ty: ty.into(),
        });
        self
    }

    /// Adds an action bound to `binding`.
    pub fn action(
        self,
        name: impl Into<String>,
        binding: impl Into<String>,
        configure: impl FnOnce(OperationDefinition) -> OperationDefinition,
    ) -> Self {
        self.add_operation(name, OperationKind::Action, binding, configure)
    }

    /// Adds a function bound to `binding`.
    pub fn function(
        self,
        name: impl Into<String>,
        binding: impl Into<String>,
        configure: impl FnOnce(OperationDefinition) -> OperationDefinition,
    ) -> Self {
        self.add_operation(name, OperationKind::Function, binding, configure)
    }

    fn add_operation(
        mut self,
        name: impl Into<String>,
        kind: OperationKind,
        binding: impl Into<String>,
        configure: impl FnOnce(OperationDefinition) -> OperationDefinition,
    ) -> Self {
        let definition = configure(OperationDefinition {
            name: name.into(),
            namespace: self.namespace.clone(),
            kind,
            binding: binding.into(),
            parameters: Vec::new(),
            return_type: None,
        });
        self.operations.push(definition);
        self
    }

    /// Resolves every reference and freezes the graph.
    ///
    /// # Errors
    ///
    /// Fails with a [`SchemaError`] when a reference is unknown or malformed,
    /// when a type or root is defined twice, or when inheritance is cyclic.
    pub fn build(self) -> Result<SchemaGraph, SchemaError> {
        let Self {
            namespace: _,
            types: definitions,
            roots: root_definitions,
            operations: operation_definitions,
        } = self;

        // First pass: register every name so that references can point forward
        let mut types = Vec::with_capacity(EDM_PRIMITIVES.len() + definitions.len());
        let mut by_name = HashMap::new();
        for primitive in EDM_PRIMITIVES {
            by_name.insert(format!("{EDM_NAMESPACE}.{primitive}"), TypeIndex(types.len()));
            types.push(SchemaType {
                name: (*primitive).to_string(),
                namespace: EDM_NAMESPACE.to_string(),
                kind: TypeKind::Primitive,
                base: None,
                properties: IndexMap::new(),
                navigation: IndexMap::new(),
            });
        }
        for definition in &definitions {
            let qualified = format!("{}.{}", definition.namespace, definition.name);
            if by_name.contains_key(&qualified) {
                return Err(SchemaError::DuplicateType { name: qualified });
            }
            by_name.insert(qualified, TypeIndex(types.len()));
            types.push(SchemaType {
                name: definition.name.clone(),
                namespace: definition.namespace.clone(),
                kind: definition.kind,
                base: None,
                properties: IndexMap::new(),
                navigation: IndexMap::new(),
            });
        }

        // Second pass: resolve edges
        let resolver = ReferenceResolver { by_name: &by_name };
        for (definition, ty) in definitions
            .iter()
            .zip(types.iter_mut().skip(EDM_PRIMITIVES.len()))
        {
            let owner = format!("{}.{}", definition.namespace, definition.name);
            if let Some(base) = &definition.base {
                let context = format!("base type of {owner}");
                let base = resolver.resolve(base, &definition.namespace, &context)?;
                ty.base = Some(base.index);
            }
            for (name, reference) in &definition.properties {
                let context = format!("property '{name}' of {owner}");
                let target = resolver.resolve(reference, &definition.namespace, &context)?;
                ty.properties.insert(name.clone(), target);
            }
            for (name, reference) in &definition.navigation {
                let context = format!("navigation property '{name}' of {owner}");
                let target = resolver.resolve(reference, &definition.namespace, &context)?;
                ty.navigation.insert(name.clone(), target);
            }
        }
        check_inheritance(&types)?;

        let mut roots = IndexMap::new();
        for root in root_definitions {
            let context = format!("entity set or singleton '{}'", root.name);
            let target = resolver.resolve(&root.ty, &root.namespace, &context)?;
            if roots.contains_key(&root.name) {
                return Err(SchemaError::DuplicateRoot { name: root.name });
            }
            roots.insert(
                root.name,
                RootEntry {
                    kind: root.kind,
                    ty: target.index,
                },
            );
        }

        let mut operations = Vec::with_capacity(operation_definitions.len());
        let mut operations_by_name: IndexMap<String, Vec<OperationIndex>> = IndexMap::new();
        for definition in operation_definitions {
            let owner = format!("{} {}.{}", definition.kind, definition.namespace, definition.name);
            let binding = resolver.resolve(
                &definition.binding,
                &definition.namespace,
                &format!("binding of {owner}"),
            )?;
            let mut parameters = IndexMap::new();
            for (name, reference) in &definition.parameters {
                let context = format!("parameter '{name}' of {owner}");
                let ty = resolver.resolve(reference, &definition.namespace, &context)?;
                parameters.insert(name.clone(), ty);
            }
            let return_type = definition
                .return_type
                .as_deref()
                .map(|reference| {
                    resolver.resolve(
                        reference,
                        &definition.namespace,
                        &format!("return type of {owner}"),
                    )
                })
                .transpose()?;

            operations_by_name
                .entry(definition.name.clone())
                .or_default()
                .push(OperationIndex(operations.len()));
            operations.push(BoundOperation {
                name: definition.name,
                namespace: definition.namespace,
                kind: definition.kind,
                binding,
                parameters,
                return_type,
            });
        }

        debug!(
            types = types.len(),
            roots = roots.len(),
            operations = operations.len(),
            "schema graph built"
        );

        Ok(SchemaGraph {
            types,
            by_name,
            roots,
            operations,
            operations_by_name,
        })
    }
}

struct ReferenceResolver<'a> {
    by_name: &'a HashMap<String, TypeIndex>,
}

impl ReferenceResolver<'_> {
    fn resolve(
        &self,
        reference: &str,
        namespace: &str,
        context: &str,
    ) -> Result<TypeRef, SchemaError> {
        let (name, collection) = parse_type_reference(reference)?;
        let qualified = if name.contains('.') {
            name.to_string()
        } else {
            format!("{namespace}.{name}")
        };
        let index = self
            .by_name
            .get(&qualified)
            .copied()
            .ok_or_else(|| SchemaError::UnknownType {
                reference: reference.to_string(),
                context: context.to_string(),
            })?;
        Ok(TypeRef { index, collection })
    }
}

/// Splits `Collection(T)` into `(T, true)` and `T` into `(T, false)`.
fn parse_type_reference(reference: &str) -> Result<(&str, bool), SchemaError> {
    let invalid = || SchemaError::InvalidTypeReference {
        reference: reference.to_string(),
    };
    let trimmed = reference.trim();
    let (name, collection) = match trimmed.strip_prefix("Collection(") {
        Some(inner) => (inner.strip_suffix(')').ok_or_else(invalid)?, true),
        None => (trimmed, false),
    };

    let valid = !name.is_empty() && name.split('.').all(is_identifier);
    if valid { Ok((name, collection)) } else { Err(invalid()) }
}

fn is_identifier(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|ch| ch.is_alphanumeric() || ch == '_')
}

fn check_inheritance(types: &[SchemaType]) -> Result<(), SchemaError> {
    for ty in types {
        let mut current = ty.base;
        let mut steps = 0;
        while let Some(TypeIndex(base)) = current {
            steps += 1;
            if steps > types.len() {
                return Err(SchemaError::InheritanceCycle {
                    name: ty.qualified_name(),
                });
            }
            current = types.get(base).and_then(|base| base.base);
        }
    }
    Ok(())
}
