use http::Method;
use indexmap::IndexMap;

use super::types::TypeRef;

/// Whether a bound operation is an action or a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OperationKind {
    /// State-changing operation, invoked with a write verb.
    #[display("action")]
    Action,
    /// Side-effect free operation, invoked with a read verb.
    #[display("function")]
    Function,
}

impl OperationKind {
    /// Checks whether the HTTP method may invoke this kind of operation.
    ///
    /// Functions require read access (`GET`, `HEAD`), actions require write
    /// access (`POST`, `PUT`, `PATCH`, `DELETE`).
    pub fn accepts(self, method: &Method) -> bool {
        match self {
            Self::Function => matches!(*method, Method::GET | Method::HEAD),
            Self::Action => matches!(
                *method,
                Method::POST | Method::PUT | Method::PATCH | Method::DELETE
            ),
        }
    }
}

/// An action or function bound to a type.
#[derive(Debug, Clone)]
pub struct BoundOperation {
    pub(super) name: String,
    pub(super) namespace: String,
    pub(super) kind: OperationKind,
    pub(super) binding: TypeRef,
    pub(super) parameters: IndexMap<String, TypeRef>,
    pub(super) return_type: Option<TypeRef>,
}

impl BoundOperation {
    /// Simple name, e.g. `sendMail`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace-qualified name, e.g. `microsoft.graph.sendMail`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Action or function.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// The binding parameter type.
    pub fn binding(&self) -> TypeRef {
        self.binding
    }

    /// Looks up a non-binding parameter by name.
    pub fn parameter(&self, name: &str) -> Option<TypeRef> {
        self.parameters.get(name).copied()
    }

    /// Non-binding parameters in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, TypeRef)> + '_ {
        self.parameters.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// The return type, `None` for operations without result.
    pub fn return_type(&self) -> Option<TypeRef> {
        self.return_type
    }

    /// Matches either the simple or the qualified name.
    pub(crate) fn is_named(&self, identifier: &str) -> bool {
        if identifier == self.name {
            return true;
        }
        identifier
            .strip_suffix(self.name.as_str())
            .and_then(|prefix| prefix.strip_suffix('.'))
            .is_some_and(|namespace| namespace == self.namespace)
    }
}
