use std::sync::LazyLock;

use http::Method;
use regex::Regex;
use tracing::debug;

use super::{PathSegment, SegmentKind, SegmentTarget};
use crate::SnippetError;
use crate::schema::{OperationIndex, OperationKind, RootKind, SchemaGraph, TypeIndex, TypeRef};

/// A plain, optionally namespace-qualified, OData identifier.
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").expect("a valid regex")
});

/// An identifier followed by a parenthesised part: `users('42')`, `delta()`.
static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<name>[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*)\((?<args>.*)\)$")
        .expect("a valid regex")
});

/// Anything that is not a plain identifier is a key value:
/// `{id}`, `'abc'`, `42`, GUIDs, e-mail addresses, opaque ids with `=` or `-`.
fn looks_like_key(identifier: &str) -> bool {
    !IDENTIFIER.is_match(identifier)
}

/// Splits `name(args)` into its name and raw arguments.
fn split_call(identifier: &str) -> (&str, Option<&str>) {
    CALL.captures(identifier)
        .and_then(|caps| {
            let name = caps.name("name")?;
            let args = caps.name("args")?;
            Some((name.as_str(), Some(args.as_str())))
        })
        .unwrap_or((identifier, None))
}

/// The type context against which the next identifier is resolved.
#[derive(Debug, Clone, Copy)]
enum Context {
    Root,
    Typed(TypeRef),
    /// After an operation without return type.
    Void,
}

struct SegmentResolver<'a> {
    schema: &'a SchemaGraph,
    method: &'a Method,
    context: Context,
    segments: Vec<PathSegment>,
}

/// Resolves raw path elements into typed [`PathSegment`]s.
///
/// Starting at the service root, each identifier is matched against the
/// current type context by the first applicable rule:
///
/// 1. at the root, an entity set or singleton name;
/// 2. after a collection, a key value (anything but a plain identifier);
/// 3. a navigation property of the current type or its base types;
/// 4. a structural property of the current type or its base types;
/// 5. a qualified type name deriving from the current type (cast);
/// 6. a bound action or function whose verb accepts `method`;
/// 7. after a collection, any other unqualified identifier as a key (`inbox`).
///
/// `name(key)` addresses one entity of a collection-valued `name`;
/// `name(args)` calls a function with its raw arguments.
///
/// # Errors
///
/// - [`SnippetError::EmptyPath`] when `raw` is empty
/// - [`SnippetError::SchemaResolution`] when no rule applies
/// - [`SnippetError::VerbMismatch`] when only operations with an incompatible verb match
/// - [`SnippetError::UnsupportedSegmentKind`] for system segments like `$value`
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use odata_snippet_core::{SchemaGraph, SegmentKind, resolve_segments};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = SchemaGraph::builder()
///     .namespace("microsoft.graph")
///     .entity_type("user", |ty| ty.property("displayName", "Edm.String"))
///     .entity_set("users", "user")
///     .build()?;
///
/// let segments = resolve_segments(&["users", "{id}", "displayName"], &schema, &Method::GET)?;
///
/// let kinds = segments.iter().map(|it| it.kind()).collect::<Vec<_>>();
/// assert_eq!(
///     kinds,
///     [SegmentKind::EntitySetRoot, SegmentKind::Key, SegmentKind::StructuralProperty]
/// );
/// # Ok(())
/// # }
/// ```
pub fn resolve_segments<S: AsRef<str>>(
    raw: &[S],
    schema: &SchemaGraph,
    method: &Method,
) -> Result<Vec<PathSegment>, SnippetError> {
    if raw.is_empty() {
        return Err(SnippetError::EmptyPath);
    }

    let mut resolver = SegmentResolver {
        schema,
        method,
        context: Context::Root,
        segments: Vec::with_capacity(raw.len()),
    };
    for (position, identifier) in raw.iter().enumerate() {
        resolver.resolve(identifier.as_ref(), position)?;
    }
    Ok(resolver.segments)
}

impl SegmentResolver<'_> {
    fn resolve(&mut self, raw: &str, position: usize) -> Result<(), SnippetError> {
        let unresolved = || SnippetError::SchemaResolution {
            identifier: raw.to_string(),
            position,
        };
        if raw.starts_with('$') {
            return Err(SnippetError::UnsupportedSegmentKind {
                identifier: raw.to_string(),
                position,
            });
        }

        let (name, arguments) = split_call(raw);
        let current = match self.context {
            Context::Root => {
                let root = self.schema.root(name).ok_or_else(unresolved)?;
                let kind = match root.kind {
                    RootKind::EntitySet => SegmentKind::EntitySetRoot,
                    RootKind::Singleton => SegmentKind::Singleton,
                };
                self.push_type(name, kind, root.type_ref());
                return self.push_parenthesised_key(raw, arguments, position);
            }
            Context::Void => return Err(unresolved()),
            Context::Typed(current) => current,
        };

        if current.collection && arguments.is_none() && looks_like_key(raw) {
            self.push_type(raw, SegmentKind::Key, TypeRef::single(current.index));
            return Ok(());
        }

        if let Some(target) = self.schema.find_navigation(current.index, name) {
            self.push_type(name, SegmentKind::NavigationProperty, target);
            return self.push_parenthesised_key(raw, arguments, position);
        }

        if let Some(target) = self.schema.find_property(current.index, name) {
            self.push_type(name, SegmentKind::StructuralProperty, target);
            return self.push_parenthesised_key(raw, arguments, position);
        }

        if let Some(derived) = self.find_cast(name, current.index) {
            let target = TypeRef {
                index: derived,
                collection: current.collection,
            };
            self.push_type(name, SegmentKind::Cast, target);
            return self.push_parenthesised_key(raw, arguments, position);
        }

        let candidates = self.schema.bound_operations(name, current).collect::<Vec<_>>();
        if !candidates.is_empty() {
            return self.push_operation(name, arguments, &candidates, position);
        }

        // `inbox` in `/me/mailFolders/inbox`, qualified names stay casts or operations
        if current.collection && arguments.is_none() && !name.contains('.') {
            self.push_type(raw, SegmentKind::Key, TypeRef::single(current.index));
            return Ok(());
        }

        Err(unresolved())
    }

    fn find_cast(&self, name: &str, current: TypeIndex) -> Option<TypeIndex> {
        if !name.contains('.') {
            return None;
        }
        self.schema
            .type_by_name(name)
            .filter(|candidate| self.schema.is_same_or_derived(*candidate, current))
    }

    /// Pushes the first of `candidates` accepting the request method.
    fn push_operation(
        &mut self,
        name: &str,
        arguments: Option<&str>,
        candidates: &[OperationIndex],
        position: usize,
    ) -> Result<(), SnippetError> {
        let Some(index) = candidates
            .iter()
            .copied()
            .find(|index| self.schema.operation(*index).kind().accepts(self.method))
        else {
            let Some(first) = candidates.first() else {
                return Err(SnippetError::SchemaResolution {
                    identifier: name.to_string(),
                    position,
                });
            };
            let operation = self.schema.operation(*first);
            return Err(SnippetError::VerbMismatch {
                operation: operation.name().to_string(),
                kind: operation.kind().to_string(),
                method: self.method.to_string(),
                position,
            });
        };

        let operation = self.schema.operation(index);
        let kind = match operation.kind() {
            OperationKind::Action => SegmentKind::Action,
            OperationKind::Function => SegmentKind::Function,
        };
        let result = operation.return_type();
        debug!(identifier = name, position, %kind, "resolved bound operation");
        self.segments.push(PathSegment {
            identifier: name.to_string(),
            name: name.to_string(),
            kind,
            target: SegmentTarget::Operation(index),
            result,
            position: self.segments.len(),
            arguments: arguments.map(str::to_string),
        });
        self.context = result.map_or(Context::Void, Context::Typed);
        Ok(())
    }

    fn push_type(&mut self, identifier: &str, kind: SegmentKind, target: TypeRef) {
        debug!(
            identifier,
            kind = %kind,
            ty = %self.schema.ty(target.index),
            collection = target.collection,
            "resolved segment"
        );
        let name = match kind {
            SegmentKind::Key | SegmentKind::Cast => {
                self.segments.last().map(|previous| previous.name.clone())
            }
            _ => None,
        };
        self.segments.push(PathSegment {
            identifier: identifier.to_string(),
            name: name.unwrap_or_else(|| identifier.to_string()),
            kind,
            target: SegmentTarget::Type(target.index),
            result: Some(target),
            position: self.segments.len(),
            arguments: None,
        });
        self.context = Context::Typed(target);
    }

    /// Handles the key part of `users('42')`, only valid on a collection.
    fn push_parenthesised_key(
        &mut self,
        raw: &str,
        arguments: Option<&str>,
        position: usize,
    ) -> Result<(), SnippetError> {
        let Some(key) = arguments else {
            return Ok(());
        };
        match self.context {
            Context::Typed(current) if current.collection && !key.trim().is_empty() => {
                self.push_type(key, SegmentKind::Key, TypeRef::single(current.index));
                Ok(())
            }
            _ => Err(SnippetError::SchemaResolution {
                identifier: raw.to_string(),
                position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::graph_schema;

    fn kinds(segments: &[PathSegment]) -> Vec<(String, SegmentKind, bool)> {
        segments
            .iter()
            .map(|segment| {
                (
                    segment.identifier().to_string(),
                    segment.kind(),
                    segment.is_collection(),
                )
            })
            .collect()
    }

    #[test]
    fn should_detect_key_values() {
        for key in [
            "{id}",
            "'abc'",
            "42",
            "48d31887-5fad-4d73-a9f5-3c356e68a038",
            "john@contoso.com",
            "AAMkAGI2=",
        ] {
            assert!(looks_like_key(key), "{key} should be a key");
        }
        for identifier in ["messages", "microsoft.graph.user", "_private"] {
            assert!(!looks_like_key(identifier), "{identifier} is an identifier");
        }
    }

    #[test]
    fn should_split_calls() {
        assert_eq!(split_call("delta()"), ("delta", Some("")));
        assert_eq!(split_call("users('42')"), ("users", Some("'42'")));
        assert_eq!(
            split_call("microsoft.graph.getSchedule(a=1)"),
            ("microsoft.graph.getSchedule", Some("a=1"))
        );
        assert_eq!(split_call("{id}"), ("{id}", None));
        assert_eq!(split_call("messages"), ("messages", None));
    }

    #[test]
    fn should_resolve_singleton_and_navigation() {
        let schema = graph_schema();

        let segments =
            resolve_segments(&["me", "messages"], &schema, &Method::GET).expect("resolved");

        assert_eq!(
            kinds(&segments),
            vec![
                ("me".to_string(), SegmentKind::Singleton, false),
                ("messages".to_string(), SegmentKind::NavigationProperty, true),
            ]
        );
        let last = segments.last().expect("last");
        assert_eq!(
            last.type_name(&schema).as_deref(),
            Some("microsoft.graph.message")
        );
        assert_eq!(last.position(), 1);
    }

    #[test]
    fn should_resolve_key_after_collection() {
        let schema = graph_schema();

        let segments = resolve_segments(
            &["users", "{id}", "messages", "AAMkAGI2=", "attachments"],
            &schema,
            &Method::GET,
        )
        .expect("resolved");

        insta::assert_debug_snapshot!(kinds(&segments), @r#"
        [
            (
                "users",
                EntitySetRoot,
                true,
            ),
            (
                "{id}",
                Key,
                false,
            ),
            (
                "messages",
                NavigationProperty,
                true,
            ),
            (
                "AAMkAGI2=",
                Key,
                false,
            ),
            (
                "attachments",
                NavigationProperty,
                true,
            ),
        ]
        "#);
    }

    #[test]
    fn should_fall_back_to_key_for_unmatched_identifier() {
        let schema = graph_schema();

        let segments = resolve_segments(
            &["me", "mailFolders", "inbox", "messages"],
            &schema,
            &Method::GET,
        )
        .expect("resolved");

        let inbox = segments.get(2).expect("inbox");
        assert_eq!(inbox.kind(), SegmentKind::Key);
        assert_eq!(inbox.name(), "mailFolders");
        assert_eq!(
            inbox.type_name(&schema).as_deref(),
            Some("microsoft.graph.mailFolder")
        );
        assert_eq!(
            segments.last().map(PathSegment::kind),
            Some(SegmentKind::NavigationProperty)
        );

        let result = resolve_segments(&["users", "delta"], &schema, &Method::POST);
        assert!(matches!(
            result,
            Err(SnippetError::VerbMismatch { position: 1, .. })
        ));
    }

    #[test]
    fn should_name_keys_and_casts_after_their_collection() {
        let schema = graph_schema();

        let segments = resolve_segments(
            &["groups", "{id}", "members", "microsoft.graph.user", "{user-id}"],
            &schema,
            &Method::GET,
        )
        .expect("resolved");

        let names = segments.iter().map(PathSegment::name).collect::<Vec<_>>();
        assert_eq!(names, ["groups", "groups", "members", "members", "members"]);
    }

    #[test]
    fn should_resolve_parenthesised_key() {
        let schema = graph_schema();

        let segments =
            resolve_segments(&["users('42')", "manager"], &schema, &Method::GET).expect("resolved");

        assert_eq!(
            kinds(&segments),
            vec![
                ("users".to_string(), SegmentKind::EntitySetRoot, true),
                ("'42'".to_string(), SegmentKind::Key, false),
                ("manager".to_string(), SegmentKind::NavigationProperty, false),
            ]
        );
        let positions = segments.iter().map(PathSegment::position).collect::<Vec<_>>();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn should_not_index_singular_resource() {
        let schema = graph_schema();

        let result = resolve_segments(&["me", "{id}"], &schema, &Method::GET);

        assert!(matches!(
            result,
            Err(SnippetError::SchemaResolution { ref identifier, position: 1 })
                if identifier == "{id}"
        ));

        let result = resolve_segments(&["me('42')"], &schema, &Method::GET);
        assert!(matches!(
            result,
            Err(SnippetError::SchemaResolution { position: 0, .. })
        ));
    }

    #[test]
    fn should_resolve_nested_structural_properties() {
        let schema = graph_schema();

        let segments = resolve_segments(
            &["me", "messages", "{id}", "body", "content"],
            &schema,
            &Method::GET,
        )
        .expect("resolved");

        let names = segments
            .iter()
            .map(|segment| segment.type_name(&schema).unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "microsoft.graph.user",
                "microsoft.graph.message",
                "microsoft.graph.message",
                "microsoft.graph.itemBody",
                "Edm.String",
            ]
        );
    }

    #[test]
    fn should_resolve_cast_to_derived_type() {
        let schema = graph_schema();

        let segments = resolve_segments(
            &["me", "memberOf", "microsoft.graph.group"],
            &schema,
            &Method::GET,
        )
        .expect("resolved");

        let last = segments.last().expect("cast");
        assert_eq!(last.kind(), SegmentKind::Cast);
        assert!(last.is_collection(), "cast keeps the collection flag");
        assert_eq!(
            last.type_name(&schema).as_deref(),
            Some("microsoft.graph.group")
        );
    }

    #[test]
    fn should_reject_cast_to_unrelated_type() {
        let schema = graph_schema();

        let result = resolve_segments(
            &["me", "memberOf", "microsoft.graph.message"],
            &schema,
            &Method::GET,
        );

        assert!(matches!(
            result,
            Err(SnippetError::SchemaResolution { position: 2, .. })
        ));
    }

    #[test]
    fn should_resolve_action_with_write_verb() {
        let schema = graph_schema();

        let segments =
            resolve_segments(&["me", "sendMail"], &schema, &Method::POST).expect("resolved");

        let last = segments.last().expect("action");
        assert_eq!(last.kind(), SegmentKind::Action);
        assert_eq!(last.result_type(), None);
        assert!(last.operation().is_some());
    }

    #[test]
    fn should_resolve_qualified_function_call() {
        let schema = graph_schema();

        let segments = resolve_segments(
            &["users", "microsoft.graph.delta()"],
            &schema,
            &Method::GET,
        )
        .expect("resolved");

        let last = segments.last().expect("function");
        assert_eq!(last.kind(), SegmentKind::Function);
        assert_eq!(last.identifier(), "microsoft.graph.delta");
        assert_eq!(last.arguments(), Some(""));
        assert!(last.is_collection());
    }

    #[test]
    fn should_reject_operation_with_incompatible_verb() {
        let schema = graph_schema();

        let result = resolve_segments(&["me", "sendMail"], &schema, &Method::GET);
        insta::assert_snapshot!(
            result.expect_err("verb mismatch"),
            @"The action 'sendMail' at position 1 cannot be invoked with GET"
        );

        let result = resolve_segments(&["users", "delta()"], &schema, &Method::POST);
        assert!(matches!(result, Err(SnippetError::VerbMismatch { .. })));
    }

    #[test]
    fn should_stop_after_void_operation() {
        let schema = graph_schema();

        let result = resolve_segments(&["me", "sendMail", "body"], &schema, &Method::POST);

        assert!(matches!(
            result,
            Err(SnippetError::SchemaResolution { position: 2, .. })
        ));
    }

    #[test]
    fn should_reject_unknown_identifiers() {
        let schema = graph_schema();

        let result = resolve_segments(&["me", "mesages"], &schema, &Method::GET);
        insta::assert_snapshot!(
            result.expect_err("unknown navigation"),
            @"Cannot resolve 'mesages' at position 1"
        );

        let result = resolve_segments(&["messages"], &schema, &Method::GET);
        assert!(matches!(
            result,
            Err(SnippetError::SchemaResolution { position: 0, .. })
        ));
    }

    #[test]
    fn should_reject_system_segments() {
        let schema = graph_schema();

        let result = resolve_segments(&["me", "messages", "$count"], &schema, &Method::GET);

        assert!(matches!(
            result,
            Err(SnippetError::UnsupportedSegmentKind { position: 2, .. })
        ));
    }

    #[test]
    fn should_reject_empty_path() {
        let schema = graph_schema();
        let raw: [&str; 0] = [];

        let result = resolve_segments(&raw, &schema, &Method::GET);

        assert!(matches!(result, Err(SnippetError::EmptyPath)));
    }

    #[test]
    fn should_prefer_property_over_operation_with_same_name() {
        let schema = SchemaGraph::builder()
            .namespace("test")
            .entity_type("report", |ty| ty.property("content", "Edm.Stream"))
            .entity_set("reports", "report")
            .function("content", "report", |op| op.returns("Edm.String"))
            .build()
            .expect("valid schema");

        let segments = resolve_segments(&["reports", "{id}", "content"], &schema, &Method::GET)
            .expect("resolved");

        let last = segments.last().expect("content");
        assert_eq!(last.kind(), SegmentKind::StructuralProperty);
        assert_eq!(last.type_name(&schema).as_deref(), Some("Edm.Stream"));
    }
}
