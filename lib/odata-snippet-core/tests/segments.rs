#![allow(missing_docs)]

use http::Method;
use odata_snippet_core::{CapturedRequest, RequestModel, SchemaGraph, SegmentKind, SnippetError};
use rstest::rstest;

mod common;
pub use self::common::*;

fn describe(graph: &SchemaGraph, method: Method, path: &str) -> anyhow::Result<Vec<String>> {
    let model = build_model(graph, method, path)?;
    let described = model
        .segments()
        .iter()
        .map(|segment| {
            let ty = segment.type_name(graph).unwrap_or_else(|| "void".to_string());
            let ty = if segment.is_collection() {
                format!("Collection({ty})")
            } else {
                ty
            };
            format!("{} {}: {ty}", segment.kind(), segment.identifier())
        })
        .collect();
    Ok(described)
}

#[rstest]
fn should_resolve_deep_navigation(graph: SchemaGraph) -> anyhow::Result<()> {
    let described = describe(
        &graph,
        Method::GET,
        "/me/mailFolders('inbox')/childFolders/{id}/messages/{message-id}/attachments",
    )?;

    insta::assert_debug_snapshot!(described, @r#"
    [
        "Singleton me: microsoft.graph.user",
        "NavigationProperty mailFolders: Collection(microsoft.graph.mailFolder)",
        "Key 'inbox': microsoft.graph.mailFolder",
        "NavigationProperty childFolders: Collection(microsoft.graph.mailFolder)",
        "Key {id}: microsoft.graph.mailFolder",
        "NavigationProperty messages: Collection(microsoft.graph.message)",
        "Key {message-id}: microsoft.graph.message",
        "NavigationProperty attachments: Collection(microsoft.graph.attachment)",
    ]
    "#);
    Ok(())
}

#[rstest]
fn should_resolve_cast_and_bound_function(graph: SchemaGraph) -> anyhow::Result<()> {
    let described = describe(
        &graph,
        Method::GET,
        "/groups('02bd9fd6')/members/microsoft.graph.user/{id}/messages/delta()",
    )?;

    insta::assert_debug_snapshot!(described, @r#"
    [
        "EntitySetRoot groups: Collection(microsoft.graph.group)",
        "Key '02bd9fd6': microsoft.graph.group",
        "NavigationProperty members: Collection(microsoft.graph.directoryObject)",
        "Cast microsoft.graph.user: Collection(microsoft.graph.user)",
        "Key {id}: microsoft.graph.user",
        "NavigationProperty messages: Collection(microsoft.graph.message)",
        "Function delta: Collection(microsoft.graph.message)",
    ]
    "#);
    Ok(())
}

#[rstest]
fn should_resolve_plain_identifier_as_key(graph: SchemaGraph) -> anyhow::Result<()> {
    let described = describe(&graph, Method::GET, "/me/mailFolders/inbox/messages")?;

    insta::assert_debug_snapshot!(described, @r#"
    [
        "Singleton me: microsoft.graph.user",
        "NavigationProperty mailFolders: Collection(microsoft.graph.mailFolder)",
        "Key inbox: microsoft.graph.mailFolder",
        "NavigationProperty messages: Collection(microsoft.graph.message)",
    ]
    "#);
    Ok(())
}

#[rstest]
fn should_resolve_action_without_result(graph: SchemaGraph) -> anyhow::Result<()> {
    let model = build_model(&graph, Method::POST, "/users/{id}/sendMail")?;

    let last = model.last_segment().ok_or_else(|| anyhow::anyhow!("no segment"))?;

    assert_eq!(last.kind(), SegmentKind::Action);
    assert_eq!(last.result_type(), None);
    assert_eq!(model.response_variable_name(), "sendMail");
    Ok(())
}

#[rstest]
fn should_follow_cyclic_navigation(graph: SchemaGraph) -> anyhow::Result<()> {
    let path = "/me/drive/root/children/{a}/children/{b}/children/{c}/children";

    let model = build_model(&graph, Method::GET, path)?;

    assert_eq!(model.segments().len(), 10);
    assert_eq!(model.class_name::<&str>(&[])?, "microsoft.graph.driveItem");
    Ok(())
}

#[rstest]
#[case::function_with_write_verb(Method::POST, "/me/messages/delta()", "function", 2)]
#[case::action_with_read_verb(Method::GET, "/me/sendMail", "action", 1)]
fn should_detect_verb_mismatch(
    graph: SchemaGraph,
    #[case] method: Method,
    #[case] path: &str,
    #[case] expected_kind: &str,
    #[case] expected_position: usize,
) {
    let result = build_model(&graph, method.clone(), path);

    match result {
        Err(SnippetError::VerbMismatch {
            kind,
            method: actual,
            position,
            ..
        }) => {
            assert_eq!(kind, expected_kind);
            assert_eq!(actual, method.as_str());
            assert_eq!(position, expected_position);
        }
        other => panic!("expected a verb mismatch, got {other:?}"),
    }
}

#[rstest]
#[case::unknown_root(
    "/unknown",
    SnippetError::SchemaResolution { identifier: "unknown".into(), position: 0 }
)]
#[case::unknown_member(
    "/me/nope",
    SnippetError::SchemaResolution { identifier: "nope".into(), position: 1 }
)]
#[case::key_on_single(
    "/me/{id}",
    SnippetError::SchemaResolution { identifier: "{id}".into(), position: 1 }
)]
#[case::unrelated_cast(
    "/me/mailFolders/microsoft.graph.message",
    SnippetError::SchemaResolution { identifier: "microsoft.graph.message".into(), position: 2 }
)]
#[case::after_void_action(
    "/me/sendMail/extra",
    SnippetError::SchemaResolution { identifier: "extra".into(), position: 2 }
)]
#[case::raw_value(
    "/me/messages/{id}/$value",
    SnippetError::UnsupportedSegmentKind { identifier: "$value".into(), position: 3 }
)]
fn should_fail_on_unresolvable_path(
    graph: SchemaGraph,
    #[case] path: &str,
    #[case] expected: SnippetError,
) {
    let result = build_model(&graph, Method::POST, path);

    let error = result.expect_err("unresolvable path");
    assert_eq!(error.to_string(), expected.to_string());
}

#[rstest]
fn should_reject_request_outside_service_root(graph: SchemaGraph) -> anyhow::Result<()> {
    let request = CapturedRequest::new(Method::GET, "https://graph.microsoft.com/beta/me")?;

    let result = RequestModel::builder(&graph)
        .with_service_root(SERVICE_ROOT)?
        .build(&request);

    assert!(matches!(result, Err(SnippetError::ServiceRootMismatch { .. })));
    Ok(())
}
