use http::Method;
use odata_snippet_core::{CapturedRequest, RequestModel, SchemaGraph, SnippetError};
use rstest::fixture;
use tracing::info;

pub const SERVICE_ROOT: &str = "https://graph.microsoft.com/v1.0";

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

include!("graph_schema.rs");

#[fixture]
pub fn graph() -> SchemaGraph {
    init_tracing();
    graph_schema()
}

pub fn build_model<'s>(
    schema: &'s SchemaGraph,
    method: Method,
    path: &str,
) -> Result<RequestModel<'s>, SnippetError> {
    let request = CapturedRequest::new(method, &format!("{SERVICE_ROOT}{path}"))?;
    RequestModel::builder(schema)
        .with_service_root(SERVICE_ROOT)?
        .build(&request)
}
