//! The Microsoft Graph slice of the integration tests, shared by unit tests.

use crate::schema::SchemaGraph;

pub(crate) const SERVICE_ROOT: &str = "https://graph.microsoft.com/v1.0";

include!("../tests/common/graph_schema.rs");
