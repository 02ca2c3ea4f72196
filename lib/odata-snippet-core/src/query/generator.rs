use tracing::debug;

use super::QueryOptions;
use crate::language::ExpressionProvider;

/// Generates the query section of a snippet.
///
/// Each present option is rendered by the provider, in canonical order
/// (`$select`, `$filter`, `$search`, `$orderby`, `$skip`, `$top`, `$count`,
/// `$expand`) followed by headers in request order, and the fragments are
/// concatenated. Without options the section is empty.
///
/// # Example
///
/// ```rust
/// use odata_snippet_core::{
///     JavaScriptExpressions, QueryOptions, RequestHeaders, generate_query_section,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = QueryOptions::parse("$top=5&$skip=20", &RequestHeaders::default())?;
///
/// let section = generate_query_section(&options, &JavaScriptExpressions);
/// assert_eq!(section, "\n\t.skip(20)\n\t.top(5)");
/// # Ok(())
/// # }
/// ```
pub fn generate_query_section<P>(options: &QueryOptions, provider: &P) -> String
where
    P: ExpressionProvider + ?Sized,
{
    let section = options
        .iter()
        .map(|option| option.render(provider))
        .collect::<String>();
    debug!(options = options.len(), length = section.len(), "generated query section");
    section
}

/// Joins items with a delimiter, without leading or trailing delimiter.
///
/// An empty list gives an empty string, an empty delimiter a plain concatenation.
pub fn join_list<S: AsRef<str>>(items: &[S], delimiter: &str) -> String {
    let mut result = String::new();
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            result.push_str(delimiter);
        }
        result.push_str(item.as_ref());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{CSharpExpressions, JavaScriptExpressions};
    use crate::request::RequestHeaders;

    #[test]
    fn should_return_empty_string_if_field_list_empty() {
        let items: [&str; 0] = [];

        assert_eq!(join_list(&items, ","), "");
    }

    #[test]
    fn should_return_comma_separated_string_with_comma_delimiter() {
        assert_eq!(join_list(&["Test", "Test2", "Test3"], ","), "Test,Test2,Test3");
    }

    #[test]
    fn should_return_undelimited_string_with_empty_delimiter() {
        assert_eq!(join_list(&["Test", "Test2", "Test3"], ""), "TestTest2Test3");
    }

    #[test]
    fn should_not_add_delimiter_around_single_item() {
        assert_eq!(join_list(&["Test".to_string()], ", "), "Test");
    }

    #[test]
    fn should_return_empty_section_without_options() {
        let options = QueryOptions::default();

        assert_eq!(generate_query_section(&options, &JavaScriptExpressions), "");
    }

    #[test]
    fn should_emit_canonical_order_whatever_the_query_order() {
        let headers = RequestHeaders::new()
            .add_header("Prefer", "kenya-timezone")
            .add_header("ConsistencyLevel", "eventual");
        let options = QueryOptions::parse(
            "$expand=members&$count=true&$top=5&$skip=20&$orderby=displayName&$search=\"pizza\"&$filter=startswith(displayName,'J')&$select=id,displayName",
            &headers,
        )
        .expect("valid options");

        let section = generate_query_section(&options, &JavaScriptExpressions);

        let fragments = section.split("\n\t").skip(1).collect::<Vec<_>>();
        assert_eq!(
            fragments,
            vec![
                ".select('id,displayName')",
                ".filter('startswith(displayName,'J')')",
                ".search('pizza')",
                ".orderby('displayName')",
                ".skip(20)",
                ".top(5)",
                ".count(true)",
                ".expand('members')",
                ".header('Prefer','kenya-timezone')",
                ".header('ConsistencyLevel','eventual')",
            ]
        );
        assert!(section.starts_with("\n\t"));
    }

    #[test]
    fn should_render_through_dyn_provider() {
        let options = QueryOptions::parse("$select=subject&$top=1", &RequestHeaders::default())
            .expect("valid options");
        let provider: &dyn ExpressionProvider = &CSharpExpressions;

        let section = generate_query_section(&options, provider);

        assert_eq!(section, "\n\t.Select(\"subject\")\n\t.Top(1)");
    }
}
