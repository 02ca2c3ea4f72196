use super::ExpressionProvider;
use crate::query::join_list;

/// Fragments for the C# request builders: `.Select("displayName")`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CSharpExpressions;

impl ExpressionProvider for CSharpExpressions {
    fn select(&self, fields: &[String]) -> String {
        format!("\n\t.Select(\"{}\")", join_list(fields, ","))
    }

    fn filter(&self, expression: &str) -> String {
        format!("\n\t.Filter(\"{expression}\")")
    }

    fn search(&self, term: &str) -> String {
        format!("\n\t.Search(\"{term}\")")
    }

    fn order_by(&self, expression: &str) -> String {
        format!("\n\t.OrderBy(\"{expression}\")")
    }

    fn skip(&self, count: u64) -> String {
        format!("\n\t.Skip({count})")
    }

    fn top(&self, count: u64) -> String {
        format!("\n\t.Top({count})")
    }

    fn count(&self, flag: bool) -> String {
        format!("\n\t.Count({flag})")
    }

    fn expand(&self, expression: &str) -> String {
        format!("\n\t.Expand(\"{expression}\")")
    }

    fn header(&self, name: &str, value: &str) -> String {
        format!("\n\t.Header(\"{name}\",\"{value}\")")
    }
}
