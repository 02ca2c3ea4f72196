use super::ExpressionProvider;
use crate::query::join_list;

/// Fragments for the JavaScript client, chained after `client.api(...)`.
///
/// Values are single-quoted: `.select('displayName,givenName')`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JavaScriptExpressions;

impl ExpressionProvider for JavaScriptExpressions {
    fn select(&self, fields: &[String]) -> String {
        format!("\n\t.select('{}')", join_list(fields, ","))
    }

    fn filter(&self, expression: &str) -> String {
        format!("\n\t.filter('{expression}')")
    }

    fn search(&self, term: &str) -> String {
        format!("\n\t.search('{term}')")
    }

    fn order_by(&self, expression: &str) -> String {
        format!("\n\t.orderby('{expression}')")
    }

    fn skip(&self, count: u64) -> String {
        format!("\n\t.skip({count})")
    }

    fn top(&self, count: u64) -> String {
        format!("\n\t.top({count})")
    }

    fn count(&self, flag: bool) -> String {
        format!("\n\t.count({flag})")
    }

    fn expand(&self, expression: &str) -> String {
        format!("\n\t.expand('{expression}')")
    }

    fn header(&self, name: &str, value: &str) -> String {
        format!("\n\t.header('{name}','{value}')")
    }
}
