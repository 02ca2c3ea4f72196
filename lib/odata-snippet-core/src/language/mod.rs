//! Target languages and their query-option fragments.
//!
//! An [`ExpressionProvider`] turns each parsed query option into the text
//! fragment a client library expects, e.g. `.top(5)` for JavaScript or
//! `.Top(5)` for C#. Every fragment starts on a new, tab-indented line so the
//! fragments chain after a request builder.
//!
//! # Example
//!
//! ```rust
//! use odata_snippet_core::{ExpressionProvider, Language};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let language: Language = "js".parse()?;
//! let provider = language.provider();
//!
//! assert_eq!(provider.top(5), "\n\t.top(5)");
//! assert_eq!(
//!     provider.header("Prefer", "kenya-timezone"),
//!     "\n\t.header('Prefer','kenya-timezone')"
//! );
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;

mod csharp;
pub use self::csharp::CSharpExpressions;

mod java;
pub use self::java::JavaExpressions;

mod javascript;
pub use self::javascript::JavaScriptExpressions;

/// Renders query options as fragments of a target language.
///
/// Implementations are pure and stateless. Values are emitted verbatim,
/// no escaping is applied.
pub trait ExpressionProvider: Send + Sync {
    /// `$select` with its fields, in query order.
    fn select(&self, fields: &[String]) -> String;

    /// `$filter` with its expression.
    fn filter(&self, expression: &str) -> String;

    /// `$search` with its term.
    fn search(&self, term: &str) -> String;

    /// `$orderby` with its expression.
    fn order_by(&self, expression: &str) -> String;

    /// `$skip`
    fn skip(&self, count: u64) -> String;

    /// `$top`
    fn top(&self, count: u64) -> String;

    /// `$count`
    fn count(&self, flag: bool) -> String;

    /// `$expand` with its expression.
    fn expand(&self, expression: &str) -> String;

    /// A request header.
    fn header(&self, name: &str, value: &str) -> String;
}

/// The languages a snippet can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Language {
    /// JavaScript, `client.api(...)` chains.
    #[display("javascript")]
    JavaScript,
    /// C#, request builder chains.
    #[display("csharp")]
    CSharp,
    /// Java, request builder chains.
    #[display("java")]
    Java,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Self; 3] = [Self::JavaScript, Self::CSharp, Self::Java];

    /// The expression provider for this language.
    pub fn provider(self) -> &'static dyn ExpressionProvider {
        match self {
            Self::JavaScript => &JavaScriptExpressions,
            Self::CSharp => &CSharpExpressions,
            Self::Java => &JavaExpressions,
        }
    }
}

/// The language name is not supported.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("Unknown language '{name}', expected one of: javascript, csharp, java")]
pub struct UnknownLanguage {
    /// The rejected name.
    pub name: String,
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(Self::JavaScript),
            "csharp" | "c#" | "cs" => Ok(Self::CSharp),
            "java" => Ok(Self::Java),
            _ => Err(UnknownLanguage {
                name: value.to_string(),
            }),
        }
    }
}
