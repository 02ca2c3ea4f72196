//! Query options: parsing from a request and generating the query section of a snippet.
//!
//! Options are always emitted in the canonical order given by
//! [`QueryOptionKind::CANONICAL_ORDER`], whatever their order in the query
//! string, with header options last in request order.

use std::collections::BTreeMap;

mod generator;
pub use self::generator::{generate_query_section, join_list};

mod parser;
pub(crate) use self::parser::DEFAULT_RESERVED_HEADERS;

use crate::language::ExpressionProvider;

/// The kinds of query options a snippet can express.
///
/// The declaration order is the canonical emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum QueryOptionKind {
    /// `$select`
    #[display("$select")]
    Select,
    /// `$filter`
    #[display("$filter")]
    Filter,
    /// `$search`
    #[display("$search")]
    Search,
    /// `$orderby`
    #[display("$orderby")]
    OrderBy,
    /// `$skip`
    #[display("$skip")]
    Skip,
    /// `$top`
    #[display("$top")]
    Top,
    /// `$count`
    #[display("$count")]
    Count,
    /// `$expand`
    #[display("$expand")]
    Expand,
    /// A request header.
    #[display("header")]
    Header,
}

impl QueryOptionKind {
    /// Every kind, in emission order.
    pub const CANONICAL_ORDER: [Self; 9] = [
        Self::Select,
        Self::Filter,
        Self::Search,
        Self::OrderBy,
        Self::Skip,
        Self::Top,
        Self::Count,
        Self::Expand,
        Self::Header,
    ];

    /// Maps a query-string key to its option kind.
    ///
    /// The `$` prefix is optional and the match is case-insensitive.
    /// Headers are not query-string options and unknown keys yield `None`.
    pub fn from_query_key(key: &str) -> Option<Self> {
        let name = key.strip_prefix('$').unwrap_or(key);
        Self::CANONICAL_ORDER
            .into_iter()
            .filter(|kind| *kind != Self::Header)
            .find(|kind| {
                kind.to_string()
                    .strip_prefix('$')
                    .is_some_and(|expected| expected.eq_ignore_ascii_case(name))
            })
    }
}

/// A parsed query option with its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOption {
    /// Selected fields, in query order.
    Select(Vec<String>),
    /// Filter expression, kept verbatim.
    Filter(String),
    /// Search term, without surrounding double quotes.
    Search(String),
    /// Order-by expression, kept verbatim.
    OrderBy(String),
    /// Number of items to skip.
    Skip(u64),
    /// Number of items to return.
    Top(u64),
    /// Whether the total count is requested.
    Count(bool),
    /// Expand expression, kept verbatim.
    Expand(String),
    /// A request header.
    Header {
        /// Header name, as captured.
        name: String,
        /// Header value.
        value: String,
    },
}

impl QueryOption {
    /// The kind of this option.
    pub fn kind(&self) -> QueryOptionKind {
        match self {
            Self::Select(_) => QueryOptionKind::Select,
            Self::Filter(_) => QueryOptionKind::Filter,
            Self::Search(_) => QueryOptionKind::Search,
            Self::OrderBy(_) => QueryOptionKind::OrderBy,
            Self::Skip(_) => QueryOptionKind::Skip,
            Self::Top(_) => QueryOptionKind::Top,
            Self::Count(_) => QueryOptionKind::Count,
            Self::Expand(_) => QueryOptionKind::Expand,
            Self::Header { .. } => QueryOptionKind::Header,
        }
    }

    /// Renders this option with the provider's fragment for its kind.
    pub fn render<P>(&self, provider: &P) -> String
    where
        P: ExpressionProvider + ?Sized,
    {
        match self {
            Self::Select(fields) => provider.select(fields),
            Self::Filter(expression) => provider.filter(expression),
            Self::Search(term) => provider.search(term),
            Self::OrderBy(expression) => provider.order_by(expression),
            Self::Skip(count) => provider.skip(*count),
            Self::Top(count) => provider.top(*count),
            Self::Count(flag) => provider.count(*flag),
            Self::Expand(expression) => provider.expand(expression),
            Self::Header { name, value } => provider.header(name, value),
        }
    }
}

/// The recognized query options and headers of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    options: BTreeMap<QueryOptionKind, QueryOption>,
    headers: Vec<QueryOption>,
}

impl QueryOptions {
    /// Looks up a query-string option; use [`QueryOptions::headers`] for headers.
    pub fn get(&self, kind: QueryOptionKind) -> Option<&QueryOption> {
        self.options.get(&kind)
    }

    /// Header options, in request order.
    pub fn headers(&self) -> impl Iterator<Item = &QueryOption> + '_ {
        self.headers.iter()
    }

    /// Every option in emission order: query-string options in canonical
    /// order, then headers in request order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryOption> + '_ {
        self.options.values().chain(self.headers.iter())
    }

    /// Checks if no option is present.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.headers.is_empty()
    }

    /// Returns the number of options, headers included.
    pub fn len(&self) -> usize {
        self.options.len() + self.headers.len()
    }
}

impl<'a> IntoIterator for &'a QueryOptions {
    type Item = &'a QueryOption;
    type IntoIter = Box<dyn Iterator<Item = &'a QueryOption> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
