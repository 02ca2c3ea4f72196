use cruet::*;

/// The name without its namespace: `user` for `microsoft.graph.user`.
pub(crate) fn unqualified(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, name)| name)
}

/// Singular form of an entity set or navigation name.
pub(crate) fn singularize(word: &str) -> String {
    match word {
        "children" => return "child".to_string(),
        "people" => return "person".to_string(),
        "data" => return "datum".to_string(),
        _ => {}
    }

    let result = word.to_singular();
    if result.is_empty() {
        word.to_string()
    } else {
        result
    }
}

pub(crate) fn to_lower_camel(word: &str) -> String {
    let result = word.to_camel_case();
    if result.is_empty() {
        word.to_string()
    } else {
        result
    }
}
