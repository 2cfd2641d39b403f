//! CRM resources: companies, contacts, deals and tickets.

pub mod company;
pub mod contact;
pub mod deal;
pub mod ticket;

diesel::define_sql_function! {
    /// SQL `lower()`, so name ordering ignores case as the memory store does.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Case-insensitive substring test used by list searches.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Query parameters that are present but empty are treated as absent.
pub(crate) fn present(param: &Option<String>) -> Option<&String> {
    param.as_ref().filter(|value| !value.is_empty())
}

/// Exact-match filter on an optional column. An absent filter matches all.
pub(crate) fn opt_eq(value: Option<&str>, filter: Option<&String>) -> bool {
    match filter {
        Some(filter) => value == Some(filter.as_str()),
        None => true,
    }
}

/// `ILIKE` pattern matching `needle` anywhere, with wildcards escaped.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
