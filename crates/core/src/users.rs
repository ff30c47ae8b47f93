//! User search and admin-flag rules for the admin panel.

/// A search only runs once the query is longer than this many characters.
pub const MIN_SEARCH_QUERY_CHARS: usize = 2;

/// Maximum number of users returned by a search.
pub const USER_SEARCH_LIMIT: i64 = 10;

/// Whether a search-as-you-type query is long enough to hit the database.
pub fn search_enabled(query: &str) -> bool {
    query.chars().count() > MIN_SEARCH_QUERY_CHARS
}

/// Build a case-insensitive `ILIKE` pattern matching `query` anywhere.
///
/// `%`, `_` and `\` in the query are escaped so they match literally.
pub fn email_search_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
