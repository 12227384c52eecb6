use crate::models::Snippet;

/// Which category the snippet list is narrowed to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// `"all"` (any case) or an empty string means no filter.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(raw.to_string())
        }
    }

    pub fn matches(&self, snippet: &Snippet) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => snippet.category == *id,
        }
    }
}

/// True when the lowercased query is a substring of the snippet's name,
/// content or description. An empty query matches everything.
pub fn matches_query(snippet: &Snippet, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    snippet.name.to_lowercase().contains(&query)
        || snippet.content.to_lowercase().contains(&query)
        || snippet
            .description
            .as_ref()
            .is_some_and(|desc| desc.to_lowercase().contains(&query))
}

/// Snippets passing both the category filter and the query, in input order.
pub fn filter_snippets<'a>(
    snippets: &'a [Snippet],
    filter: &CategoryFilter,
    query: &str,
) -> Vec<&'a Snippet> {
    snippets
        .iter()
        .filter(|s| filter.matches(s) && matches_query(s, query))
        .collect()
}
