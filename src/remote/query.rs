// src/remote/query.rs
//
// REST query builder
//
// Produces the query-string pairs understood by the remote service:
//   select=*,content_genres(genres(name))
//   featured=eq.true
//   title=ilike.*dark*
//   order=created_at.desc

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

/// Keys that shape the response instead of filtering rows
const NON_FILTER_KEYS: [&str; 3] = ["select", "order", "limit"];

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column list, nested relations allowed. Whitespace is stripped so
    /// multi-line selections can be written readably.
    pub fn select(mut self, columns: &str) -> Self {
        let compact: String = columns.chars().filter(|c| !c.is_whitespace()).collect();
        self.params.push(("select".to_string(), compact));
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// Case-insensitive LIKE; use [`contains_pattern`] for substring matches
    pub fn ilike(mut self, column: &str, pattern: &str) -> Self {
        self.params
            .push((column.to_string(), format!("ilike.{}", pattern)));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        let direction = match order {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".to_string(), limit.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// True when at least one row filter is present.
    /// Updates and deletes refuse to run without one.
    pub fn has_filters(&self) -> bool {
        self.params
            .iter()
            .any(|(key, _)| !NON_FILTER_KEYS.contains(&key.as_str()))
    }
}

/// `*text*` pattern for a case-insensitive substring match.
/// `%`, `_` and `\` in the input are escaped. The service turns every `*`
/// into a wildcard before matching, so a `*` typed by the user still matches
/// any run of characters; there is no escape for it.
pub fn contains_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('*');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('*');
    escaped
}
