//! Filter query builder.
//!
//! Translates category constraints into a single SQL request:
//!
//! ```text
//! base WHERE (c1 = ?1 OR c1 = ?2) AND (c2 = ?3) ORDER BY RANDOM() LIMIT n
//! ```
//!
//! Values within a column are OR-ed, columns are AND-ed. Values are bound as
//! positional parameters; column names come from the caller verbatim.

use std::fmt;

/// Ordering directive that asks SQLite for a random row order.
pub const ORDER_RANDOM: &str = "ORDER BY RANDOM()";

/// Column constraints for a query.
///
/// Each column maps to a non-empty set of acceptable values. A column that is
/// not present imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSpec {
    columns: Vec<(String, Vec<String>)>,
}

impl FilterSpec {
    /// Create an empty filter (matches every row).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add acceptable values for a column, builder style.
    pub fn with<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(column, values);
        self
    }

    /// Add acceptable values for a column.
    ///
    /// An empty value list leaves the filter untouched. Values already
    /// present for the column are not duplicated.
    pub fn insert<I, S>(&mut self, column: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut incoming: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !incoming.contains(&value) {
                incoming.push(value);
            }
        }
        if incoming.is_empty() {
            return;
        }

        let column = column.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => {
                for value in incoming {
                    if !existing.contains(&value) {
                        existing.push(value);
                    }
                }
            }
            None => self.columns.push((column, incoming)),
        }
    }

    /// Whether the filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of constrained columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Iterate over constrained columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Acceptable values for a column, if it is constrained.
    pub fn values(&self, column: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, values)| values.as_slice())
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return f.write_str("no filter");
        }
        let groups: Vec<String> = self
            .columns
            .iter()
            .map(|(name, values)| format!("{name} IN ({})", values.join(", ")))
            .collect();
        f.write_str(&groups.join(" AND "))
    }
}

/// Template for a refill query: what to select, how to filter and order it,
/// and how many rows to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Base `SELECT ... FROM ...` statement, without a WHERE clause.
    pub base: String,
    /// Column constraints.
    pub filters: FilterSpec,
    /// Ordering directive appended after the WHERE clause.
    pub order: String,
    /// Row cap; `0` means no cap.
    pub limit: u32,
}

impl FetchRequest {
    /// Create a random-order, uncapped request with no filters.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            filters: FilterSpec::new(),
            order: ORDER_RANDOM.to_string(),
            limit: 0,
        }
    }

    /// Replace the filter.
    pub fn with_filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self
    }

    /// Replace the ordering directive.
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = order.into();
        self
    }

    /// Replace the row cap.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Render the request into SQL plus bound parameters.
    pub fn build(&self) -> QueryRequest {
        build_query(&self.base, &self.filters, &self.order, self.limit)
    }
}

/// A rendered query ready to be executed by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    sql: String,
    params: Vec<String>,
}

impl QueryRequest {
    /// SQL text with `?N` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values bound to the placeholders, in order.
    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Build a query from a base statement, a filter, an ordering directive and
/// a row cap (`0` for no cap).
///
/// No validation happens here: an unknown column or a value that matches
/// nothing simply produces a query that returns no rows.
pub fn build_query(base: &str, filters: &FilterSpec, order: &str, limit: u32) -> QueryRequest {
    let mut sql = base.trim_end().to_string();
    let mut params = Vec::new();

    if !filters.is_empty() {
        let mut groups = Vec::with_capacity(filters.len());
        for (column, values) in filters.columns() {
            let mut conditions = Vec::with_capacity(values.len());
            for value in values {
                params.push(value.clone());
                conditions.push(format!("{column} = ?{}", params.len()));
            }
            groups.push(conditions.join(" OR "));
        }
        sql.push_str(" WHERE (");
        sql.push_str(&groups.join(") AND ("));
        sql.push(')');
    }

    let order = order.trim();
    if !order.is_empty() {
        sql.push(' ');
        sql.push_str(order);
    }

    if limit > 0 {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    QueryRequest { sql, params }
}
