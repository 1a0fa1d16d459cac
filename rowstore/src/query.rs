//! Row filters in the REST row store's query-string dialect.
//!
//! `RowQuery::new().select("id,title").eq("user_id", id).order_desc("created_at")`
//! renders to `select=id,title&user_id=eq.<id>&order=created_at.desc`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn as_str(&self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    Eq(String, String),
    Neq(String, String),
    ILike(String, String),
    In(String, Vec<String>),
}

/// A select/delete/count query against a single table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowQuery {
    columns: Option<String>,
    filters: Vec<Filter>,
    order: Option<(String, Order)>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl RowQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to return, including embedded relations such as
    /// `*,profiles:user_id(username)`.
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters
            .push(Filter::Eq(column.into(), value.to_string()));
        self
    }

    pub fn neq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters
            .push(Filter::Neq(column.into(), value.to_string()));
        self
    }

    /// Case-insensitive pattern match; `*` is the wildcard.
    pub fn ilike(mut self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filters
            .push(Filter::ILike(column.into(), pattern.into()));
        self
    }

    pub fn in_list<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.filters.push(Filter::In(
            column.into(),
            values.into_iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    pub fn order(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order = Some((column.into(), order));
        self
    }

    pub fn order_desc(self, column: impl Into<String>) -> Self {
        self.order(column, Order::Descending)
    }

    pub fn order_asc(self, column: impl Into<String>) -> Self {
        self.order(column, Order::Ascending)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    pub(crate) fn offset_value(&self) -> usize {
        self.offset.unwrap_or_default()
    }

    /// Render as query-string pairs. Values are left unescaped; reqwest
    /// percent-encodes them when the pairs are attached to a request.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(columns) = &self.columns {
            pairs.push(("select".to_string(), columns.clone()));
        }

        for filter in &self.filters {
            let pair = match filter {
                Filter::Eq(column, value) => (column.clone(), format!("eq.{value}")),
                Filter::Neq(column, value) => (column.clone(), format!("neq.{value}")),
                Filter::ILike(column, pattern) => (column.clone(), format!("ilike.{pattern}")),
                Filter::In(column, values) => {
                    let quoted = values
                        .iter()
                        .map(|v| format!("\"{}\"", v.replace('"', "\\\"")))
                        .collect::<Vec<_>>()
                        .join(",");
                    (column.clone(), format!("in.({quoted})"))
                }
            };
            pairs.push(pair);
        }

        if let Some((column, order)) = &self.order {
            pairs.push(("order".to_string(), format!("{}.{}", column, order.as_str())));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }

        pairs
    }
}
