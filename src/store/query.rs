//! Row filter builder for the REST table API

use std::fmt::Display;

/// Sort direction
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

/// A select against one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: &'static str,
    filters: Vec<(String, String)>,
    order: Option<(String, Order)>,
    limit: Option<usize>,
}

impl Query {
    /// Select all columns from `table`
    pub fn from(table: &'static str) -> Self {
        Self { table, filters: Vec::new(), order: None, limit: None }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Keep rows where `column` equals `value`
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// Keep rows where `column` is one of `values`
    pub fn is_in<V: Display>(mut self, column: &str, values: &[V]) -> Self {
        let list = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
        self.filters.push((column.to_string(), format!("in.({})", list)));
        self
    }

    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query string pairs in the order the API expects them
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(self.filters.iter().cloned());
        if let Some((column, order)) = &self.order {
            params.push(("order".to_string(), format!("{}.{}", column, order.as_str())));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}
