use async_trait::async_trait;

use crate::Result;

/// Row filter supported by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Case-insensitive `LIKE` on one column; `%` is the wildcard.
    ILike { column: String, pattern: String },
}

/// A projection over one table, optionally filtered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub filter: Option<Filter>,
}

impl SelectQuery {
    pub fn all(table: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            table: table.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            filter: None,
        }
    }

    /// Narrow to rows whose `column` contains `needle`, ignoring case.
    pub fn containing(mut self, column: &str, needle: &str) -> Self {
        self.filter = Some(Filter::ILike {
            column: column.to_string(),
            pattern: format!("%{needle}%"),
        });
        self
    }
}

/// Port for the remote structured-record store.
///
/// `select` returns the raw response body; decoding happens in the caller so a
/// shape mismatch is reported separately from a failed request.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn select(&self, query: &SelectQuery) -> Result<String>;

    async fn insert(&self, table: &str, row: serde_json::Value) -> Result<()>;
}
