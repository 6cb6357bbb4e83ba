use std::sync::Arc;

use crate::{
    class::{ClassRecord, CLASS_COLUMNS},
    store::port::{RecordStore, SelectQuery},
    Result,
};

/// Typed access to the class table.
#[derive(Clone)]
pub struct ClassCatalog {
    store: Arc<dyn RecordStore>,
    table: String,
}

impl ClassCatalog {
    pub fn new(store: Arc<dyn RecordStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Every class, in store order.
    pub async fn list_all(&self) -> Result<Vec<ClassRecord>> {
        let query = SelectQuery::all(&self.table, CLASS_COLUMNS);
        self.fetch(&query).await
    }

    /// Classes whose name contains `term`, ignoring case.
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<ClassRecord>> {
        let query = SelectQuery::all(&self.table, CLASS_COLUMNS).containing("name", term);
        self.fetch(&query).await
    }

    pub async fn insert(&self, record: &ClassRecord) -> Result<()> {
        let row = serde_json::to_value(record)?;
        self.store.insert(&self.table, row).await
    }

    async fn fetch(&self, query: &SelectQuery) -> Result<Vec<ClassRecord>> {
        let body = self.store.select(query).await?;
        tracing::debug!(table = %query.table, body = %body, "record store response");
        Ok(serde_json::from_str(&body)?)
    }
}
