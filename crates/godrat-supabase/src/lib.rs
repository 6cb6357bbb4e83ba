//! Supabase adapter (PostgREST).
//!
//! Implements the `godrat-core` RecordStore over `/rest/v1/<table>`.

use std::time::Duration;

use async_trait::async_trait;

use godrat_core::{
    errors::Error,
    store::port::{Filter, RecordStore, SelectQuery},
    Result,
};

#[derive(Clone, Debug)]
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(resp: reqwest::Response, op: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Store(format!(
            "{op} failed: {status} {}",
            body.chars().take(200).collect::<String>()
        )))
    }
}

/// PostgREST query string for a select.
fn query_params(query: &SelectQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.columns.join(","))];
    if let Some(Filter::ILike { column, pattern }) = &query.filter {
        params.push((column.clone(), format!("ilike.{pattern}")));
    }
    params
}

#[async_trait]
impl RecordStore for SupabaseClient {
    async fn select(&self, query: &SelectQuery) -> Result<String> {
        tracing::debug!(table = %query.table, filter = ?query.filter, "store select");
        let resp = self
            .request(reqwest::Method::GET, &query.table)
            .query(&query_params(query))
            .send()
            .await
            .map_err(|e| Error::Store(format!("select request error: {e}")))?;

        let resp = Self::check(resp, "select").await?;
        resp.text()
            .await
            .map_err(|e| Error::Store(format!("select body error: {e}")))
    }

    async fn insert(&self, table: &str, row: serde_json::Value) -> Result<()> {
        tracing::debug!(table, "store insert");
        let resp = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| Error::Store(format!("insert request error: {e}")))?;

        Self::check(resp, "insert").await?;
        Ok(())
    }
}
