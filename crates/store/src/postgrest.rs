//! Minimal PostgREST client for Supabase.
//!
//! Only the read surface is implemented: column-projected `select` with
//! equality filters, ordering and limits. The service-role key is sent
//! on every request; one `reqwest::Client` is shared across calls.

use std::time::Duration;

use serde_json::Value;

use crate::error::{Result, StoreError};

#[derive(Debug, Clone)]
pub struct PostgrestClient {
    http: reqwest::Client,
    rest_url: String,
    service_role_key: String,
    timeout: Duration,
}

impl PostgrestClient {
    pub fn new(base_url: &str, service_role_key: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            service_role_key: service_role_key.to_string(),
            timeout,
        })
    }

    /// Execute a PostgREST SELECT. `filters` are `(column, "eq.value")`
    /// pairs in PostgREST's native filter syntax.
    pub async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[(&str, String)],
        order: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Value>> {
        let mut params: Vec<(&str, String)> = vec![("select", columns.to_string())];
        params.extend(filters.iter().map(|(col, f)| (*col, f.clone())));
        if let Some(order) = order {
            params.push(("order", order.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        log::debug!("postgrest select {table} columns={columns}");

        let response = self
            .http
            .get(format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.service_role_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.service_role_key),
            )
            .query(&params)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            log::warn!("postgrest {table} returned {status}");
            return Err(StoreError::api(status.as_u16(), &body));
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(rows)) => Ok(rows),
            Ok(other) => Err(StoreError::Decode(format!(
                "expected a row array from {table}, got {}",
                value_kind(&other)
            ))),
            Err(e) => Err(StoreError::Decode(format!(
                "invalid JSON from {table}: {e}"
            ))),
        }
    }

    /// SELECT expecting at most one row.
    pub async fn select_single(
        &self,
        table: &str,
        columns: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<Value>> {
        let mut rows = self.select(table, columns, filters, None, Some(1)).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    fn classify(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(self.timeout)
        } else {
            StoreError::Http(e)
        }
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
