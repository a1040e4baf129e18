//! Page source backed by a REST endpoint
//!
//! Issues `GET {path}?page=P&per_page=S` for each physical page and reads
//! the records array out of the JSON response.

use super::client::{HttpClient, RequestConfig};
use crate::error::{Error, Result};
use crate::pagination::{Page, PageSource, Paging};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Default query parameter carrying the page number
pub const DEFAULT_PAGE_PARAM: &str = "page";

/// Default query parameter carrying the page size
pub const DEFAULT_PAGE_SIZE_PARAM: &str = "per_page";

/// [`PageSource`] fetching pages of `T` from one endpoint.
///
/// A 404 from the endpoint means the parent resource is missing and is
/// reported as [`Page::NotFound`]; every other failure is returned as an error.
pub struct HttpPageSource<T> {
    client: Arc<HttpClient>,
    path: String,
    page_param: String,
    page_size_param: String,
    records_path: Option<String>,
    query: HashMap<String, String>,
    _records: PhantomData<fn() -> T>,
}

impl<T> HttpPageSource<T> {
    /// Create a source for the given endpoint path
    pub fn new(client: Arc<HttpClient>, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            page_size_param: DEFAULT_PAGE_SIZE_PARAM.to_string(),
            records_path: None,
            query: HashMap::new(),
            _records: PhantomData,
        }
    }

    /// Set the page number query parameter name
    #[must_use]
    pub fn with_page_param(mut self, name: impl Into<String>) -> Self {
        self.page_param = name.into();
        self
    }

    /// Set the page size query parameter name
    #[must_use]
    pub fn with_page_size_param(mut self, name: impl Into<String>) -> Self {
        self.page_size_param = name.into();
        self
    }

    /// Read records from a nested field (e.g. `data` or `$.result.items`)
    /// instead of the response root
    #[must_use]
    pub fn with_records_path(mut self, path: impl Into<String>) -> Self {
        self.records_path = Some(path.into());
        self
    }

    /// Add a fixed query parameter sent with every page request
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Endpoint path
    pub fn path(&self) -> &str {
        &self.path
    }

    fn request_config(&self, paging: &Paging) -> RequestConfig {
        let mut config = RequestConfig::new()
            .query(&self.page_param, paging.page.to_string())
            .query(&self.page_size_param, paging.page_size.to_string());
        for (key, value) in &self.query {
            config = config.query(key, value);
        }
        config
    }
}

#[async_trait]
impl<T> PageSource<T> for HttpPageSource<T>
where
    T: DeserializeOwned + Send,
{
    async fn fetch_page(&self, paging: &Paging) -> Result<Page<T>> {
        let body: Value = match self
            .client
            .get_json_with_config(&self.path, self.request_config(paging))
            .await
        {
            Ok(body) => body,
            Err(e) if e.is_not_found() => {
                debug!("{} returned 404 for page {}", self.path, paging.page);
                return Ok(Page::NotFound);
            }
            Err(e) => return Err(e),
        };

        let records = extract_records(body, self.records_path.as_deref())?;
        debug!(
            "{} page {} returned {} records",
            self.path,
            paging.page,
            records.len()
        );

        let items = records
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?;
        Ok(Page::Found(items))
    }
}

impl<T> std::fmt::Debug for HttpPageSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPageSource")
            .field("path", &self.path)
            .field("page_param", &self.page_param)
            .field("page_size_param", &self.page_size_param)
            .field("records_path", &self.records_path)
            .finish_non_exhaustive()
    }
}

/// Pull the records array out of a response body.
///
/// A `null` at the records path counts as an empty page.
fn extract_records(body: Value, records_path: Option<&str>) -> Result<Vec<Value>> {
    let mut current = body;
    if let Some(path) = records_path {
        let path = path.strip_prefix("$.").unwrap_or(path);
        for part in path.split('.').filter(|p| !p.is_empty()) {
            current = match current {
                Value::Object(mut map) => map
                    .remove(part)
                    .ok_or_else(|| Error::decode(format!("missing field '{part}' in response")))?,
                _ => {
                    return Err(Error::decode(format!(
                        "cannot read '{part}' from a non-object response"
                    )))
                }
            };
        }
    }

    match current {
        Value::Array(records) => Ok(records),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::decode(format!(
            "expected an array of records, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
