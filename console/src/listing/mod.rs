//! List/table data source
//!
//! Turns a page/search/sort request into query parameters, issues one GET,
//! and reshapes the `{hits, total}` envelope into a [`Page`] of display
//! rows. Rows are disposable projections; enrichment such as counting up
//! containers happens here rather than on the live entities.

pub mod sources;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use mamabear_models::ListEnvelope;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::ConsoleError;
use crate::http::api::ApiClient;
use crate::utils::page_count;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a list view asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Zero-based page index
    pub page: u32,
    pub page_size: u32,
    /// Free-text filter, matched by the server against the source's search field
    pub search: Option<String>,
    pub order: Option<SortOrder>,
    pub sort_field: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 10,
            search: None,
            order: None,
            sort_field: None,
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_sort_field(mut self, sort_field: impl Into<String>) -> Self {
        self.sort_field = Some(sort_field.into());
        self
    }

    /// Query parameters for a source searching on `search_field`
    ///
    /// A blank search term is not sent.
    pub fn params(&self, search_field: &str) -> Vec<(String, String)> {
        let page_size = self.page_size.max(1);
        let offset = u64::from(self.page) * u64::from(page_size);

        let mut params = vec![
            ("limit".to_string(), page_size.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        if let Some(order) = self.order {
            params.push(("order".to_string(), order.to_string()));
        }
        if let Some(sort_field) = &self.sort_field {
            params.push(("sort_field".to_string(), sort_field.clone()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                params.push((search_field.to_string(), search.to_string()));
            }
        }
        params
    }
}

/// One page of rows for a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A collection endpoint that can back a table
#[async_trait]
pub trait ListSource: Send + Sync {
    /// Raw hit as found in the envelope
    type Hit: DeserializeOwned + Send;

    /// Display row
    type Row: Serialize + Send;

    /// Short name used in logs
    const NAME: &'static str;

    /// Query parameter the search term is sent as
    const SEARCH_FIELD: &'static str;

    /// Issue the GET for already-built parameters
    async fn fetch(
        api: &ApiClient,
        params: Vec<(String, String)>,
    ) -> Result<ListEnvelope<Self::Hit>, ConsoleError>;

    /// Project a hit into a row, computing derived columns
    fn project(hit: Self::Hit) -> Self::Row;
}

/// Run a list query against a source
pub async fn query<S: ListSource>(
    api: &ApiClient,
    query: &ListQuery,
) -> Result<Page<S::Row>, ConsoleError> {
    let params = query.params(S::SEARCH_FIELD);
    debug!("Listing {} with {:?}", S::NAME, params);

    let envelope = S::fetch(api, params)
        .await
        .inspect_err(|e| warn!("Failed getting {}: {}", S::NAME, e))?;

    Ok(Page {
        total: envelope.total,
        page: query.page,
        pages: page_count(envelope.total, query.page_size),
        items: envelope.hits.into_iter().map(S::project).collect(),
    })
}
