pub mod controller;
pub mod pager;

pub use controller::{ListController, ListSnapshot};
pub use pager::{page_items, total_pages, PageItem};

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::envelope;
use crate::client::{BackendClient, ClientError};
use crate::session::Session;

/// Query parameters a list view sends upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub query: String,
    pub filter: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn to_params(&self) -> Value {
        json!({
            "page": self.page,
            "limit": self.limit,
            "query": self.query,
            "filter": self.filter,
        })
    }
}

/// One page of results plus the total match count
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    pub data: Vec<Value>,
    pub count: u64,
}

/// Seam between the list controller and whatever serves its pages
#[async_trait]
pub trait ListFetcher: Send + Sync {
    async fn fetch(&self, query: &ListQuery) -> Result<ListPage, ClientError>;
}

/// Fetches list pages from a backend collection endpoint through the shared
/// client wrapper
pub struct ApiListFetcher {
    client: Arc<BackendClient>,
    path: String,
    session: Session,
}

impl ApiListFetcher {
    pub fn new(client: Arc<BackendClient>, path: impl Into<String>, session: Session) -> Self {
        Self {
            client,
            path: path.into(),
            session,
        }
    }
}

#[async_trait]
impl ListFetcher for ApiListFetcher {
    async fn fetch(&self, query: &ListQuery) -> Result<ListPage, ClientError> {
        let params = query.to_params();
        let reply = self
            .client
            .get(&self.path, Some(&params), &self.session)
            .await?;

        let data = envelope::data(&reply)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let count = envelope::count(&reply).unwrap_or(data.len() as u64);

        Ok(ListPage { data, count })
    }
}
