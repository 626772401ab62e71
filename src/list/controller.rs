use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinHandle;

use super::{ListFetcher, ListQuery};

/// Controller for a server-paginated, filterable, searchable list view.
///
/// Keystrokes update the visible query immediately but the value sent
/// upstream trails by the debounce interval, with only the last keystroke in
/// the window surviving. Page, filter, and reload changes fetch right away.
/// Every fetch carries a generation number; completions that are no longer
/// current are discarded, so overlapping requests cannot resolve out of
/// order. Failed fetches keep the last good data visible.
#[derive(Clone)]
pub struct ListController {
    fetcher: Arc<dyn ListFetcher>,
    limit: u32,
    debounce: Duration,
    inner: Arc<Mutex<Inner>>,
}

/// Point-in-time view of the controller, cheap to clone out for rendering
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub page: u32,
    pub query: String,
    pub debounced_query: String,
    pub filter: BTreeMap<String, String>,
    pub data: Vec<Value>,
    pub count: u64,
    pub is_loading: bool,
    pub error: Option<String>,
}

struct Inner {
    page: u32,
    query: String,
    debounced_query: String,
    filter: BTreeMap<String, String>,
    data: Vec<Value>,
    count: u64,
    is_loading: bool,
    error: Option<String>,
    generation: u64,
    debounce_task: Option<JoinHandle<()>>,
}

impl ListController {
    pub fn new(
        fetcher: Arc<dyn ListFetcher>,
        initial_query: impl Into<String>,
        initial_filter: BTreeMap<String, String>,
    ) -> Self {
        let cfg = crate::config::config();
        Self::with_settings(
            fetcher,
            initial_query,
            initial_filter,
            cfg.list.default_limit,
            Duration::from_millis(cfg.list.search_debounce_ms),
        )
    }

    pub fn with_settings(
        fetcher: Arc<dyn ListFetcher>,
        initial_query: impl Into<String>,
        initial_filter: BTreeMap<String, String>,
        limit: u32,
        debounce: Duration,
    ) -> Self {
        let query = initial_query.into();
        Self {
            fetcher,
            limit,
            debounce,
            inner: Arc::new(Mutex::new(Inner {
                page: 1,
                query: query.clone(),
                debounced_query: query,
                filter: initial_filter,
                data: Vec::new(),
                count: 1,
                is_loading: false,
                error: None,
                generation: 0,
                debounce_task: None,
            })),
        }
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let inner = self.lock();
        ListSnapshot {
            page: inner.page,
            query: inner.query.clone(),
            debounced_query: inner.debounced_query.clone(),
            filter: inner.filter.clone(),
            data: inner.data.clone(),
            count: inner.count,
            is_loading: inner.is_loading,
            error: inner.error.clone(),
        }
    }

    /// Record a keystroke. The visible query updates immediately; the
    /// pending debounce timer is cancelled and re-armed, last write wins.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let mut inner = self.lock();
        inner.query = query.clone();

        if let Some(task) = inner.debounce_task.take() {
            task.abort();
        }

        let controller = self.clone();
        let delay = self.debounce;
        inner.debounce_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.commit_query(query).await;
        }));
    }

    pub async fn set_page(&self, page: u32) {
        {
            let mut inner = self.lock();
            inner.page = page.max(1);
        }
        self.fetch_now().await;
    }

    /// Replace the structured filter. The page resets to 1: a page index
    /// into the previous result set means nothing against a new one.
    pub async fn set_filter(&self, filter: BTreeMap<String, String>) {
        {
            let mut inner = self.lock();
            inner.filter = filter;
            inner.page = 1;
        }
        self.fetch_now().await;
    }

    /// Refetch with the current parameters, for callers reacting to
    /// create/update/delete actions elsewhere.
    pub async fn reload(&self) {
        self.fetch_now().await;
    }

    async fn commit_query(&self, query: String) {
        {
            let mut inner = self.lock();
            if inner.debounced_query == query {
                return;
            }
            inner.debounced_query = query;
            inner.page = 1;
        }
        self.fetch_now().await;
    }

    async fn fetch_now(&self) {
        let (generation, query) = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.is_loading = true;
            (
                inner.generation,
                ListQuery {
                    page: inner.page,
                    limit: self.limit,
                    query: inner.debounced_query.clone(),
                    filter: inner.filter.clone(),
                },
            )
        };

        let result = self.fetcher.fetch(&query).await;

        let mut inner = self.lock();
        if inner.generation != generation {
            // a newer fetch superseded this one
            return;
        }
        inner.is_loading = false;
        match result {
            Ok(page) => {
                inner.data = page.data;
                inner.count = page.count;
                inner.error = None;
            }
            Err(err) => {
                // keep the last good data set visible
                inner.error = Some(err.to_string());
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
