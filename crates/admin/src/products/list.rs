//! Paginated, filtered, searchable product list controller.
//!
//! Drives the console's main table: every filter, search, or page change
//! issues one listing request and replaces the product list and pagination
//! metadata wholesale. Two behaviors the original console left implicit are
//! explicit here:
//!
//! - search input flows through a [`Debouncer`] (300 ms, latest input
//!   wins), so a keystroke burst costs one request;
//! - every fetch carries a generation ticket and a response is applied only
//!   while its ticket is still current, so a superseded fetch can never
//!   clobber newer state, whatever order responses arrive in.
//!
//! Failures surface as transient [`Notice`]s and leave the previous list
//! intact. Nothing retries.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, instrument, warn};

use daisy_client::ApiClient;
use daisy_core::{AdminProductId, Availability, BulkStatus};

use crate::debounce::Debouncer;
use crate::error::AdminError;
use crate::notice::{Notice, NoticeQueue};

use super::{AdminProduct, ProductPage, ProductStats, StatsResponse};

/// Fixed page size of the admin listing.
pub const PAGE_SIZE: u32 = 20;

/// Request lifecycle of the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListPhase {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The current list reflects the last successful fetch.
    Loaded,
    /// The last fetch failed; the list still shows the previous data.
    Error,
}

/// Status facet of the listing filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Featured,
}

/// The listing filter set.
#[derive(Debug, Clone, PartialEq)]
pub struct ListFilters {
    pub search: String,
    pub category: Option<String>,
    pub availability: Option<Availability>,
    pub status: StatusFilter,
    /// 1-based page number.
    pub page: u32,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            availability: None,
            status: StatusFilter::All,
            page: 1,
        }
    }
}

impl ListFilters {
    /// Query parameters for the listing endpoint.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.facet_params();
        params.push(("page", self.page.to_string()));
        params.push(("limit", PAGE_SIZE.to_string()));
        params
    }

    /// Query parameters for the CSV export: the same facets, unpaginated.
    #[must_use]
    pub fn export_params(&self) -> Vec<(&'static str, String)> {
        self.facet_params()
    }

    fn facet_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(availability) = self.availability {
            params.push(("availability", availability.to_string()));
        }
        match self.status {
            StatusFilter::All => {}
            StatusFilter::Featured => params.push(("featured", "true".to_string())),
            StatusFilter::Active => params.push(("isActive", "true".to_string())),
            StatusFilter::Inactive => params.push(("isActive", "false".to_string())),
        }
        params
    }
}

/// Body of the bulk status-update call.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkStatusRequest<'a> {
    product_ids: &'a [AdminProductId],
    status: BulkStatus,
}

/// A rendered CSV export ready to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested filename, `products_YYYY-MM-DD.csv`.
    pub filename: String,
    /// Raw CSV text as the backend produced it.
    pub content: String,
}

#[derive(Default)]
struct ListState {
    phase: ListPhase,
    filters: ListFilters,
    products: Vec<AdminProduct>,
    total_pages: u32,
    total_products: u64,
    selected: HashSet<AdminProductId>,
    stats: Option<ProductStats>,
    debouncer: Debouncer,
}

struct ListInner {
    api: ApiClient,
    state: RwLock<ListState>,
    notices: Mutex<NoticeQueue>,
    generation: AtomicU64,
}

/// Product list controller handle.
///
/// Cheaply cloneable; all clones share the same view state.
#[derive(Clone)]
pub struct ProductListController {
    inner: Arc<ListInner>,
}

impl ProductListController {
    /// Create an idle controller. Nothing is fetched until the first
    /// refresh.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(ListInner {
                api,
                state: RwLock::new(ListState::default()),
                notices: Mutex::new(NoticeQueue::default()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    // =========================================================================
    // View accessors
    // =========================================================================

    /// Current request lifecycle phase.
    pub async fn phase(&self) -> ListPhase {
        self.inner.state.read().await.phase
    }

    /// The current page of products.
    pub async fn products(&self) -> Vec<AdminProduct> {
        self.inner.state.read().await.products.clone()
    }

    /// The active filter set.
    pub async fn filters(&self) -> ListFilters {
        self.inner.state.read().await.filters.clone()
    }

    /// Pagination metadata from the last successful fetch.
    pub async fn pagination(&self) -> (u32, u64) {
        let state = self.inner.state.read().await;
        (state.total_pages, state.total_products)
    }

    /// Aggregate stats from the last successful stats fetch.
    pub async fn stats(&self) -> Option<ProductStats> {
        self.inner.state.read().await.stats.clone()
    }

    /// Drain pending notices, oldest first.
    pub async fn take_notices(&self) -> Vec<Notice> {
        self.inner.notices.lock().await.take()
    }

    // =========================================================================
    // Filters and search
    // =========================================================================

    /// Feed a search box keystroke at time `now`.
    ///
    /// Nothing is fetched yet; the value sits in the debouncer until
    /// [`Self::poll_search`] observes its deadline passing. A newer
    /// keystroke supersedes an unfired one.
    pub async fn set_search_input(&self, text: &str, now: Instant) {
        self.inner.state.write().await.debouncer.input(text, now);
    }

    /// Fire the debounced search if its window has elapsed at `now`.
    ///
    /// On fire, the search term is applied, the page resets to 1, and the
    /// list refreshes. Returns whether a search fired.
    pub async fn poll_search(&self, now: Instant) -> bool {
        let fired = {
            let mut state = self.inner.state.write().await;
            match state.debouncer.fire(now) {
                Some(term) => {
                    state.filters.search = term;
                    state.filters.page = 1;
                    true
                }
                None => false,
            }
        };
        if fired {
            self.refresh().await;
        }
        fired
    }

    /// Set the category facet and refresh.
    pub async fn set_category(&self, category: Option<String>) {
        {
            let mut state = self.inner.state.write().await;
            state.filters.category = category;
            state.filters.page = 1;
        }
        self.refresh().await;
    }

    /// Set the availability facet and refresh.
    pub async fn set_availability(&self, availability: Option<Availability>) {
        {
            let mut state = self.inner.state.write().await;
            state.filters.availability = availability;
            state.filters.page = 1;
        }
        self.refresh().await;
    }

    /// Set the status facet and refresh.
    pub async fn set_status(&self, status: StatusFilter) {
        {
            let mut state = self.inner.state.write().await;
            state.filters.status = status;
            state.filters.page = 1;
        }
        self.refresh().await;
    }

    /// Jump to a page and refresh.
    pub async fn set_page(&self, page: u32) {
        {
            let mut state = self.inner.state.write().await;
            state.filters.page = page.max(1);
        }
        self.refresh().await;
    }

    /// Reset every facet, drop any pending search, and refresh.
    pub async fn clear_filters(&self) {
        {
            let mut state = self.inner.state.write().await;
            state.filters = ListFilters::default();
            state.debouncer.cancel();
        }
        self.refresh().await;
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Fetch the current page.
    ///
    /// Takes a generation ticket; if another refresh starts before this
    /// one's response lands, the response is discarded and the newer fetch
    /// owns the state. A failed fetch flips the phase to
    /// [`ListPhase::Error`], pushes a notice, and keeps the previous list.
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let params = {
            let mut state = self.inner.state.write().await;
            state.phase = ListPhase::Loading;
            state.filters.query_params()
        };

        let result: Result<ProductPage, _> =
            self.inner.api.get_query("/admin/products", &params).await;

        let mut state = self.inner.state.write().await;
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding superseded product list response");
            return;
        }

        match result {
            Ok(page) => {
                state.products = page.products;
                state.total_pages = page.total_pages;
                state.total_products = page.total;
                state.phase = ListPhase::Loaded;
            }
            Err(e) => {
                warn!(error = %e, "Product list fetch failed");
                state.phase = ListPhase::Error;
                drop(state);
                self.notify(Notice::error(e.to_string())).await;
            }
        }
    }

    /// Fetch the aggregate stats. Failures only log; the stats cards keep
    /// their previous values.
    #[instrument(skip(self))]
    pub async fn refresh_stats(&self) {
        match self.inner.api.get::<StatsResponse>("/admin/stats").await {
            Ok(response) => {
                self.inner.state.write().await.stats = Some(response.stats);
            }
            Err(e) => {
                warn!(error = %e, "Stats fetch failed");
            }
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggle one product in the multi-selection.
    pub async fn toggle_select(&self, id: &AdminProductId) {
        let mut state = self.inner.state.write().await;
        if !state.selected.remove(id) {
            state.selected.insert(id.clone());
        }
    }

    /// Select every product on the current page, or clear the selection if
    /// everything is already selected.
    pub async fn toggle_select_all(&self) {
        let mut state = self.inner.state.write().await;
        if state.selected.len() == state.products.len() {
            state.selected.clear();
        } else {
            state.selected = state.products.iter().map(|p| p.id.clone()).collect();
        }
    }

    /// Whether a product is selected.
    pub async fn is_selected(&self, id: &AdminProductId) -> bool {
        self.inner.state.read().await.selected.contains(id)
    }

    /// The selected product ids.
    pub async fn selected(&self) -> Vec<AdminProductId> {
        self.inner
            .state
            .read()
            .await
            .selected
            .iter()
            .cloned()
            .collect()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Delete one product.
    ///
    /// The caller is expected to have confirmed with the user first; the
    /// deletion is never optimistic, and list and stats are re-fetched only
    /// after the backend confirms.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &AdminProductId) {
        match self
            .inner
            .api
            .delete::<serde_json::Value>(&format!("/admin/products/{id}"))
            .await
        {
            Ok(_) => {
                self.notify(Notice::success("Product deleted successfully"))
                    .await;
                self.refresh().await;
                self.refresh_stats().await;
            }
            Err(e) => {
                self.notify(Notice::error(e.to_string())).await;
            }
        }
    }

    /// Apply a status to the current selection via one batched call.
    #[instrument(skip(self))]
    pub async fn bulk_status(&self, status: BulkStatus) {
        let selected = self.selected().await;
        if selected.is_empty() {
            self.notify(Notice::error("No products selected")).await;
            return;
        }

        let request = BulkStatusRequest {
            product_ids: &selected,
            status,
        };
        match self
            .inner
            .api
            .patch::<serde_json::Value>("/admin/products/bulk-status", &request)
            .await
        {
            Ok(_) => {
                self.finish_bulk_action().await;
            }
            Err(e) => {
                self.notify(Notice::error(e.to_string())).await;
            }
        }
    }

    /// Delete the current selection: one request per id, issued
    /// concurrently. A batched endpoint would be a backend enhancement;
    /// the console tolerates the N calls.
    #[instrument(skip(self))]
    pub async fn bulk_delete(&self) {
        let selected = self.selected().await;
        if selected.is_empty() {
            self.notify(Notice::error("No products selected")).await;
            return;
        }

        let deletes = selected.iter().map(|id| {
            self.inner
                .api
                .delete::<serde_json::Value>(&format!("/admin/products/{id}"))
        });
        let results = join_all(deletes).await;

        if let Some(e) = results.into_iter().find_map(Result::err) {
            self.notify(Notice::error(e.to_string())).await;
            return;
        }

        self.finish_bulk_action().await;
    }

    /// Export the currently filtered products as CSV.
    ///
    /// Pagination does not apply; the export covers every matching product.
    /// The caller writes the content wherever it wants, under the suggested
    /// filename.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend error if the export request fails.
    #[instrument(skip(self))]
    pub async fn export_csv(&self) -> Result<CsvExport, AdminError> {
        let params = self.inner.state.read().await.filters.export_params();
        let content = self
            .inner
            .api
            .get_text("/admin/products/export", &params)
            .await?;

        let filename = format!("products_{}.csv", chrono::Utc::now().format("%Y-%m-%d"));
        Ok(CsvExport { filename, content })
    }

    async fn finish_bulk_action(&self) {
        self.notify(Notice::success("Bulk action completed successfully"))
            .await;
        self.inner.state.write().await.selected.clear();
        self.refresh().await;
        self.refresh_stats().await;
    }

    async fn notify(&self, notice: Notice) {
        self.inner.notices.lock().await.push(notice);
    }
}
