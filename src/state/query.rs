//! Filter and pagination state of a list panel.
//!
//! DESIGN
//! ======
//! [`PanelQuery`] is the pure half of the filter & pagination controller.
//! Every trigger (mount, submit, reset, page change, load more) turns into a
//! [`FetchPlan`]; the network driver executes the plan and reports back with
//! [`PanelQuery::complete`] or [`PanelQuery::fail`]. Pagination only moves on
//! success, so a failed load-more can simply be retried.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use crate::util::query_string::{set_pair, with_query};
use crate::util::render::RenderMode;

/// Ordered filter key -> value; an empty value means "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    fields: Vec<(String, String)>,
}

impl FilterState {
    /// Filters with the given keys, all unconstrained.
    pub fn with_keys<K: AsRef<str>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            fields: keys
                .into_iter()
                .map(|key| (key.as_ref().to_owned(), String::new()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map_or("", |(_, v)| v.as_str())
    }

    /// Set one filter, adding the key if it is new.
    pub fn set(&mut self, key: &str, value: &str) {
        set_pair(&mut self.fields, key, value);
    }

    /// Replace values from submitted form fields, keeping key order.
    pub fn assign(&mut self, submitted: &[(String, String)]) {
        for (key, value) in submitted {
            self.set(key, value);
        }
    }

    /// Clear every value; keys survive.
    pub fn reset(&mut self) {
        for (_, value) in &mut self.fields {
            value.clear();
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_unconstrained(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_empty())
    }
}

/// Page position of a list panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    /// Always at least 1.
    pub current_page: u32,
    /// Always greater than 0.
    pub page_size: u32,
    pub has_more: bool,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self { current_page: 1, page_size: page_size.max(1), has_more: false }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(20)
    }
}

/// Lifecycle of a list panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelPhase {
    #[default]
    Idle,
    Fetching,
    Loaded,
    Errored,
}

/// One fetch to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchPlan {
    pub page: u32,
    pub mode: RenderMode,
}

impl FetchPlan {
    /// First page, rebuilding the list.
    pub fn first_page() -> Self {
        Self { page: 1, mode: RenderMode::Replace }
    }
}

/// Query parameter names used by one endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryParams {
    pub page: &'static str,
    pub size: &'static str,
}

impl Default for QueryParams {
    fn default() -> Self {
        LOG_PARAMS
    }
}

/// Job logs use `page` / `page_size`.
pub const LOG_PARAMS: QueryParams = QueryParams { page: "page", size: "page_size" };
/// The jobs feed uses `page` / `limit`.
pub const JOB_PARAMS: QueryParams = QueryParams { page: "page", size: "limit" };

/// A pagination link target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLink {
    pub target: Option<u32>,
    pub href: String,
}

impl PageLink {
    pub fn is_disabled(&self) -> bool {
        self.target.is_none()
    }

    pub fn aria_disabled(&self) -> &'static str {
        if self.is_disabled() { "true" } else { "false" }
    }

    pub fn class(&self) -> &'static str {
        if self.is_disabled() { "btn btn--disabled" } else { "btn" }
    }
}

/// Prev/next links plus the current page label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLinks {
    pub prev: PageLink,
    pub next: PageLink,
    pub label: String,
}

/// Filter + pagination state machine of one list panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelQuery {
    pub filters: FilterState,
    pub pagination: PaginationState,
    pub phase: PanelPhase,
    params: QueryParams,
}

impl PanelQuery {
    pub fn new(filters: FilterState, page_size: u32, params: QueryParams) -> Self {
        Self {
            filters,
            pagination: PaginationState::new(page_size),
            phase: PanelPhase::Idle,
            params,
        }
    }

    fn begin(&mut self, plan: FetchPlan) -> FetchPlan {
        self.phase = PanelPhase::Fetching;
        plan
    }

    /// Initial fetch on page load.
    pub fn mount(&mut self) -> FetchPlan {
        self.begin(FetchPlan::first_page())
    }

    /// Filter form submitted: page 1, replace.
    pub fn submit(&mut self, submitted: &[(String, String)]) -> FetchPlan {
        self.filters.assign(submitted);
        self.begin(FetchPlan::first_page())
    }

    /// Filters cleared: page 1, replace.
    pub fn reset(&mut self) -> FetchPlan {
        self.filters.reset();
        self.begin(FetchPlan::first_page())
    }

    /// Re-fetch the first page with the current filters.
    pub fn refresh(&mut self) -> FetchPlan {
        self.begin(FetchPlan::first_page())
    }

    /// Jump to `page`; page 0 is rejected.
    pub fn go_to(&mut self, page: u32) -> Option<FetchPlan> {
        if page == 0 {
            return None;
        }
        Some(self.begin(FetchPlan { page, mode: RenderMode::Replace }))
    }

    /// Next page in append mode; no-op when nothing more exists.
    pub fn load_more(&mut self) -> Option<FetchPlan> {
        if !self.pagination.has_more {
            return None;
        }
        let page = self.pagination.current_page.saturating_add(1);
        Some(self.begin(FetchPlan { page, mode: RenderMode::Append }))
    }

    /// Record a successful fetch.
    pub fn complete(&mut self, page: u32, has_more: bool) {
        self.pagination.current_page = page.max(1);
        self.pagination.has_more = has_more;
        self.phase = PanelPhase::Loaded;
    }

    /// Record a failed fetch; pagination is left as it was.
    pub fn fail(&mut self) {
        self.phase = PanelPhase::Errored;
    }

    /// Whether the load-more control should be shown.
    pub fn can_load_more(&self) -> bool {
        self.pagination.has_more
    }

    /// Query pairs for `plan`: filters, then page and page size.
    pub fn query_pairs(&self, plan: FetchPlan) -> Vec<(String, String)> {
        let params = self.params;
        let mut pairs = self.filters.pairs().to_vec();
        set_pair(&mut pairs, params.page, &plan.page.to_string());
        set_pair(&mut pairs, params.size, &self.pagination.page_size.to_string());
        pairs
    }

    /// Prev/next links for the current page, each pointing at `base` with
    /// the current filters.
    pub fn page_links(&self, base: &str) -> PageLinks {
        let page = self.pagination.current_page;
        let prev = (page > 1).then(|| page - 1);
        let next = self.pagination.has_more.then(|| page.saturating_add(1));
        PageLinks {
            prev: self.link(base, prev),
            next: self.link(base, next),
            label: format!("Page {page}"),
        }
    }

    fn link(&self, base: &str, target: Option<u32>) -> PageLink {
        let href = match target {
            Some(page) => with_query(base, self.query_pairs(FetchPlan { page, mode: RenderMode::Replace })),
            None => "#".to_owned(),
        };
        PageLink { target, href }
    }
}
