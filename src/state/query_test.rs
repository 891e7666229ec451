use super::*;

fn pair(k: &str, v: &str) -> (String, String) {
    (k.to_owned(), v.to_owned())
}

fn logs_query() -> PanelQuery {
    PanelQuery::new(FilterState::with_keys(["level", "event"]), 20, LOG_PARAMS)
}

#[test]
fn filter_state_keeps_key_order_and_resets_values() {
    let mut filters = FilterState::with_keys(["level", "event"]);
    assert!(filters.is_unconstrained());
    filters.assign(&[pair("event", "asr.retry"), pair("level", "warn")]);
    assert_eq!(filters.pairs(), &[pair("level", "warn"), pair("event", "asr.retry")]);
    filters.reset();
    assert_eq!(filters.get("level"), "");
    assert_eq!(filters.pairs().len(), 2);
    assert!(filters.is_unconstrained());
}

#[test]
fn filter_state_adds_unknown_keys() {
    let mut filters = FilterState::default();
    filters.set("status", "failed");
    assert_eq!(filters.get("status"), "failed");
    assert_eq!(filters.get("missing"), "");
}

#[test]
fn pagination_enforces_minimums() {
    let pagination = PaginationState::new(0);
    assert_eq!(pagination.page_size, 1);
    assert_eq!(pagination.current_page, 1);
}

#[test]
fn mount_fetches_first_page() {
    let mut query = logs_query();
    assert_eq!(query.phase, PanelPhase::Idle);
    let plan = query.mount();
    assert_eq!(plan, FetchPlan::first_page());
    assert_eq!(query.phase, PanelPhase::Fetching);
}

#[test]
fn submit_goes_to_first_page_in_replace_mode() {
    let mut query = logs_query();
    query.complete(3, true);
    let plan = query.submit(&[pair("level", "error")]);
    assert_eq!(plan, FetchPlan { page: 1, mode: RenderMode::Replace });
    assert_eq!(query.filters.get("level"), "error");
}

#[test]
fn reset_clears_filters_and_restarts() {
    let mut query = logs_query();
    query.submit(&[pair("level", "error"), pair("event", "x")]);
    query.complete(2, false);
    let plan = query.reset();
    assert_eq!(plan.page, 1);
    assert_eq!(plan.mode, RenderMode::Replace);
    assert!(query.filters.is_unconstrained());
}

#[test]
fn load_more_requests_next_page_in_append_mode() {
    let mut query = logs_query();
    query.complete(1, true);
    let plan = query.load_more();
    assert_eq!(plan, Some(FetchPlan { page: 2, mode: RenderMode::Append }));
    // Page advances only once the fetch succeeds.
    assert_eq!(query.pagination.current_page, 1);
    query.complete(2, false);
    assert_eq!(query.pagination.current_page, 2);
    assert!(!query.can_load_more());
}

#[test]
fn load_more_without_more_pages_is_noop() {
    let mut query = logs_query();
    query.complete(1, false);
    assert_eq!(query.load_more(), None);
    assert_eq!(query.phase, PanelPhase::Loaded);
}

#[test]
fn failed_fetch_keeps_pagination() {
    let mut query = logs_query();
    query.complete(2, true);
    query.load_more();
    query.fail();
    assert_eq!(query.phase, PanelPhase::Errored);
    assert_eq!(query.pagination.current_page, 2);
    assert!(query.pagination.has_more);
}

#[test]
fn go_to_rejects_page_zero() {
    let mut query = logs_query();
    assert_eq!(query.go_to(0), None);
    assert_eq!(query.go_to(4), Some(FetchPlan { page: 4, mode: RenderMode::Replace }));
}

#[test]
fn complete_clamps_page() {
    let mut query = logs_query();
    query.complete(0, false);
    assert_eq!(query.pagination.current_page, 1);
}

#[test]
fn query_pairs_include_filters_and_page_params() {
    let mut query = logs_query();
    query.submit(&[pair("level", "warn")]);
    let pairs = query.query_pairs(FetchPlan { page: 3, mode: RenderMode::Append });
    assert_eq!(
        pairs,
        vec![pair("level", "warn"), pair("event", ""), pair("page", "3"), pair("page_size", "20")]
    );
}

#[test]
fn jobs_query_uses_limit() {
    let query = PanelQuery::new(FilterState::with_keys(["status"]), 10, JOB_PARAMS);
    let pairs = query.query_pairs(FetchPlan::first_page());
    assert_eq!(pairs, vec![pair("status", ""), pair("page", "1"), pair("limit", "10")]);
}

#[test]
fn page_links_on_first_page() {
    let mut query = PanelQuery::new(FilterState::with_keys(["status"]), 10, JOB_PARAMS);
    query.submit(&[pair("status", "failed")]);
    query.complete(1, true);
    let links = query.page_links("/");
    assert!(links.prev.is_disabled());
    assert_eq!(links.prev.href, "#");
    assert_eq!(links.prev.aria_disabled(), "true");
    assert_eq!(links.prev.class(), "btn btn--disabled");
    assert_eq!(links.next.target, Some(2));
    assert_eq!(links.next.href, "/?status=failed&page=2&limit=10");
    assert_eq!(links.next.aria_disabled(), "false");
    assert_eq!(links.label, "Page 1");
}

#[test]
fn page_links_on_last_page() {
    let mut query = PanelQuery::new(FilterState::default(), 10, JOB_PARAMS);
    query.complete(4, false);
    let links = query.page_links("/");
    assert_eq!(links.prev.target, Some(3));
    assert_eq!(links.prev.href, "/?page=3&limit=10");
    assert!(links.next.is_disabled());
    assert_eq!(links.next.class(), "btn btn--disabled");
}
