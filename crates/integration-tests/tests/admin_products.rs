//! End-to-end admin product list scenarios.

use std::time::{Duration, Instant};

use daisy_admin::products::list::{ListPhase, ProductListController};
use daisy_admin::{Notice, NoticeKind};
use daisy_client::{ApiClient, ClientConfig, Storage};
use daisy_core::{AdminProductId, BulkStatus};
use daisy_integration_tests::MockBackend;

fn controller(backend: &MockBackend) -> ProductListController {
    let api = ApiClient::new(&backend.config(), Storage::memory());
    ProductListController::new(api)
}

#[tokio::test]
async fn test_debounced_search_issues_one_request() {
    let backend = MockBackend::spawn().await;
    let controller = controller(&backend);
    let t0 = Instant::now();

    // Two keystrokes inside the 300 ms window; only the second survives
    controller.set_search_input("ri", t0).await;
    controller
        .set_search_input("ring", t0 + Duration::from_millis(100))
        .await;

    // Window of the second keystroke has not elapsed yet
    assert!(!controller.poll_search(t0 + Duration::from_millis(250)).await);
    assert!(backend.recorded().list_requests.is_empty());

    // Now it fires, exactly once
    assert!(controller.poll_search(t0 + Duration::from_millis(500)).await);
    assert!(!controller.poll_search(t0 + Duration::from_millis(600)).await);

    // Then the user pages forward
    controller.set_page(2).await;

    let requests = backend.recorded().list_requests.clone();
    assert_eq!(requests.len(), 2);
    // The superseded prefix never reached the wire
    assert!(requests
        .iter()
        .all(|params| params.get("search").map(String::as_str) != Some("ri")));

    let last = requests.last().expect("No requests recorded");
    assert_eq!(last.get("search").map(String::as_str), Some("ring"));
    assert_eq!(last.get("page").map(String::as_str), Some("2"));
    assert_eq!(last.get("limit").map(String::as_str), Some("20"));
}

#[tokio::test]
async fn test_superseded_fetch_never_clobbers_newer_state() {
    let backend = MockBackend::spawn().await;
    let controller = controller(&backend);

    // First fetch filters by the category the mock delays by 300 ms
    let slow = controller.clone();
    let slow_task =
        tokio::spawn(async move { slow.set_category(Some("slow".to_owned())).await });

    // Wait until the slow request is observably in flight, then supersede it
    while backend.recorded().list_requests.is_empty() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    controller.set_category(Some("fast".to_owned())).await;

    let fast_products = controller.products().await;
    assert_eq!(
        fast_products.first().map(|p| p.name.as_str()),
        Some("Product fast")
    );

    // Wait for the slow response to come home and be discarded
    slow_task.await.expect("Slow task panicked");
    assert_eq!(controller.phase().await, ListPhase::Loaded);
    assert_eq!(
        controller.products().await.first().map(|p| p.name.clone()),
        Some("Product fast".to_owned())
    );

    // Both requests really happened
    assert_eq!(backend.recorded().list_requests.len(), 2);
}

#[tokio::test]
async fn test_delete_refetches_list_and_stats() {
    let backend = MockBackend::spawn().await;
    let controller = controller(&backend);
    controller.refresh().await;
    assert_eq!(backend.recorded().list_requests.len(), 1);
    assert_eq!(controller.pagination().await, (3, 42));

    controller
        .delete_product(&AdminProductId::new("p-9"))
        .await;

    assert_eq!(backend.recorded().deleted_ids, vec!["p-9".to_owned()]);
    // One refetch of the list and one of the stats
    assert_eq!(backend.recorded().list_requests.len(), 2);
    assert_eq!(backend.recorded().stats_requests, 1);

    let notices = controller.take_notices().await;
    assert_eq!(
        notices,
        vec![Notice::success("Product deleted successfully")]
    );
}

#[tokio::test]
async fn test_bulk_status_batches_selection() {
    let backend = MockBackend::spawn().await;
    let controller = controller(&backend);
    controller.refresh().await;

    controller.toggle_select_all().await;
    assert_eq!(controller.selected().await.len(), 1);

    controller.bulk_status(BulkStatus::Activate).await;

    let bodies = backend.recorded().bulk_status_bodies.clone();
    assert_eq!(bodies.len(), 1);
    let body = bodies.first().expect("No bulk body");
    assert_eq!(body.get("status"), Some(&serde_json::json!("activate")));
    assert_eq!(
        body.get("productIds"),
        Some(&serde_json::json!(["p-all"]))
    );

    // Selection cleared, list and stats refetched
    assert!(controller.selected().await.is_empty());
    assert_eq!(backend.recorded().list_requests.len(), 2);
    assert_eq!(backend.recorded().stats_requests, 1);
}

#[tokio::test]
async fn test_bulk_delete_issues_one_request_per_id() {
    let backend = MockBackend::spawn().await;
    let controller = controller(&backend);
    controller.refresh().await;
    controller.toggle_select_all().await;

    controller.bulk_delete().await;

    assert_eq!(backend.recorded().deleted_ids, vec!["p-all".to_owned()]);
    assert!(controller.selected().await.is_empty());
    assert_eq!(
        controller.take_notices().await,
        vec![Notice::success("Bulk action completed successfully")]
    );
}

#[tokio::test]
async fn test_stats_populate() {
    let backend = MockBackend::spawn().await;
    let controller = controller(&backend);

    controller.refresh_stats().await;
    let stats = controller.stats().await.expect("No stats");
    assert_eq!(stats.total_products, 42);
    assert_eq!(stats.low_stock_products, 3);
}

#[tokio::test]
async fn test_export_carries_filters_without_pagination() {
    let backend = MockBackend::spawn().await;
    let controller = controller(&backend);

    controller.set_category(Some("necklace".to_owned())).await;
    controller.set_page(3).await;

    let export = controller.export_csv().await.expect("Export failed");
    assert!(export.content.starts_with("sku,name,price\n"));

    // products_YYYY-MM-DD.csv
    let date = export
        .filename
        .strip_prefix("products_")
        .and_then(|rest| rest.strip_suffix(".csv"))
        .expect("Unexpected export filename");
    assert_eq!(date.len(), 10);
    assert!(date.chars().all(|c| c.is_ascii_digit() || c == '-'));

    let requests = backend.recorded().export_requests.clone();
    let params = requests.first().expect("No export request");
    assert_eq!(params.get("category").map(String::as_str), Some("necklace"));
    assert!(!params.contains_key("page"));
    assert!(!params.contains_key("limit"));
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_list() {
    let backend = MockBackend::spawn().await;
    let controller = controller(&backend);
    controller.refresh().await;
    let loaded = controller.products().await;
    assert!(!loaded.is_empty());

    // Point a second controller's requests at a dead port by reserving an
    // address and closing it again.
    let dead_addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Bind failed");
        listener.local_addr().expect("Missing addr")
    };
    let dead_config = ClientConfig {
        api_url: format!("http://{dead_addr}"),
        ..backend.config()
    };
    let unreachable =
        ProductListController::new(ApiClient::new(&dead_config, Storage::memory()));

    unreachable.refresh().await;
    assert_eq!(unreachable.phase().await, ListPhase::Error);
    assert!(unreachable.products().await.is_empty());

    let notices = unreachable.take_notices().await;
    assert_eq!(notices.len(), 1);
    let notice = notices.first().expect("No notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Network error. Please try again.");

    // The healthy controller's state was never involved
    assert_eq!(controller.products().await, loaded);
}
