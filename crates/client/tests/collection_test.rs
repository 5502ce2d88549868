//! Paginated list fetching.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeTransport, fx_page_body, signed_in};
use serde_json::json;
use vaultdash_client::collection::{DepositsFetcher, FxTransactionsFetcher};
use vaultdash_client::models::StatusGroup;
use vaultdash_client::transport::Method;
use vaultdash_shared::config::StaleResponsePolicy;

const FX_PAGE_1: &str = "/fx/my-transactions?page=1";
const FX_PAGE_2: &str = "/fx/my-transactions?page=2";
const FX_PAGE_3: &str = "/fx/my-transactions?page=3";

fn fx_fetcher(transport: &Arc<FakeTransport>) -> FxTransactionsFetcher {
    FxTransactionsFetcher::new(
        transport.clone(),
        signed_in("abc"),
        StaleResponsePolicy::Discard,
    )
}

#[tokio::test]
async fn test_nothing_loaded_before_first_fetch() {
    let transport = FakeTransport::new();
    let fetcher = fx_fetcher(&transport);

    assert_eq!(fetcher.page(), 1);
    assert!(fetcher.items().is_empty());
    assert!(fetcher.summary().is_none());
    assert!(!fetcher.can_go_next());
    assert!(!fetcher.can_go_previous());
    assert!(!fetcher.next().await);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_load_and_walk_pages() {
    let transport = FakeTransport::new();
    transport.respond(Method::Get, FX_PAGE_1, 200, fx_page_body(1, 25));
    transport.respond(Method::Get, FX_PAGE_2, 200, fx_page_body(2, 25));
    transport.respond(Method::Get, FX_PAGE_3, 200, fx_page_body(3, 25));
    let fetcher = fx_fetcher(&transport);

    fetcher.load().await;
    assert_eq!(
        fetcher.summary().as_deref(),
        Some("Showing 1 to 10 of 25 transactions")
    );
    assert_eq!(fetcher.items()[0].reference, "FX-1");
    assert!(!fetcher.can_go_previous());
    assert!(fetcher.can_go_next());

    assert!(fetcher.next().await);
    assert_eq!(fetcher.page(), 2);
    assert_eq!(transport.count(FX_PAGE_2), 1);
    assert_eq!(
        fetcher.summary().as_deref(),
        Some("Showing 11 to 20 of 25 transactions")
    );
    assert!(fetcher.can_go_previous());

    assert!(fetcher.next().await);
    assert_eq!(
        fetcher.summary().as_deref(),
        Some("Showing 21 to 25 of 25 transactions")
    );
    assert!(!fetcher.can_go_next());
    assert!(!fetcher.next().await);
    assert_eq!(transport.count(FX_PAGE_3), 1);

    assert!(fetcher.previous().await);
    assert_eq!(fetcher.page(), 2);
    assert_eq!(transport.count(FX_PAGE_2), 2);
}

#[tokio::test]
async fn test_previous_on_first_page_does_nothing() {
    let transport = FakeTransport::new();
    transport.respond(Method::Get, FX_PAGE_1, 200, fx_page_body(1, 25));
    let fetcher = fx_fetcher(&transport);
    fetcher.load().await;

    assert!(!fetcher.previous().await);
    assert!(!fetcher.go_to(1).await);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_navigation_disabled_while_loading() {
    let transport = FakeTransport::new();
    transport.respond(Method::Get, FX_PAGE_1, 200, fx_page_body(1, 25));
    transport.respond_after(
        Method::Get,
        FX_PAGE_2,
        Duration::from_millis(150),
        200,
        fx_page_body(2, 25),
    );
    let fetcher = fx_fetcher(&transport);
    fetcher.load().await;

    let (moved, during) = tokio::join!(fetcher.next(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        (
            fetcher.is_loading(),
            fetcher.can_go_next(),
            fetcher.can_go_previous(),
        )
    });

    assert!(moved);
    assert_eq!(during, (true, false, false));
    assert!(!fetcher.is_loading());
    assert!(fetcher.can_go_next());
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_page() {
    let transport = FakeTransport::new();
    transport.respond(Method::Get, FX_PAGE_1, 200, fx_page_body(1, 25));
    transport.respond(Method::Get, FX_PAGE_2, 500, json!({"message": "boom"}));
    let fetcher = fx_fetcher(&transport);
    fetcher.load().await;

    assert!(fetcher.next().await);

    assert_eq!(fetcher.page(), 2);
    assert_eq!(fetcher.items()[0].reference, "FX-1");
    assert_eq!(fetcher.window().unwrap().page, 1);
    assert_eq!(fetcher.last_error().unwrap().code, 500);
    assert!(!fetcher.is_loading());
}

#[tokio::test]
async fn test_dropped_fetch_unlocks_navigation() {
    let transport = FakeTransport::new();
    transport.respond(Method::Get, FX_PAGE_1, 200, fx_page_body(1, 25));
    transport.respond_after(
        Method::Get,
        FX_PAGE_2,
        Duration::from_millis(500),
        200,
        fx_page_body(2, 25),
    );
    let fetcher = fx_fetcher(&transport);
    fetcher.load().await;

    let result = tokio::time::timeout(Duration::from_millis(20), fetcher.next()).await;

    assert!(result.is_err());
    assert!(!fetcher.is_loading());
    assert_eq!(fetcher.page(), 2);
    assert!(fetcher.can_go_previous());
    assert!(fetcher.can_go_next());
    assert_eq!(fetcher.items()[0].reference, "FX-1");
}

#[tokio::test]
async fn test_dropped_newer_fetch_lets_older_one_settle() {
    let transport = FakeTransport::new();
    transport.respond_after(
        Method::Get,
        FX_PAGE_1,
        Duration::from_millis(100),
        200,
        fx_page_body(1, 25),
    );
    transport.respond_after(
        Method::Get,
        FX_PAGE_1,
        Duration::from_millis(500),
        200,
        fx_page_body(1, 25),
    );
    let fetcher = fx_fetcher(&transport);

    let ((), abandoned) = tokio::join!(fetcher.load(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        tokio::time::timeout(Duration::from_millis(10), fetcher.load()).await
    });

    assert!(abandoned.is_err());
    assert!(!fetcher.is_loading());
    assert_eq!(
        fetcher.summary().as_deref(),
        Some("Showing 1 to 10 of 25 transactions")
    );
    assert!(fetcher.can_go_next());
}

#[tokio::test]
async fn test_empty_list_summary() {
    let transport = FakeTransport::new();
    transport.respond(
        Method::Get,
        "/wallets/my-deposits?page=1",
        200,
        json!({
            "deposits": [],
            "page": 1,
            "numberOfRecordsPerPage": 10,
            "totalRecords": 0,
            "totalPages": 0
        }),
    );
    let fetcher = DepositsFetcher::new(
        transport.clone(),
        signed_in("abc"),
        StaleResponsePolicy::Discard,
    );

    fetcher.load().await;

    assert_eq!(fetcher.summary().as_deref(), Some("Showing 0 transactions"));
    assert!(!fetcher.can_go_next());
}

#[tokio::test]
async fn test_deposit_rows_carry_status_group() {
    let transport = FakeTransport::new();
    transport.respond(
        Method::Get,
        "/wallets/my-deposits?page=1",
        200,
        json!({
            "deposits": [{
                "reference": "DEP-1",
                "currency": "NGN",
                "subTotal": 5000,
                "fee": 75,
                "status": "COMPLETED",
                "createdAt": "2025-02-01T09:00:00Z"
            }],
            "page": 1,
            "numberOfRecordsPerPage": 10,
            "totalRecords": 1,
            "totalPages": 1
        }),
    );
    let fetcher = DepositsFetcher::new(
        transport.clone(),
        signed_in("abc"),
        StaleResponsePolicy::Discard,
    );

    fetcher.load().await;

    let rows = fetcher.items();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status.group(), StatusGroup::Completed);
    assert_eq!(fetcher.summary().as_deref(), Some("Showing 1 transaction"));
}
