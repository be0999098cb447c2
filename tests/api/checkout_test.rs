use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn empty_cart_checkout_redirects_to_menu() {
    let app = TestApp::new();
    let session = app.customer("alice").await;

    let res = app.request("GET", "/checkout", None, Some(session)).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/menu"));

    let res = app.checkout_upi(session, "alice@upi").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Your cart is empty");
}

#[tokio::test]
async fn checkout_summary_matches_cart() {
    let app = TestApp::new();
    let session = app.customer("alice").await;
    app.add_to_cart(session, "4", None).await;

    let cart = app.request("GET", "/cart", None, Some(session)).await;
    let summary = app.request("GET", "/checkout", None, Some(session)).await;
    assert_eq!(summary.status, StatusCode::OK);
    assert_eq!(summary.body["data"]["totals"], cart.body["data"]["totals"]);
    assert_eq!(summary.body["data"]["payment_methods"], json!(["upi", "card", "gpay"]));
}

#[tokio::test]
async fn missing_upi_id_leaves_everything_untouched() {
    let app = TestApp::new();
    let session = app.customer("alice").await;
    app.add_to_cart(session, "1", None).await;

    let res = app.checkout_upi(session, "").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Please enter your UPI ID");

    let res = app.request("GET", "/cart", None, Some(session)).await;
    assert_eq!(res.body["data"]["item_count"], 1);
    let res = app.request("GET", "/orders", None, Some(session)).await;
    assert_eq!(res.body["data"], json!([]));
}

#[tokio::test]
async fn incomplete_card_details_are_rejected() {
    let app = TestApp::new();
    let session = app.customer("alice").await;
    app.add_to_cart(session, "1", None).await;

    let res = app
        .request(
            "POST",
            "/checkout",
            Some(json!({
                "payment_method": "card",
                "card": { "number": "4111111111111111", "name": "Alice", "expiry": "12/29" }
            })),
            Some(session),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Please fill in all card details");
}

#[tokio::test]
async fn placing_an_order_snapshots_and_empties_the_cart() {
    let app = TestApp::new();
    let session = app.customer("alice").await;
    app.add_to_cart(session, "8", None).await;
    app.add_to_cart(session, "8", None).await;

    let res = app.checkout_upi(session, "alice@upi").await;
    assert_eq!(res.status, StatusCode::CREATED);
    let order = &res.body["data"];
    assert_eq!(order["status"], "pending");
    assert_eq!(order["customer_name"], "alice");
    assert_eq!(order["payment_method"], "upi");
    assert_eq!(order["items"][0]["quantity"], 2);
    assert_eq!(order["total"], json!(134.4));
    let estimate = order["estimated_time"].as_u64().unwrap();
    assert!((15..=30).contains(&estimate));

    let res = app.request("GET", "/cart", None, Some(session)).await;
    assert_eq!(res.body["data"]["is_empty"], true);

    let id = order["id"].as_str().unwrap();
    let res = app.request("GET", &format!("/orders/{id}"), None, Some(session)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["id"], id);
    assert_eq!(res.body["data"]["total"], json!(134.4));
}

#[tokio::test]
async fn customers_only_see_their_own_orders() {
    let app = TestApp::new();
    let alice = app.customer("alice").await;
    let bob = app.customer("bob").await;

    app.add_to_cart(alice, "1", None).await;
    let placed = app.checkout_upi(alice, "alice@upi").await;
    let id = placed.body["data"]["id"].as_str().unwrap().to_owned();
    app.add_to_cart(alice, "2", None).await;
    app.request("POST", "/checkout", Some(json!({ "payment_method": "gpay" })), Some(alice))
        .await;

    let res = app.request("GET", "/orders", None, Some(alice)).await;
    let orders = res.body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1]["id"], id.as_str());
    assert_eq!(orders[0]["payment_method"], "gpay");

    let res = app.request("GET", "/orders", None, Some(bob)).await;
    assert_eq!(res.body["data"], json!([]));
    let res = app.request("GET", &format!("/orders/{id}"), None, Some(bob)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
