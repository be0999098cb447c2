use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

fn approx(value: &serde_json::Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|actual| (actual - expected).abs() < 1e-9)
}

#[tokio::test]
async fn menu_filters_by_category() {
    let app = TestApp::new();
    let session = app.customer("alice").await;

    let res = app.request("GET", "/menu?category=Juice", None, Some(session)).await;
    assert_eq!(res.status, StatusCode::OK);
    let items = res.body["data"]["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|item| item["category"] == "Juice"));

    let res = app.request("GET", "/menu?category=Brunch", None, Some(session)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.request("GET", "/menu/categories", None, Some(session)).await;
    assert_eq!(res.body["data"][0], "All");
}

#[tokio::test]
async fn menu_item_shows_discounted_price() {
    let app = TestApp::new();
    let session = app.customer("alice").await;

    let res = app.request("GET", "/menu/8", None, Some(session)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(approx(&res.body["data"]["price"], 80.0));
    assert!(approx(&res.body["data"]["effective_price"], 64.0));

    let res = app.request("GET", "/menu/nope", None, Some(session)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adding_twice_merges_and_totals_include_tax() {
    let app = TestApp::new();
    let session = app.customer("alice").await;

    app.add_to_cart(session, "8", None).await;
    let res = app.add_to_cart(session, "8", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Parotta Salna added to cart!");

    let cart = &res.body["data"];
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], 2);
    assert!(approx(&cart["totals"]["subtotal"], 128.0));
    assert!(approx(&cart["totals"]["tax"], 6.4));
    assert!(approx(&cart["totals"]["total"], 134.4));
}

#[tokio::test]
async fn customizations_are_separate_lines() {
    let app = TestApp::new();
    let session = app.customer("alice").await;

    app.add_to_cart(session, "12", Some("sweet")).await;
    let res = app.add_to_cart(session, "12", Some("salted")).await;
    assert_eq!(res.body["data"]["lines"].as_array().unwrap().len(), 2);

    let res = app
        .request(
            "PATCH",
            "/cart/lines",
            Some(json!({ "item_id": "12", "customization": "sweet", "quantity": 3 })),
            Some(session),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["item_count"], 4);

    let res = app
        .request("DELETE", "/cart/lines?item_id=12&customization=salted", None, Some(session))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let lines = res.body["data"]["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["customization"], "sweet");
    assert_eq!(lines[0]["quantity"], 3);
}

#[tokio::test]
async fn non_positive_quantities_remove_the_line() {
    let app = TestApp::new();
    let session = app.customer("alice").await;

    for quantity in [0, -1] {
        app.add_to_cart(session, "10", None).await;
        let res = app
            .request(
                "PATCH",
                "/cart/lines",
                Some(json!({ "item_id": "10", "quantity": quantity })),
                Some(session),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["data"]["is_empty"], true);
    }

    let res = app
        .request(
            "PATCH",
            "/cart/lines",
            Some(json!({ "item_id": "10", "quantity": 2 })),
            Some(session),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unavailable_and_unknown_items_cannot_be_added() {
    let app = TestApp::new();
    let session = app.customer("alice").await;

    let res = app.add_to_cart(session, "3", None).await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = app.add_to_cart(session, "999", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.request("GET", "/cart", None, Some(session)).await;
    assert_eq!(res.body["data"]["is_empty"], true);
    assert_eq!(res.body["message"], "Your cart is empty");
}

#[tokio::test]
async fn carts_belong_to_the_session_not_the_name() {
    let app = TestApp::new();
    let session = app.customer("alice").await;
    app.add_to_cart(session, "1", None).await;

    app.request("POST", "/auth/logout", None, Some(session)).await;
    app.sign_up(session, "bob", "customer").await;
    let res = app.request("GET", "/cart", None, Some(session)).await;
    assert_eq!(res.body["data"]["item_count"], 1);

    let other = app.customer("alice").await;
    let res = app.request("GET", "/cart", None, Some(other)).await;
    assert_eq!(res.body["data"]["is_empty"], true);
}

#[tokio::test]
async fn clearing_the_cart() {
    let app = TestApp::new();
    let session = app.customer("alice").await;
    app.add_to_cart(session, "1", None).await;
    app.add_to_cart(session, "2", None).await;

    let res = app.request("DELETE", "/cart", None, Some(session)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["is_empty"], true);
}

#[tokio::test]
async fn quantities_above_the_limit_are_rejected() {
    let app = TestApp::new();
    let alice = app.customer("alice").await;
    let bob = app.customer("bob").await;
    app.add_to_cart(alice, "1", None).await;

    let res = app
        .request(
            "PATCH",
            "/cart/lines",
            Some(json!({ "item_id": "1", "quantity": 4294967295u64 })),
            Some(alice),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .request(
            "PATCH",
            "/cart/lines",
            Some(json!({ "item_id": "1", "quantity": 99 })),
            Some(alice),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.add_to_cart(alice, "1", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.request("GET", "/cart", None, Some(alice)).await;
    assert_eq!(res.body["data"]["lines"][0]["quantity"], 99);
    assert_eq!(res.body["data"]["item_count"], 99);

    let res = app.request("GET", "/cart", None, Some(bob)).await;
    assert_eq!(res.status, StatusCode::OK);
}
