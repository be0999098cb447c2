use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::TestApp;

async fn place_order(app: &TestApp, customer: Uuid) -> String {
    app.add_to_cart(customer, "5", Some("no onion")).await;
    let res = app.checkout_upi(customer, "alice@upi").await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["data"]["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn board_groups_orders_by_status() {
    let app = TestApp::new();
    let alice = app.customer("alice").await;
    let staff = app.canteen("ravi").await;
    let first = place_order(&app, alice).await;
    place_order(&app, alice).await;

    let res = app
        .request("POST", &format!("/canteen/orders/{first}/advance"), None, Some(staff))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.request("GET", "/canteen/orders", None, Some(staff)).await;
    assert_eq!(res.status, StatusCode::OK);
    let data = &res.body["data"];
    assert_eq!(
        data["counts"],
        json!({ "pending": 1, "preparing": 1, "ready": 0, "completed": 0 })
    );
    assert_eq!(data["board"]["preparing"][0]["id"], first.as_str());
}

#[tokio::test]
async fn advancing_walks_the_lifecycle_once() {
    let app = TestApp::new();
    let alice = app.customer("alice").await;
    let staff = app.canteen("ravi").await;
    let id = place_order(&app, alice).await;

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let res = app
            .request("POST", &format!("/canteen/orders/{id}/advance"), None, Some(staff))
            .await;
        assert_eq!(res.status, StatusCode::OK);
        statuses.push(res.body["data"]["status"].clone());
    }
    assert_eq!(statuses, vec![json!("preparing"), json!("ready"), json!("completed")]);

    let res = app
        .request("POST", &format!("/canteen/orders/{id}/advance"), None, Some(staff))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = app.request("GET", &format!("/orders/{id}"), None, Some(alice)).await;
    assert_eq!(res.body["data"]["status"], "completed");
}

#[tokio::test]
async fn explicit_status_updates_must_be_adjacent() {
    let app = TestApp::new();
    let alice = app.customer("alice").await;
    let staff = app.canteen("ravi").await;
    let id = place_order(&app, alice).await;
    let uri = format!("/canteen/orders/{id}/status");

    let res = app
        .request("PATCH", &uri, Some(json!({ "status": "completed" })), Some(staff))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(
        res.body["message"],
        "order cannot move from pending to completed"
    );

    let res = app
        .request("PATCH", &uri, Some(json!({ "status": "preparing" })), Some(staff))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["status"], "preparing");

    let res = app
        .request("PATCH", &uri, Some(json!({ "status": "pending" })), Some(staff))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = app
        .request("PATCH", &uri, Some(json!({ "status": "ready" })), Some(staff))
        .await;
    assert_eq!(res.body["message"], Value::String(format!("Order {id} is ready for pickup")));
}

#[tokio::test]
async fn unknown_orders_are_not_found() {
    let app = TestApp::new();
    let staff = app.canteen("ravi").await;
    let res = app
        .request(
            "POST",
            &format!("/canteen/orders/{}/advance", Uuid::new_v4()),
            None,
            Some(staff),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
