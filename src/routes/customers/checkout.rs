use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    checkout::{self, CheckoutReq},
    common::{
        app_error::{AppError, StdResponse},
        app_state::AppState,
        middleware::{self, SessionId},
    },
    models::Role,
    pricing::{CartTotals, TAX_RATE},
    routes::customers::{carts::CartLineRes, orders::OrderRes},
};

pub fn routes_with_openapi(state: &AppState) -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/checkout",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_checkout))
            .routes(utoipa_axum::routes!(place_order))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::signed_in,
            )),
    )
}

const PAYMENT_METHODS: [&str; 3] = ["upi", "card", "gpay"];

#[derive(Serialize, ToSchema)]
pub struct GetCheckoutRes {
    pub lines: Vec<CartLineRes>,
    pub totals: CartTotals,
    pub tax_rate: f64,
    pub payment_methods: Vec<String>,
}

/// Fetch the bill for the current cart. An empty cart sends the caller back
/// to the menu.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Checkout"],
    security(("sessionId" = [])),
    responses(
        (status = 200, description = "Bill details", body = StdResponse<GetCheckoutRes, String>),
        (status = 303, description = "Cart is empty, redirect to the menu")
    )
)]
async fn get_checkout(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Response, AppError> {
    let summary = state.sessions.peek(session_id.0, |session| {
        (!session.cart.is_empty()).then(|| GetCheckoutRes {
            lines: session.cart.lines().iter().map(CartLineRes::from).collect(),
            totals: session.cart.totals().rounded(),
            tax_rate: TAX_RATE,
            payment_methods: PAYMENT_METHODS.iter().map(|m| m.to_string()).collect(),
        })
    })?;

    match summary {
        Some(summary) => Ok(StdResponse {
            data: Some(summary),
            message: Some("Get checkout successfully"),
        }
        .into_response()),
        None => Ok(Redirect::to(Role::Customer.home_path()).into_response()),
    }
}

/// Place an order from the current cart. The cart is emptied on success and
/// left untouched on rejection.
#[utoipa::path(
    post,
    path = "/",
    tags = ["Checkout"],
    security(("sessionId" = [])),
    request_body = CheckoutReq,
    responses(
        (status = 201, description = "Order placed", body = StdResponse<OrderRes, String>),
        (status = 400, description = "Empty cart or missing payment details")
    )
)]
async fn place_order(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(body): Json<CheckoutReq>,
) -> Result<impl IntoResponse, AppError> {
    let order = state.sessions.with_session(session_id.0, |session| {
        let mut ledger = state.write_ledger()?;
        checkout::place_order(session, &mut ledger, &body).map_err(AppError::from)
    })??;

    Ok((
        StatusCode::CREATED,
        StdResponse {
            data: Some(OrderRes::from(&order)),
            message: Some("Order placed successfully!"),
        },
    ))
}
