use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

use crate::{
    common::{
        app_error::{AppError, StdResponse},
        app_state::AppState,
        middleware,
    },
    models::{Identity, Order, OrderStatus},
    pricing::round2,
    routes::customers::carts::CartLineRes,
};

/// Order history of the caller, matched by display name.
pub fn routes_with_openapi(state: &AppState) -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/orders",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_my_orders))
            .routes(utoipa_axum::routes!(get_my_order))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::signed_in,
            )),
    )
}

/// An order as shown to clients, with the total rounded for display.
#[derive(Serialize, ToSchema)]
pub struct OrderRes {
    pub id: Uuid,
    pub items: Vec<CartLineRes>,
    pub total: f64,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_time: u32,
    pub customer_name: String,
}

impl From<&Order> for OrderRes {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            items: order.items.iter().map(CartLineRes::from).collect(),
            total: round2(order.total),
            payment_method: order.payment_method.clone().into(),
            status: order.status,
            created_at: order.created_at,
            estimated_time: order.estimated_time,
            customer_name: order.customer_name.clone(),
        }
    }
}

/// Fetch all orders placed under the caller's name, newest first.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Orders"],
    security(("sessionId" = [])),
    responses(
        (status = 200, description = "List my orders", body = StdResponse<Vec<OrderRes>, String>)
    )
)]
async fn get_my_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, AppError> {
    let ledger = state.read_ledger()?;
    let orders: Vec<OrderRes> = ledger
        .for_customer(&identity.name)
        .into_iter()
        .rev()
        .map(OrderRes::from)
        .collect();

    Ok(StdResponse {
        data: Some(orders),
        message: Some("Get my orders successfully"),
    })
}

/// Fetch one of the caller's orders.
#[utoipa::path(
    get,
    path = "/{id}",
    tags = ["Orders"],
    security(("sessionId" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID to fetch")
    ),
    responses(
        (status = 200, description = "Get order successfully", body = StdResponse<OrderRes, String>),
        (status = 404, description = "No such order for this customer")
    )
)]
async fn get_my_order(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, AppError> {
    let order = state
        .read_ledger()?
        .get(id)
        .filter(|order| order.customer_name == identity.name)
        .map(OrderRes::from)
        .ok_or(AppError::NotFound)?;

    Ok(StdResponse {
        data: Some(order),
        message: Some("Get order successfully"),
    })
}
