use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

use crate::{
    common::{
        app_error::{AppError, StdResponse},
        app_state::AppState,
        middleware,
    },
    ledger::StatusBoard,
    models::{Identity, Order, OrderStatus},
    routes::customers::orders::OrderRes,
};

/// Canteen dashboard: every order, grouped by status, and the controls that
/// move them along.
pub fn routes_with_openapi(state: &AppState) -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/canteen/orders",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_board))
            .routes(utoipa_axum::routes!(advance_order))
            .routes(utoipa_axum::routes!(update_order_status))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::canteen_authorization,
            )),
    )
}

#[derive(Serialize, ToSchema)]
pub struct StatusCounts {
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    pub completed: usize,
}

#[derive(Serialize, ToSchema)]
pub struct BoardRes {
    pub pending: Vec<OrderRes>,
    pub preparing: Vec<OrderRes>,
    pub ready: Vec<OrderRes>,
    pub completed: Vec<OrderRes>,
}

impl From<&StatusBoard> for BoardRes {
    fn from(board: &StatusBoard) -> Self {
        let column = |status: OrderStatus| -> Vec<OrderRes> {
            board.column(status).iter().map(OrderRes::from).collect()
        };
        Self {
            pending: column(OrderStatus::Pending),
            preparing: column(OrderStatus::Preparing),
            ready: column(OrderStatus::Ready),
            completed: column(OrderStatus::Completed),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetBoardRes {
    pub counts: StatusCounts,
    pub board: BoardRes,
}

/// Fetch all orders grouped by status.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Canteen"],
    security(("sessionId" = [])),
    responses(
        (status = 200, description = "Orders by status", body = StdResponse<GetBoardRes, String>)
    )
)]
async fn get_board(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let board = state.read_ledger()?.board();
    let counts = StatusCounts {
        pending: board.column(OrderStatus::Pending).len(),
        preparing: board.column(OrderStatus::Preparing).len(),
        ready: board.column(OrderStatus::Ready).len(),
        completed: board.column(OrderStatus::Completed).len(),
    };

    Ok(StdResponse {
        data: Some(GetBoardRes {
            board: BoardRes::from(&board),
            counts,
        }),
        message: Some("Get orders successfully"),
    })
}

fn status_message(order: &Order) -> String {
    match order.status {
        OrderStatus::Ready => format!("Order {} is ready for pickup", order.id),
        status => format!("Order {} updated to {}", order.id, status),
    }
}

/// Move an order to the next status in its lifecycle.
#[utoipa::path(
    post,
    path = "/{id}/advance",
    tags = ["Canteen"],
    security(("sessionId" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID to advance")
    ),
    responses(
        (status = 200, description = "Order advanced", body = StdResponse<OrderRes, String>),
        (status = 404, description = "No such order"),
        (status = 409, description = "Order is already completed")
    )
)]
async fn advance_order(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(staff): Extension<Identity>,
) -> Result<impl IntoResponse, AppError> {
    let order = state.write_ledger()?.advance_to_next(id)?.clone();
    tracing::debug!("{} advanced order {}", staff.name, order.id);

    Ok(StdResponse {
        message: Some(status_message(&order)),
        data: Some(OrderRes::from(&order)),
    })
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateOrderStatusReq {
    pub status: OrderStatus,
}

/// Set an order's status. Only the immediate successor of the current status
/// is accepted.
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tags = ["Canteen"],
    security(("sessionId" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID to update")
    ),
    request_body = UpdateOrderStatusReq,
    responses(
        (status = 200, description = "Status updated", body = StdResponse<OrderRes, String>),
        (status = 404, description = "No such order"),
        (status = 409, description = "Transition not allowed")
    )
)]
async fn update_order_status(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(staff): Extension<Identity>,
    Json(body): Json<UpdateOrderStatusReq>,
) -> Result<impl IntoResponse, AppError> {
    let order = state.write_ledger()?.advance(id, body.status)?.clone();
    tracing::debug!("{} set order {} to {}", staff.name, order.id, order.status);

    Ok(StdResponse {
        message: Some(status_message(&order)),
        data: Some(OrderRes::from(&order)),
    })
}
