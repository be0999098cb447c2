use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    cart::{Cart, CartError},
    common::{
        app_error::{AppError, StdResponse},
        app_state::AppState,
        middleware::{self, SessionId},
    },
    models::CartLine,
    pricing::{CartTotals, round2},
};

/// Cart routes for the caller's session. Any signed-in identity may use them.
pub fn routes_with_openapi(state: &AppState) -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/cart",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_cart))
            .routes(utoipa_axum::routes!(clear_cart))
            .routes(utoipa_axum::routes!(add_line))
            .routes(utoipa_axum::routes!(update_line))
            .routes(utoipa_axum::routes!(remove_line))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::signed_in,
            )),
    )
}

#[derive(Serialize, ToSchema)]
pub struct CartLineRes {
    pub item_id: String,
    pub name: String,
    pub customization: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

impl From<&CartLine> for CartLineRes {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item.id.clone(),
            name: line.item.name.clone(),
            customization: line.customization.clone(),
            quantity: line.quantity,
            unit_price: round2(line.item.effective_price()),
            line_total: round2(line.line_total()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetCartRes {
    pub lines: Vec<CartLineRes>,
    pub item_count: u64,
    pub totals: CartTotals,
    pub is_empty: bool,
}

impl From<&Cart> for GetCartRes {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineRes::from).collect(),
            item_count: cart.item_count(),
            totals: cart.totals().rounded(),
            is_empty: cart.is_empty(),
        }
    }
}

/// Fetch the cart with its bill.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Cart"],
    security(("sessionId" = [])),
    responses(
        (status = 200, description = "Current cart", body = StdResponse<GetCartRes, String>)
    )
)]
async fn get_cart(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<impl IntoResponse, AppError> {
    let cart = state
        .sessions
        .peek(session_id.0, |session| GetCartRes::from(&session.cart))?;
    let message = if cart.is_empty {
        "Your cart is empty"
    } else {
        "Get cart successfully"
    };

    Ok(StdResponse {
        data: Some(cart),
        message: Some(message),
    })
}

/// Empty the cart.
#[utoipa::path(
    delete,
    path = "/",
    tags = ["Cart"],
    security(("sessionId" = [])),
    responses(
        (status = 200, description = "Cart cleared", body = StdResponse<GetCartRes, String>)
    )
)]
async fn clear_cart(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<impl IntoResponse, AppError> {
    let cart = state.sessions.with_session(session_id.0, |session| {
        session.cart.clear();
        GetCartRes::from(&session.cart)
    })?;

    Ok(StdResponse {
        data: Some(cart),
        message: Some("Cart cleared"),
    })
}

#[derive(Deserialize, ToSchema)]
pub struct AddLineReq {
    pub item_id: String,
    #[serde(default)]
    pub customization: Option<String>,
}

/// Add one unit of a menu item, merging with an identical customization.
#[utoipa::path(
    post,
    path = "/lines",
    tags = ["Cart"],
    security(("sessionId" = [])),
    request_body = AddLineReq,
    responses(
        (status = 200, description = "Item added", body = StdResponse<GetCartRes, String>),
        (status = 400, description = "Line is already at the quantity limit"),
        (status = 404, description = "No such menu item"),
        (status = 409, description = "Item is unavailable")
    )
)]
async fn add_line(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(body): Json<AddLineReq>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.catalog.get(&body.item_id).ok_or(AppError::NotFound)?;
    if !item.is_available {
        return Err(AppError::Conflict(format!(
            "{} is currently unavailable",
            item.name
        )));
    }

    let cart = state.sessions.with_session(session_id.0, |session| {
        session.cart.add_line(item, body.customization.as_deref())?;
        Ok::<_, CartError>(GetCartRes::from(&session.cart))
    })??;

    Ok(StdResponse {
        data: Some(cart),
        message: Some(format!("{} added to cart!", item.name)),
    })
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateLineReq {
    pub item_id: String,
    #[serde(default)]
    pub customization: Option<String>,
    /// Zero or below removes the line. At most 99.
    pub quantity: i64,
}

/// Set the quantity of one cart line.
#[utoipa::path(
    patch,
    path = "/lines",
    tags = ["Cart"],
    security(("sessionId" = [])),
    request_body = UpdateLineReq,
    responses(
        (status = 200, description = "Quantity updated", body = StdResponse<GetCartRes, String>),
        (status = 400, description = "Quantity above the limit"),
        (status = 404, description = "No such cart line")
    )
)]
async fn update_line(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(body): Json<UpdateLineReq>,
) -> Result<impl IntoResponse, AppError> {
    let cart = state.sessions.with_session(session_id.0, |session| {
        let found = session
            .cart
            .set_quantity(&body.item_id, body.customization.as_deref(), body.quantity)?;
        Ok::<_, CartError>(found.then(|| GetCartRes::from(&session.cart)))
    })??;
    let cart = cart.ok_or(AppError::NotFound)?;

    Ok(StdResponse {
        data: Some(cart),
        message: Some("Cart updated"),
    })
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LineKeyQuery {
    pub item_id: String,
    pub customization: Option<String>,
}

/// Remove one cart line.
#[utoipa::path(
    delete,
    path = "/lines",
    tags = ["Cart"],
    security(("sessionId" = [])),
    params(LineKeyQuery),
    responses(
        (status = 200, description = "Line removed", body = StdResponse<GetCartRes, String>),
        (status = 404, description = "No such cart line")
    )
)]
async fn remove_line(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Query(query): Query<LineKeyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let cart = state.sessions.with_session(session_id.0, |session| {
        session
            .cart
            .remove_line(&query.item_id, query.customization.as_deref())
            .then(|| GetCartRes::from(&session.cart))
    })?;
    let cart = cart.ok_or(AppError::NotFound)?;

    Ok(StdResponse {
        data: Some(cart),
        message: Some("Item removed from cart"),
    })
}
