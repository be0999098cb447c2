use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    common::{
        app_error::{AppError, StdResponse},
        app_state::AppState,
        middleware,
    },
    models::{CatalogItem, Category, CategoryFilter},
    pricing::round2,
};

pub fn routes_with_openapi(state: &AppState) -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/menu",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_menu))
            .routes(utoipa_axum::routes!(get_categories))
            .routes(utoipa_axum::routes!(get_menu_item))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::signed_in,
            )),
    )
}

#[derive(Serialize, ToSchema)]
pub struct MenuItemRes {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub effective_price: f64,
}

impl From<&CatalogItem> for MenuItemRes {
    fn from(item: &CatalogItem) -> Self {
        Self {
            effective_price: round2(item.effective_price()),
            item: item.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetMenuRes {
    pub category: String,
    pub items: Vec<MenuItemRes>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    /// `All` or one of the menu categories. Defaults to `All`.
    pub category: Option<String>,
}

/// List menu items, optionally filtered by category.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Menu"],
    security(("sessionId" = [])),
    params(MenuQuery),
    responses(
        (status = 200, description = "Menu items", body = StdResponse<GetMenuRes, String>),
        (status = 400, description = "Unknown category")
    )
)]
async fn get_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<impl IntoResponse, AppError> {
    let raw = query.category.unwrap_or("All".to_string());
    let filter = CategoryFilter::parse(&raw)
        .ok_or_else(|| AppError::BadRequest(format!("{raw} is not a menu category")))?;

    let items: Vec<MenuItemRes> = state
        .catalog
        .filter(filter)
        .into_iter()
        .map(MenuItemRes::from)
        .collect();
    let category = match filter {
        CategoryFilter::All => "All".to_string(),
        CategoryFilter::Only(category) => category.as_str().to_string(),
    };

    Ok(StdResponse {
        data: Some(GetMenuRes { category, items }),
        message: Some("Get menu successfully"),
    })
}

/// List the menu categories, `All` first.
#[utoipa::path(
    get,
    path = "/categories",
    tags = ["Menu"],
    security(("sessionId" = [])),
    responses(
        (status = 200, description = "Categories", body = StdResponse<Vec<String>, String>)
    )
)]
async fn get_categories() -> impl IntoResponse {
    let categories: Vec<&str> = std::iter::once("All")
        .chain(Category::ALL.iter().map(Category::as_str))
        .collect();

    StdResponse {
        data: Some(categories),
        message: Some("Get categories successfully"),
    }
}

/// Fetch a single menu item.
#[utoipa::path(
    get,
    path = "/{id}",
    tags = ["Menu"],
    security(("sessionId" = [])),
    params(
        ("id" = String, Path, description = "Menu item ID")
    ),
    responses(
        (status = 200, description = "Menu item", body = StdResponse<MenuItemRes, String>),
        (status = 404, description = "No such item")
    )
)]
async fn get_menu_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.catalog.get(&id).ok_or(AppError::NotFound)?;

    Ok(StdResponse {
        data: Some(MenuItemRes::from(item)),
        message: Some("Get menu item successfully"),
    })
}
