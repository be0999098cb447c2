pub mod auth;
pub mod canteen;
pub mod customers;
pub mod menu;
pub mod sessions;

use axum::Router;
use utoipa_axum::router::OpenApiRouter;

use crate::common::{app_state::AppState, swagger};

/// Every route of the service with its OpenAPI description.
pub fn routes_with_openapi(state: &AppState) -> OpenApiRouter<AppState> {
    sessions::routes_with_openapi()
        .merge(auth::routes_with_openapi())
        .merge(menu::routes_with_openapi(state))
        .merge(customers::carts::routes_with_openapi(state))
        .merge(customers::checkout::routes_with_openapi(state))
        .merge(customers::orders::routes_with_openapi(state))
        .merge(canteen::orders::routes_with_openapi(state))
}

/// The complete application router, Swagger UI included.
pub fn app(state: AppState) -> Router {
    let routes = routes_with_openapi(&state);

    let mut openapi = routes.get_openapi().clone();
    openapi.info = utoipa::openapi::InfoBuilder::new()
        .title("Canteen OrderService API")
        .version(env!("CARGO_PKG_VERSION"))
        .build();
    let swagger_ui = swagger::create_swagger_ui(openapi);

    Router::new()
        .merge(routes)
        .merge(swagger_ui)
        .with_state(state)
}
