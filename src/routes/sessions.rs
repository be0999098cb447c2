use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

use crate::common::{
    app_error::{AppError, StdResponse},
    app_state::AppState,
};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/sessions",
        OpenApiRouter::new().routes(utoipa_axum::routes!(open_session)),
    )
}

#[derive(Serialize, ToSchema)]
pub struct OpenSessionRes {
    pub session_id: Uuid,
}

/// Open a client session. Send the returned id as `x-session-id` on every
/// other request.
#[utoipa::path(
    post,
    path = "/",
    tags = ["Sessions"],
    responses(
        (status = 201, description = "Session opened", body = StdResponse<OpenSessionRes, String>)
    )
)]
async fn open_session(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let session_id = state.sessions.open();
    tracing::debug!("Opened session {}", session_id);

    Ok((
        StatusCode::CREATED,
        StdResponse {
            data: Some(OpenSessionRes { session_id }),
            message: Some("Session opened"),
        },
    ))
}
