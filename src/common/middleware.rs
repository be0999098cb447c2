use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::{
    common::{app_error::AppError, app_state::AppState},
    models::Role,
};

/// Header carrying the client session id issued by `POST /sessions`.
pub const SESSION_HEADER: &str = "x-session-id";

/// Sign-in entry point guards redirect to.
pub const SIGN_IN_PATH: &str = "/auth";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

fn session_id_from(headers: &HeaderMap) -> Result<SessionId, AppError> {
    let raw = headers
        .get(SESSION_HEADER)
        .ok_or_else(|| AppError::BadRequest(format!("Missing {SESSION_HEADER} header")))?;
    raw.to_str()
        .ok()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .map(SessionId)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid {SESSION_HEADER} header")))
}

/// Attaches the caller's `SessionId` without requiring a signed-in identity.
pub async fn session_context(mut req: Request, next: Next) -> Result<Response, AppError> {
    let session_id = session_id_from(req.headers())?;
    req.extensions_mut().insert(session_id);
    Ok(next.run(req).await)
}

async fn authorize(
    state: &AppState,
    mut req: Request,
    next: Next,
    required: Option<Role>,
) -> Result<Response, AppError> {
    let session_id = session_id_from(req.headers())?;
    let Some(identity) = state.sessions.identity(session_id.0)? else {
        return Ok(Redirect::to(SIGN_IN_PATH).into_response());
    };

    if let Some(required) = required {
        if identity.role != required {
            tracing::debug!(
                "{} ({:?}) redirected away from {}",
                identity.name,
                identity.role,
                req.uri().path()
            );
            return Ok(Redirect::to(identity.role.home_path()).into_response());
        }
    }

    req.extensions_mut().insert(session_id);
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Any signed-in identity.
pub async fn signed_in(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, req, next, None).await
}

/// Canteen staff only. Customers are sent back to the menu.
pub async fn canteen_authorization(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, req, next, Some(Role::Canteen)).await
}
