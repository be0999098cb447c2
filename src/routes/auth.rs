use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    common::{
        app_error::{AppError, StdResponse},
        app_state::AppState,
        middleware::{self, SIGN_IN_PATH, SessionId},
    },
    models::{Identity, Role},
};

/// Sign-in, sign-up and logout, plus the root redirect. Credentials are
/// accepted as given.
pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    let root = OpenApiRouter::new().routes(utoipa_axum::routes!(landing));
    let auth = OpenApiRouter::new().nest(
        "/auth",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(current_identity))
            .routes(utoipa_axum::routes!(sign_in))
            .routes(utoipa_axum::routes!(sign_up))
            .routes(utoipa_axum::routes!(logout)),
    );

    root.merge(auth)
        .route_layer(axum::middleware::from_fn(middleware::session_context))
}

/// Send the caller to the page matching their identity.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Auth"],
    security(("sessionId" = [])),
    responses(
        (status = 303, description = "Redirect to sign-in, menu or canteen dashboard")
    )
)]
async fn landing(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<impl IntoResponse, AppError> {
    let target = match state.sessions.identity(session_id.0)? {
        Some(identity) => identity.role.home_path(),
        None => SIGN_IN_PATH,
    };
    Ok(Redirect::to(target))
}

/// Fetch the identity signed in on this session, if any.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Auth"],
    security(("sessionId" = [])),
    responses(
        (status = 200, description = "Current identity", body = StdResponse<Identity, String>)
    )
)]
async fn current_identity(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<impl IntoResponse, AppError> {
    let identity = state.sessions.identity(session_id.0)?;
    let message = if identity.is_some() {
        "Signed in"
    } else {
        "Signed out"
    };

    Ok(StdResponse {
        data: identity,
        message: Some(message),
    })
}

// Passwords and emails beyond the display name are not checked, so they are
// not modelled here.

#[derive(Deserialize, ToSchema)]
pub struct SignInReq {
    pub email: String,
    pub role: Role,
}

#[derive(Deserialize, ToSchema)]
pub struct SignUpReq {
    pub name: String,
    pub role: Role,
}

#[derive(Serialize, ToSchema)]
pub struct SignInRes {
    pub identity: Identity,
    pub redirect_to: String,
}

fn start_session(
    state: &AppState,
    session_id: SessionId,
    name: &str,
    role: Role,
) -> Result<SignInRes, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Please enter your name".into()));
    }

    let identity = Identity {
        name: name.to_owned(),
        role,
    };
    state.sessions.with_session(session_id.0, |session| {
        session.identity.set_identity(Some(identity.clone()))
    })?;

    Ok(SignInRes {
        redirect_to: role.home_path().to_owned(),
        identity,
    })
}

/// Sign in. The display name is the part of the email before `@`.
#[utoipa::path(
    post,
    path = "/sign-in",
    tags = ["Auth"],
    security(("sessionId" = [])),
    request_body = SignInReq,
    responses(
        (status = 200, description = "Signed in", body = StdResponse<SignInRes, String>),
        (status = 400, description = "Missing email")
    )
)]
async fn sign_in(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(body): Json<SignInReq>,
) -> Result<impl IntoResponse, AppError> {
    let name = body.email.split('@').next().unwrap_or_default();
    let res = start_session(&state, session_id, name, body.role)?;

    Ok(StdResponse {
        data: Some(res),
        message: Some("Welcome back!"),
    })
}

/// Create an account and sign in with the given display name.
#[utoipa::path(
    post,
    path = "/sign-up",
    tags = ["Auth"],
    security(("sessionId" = [])),
    request_body = SignUpReq,
    responses(
        (status = 200, description = "Signed up", body = StdResponse<SignInRes, String>),
        (status = 400, description = "Missing name")
    )
)]
async fn sign_up(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(body): Json<SignUpReq>,
) -> Result<impl IntoResponse, AppError> {
    let res = start_session(&state, session_id, &body.name, body.role)?;

    Ok(StdResponse {
        data: Some(res),
        message: Some("Account created successfully!"),
    })
}

/// Sign out. The cart of this session is kept.
#[utoipa::path(
    post,
    path = "/logout",
    tags = ["Auth"],
    security(("sessionId" = [])),
    responses(
        (status = 200, description = "Signed out", body = StdResponse<Identity, String>)
    )
)]
async fn logout(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<impl IntoResponse, AppError> {
    state
        .sessions
        .with_session(session_id.0, |session| session.identity.set_identity(None))?;

    Ok(StdResponse::<Identity, &str> {
        data: None,
        message: Some("Signed out"),
    })
}
