//! Authentication route handlers.
//!
//! Registration and login create a session; `me` reports the current
//! identity without ever failing; logout destroys the session.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, PublicUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Registration request body.
///
/// Fields are optional at the serde level so a missing field yields a 400
/// `{"error"}` body instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response body of `GET /api/auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<CurrentUser>,
}

/// Response body of `POST /api/auth/logout`.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

fn require(field: Option<String>, name: &str) -> Result<String> {
    field
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("missing field: {name}")))
}

async fn start_session(session: &Session, user: &User) -> Result<()> {
    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        nombre: user.nombre.clone(),
    };
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to set session: {e}")))
}

// =============================================================================
// Handlers
// =============================================================================

/// Create an account and log it in.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>)> {
    let email = require(body.email, "email")?;
    let nombre = require(body.nombre, "nombre")?;
    let apellido = require(body.apellido, "apellido")?;
    let password = require(body.password, "password")?;

    let auth = AuthService::new(state.users());
    let user = auth.register(&email, &nombre, &apellido, &password).await?;

    start_session(&session, &user).await?;

    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

/// Log an existing account in.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<PublicUser>> {
    let email = require(body.email, "email")?;
    let password = require(body.password, "password")?;

    let auth = AuthService::new(state.users());
    let user = auth.login(&email, &password).await?;

    start_session(&session, &user).await?;

    Ok(Json(PublicUser::from(&user)))
}

/// Report the current identity; `{"user": null}` when logged out.
#[instrument(skip_all)]
pub async fn me(OptionalAuth(user): OptionalAuth) -> Json<MeResponse> {
    Json(MeResponse { user })
}

/// End the session.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Json<OkResponse> {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Json(OkResponse { ok: true })
}
