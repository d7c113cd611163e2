use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{verify_token, Role};
use crate::database::AppState;
use crate::error::AppError;

/// Middleware guarding the back office
///
/// Requires `Authorization: Bearer <token>` carrying an admin token. The
/// decoded `Claims` are inserted into the request extensions.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, Role::Admin, request, next).await
}

/// Middleware guarding customer-only endpoints such as booking
pub async fn require_customer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, Role::Customer, request, next).await
}

async fn authorize(
    state: &AppState,
    role: Role,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    let claims = verify_token(&state.config, token, role)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return None;
    }
    Some(token.trim())
}
