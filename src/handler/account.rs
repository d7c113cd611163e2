//! Registration and login
//!
//! Customers register with an email and password and log in for a customer
//! token. The back office uses a single admin account from `Config`.

use axum::{extract::State, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{hash_password, issue_token, secrets_match, verify_password, Role};
use crate::database::{self, AppState, TABLE_USERS};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::handler::normalize_email;
use crate::model::{AdminLoginRequest, LoginRequest, RegisterRequest, RegisterResponse, Token, User};
use crate::validation::validate_registration;

pub const USER_EXISTS: &str = "User already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const INVALID_ADMIN_CREDENTIALS: &str = "Incorrect login or password";

/// Registers a customer account
///
/// # Response
///
/// - **200 OK** - `{"message": "...", "user_id": "..."}`
/// - **400 Bad Request** - Invalid email/password, or the email is taken
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    validate_registration(&payload.email, &payload.password)?;

    let email = normalize_email(&payload.email);
    let cost = state.config.password_cost;
    let password = payload.password;
    let password_hash = run_blocking(move || hash_password(&password, cost)).await??;

    let user = User {
        id: Uuid::new_v4().to_string(),
        email: email.clone(),
        password_hash,
        created_at: Utc::now(),
    };

    if !database::insert_new(&state.db, TABLE_USERS, &email, &user)? {
        return Err(AppError::BadRequest(USER_EXISTS.to_string()));
    }

    tracing::info!(user_id = %user.id, "user registered");
    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id: user.id,
    }))
}

/// Exchanges customer credentials for a bearer token
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<Token>, AppError> {
    let email = normalize_email(&payload.email);
    let user: Option<User> = database::get(&state.db, TABLE_USERS, &email)?;

    let Some(user) = user else {
        tracing::debug!("rejected customer login");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let password = payload.password;
    let stored = user.password_hash.clone();
    if !run_blocking(move || verify_password(&password, &stored)).await? {
        tracing::debug!("rejected customer login");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    Ok(Json(issue_token(&state.config, &user.email, Role::Customer)?))
}

pub async fn admin_login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AdminLoginRequest>,
) -> Result<Json<Token>, AppError> {
    let login_ok = secrets_match(&payload.login, &state.config.admin_login);
    let password_ok = secrets_match(&payload.password, &state.config.admin_password);
    if !(login_ok & password_ok) {
        tracing::warn!(login = %payload.login, "rejected admin login");
        return Err(AppError::Unauthorized(INVALID_ADMIN_CREDENTIALS.to_string()));
    }

    Ok(Json(issue_token(&state.config, &payload.login, Role::Admin)?))
}

/// Runs password hashing on the blocking pool
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Password task failed: {}", e)))
}
