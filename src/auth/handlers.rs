use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
        jwt::JwtKeys,
        password::{check_password_policy, hash_password, verify_password},
        repo::User,
    },
    error::{is_unique_violation, ApiError},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let email = normalize_email(payload.email.as_deref().unwrap_or(""));
    let password = payload.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        warn!("register missing fields");
        return Err(ApiError::Validation("All fields are required".into()));
    }

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email format".into()));
    }

    if let Err(rule) = check_password_policy(&password) {
        warn!("register password rejected by policy");
        return Err(ApiError::Validation(rule.into()));
    }

    // Fast path only; the unique constraint on email is the authoritative
    // arbiter under concurrent registration.
    if let Ok(Some(_)) = User::find_by_email(&state.db, &email).await {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Conflict("Email already in use"));
    }

    let hash =
        hash_password(&password).map_err(|e| ApiError::internal("Failed to register user", e))?;

    let user = match User::create(&state.db, &email, &hash).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "email already registered, insert race lost");
            return Err(ApiError::Conflict("Email already in use"));
        }
        Err(e) => return Err(ApiError::internal("Failed to register user", e)),
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(user.id, &user.email)
        .map_err(|e| ApiError::internal("Failed to register user", e))?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully",
            user: PublicUser {
                id: user.id,
                email: user.email,
            },
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = normalize_email(payload.email.as_deref().unwrap_or(""));
    let password = payload.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        warn!("login missing fields");
        return Err(ApiError::Validation("All fields are required".into()));
    }

    // Unknown email and wrong password must be indistinguishable to the
    // caller.
    let user = match User::find_by_email(&state.db, &email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::Auth("Invalid credentials"));
        }
        Err(e) => return Err(ApiError::internal("Failed to login", e)),
    };

    let ok = verify_password(&password, &user.password_hash)
        .map_err(|e| ApiError::internal("Failed to login", e))?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Auth("Invalid credentials"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(user.id, &user.email)
        .map_err(|e| ApiError::internal("Failed to login", e))?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        message: "Login successful",
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
        token,
    }))
}
