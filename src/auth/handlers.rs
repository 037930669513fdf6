use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, MessageResponse, SignupRequest},
        password::{hash_password, verify_password},
        record::UserRecord,
        validation::validate_signup,
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let new_user = validate_signup(payload)?;

    // Cheap conflict checks before paying for the hash. The store's
    // insert re-checks both under its write lock, so a racing
    // registration slipping past these still cannot double-insert.
    if state
        .store
        .find_by_username(&new_user.username)
        .await
        .is_some()
    {
        warn!(username = %new_user.username, "username already taken");
        return Err(AppError::Conflict("username is already taken".into()));
    }
    if state.store.find_by_email(&new_user.email).await.is_some() {
        warn!(email = %new_user.email, "email already registered");
        return Err(AppError::Conflict("email is already registered".into()));
    }

    let hashed = hash_password(&new_user.password)?;

    let record = UserRecord {
        username: new_user.username.clone(),
        email: new_user.email,
        role: new_user.role,
        password_salt: hashed.salt,
        password_hash: hashed.hash,
        created_at: OffsetDateTime::now_utc(),
    };

    if let Err(e) = state.store.insert(record).await {
        warn!(username = %new_user.username, error = %e, "registration lost uniqueness race");
        return Err(AppError::Conflict(e.to_string()));
    }

    info!(username = %new_user.username, role = new_user.role.as_str(), "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "user registered",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let username = payload.username.trim();
    let password = payload.password.trim();

    // Unknown username and wrong password must be indistinguishable to
    // the caller.
    let user = match state.store.find_by_username(username).await {
        Some(u) => u,
        None => {
            warn!(username = %username, "login with unknown username");
            return Err(AppError::InvalidCredentials);
        }
    };

    let ok = verify_password(password, &user.password_hash)?;
    if !ok {
        warn!(username = %username, "login with invalid password");
        return Err(AppError::InvalidCredentials);
    }

    info!(username = %username, "user logged in");
    Ok(Json(MessageResponse {
        message: "login successful",
    }))
}
