//! Demo login
//!
//! Any known email signs in with the shared demo password.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::Role;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user_id: Uuid,
    pub role: Role,
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.password != state.settings.demo_password {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let email = req.email.trim().to_lowercase();
    let (user_id, role) = if email == state.settings.admin_email {
        (state.admin_id, Role::Admin)
    } else {
        let entry = state
            .marketplace
            .read()
            .find_by_email(&email)
            .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;
        (entry.user_id, entry.role)
    };

    let access_token = state.tokens.issue(user_id, role)?;
    tracing::info!(user_id = %user_id, role = %role, "User signed in");

    Ok(DataResponse::new(LoginResponse {
        access_token,
        token_type: "bearer",
        expires_in: state.tokens.ttl_seconds(),
        user_id,
        role,
    }))
}
