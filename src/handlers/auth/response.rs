//! Authentication response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User information in auth responses
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::models::User> for UserResponse {
    fn from(user: crate::models::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Authentication token response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Registration success response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
}

/// Current user response (for /me endpoint)
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: UserResponse,
}
