//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user
    pub async fn register(
        pool: &PgPool,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<User> {
        if UserRepository::find_by_username(pool, username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists("Username already taken".to_string()));
        }

        if UserRepository::find_by_email(pool, email).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "Email already registered".to_string(),
            ));
        }

        let password_hash = Self::hash_password(password)?;

        UserRepository::create(pool, username, email, &password_hash).await
    }

    /// Login with username/email and password; returns the user and a token
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtConfig,
        identifier: &str,
        password: &str,
    ) -> AppResult<(User, String, i64)> {
        let user = UserRepository::find_by_identifier(pool, identifier)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let (token, expires_in) = Self::generate_token(&user, jwt)?;

        Ok((user, token, expires_in))
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(pool, user_id).await
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate a signed access token
    fn generate_token(user: &User, jwt: &JwtConfig) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(jwt.expiry_hours);
        let expires_in = jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiry_hours: 24,
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = AuthService::hash_password("Password123").unwrap();
        assert!(AuthService::verify_password("Password123", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_token_roundtrip() {
        let user = user();
        let config = jwt_config();

        let (token, expires_in) = AuthService::generate_token(&user, &config).unwrap();
        assert_eq!(expires_in, 24 * 3600);

        let claims = AuthService::verify_token(&token, &config.secret).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let user = user();
        let config = jwt_config();

        let (token, _) = AuthService::generate_token(&user, &config).unwrap();
        assert!(AuthService::verify_token(&token, "other-secret").is_err());
    }
}
