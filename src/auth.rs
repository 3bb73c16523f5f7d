//! Authentication: user registration, login and JWT verification.
//!
//! Password hashing is delegated to argon2 and token signing to
//! jsonwebtoken; no custom crypto lives here.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::user::{self, Entity as UserEntity, Model as UserModel},
    errors::ServiceError,
};

/// JWT claims carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must have at least 8 characters"))]
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: UserModel,
}

/// Issues and verifies tokens and manages user accounts.
#[derive(Clone)]
pub struct AuthService {
    db: Arc<DbPool>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(db: Arc<DbPool>, jwt_secret: String, token_ttl_secs: i64) -> Self {
        Self {
            db,
            jwt_secret,
            token_ttl: Duration::seconds(token_ttl_secs),
        }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<UserModel, ServiceError> {
        request.validate()?;

        let existing = UserEntity::find()
            .filter(user::Column::Email.eq(request.email.clone()))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Email {} is already registered",
                request.email
            )));
        }

        let password_hash = hash_password(&request.password)?;

        let created = user::ActiveModel {
            name: Set(request.name),
            email: Set(request.email),
            password_hash: Set(password_hash),
            role: Set(request.role.unwrap_or_else(|| "user".to_string())),
            active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(user_id = created.id, "User registered");
        Ok(created)
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ServiceError> {
        request.validate()?;

        let found = UserEntity::find()
            .filter(user::Column::Email.eq(request.email.clone()))
            .one(&*self.db)
            .await?;

        // A missing account and a wrong password produce the same error.
        let account = match found {
            Some(account) if account.active => account,
            _ => return Err(ServiceError::AuthError("Invalid credentials".to_string())),
        };

        if !verify_password(&request.password, &account.password_hash)? {
            return Err(ServiceError::AuthError("Invalid credentials".to_string()));
        }

        let (token, expires_at) = self.issue_token(&account)?;
        Ok(TokenResponse {
            token,
            expires_at,
            user: account,
        })
    }

    pub fn issue_token(&self, account: &UserModel) -> Result<(String, i64), ServiceError> {
        let now = Utc::now();
        let expires_at = (now + self.token_ttl).timestamp();
        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role.clone(),
            iat: now.timestamp(),
            exp: expires_at,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::InternalError(format!("Token signing failed: {}", e)))?;

        Ok((token, expires_at))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| ServiceError::AuthError("Invalid or expired token".to_string()))?;

        Ok(data.claims)
    }
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::InternalError(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ServiceError::InternalError(format!("Stored hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Extractor that requires a valid bearer token. Added as a handler argument
/// on every protected route.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = parts
            .extensions
            .get::<Arc<AuthService>>()
            .cloned()
            .ok_or_else(|| {
                ServiceError::InternalError("Auth service not configured".to_string())
            })?;

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ServiceError::AuthError("Missing authorization header".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ServiceError::AuthError("Expected a bearer token".to_string()))?;

        let claims = auth_service.verify_token(token)?;
        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }
}
