use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    entity::admins::{ActiveModel as AdminActive, Column as AdminCol, Entity as Admins, Model as AdminModel},
    error::{AppError, AppResult},
    response::MessageResponse,
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const USERNAME_TAKEN: &str = "Username is already taken";

/// Single-row lookup on the unique `username` index.
pub async fn find_by_username<C: ConnectionTrait>(
    conn: &C,
    username: &str,
) -> AppResult<Option<AdminModel>> {
    let admin = Admins::find()
        .filter(AdminCol::Username.eq(username))
        .one(conn)
        .await?;
    Ok(admin)
}

pub async fn register_admin(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<MessageResponse> {
    let RegisterRequest { username, password } = payload;
    if username.trim().is_empty() {
        return Err(AppError::BadRequest("username is required".into()));
    }
    if password.is_empty() {
        return Err(AppError::BadRequest("password is required".into()));
    }

    if find_by_username(&state.orm, &username).await?.is_some() {
        return Err(AppError::BadRequest(USERNAME_TAKEN.into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    // The pre-check above can race; the unique index has the final word.
    let admin = AdminActive {
        id: Set(Uuid::new_v4()),
        username: Set(username),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::BadRequest(USERNAME_TAKEN.into()),
        _ => AppError::from(err),
    })?;

    tracing::info!(admin_id = %admin.id, username = %admin.username, "admin registered");
    Ok(MessageResponse::new("Admin created successfully"))
}

pub async fn login_admin(state: &AppState, payload: LoginRequest) -> AppResult<LoginResponse> {
    let LoginRequest { username, password } = payload;

    // Same error for unknown user and wrong password.
    let admin = match find_by_username(&state.orm, &username).await? {
        Some(a) => a,
        None => return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
    };

    let parsed_hash = PasswordHash::new(&admin.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let token = issue_token(&state.config, admin.id, &admin.username)?;

    tracing::info!(admin_id = %admin.id, "admin logged in");
    Ok(LoginResponse { token })
}

/// Sign an HS256 token for the admin, valid for `token_ttl_secs`.
pub fn issue_token(config: &AppConfig, admin_id: Uuid, username: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::seconds(config.token_ttl_secs))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        id: admin_id,
        username: username.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Check signature and expiry, returning the decoded claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(decoded.claims)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config(ttl: i64) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "unit-test-secret".into(),
            token_ttl_secs: ttl,
            static_dir: PathBuf::from("static"),
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let config = config(3600);
        let id = Uuid::new_v4();
        let token = issue_token(&config, id, "alice").unwrap();

        let claims = verify_token(&config.jwt_secret, &token).unwrap();
        assert_eq!(claims.id, id);
        assert_eq!(claims.username, "alice");
        let remaining = claims.exp as i64 - Utc::now().timestamp();
        assert!((3590..=3600).contains(&remaining));
    }

    #[test]
    fn rejects_wrong_secret() {
        let config = config(3600);
        let token = issue_token(&config, Uuid::new_v4(), "alice").unwrap();
        assert!(verify_token("another-secret", &token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let claims = Claims {
            id: Uuid::new_v4(),
            username: "alice".into(),
            exp: (Utc::now().timestamp() - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();
        assert!(verify_token("unit-test-secret", &token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify_token("unit-test-secret", "not-a-token").is_err());
    }
}
