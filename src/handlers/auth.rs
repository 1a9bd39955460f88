use axum::{extract::State, Extension, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::user::{User, UserId, UserRole};
use crate::error::{AppError, AppResult, DomainError};
use crate::extract::ApiJson;
use crate::store::account::NewUser;
use crate::utils::jwt::{create_token, Claims};
use crate::utils::password::{hash_password_blocking, verify_password_blocking};
use crate::AppState;

pub const MIN_PASSWORD_LENGTH: usize = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub patronymic: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub birth_date: NaiveDate,
    pub role: UserRole,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            patronymic: user.patronymic.clone(),
            birth_date: user.birth_date,
            role: user.role,
        }
    }
}

fn validate_registration(payload: &RegisterRequest) -> AppResult<NaiveDate> {
    let required = || AppError::Validation("Please fill in all required fields".to_string());

    let birth_date = payload.birth_date.ok_or_else(required)?;
    let fields = [
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &payload.password,
    ];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(required());
    }

    if payload.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(birth_date)
}

fn issue_token(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = create_token(user, &state.config.jwt_secret, state.config.jwt_expiration_hours)?;

    Ok(AuthResponse {
        token,
        user: UserInfo::from(user),
    })
}

/// Register a new user account
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let birth_date = validate_registration(&payload)?;

    // Check if email already exists
    if state.store.read().await.email_taken(&payload.email) {
        return Err(DomainError::EmailExists.into());
    }

    let password_hash = hash_password_blocking(payload.password.clone()).await?;

    let user = state.store.write().await.register(NewUser {
        first_name: payload.first_name,
        last_name: payload.last_name,
        patronymic: payload.patronymic.filter(|p| !p.trim().is_empty()),
        email: payload.email,
        password_hash,
        birth_date,
    })?;

    Ok(Json(issue_token(&state, &user)?))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("All fields are required".to_string()));
    }

    // Verify outside the store lock
    let credentials = state.store.read().await.credentials(&payload.email);
    let (user_id, password_hash) = credentials.ok_or(DomainError::InvalidCredentials)?;
    if !verify_password_blocking(payload.password, password_hash).await? {
        return Err(DomainError::InvalidCredentials.into());
    }

    let store = state.store.read().await;
    let user = store.user(user_id).ok_or(DomainError::InvalidCredentials)?;
    tracing::debug!(user_id, "User logged in");

    Ok(Json(issue_token(&state, user)?))
}

/// Forget the caller's navigation state
pub async fn logout(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<serde_json::Value>> {
    state.sessions.write().await.end(claims.sub);
    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: "Anna".to_string(),
            last_name: "Petrova".to_string(),
            patronymic: None,
            email: "anna@example.com".to_string(),
            password: password.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 1),
        }
    }

    #[test]
    fn test_registration_requires_fields() {
        let mut payload = request("secret");
        payload.last_name = "  ".to_string();
        assert!(matches!(
            validate_registration(&payload),
            Err(AppError::Validation(_))
        ));

        let mut payload = request("secret");
        payload.birth_date = None;
        assert!(validate_registration(&payload).is_err());
    }

    #[test]
    fn test_registration_password_length() {
        assert!(validate_registration(&request("ab")).is_err());
        assert!(validate_registration(&request("abc")).is_ok());
    }

    fn state() -> AppState {
        let config = crate::Config {
            jwt_secret: "secret".to_string(),
            jwt_expiration_hours: 1,
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            seed_url: None,
            seed_file: None,
            cancellation_window_days: 7,
            rate_limit_enabled: false,
        };
        AppState::new(crate::store::fixtures::store(), config)
    }

    fn credentials(email: &str, password: &str) -> ApiJson<LoginRequest> {
        ApiJson(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_login_issues_token_for_seed_user() {
        let state = state();
        let Json(response) = login(State(state), credentials("ivan@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(response.user.id, 3);
        let claims = crate::utils::jwt::verify_token(&response.token, "secret").unwrap();
        assert_eq!(claims.sub, 3);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let state = state();

        let wrong = login(State(state.clone()), credentials("ivan@example.com", "nope")).await;
        assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

        let unknown = login(State(state), credentials("nobody@example.com", "password123")).await;
        assert!(matches!(unknown, Err(AppError::Unauthorized(_))));
    }
}
