use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::entities::user::{User, UserId, UserRole};
use crate::error::{AppError, AppResult};

/// Session identity carried by the bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: UserId,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn for_user(user: &User, issued_at: DateTime<Utc>, expiration_hours: i64) -> AppResult<Self> {
        let exp = Duration::try_hours(expiration_hours)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::Internal(format!("Token lifetime of {} hours is out of range", expiration_hours))
            })?;

        Ok(Self {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
        })
    }
}

pub fn create_token(user: &User, secret: &str, expiration_hours: i64) -> AppResult<String> {
    let claims = Claims::for_user(user, Utc::now(), expiration_hours)?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(id: UserId, role: UserRole) -> User {
        User {
            id,
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
            patronymic: None,
            email: format!("user{}@example.com", id),
            password_hash: String::new(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
            role,
        }
    }

    #[test]
    fn test_token_roundtrip_keeps_subject_and_role() {
        let token = create_token(&user(3, UserRole::User), "secret", 1).unwrap();
        let claims = verify_token(&token, "secret").unwrap();

        assert_eq!(claims.sub, 3);
        assert_eq!(claims.email, "user3@example.com");
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token(&user(1, UserRole::TourAdmin), "a", 1).unwrap();
        assert!(matches!(
            verify_token(&token, "b"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = create_token(&user(1, UserRole::User), "secret", -2).unwrap();
        assert!(verify_token(&token, "secret").is_err());
    }

    #[test]
    fn test_oversized_lifetime_is_an_error() {
        let result = Claims::for_user(&user(1, UserRole::User), Utc::now(), i64::MAX);
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
