use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Issues the bearer token returned by register/login. One hour expiry.
pub fn issue_token(user_id: Uuid, role: &str, secret: &str) -> Result<String> {
    let exp = (chrono::Utc::now().timestamp() + TOKEN_TTL_SECS) as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        role: Some(role.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    #[test]
    fn issued_token_decodes_back() {
        let id = Uuid::new_v4();
        let token = issue_token(id, "recruiter", "test_secret").expect("issue");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test_secret"),
            &validation,
        )
        .expect("decode");
        assert_eq!(data.claims.sub, id.to_string());
        assert_eq!(data.claims.role.as_deref(), Some("recruiter"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), "candidate", "secret_a").expect("issue");
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        assert!(
            decode::<Claims>(&token, &DecodingKey::from_secret(b"secret_b"), &validation).is_err()
        );
    }
}
