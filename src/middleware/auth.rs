use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

/// The caller of a protected operation: a verified user id plus role.
/// Every role and ownership predicate in the service layer runs against
/// this one type.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn from_claims(claims: &Claims) -> Result<Self> {
        let id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| Error::Unauthorized("invalid_token".to_string()))?;
        let role = claims
            .role
            .as_deref()
            .and_then(Role::parse)
            .ok_or_else(|| Error::Unauthorized("invalid_token".to_string()))?;
        Ok(Self { id, role })
    }

    pub fn ensure_role(&self, role: Role) -> Result<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(Error::Forbidden(format!("{} role required", role)))
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let Some(auth_header) = headers.get(AUTHORIZATION) else {
        return Err(Error::Unauthorized("missing_authorization".to_string()));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(Error::Unauthorized("bad_authorization".to_string()));
    };
    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthorized("unsupported_scheme".to_string()))
}

pub fn decode_claims(token: &str) -> Result<Claims> {
    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| Error::Unauthorized("invalid_token".to_string()))
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let claims = bearer_token(&parts.headers).and_then(|t| decode_claims(t))?;
        Actor::from_claims(&claims)
    }
}

/// Gate for the `/api/admin` router group.
pub async fn require_admin(mut req: Request, next: Next) -> Response {
    let actor = match bearer_token(req.headers())
        .and_then(|t| decode_claims(t))
        .and_then(|c| Actor::from_claims(&c))
    {
        Ok(actor) => actor,
        Err(err) => return err.into_response(),
    };

    if actor.role != Role::Admin {
        return Error::Forbidden("Access denied: Admins only".to_string()).into_response();
    }

    req.extensions_mut().insert(actor);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_from_well_formed_claims() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            exp: 0,
            role: Some("recruiter".to_string()),
        };
        let actor = Actor::from_claims(&claims).expect("actor");
        assert_eq!(actor.id, id);
        assert_eq!(actor.role, Role::Recruiter);
    }

    #[test]
    fn actor_rejects_bad_sub_or_role() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            exp: 0,
            role: Some("candidate".to_string()),
        };
        assert!(matches!(
            Actor::from_claims(&claims),
            Err(Error::Unauthorized(_))
        ));

        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: 0,
            role: Some("hr".to_string()),
        };
        assert!(matches!(
            Actor::from_claims(&claims),
            Err(Error::Unauthorized(_))
        ));

        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: 0,
            role: None,
        };
        assert!(matches!(
            Actor::from_claims(&claims),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn ensure_role_is_exact() {
        let actor = Actor {
            id: Uuid::new_v4(),
            role: Role::Candidate,
        };
        assert!(actor.ensure_role(Role::Candidate).is_ok());
        assert!(matches!(
            actor.ensure_role(Role::Recruiter),
            Err(Error::Forbidden(_))
        ));
    }
}
