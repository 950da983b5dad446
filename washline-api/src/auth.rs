use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::middleware::auth::{Claims, ROLE_ADMIN, ROLE_CLIENT};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/auth/login", post(login))
}

/// Demo token issuer. The hosted auth provider is out of scope; this is the
/// seam it would plug into.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.role != ROLE_CLIENT && req.role != ROLE_ADMIN {
        return Err(AppError::Validation(format!("unknown role: {}", req.role)));
    }

    let claims = Claims {
        sub: req.user_id,
        name: req.name,
        role: req.role,
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token encoding failed: {e}")))?;

    Ok(Json(AuthResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn test_claims_roundtrip() {
        let secret = b"test-secret";
        let claims = Claims {
            sub: "client-1".to_string(),
            name: "Asha".to_string(),
            role: ROLE_CLIENT.to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };

        let token =
            encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, "client-1");
        assert_eq!(decoded.claims.role, ROLE_CLIENT);
    }
}
