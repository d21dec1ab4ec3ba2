use std::{error::Error as StdError, fmt};

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::error::AppError;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    exp: i64,
    iat: i64,
}

// Errors returned by access-token verification.
#[derive(Debug)]
pub enum AuthTokenError {
    Jwt(jsonwebtoken::errors::Error),
    InvalidSubUuid,
}

impl fmt::Display for AuthTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::InvalidSubUuid => write!(f, "invalid 'sub' (expected UUID)"),
        }
    }
}

impl StdError for AuthTokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthTokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// HS256 token issuer/verifier over the process-wide signing secret.
///
/// 発行と検証が同一プロセスなので共有シークレット (HMAC)。
/// シークレットを差し替えると発行済み token は全て無効になる (revocation list は持たない)。
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, ttl_seconds: u64, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    /// Issue a signed token for the given user.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            exp: now + self.ttl_seconds as i64,
            iat: now,
        };

        let header = Header::new(Algorithm::HS256);
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign access token");
            AppError::internal(e)
        })
    }

    /// Verify a token and resolve the subject.
    ///
    /// `jsonwebtoken::Validation` checks the signature and `exp` (with the
    /// configured leeway). The project convention is that `sub` is a UUID,
    /// so a non-UUID subject fails closed.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthTokenError> {
        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthTokenError::InvalidSubUuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svc(ttl_seconds: u64) -> AuthService {
        AuthService::new("test-secret", ttl_seconds, 0)
    }

    fn sign(claims: &AccessTokenClaims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issue_then_verify_resolves_subject() {
        let svc = svc(3600);
        let user_id = Uuid::new_v4();
        let token = svc.issue(user_id).unwrap();
        assert_eq!(svc.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = svc(3600);
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: Uuid::new_v4().to_string(),
            exp: now - 10,
            iat: now - 20,
        };
        let token = sign(&claims, "test-secret");
        assert!(svc.verify(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let svc = svc(3600);
        let other = AuthService::new("other-secret", 3600, 0);
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(svc.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(svc(3600).verify("not-a-token").is_err());
    }

    #[test]
    fn non_uuid_subject_fails_closed() {
        let svc = svc(3600);
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: "42".to_string(),
            exp: now + 60,
            iat: now,
        };
        let token = sign(&claims, "test-secret");
        assert!(matches!(
            svc.verify(&token),
            Err(AuthTokenError::InvalidSubUuid)
        ));
    }
}
