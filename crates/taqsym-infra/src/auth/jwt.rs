//! JWT bearer credential verification.

use chrono::DateTime;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use serde_json::Value;

use taqsym_core::domain::IdentityClaim;
use taqsym_core::ports::{AuthError, TokenVerifier};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// Only the shared-secret family is accepted.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT verifier configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Clock skew tolerated on `exp`, in seconds.
    pub leeway_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            leeway_seconds: 60,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            leeway_seconds: std::env::var("JWT_LEEWAY_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        }
    }
}

/// Claims the identity service puts in its tokens.
///
/// `user_id` stays untyped so a wrong shape is reported as a missing subject
/// rather than a generic decode failure.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    user_id: Option<Value>,
    exp: i64,
    #[serde(default)]
    iat: Option<i64>,
}

/// HMAC-signed JWT verifier holding the pre-shared secret.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

/// Split `"Bearer <token>"` into its token part.
fn bearer_token(credential: &str) -> Result<&str, AuthError> {
    let mut parts = credential.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}

/// JSON numbers arrive as floats from some issuers; accept integral ones.
fn numeric_subject(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, credential: &str) -> Result<IdentityClaim, AuthError> {
        let token = bearer_token(credential)?;

        let header = decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "unreadable token header");
            AuthError::InvalidToken
        })?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            tracing::debug!(alg = ?header.alg, "token signed with non-HMAC algorithm");
            return Err(AuthError::InvalidSignature);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
                _ => {
                    tracing::debug!(error = %e, "token rejected");
                    AuthError::InvalidToken
                }
            },
        )?;
        let claims = token_data.claims;

        let subject_id = claims
            .user_id
            .as_ref()
            .and_then(numeric_subject)
            .ok_or(AuthError::MissingSubject)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(AuthError::InvalidToken)?;

        Ok(IdentityClaim {
            subject_id,
            issued_at: claims.iat.and_then(|t| DateTime::from_timestamp(t, 0)),
            expires_at,
        })
    }
}
