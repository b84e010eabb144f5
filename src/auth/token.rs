use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a token may be used for. Encoded inside the payload and checked on
/// every verification, so a verification link can never double as a session
/// credential and vice versa.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TokenPurpose {
    Session,
    EmailVerification,
}

/// Claims encoded within a JWT issued by [`TokenService`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// The purpose this token was issued for.
    pub purpose: TokenPurpose,
    /// Issuance timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Why a token failed verification. Callers at the HTTP boundary collapse all
/// three into one generic response; the distinction exists for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature check failed or the payload could not be decoded.
    Invalid,
    /// The token's expiry is in the past.
    Expired,
    /// The token is genuine but was issued for a different purpose.
    PurposeMismatch,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Invalid => write!(f, "invalid token"),
            TokenError::Expired => write!(f, "token expired"),
            TokenError::PurposeMismatch => write!(f, "token purpose mismatch"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issues and verifies signed, time-limited tokens (HS256).
///
/// Built once at startup from the configured signing secret and TTLs and
/// shared by the handlers and the authentication middleware. Rotating the
/// secret invalidates all outstanding tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
    verification_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, session_ttl_secs: i64, verification_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl: Duration::seconds(session_ttl_secs),
            verification_ttl: Duration::seconds(verification_ttl_secs),
        }
    }

    /// Issues a session token for an authenticated user (default TTL one hour).
    pub fn issue_session(&self, user_id: i32) -> Result<String, TokenError> {
        self.issue(user_id, TokenPurpose::Session, self.session_ttl)
    }

    /// Issues a single-purpose email-verification token (default TTL 24 hours).
    pub fn issue_verification(&self, user_id: i32) -> Result<String, TokenError> {
        self.issue(user_id, TokenPurpose::EmailVerification, self.verification_ttl)
    }

    fn issue(&self, user_id: i32, purpose: TokenPurpose, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or(TokenError::Invalid)?
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id,
            purpose,
            iat: now.timestamp() as usize,
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| TokenError::Invalid)
    }

    /// Verifies a token string against an expected purpose, returning the
    /// subject id it asserts.
    ///
    /// Expiry is evaluated against the verifier's wall clock with no leeway.
    /// A token whose payload lacks the purpose claim entirely fails decoding
    /// and reports `Invalid`.
    pub fn verify(&self, token: &str, expected: TokenPurpose) -> Result<i32, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        if claims.purpose != expected {
            return Err(TokenError::PurposeMismatch);
        }

        Ok(claims.sub)
    }
}
