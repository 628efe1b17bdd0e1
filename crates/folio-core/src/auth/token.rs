//! Stateless signed session tokens.
//!
//! Tokens use the compact JWT layout with HS256: `header.claims.signature`, each
//! segment base64url-encoded without padding. Validity depends only on the
//! signature and the `exp` claim; nothing is stored server-side.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

/// Token errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not three well-formed segments.
    #[error("Malformed token")]
    Malformed,

    /// The header names an algorithm other than HS256.
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The signature does not match.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The token is past its expiry.
    #[error("Token expired")]
    Expired,

    /// The token could not be produced.
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Issues and verifies session tokens with a shared HMAC key.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"***")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer. Tokens it issues live for `ttl`.
    pub fn new(secret: impl AsRef<[u8]>, ttl: std::time::Duration) -> Result<Self, TokenError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(TokenError::Signing("signing secret is empty".to_string()));
        }
        let ttl = Duration::from_std(ttl).map_err(|e| TokenError::Signing(e.to_string()))?;
        Ok(Self {
            secret: secret.to_vec(),
            ttl,
        })
    }

    /// Issues a token for `username` valid from now.
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, Utc::now())
    }

    /// Issues a token as if the current time were `issued_at`.
    pub fn issue_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };
        let claims = TokenClaims {
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        let header = serde_json::to_vec(&header).map_err(|e| TokenError::Signing(e.to_string()))?;
        let claims = serde_json::to_vec(&claims).map_err(|e| TokenError::Signing(e.to_string()))?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Verifies a token against the current time.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let claims: TokenClaims = decode_segment(claims_b64)?;
        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| TokenError::Signing(e.to_string()))
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}
