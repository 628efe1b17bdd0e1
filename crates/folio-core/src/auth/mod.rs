//! Shared-secret checks, admin credentials and bearer tokens.

pub mod token;

use subtle::ConstantTimeEq;

/// Prefix of an `Authorization` header carrying a bearer token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Compares a submitted secret against the configured one in constant time.
///
/// An empty expected secret never matches.
pub fn secrets_match(provided: &str, expected: &str) -> bool {
    if expected.is_empty() || provided.len() != expected.len() {
        return false;
    }
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Extracts the token from an `Authorization` header value.
///
/// Returns `None` when the prefix is missing or nothing follows it.
pub fn parse_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The single administrative login.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks a username/password pair. Both halves are always compared.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = secrets_match(username, &self.username);
        let pass_ok = secrets_match(password, &self.password);
        user_ok & pass_ok
    }
}
