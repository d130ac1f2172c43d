//! Access token configuration.
//!
//! Every request to the API must carry an access token. It can be set for the whole process with
//! [`set_default_access_token`] once at startup, or for a specific client with
//! [`ClientBuilder::with_access_token`](crate::ClientBuilder::with_access_token). The client-level
//! token takes precedence.

use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

use crate::error::MapirError;

/// Environment variable read by [`AccessToken::from_env`].
pub const ACCESS_TOKEN_ENV: &str = "MAPIR_API_KEY";

static DEFAULT_ACCESS_TOKEN: OnceLock<AccessToken> = OnceLock::new();

/// Non-empty API access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Arc<str>);

impl AccessToken {
    /// Creates a new token. Fails if the token is empty or consists of whitespace only.
    pub fn new(token: impl Into<String>) -> Result<Self, MapirError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(MapirError::Configuration(
                "access token cannot be empty".into(),
            ));
        }

        Ok(Self(token.into()))
    }

    /// Reads the token from the `MAPIR_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, MapirError> {
        let token = std::env::var(ACCESS_TOKEN_ENV).map_err(|_| {
            MapirError::Configuration(format!("environment variable {ACCESS_TOKEN_ENV} is not set"))
        })?;
        Self::new(token)
    }

    /// Token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(***)")
    }
}

/// Sets the access token used by all clients that do not have their own one.
///
/// The default token can be set only once; subsequent calls return an error.
pub fn set_default_access_token(token: AccessToken) -> Result<(), MapirError> {
    DEFAULT_ACCESS_TOKEN.set(token).map_err(|_| {
        MapirError::Configuration("default access token is already set".into())
    })
}

/// Returns the process-wide default access token, if it was set.
pub fn default_access_token() -> Option<&'static AccessToken> {
    DEFAULT_ACCESS_TOKEN.get()
}

pub(crate) fn resolve_access_token(own: Option<&AccessToken>) -> Option<AccessToken> {
    own.cloned().or_else(|| default_access_token().cloned())
}
