//! Client configuration: where the backend lives and how the client introduces
//! itself.
//!
//! The base address is an explicit value handed to
//! [`crate::ResourceClient::new`]. Nothing in this crate reads or persists it
//! globally; pointing at a different backend means building a new client.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::path::ResourcePath;

/// Address used when nothing else is configured.
pub const DEFAULT_BASE_ADDRESS: &str = "http://localhost:8000";

/// The validated `http(s)://host[:port][/prefix]` every resource path is
/// resolved against.
///
/// Accepts a bare `host:port` (the form users type into a settings field) and
/// assumes `http://` for it. Query strings and fragments are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BaseAddress(Url);

impl BaseAddress {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid(raw, "address is empty"));
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

        let mut url = Url::parse(&candidate).map_err(|e| invalid(raw, e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(raw, format!("unsupported scheme '{other}'"))),
        }
        if url.host_str().is_none() {
            return Err(invalid(raw, "missing host"));
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Resolves `path` below this address, keeping any path prefix.
    ///
    /// Each segment is percent-encoded on its own, so an identifier can never
    /// introduce extra path levels.
    pub fn resolve(&self, path: &ResourcePath) -> Url {
        let mut url = self.0.clone();
        // Only cannot-be-a-base URLs refuse segments; `parse` admits none.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.segments());
        }
        url
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

fn invalid(address: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidBaseAddress {
        address: address.to_string(),
        reason: reason.into(),
    }
}

impl Default for BaseAddress {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_BASE_ADDRESS).expect("DEFAULT_BASE_ADDRESS is a valid URL"))
    }
}

impl std::str::FromStr for BaseAddress {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BaseAddress {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BaseAddress> for String {
    fn from(address: BaseAddress) -> Self {
        address.to_string()
    }
}

impl std::fmt::Display for BaseAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str().trim_end_matches('/'))
    }
}

// ---------------------------------------------------------------------------

/// Everything a [`crate::ResourceClient`] is constructed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_address: BaseAddress,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_address: BaseAddress) -> Self {
        Self {
            base_address,
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_address: BaseAddress::default(),
            user_agent: concat!("safewatch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
