//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated ActiveCampaign API token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `ApiToken(*****)` instead of the actual value.
///
/// # Example
///
/// ```rust
/// use activecampaign::ApiToken;
///
/// let token = ApiToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated API token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// A validated account API URL.
///
/// Every ActiveCampaign account has its own API host, shown next to the API
/// token in the account settings (e.g. `https://myaccount.api-us1.com`).
/// Anything after the authority (such as a pasted `/api/3` suffix) is
/// ignored when building request URLs.
///
/// # Example
///
/// ```rust
/// use activecampaign::ApiUrl;
///
/// let url = ApiUrl::new("https://myaccount.api-us1.com/api/3").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "myaccount.api-us1.com");
/// assert_eq!(url.base_uri(), "https://myaccount.api-us1.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
    authority_end: usize,
}

impl ApiUrl {
    /// Creates a new validated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the URL has no `http` or
    /// `https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let invalid = || ConfigError::InvalidApiUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("https") && !scheme.eq_ignore_ascii_case("http") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        let authority_end = url[host_end..]
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_end + i);

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
            authority_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns `scheme://host[:port]`, the prefix every request URL starts with.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.url[..self.authority_end]
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_rejects_empty_string() {
        assert!(matches!(ApiToken::new(""), Err(ConfigError::EmptyApiToken)));
        assert!(matches!(ApiToken::new("   "), Err(ConfigError::EmptyApiToken)));
    }

    #[test]
    fn test_api_token_masks_value_in_debug() {
        let token = ApiToken::new("super-secret-token").unwrap();
        let debug_output = format!("{token:?}");
        assert_eq!(debug_output, "ApiToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_api_url_validates_format() {
        let url = ApiUrl::new("https://acme.api-us1.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "acme.api-us1.com");
        assert_eq!(url.base_uri(), "https://acme.api-us1.com");

        let url = ApiUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.host_name(), "127.0.0.1");
        assert_eq!(url.base_uri(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_api_url_drops_pasted_api_path() {
        let url = ApiUrl::new("  https://acme.api-us1.com/api/3/  ").unwrap();
        assert_eq!(url.base_uri(), "https://acme.api-us1.com");
        assert_eq!(url.as_ref(), "https://acme.api-us1.com/api/3/");
    }

    #[test]
    fn test_api_url_rejects_invalid() {
        assert!(ApiUrl::new("acme.api-us1.com").is_err());
        assert!(ApiUrl::new("https://").is_err());
        assert!(ApiUrl::new("ftp://acme.api-us1.com").is_err());
        assert!(ApiUrl::new("https:///api/3").is_err());
    }

    #[test]
    fn test_api_url_serde_uses_plain_string() {
        let url = ApiUrl::new("https://acme.api-us1.com").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, r#""https://acme.api-us1.com""#);

        let restored: ApiUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, url);
        assert!(serde_json::from_str::<ApiUrl>(r#""not a url""#).is_err());
    }
}
