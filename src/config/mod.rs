//! Configuration types for the ActiveCampaign API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with an ActiveCampaign account.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ActiveCampaignConfig`]: The configuration struct holding all SDK settings
//! - [`ActiveCampaignConfigBuilder`]: A builder for constructing [`ActiveCampaignConfig`]
//! - [`ApiUrl`]: The validated account API URL
//! - [`ApiToken`]: A validated API token newtype with masked debug output
//! - [`ApiVersion`]: The API version to use
//!
//! # Example
//!
//! ```rust
//! use activecampaign::{ActiveCampaignConfig, ApiToken, ApiUrl, ApiVersion};
//!
//! let config = ActiveCampaignConfig::builder()
//!     .api_url(ApiUrl::new("https://myaccount.api-us1.com").unwrap())
//!     .api_token(ApiToken::new("my-token").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiToken, ApiUrl};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Configuration for the ActiveCampaign API SDK.
///
/// # Thread Safety
///
/// `ActiveCampaignConfig` is `Clone`, `Send`, and `Sync`, making it safe to
/// share across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ActiveCampaignConfig {
    api_url: ApiUrl,
    api_token: ApiToken,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
    tries: u32,
}

impl ActiveCampaignConfig {
    /// Creates a new builder for constructing an `ActiveCampaignConfig`.
    #[must_use]
    pub fn builder() -> ActiveCampaignConfigBuilder {
        ActiveCampaignConfigBuilder::new()
    }

    /// Returns the account API URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the API token.
    #[must_use]
    pub const fn api_token(&self) -> &ApiToken {
        &self.api_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times a request is attempted when the API answers
    /// 429 or 500.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

// Verify ActiveCampaignConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ActiveCampaignConfig>();
};

/// Builder for constructing [`ActiveCampaignConfig`] instances.
///
/// Required fields are `api_url` and `api_token`.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest()`]
/// - `user_agent_prefix`: `None`
/// - `tries`: `1` (no automatic retries)
///
/// # Example
///
/// ```rust
/// use activecampaign::{ActiveCampaignConfig, ApiToken, ApiUrl};
///
/// let config = ActiveCampaignConfig::builder()
///     .api_url(ApiUrl::new("https://myaccount.api-us1.com").unwrap())
///     .api_token(ApiToken::new("token").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .tries(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.tries(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ActiveCampaignConfigBuilder {
    api_url: Option<ApiUrl>,
    api_token: Option<ApiToken>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
}

impl ActiveCampaignConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account API URL (required).
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the API token (required).
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets how many times requests are attempted on 429/500 responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`ActiveCampaignConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_url` or
    /// `api_token` are not set, and [`ConfigError::InvalidTries`] if `tries`
    /// is zero.
    pub fn build(self) -> Result<ActiveCampaignConfig, ConfigError> {
        let api_url = self
            .api_url
            .ok_or(ConfigError::MissingRequiredField { field: "api_url" })?;
        let api_token = self
            .api_token
            .ok_or(ConfigError::MissingRequiredField { field: "api_token" })?;

        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(ActiveCampaignConfig {
            api_url,
            api_token,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            user_agent_prefix: self.user_agent_prefix,
            tries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> ApiUrl {
        ApiUrl::new("https://acme.api-us1.com").unwrap()
    }

    #[test]
    fn test_builder_requires_api_url() {
        let result = ActiveCampaignConfigBuilder::new()
            .api_token(ApiToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_url" })
        ));
    }

    #[test]
    fn test_builder_requires_api_token() {
        let result = ActiveCampaignConfigBuilder::new().api_url(url()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_token" })
        ));
    }

    #[test]
    fn test_builder_applies_defaults() {
        let config = ActiveCampaignConfig::builder()
            .api_url(url())
            .api_token(ApiToken::new("token").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::V3);
        assert_eq!(config.tries(), 1);
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_rejects_zero_tries() {
        let result = ActiveCampaignConfig::builder()
            .api_url(url())
            .api_token(ApiToken::new("token").unwrap())
            .tries(0)
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidTries { tries: 0 })));
    }

    #[test]
    fn test_debug_output_does_not_leak_token() {
        let config = ActiveCampaignConfig::builder()
            .api_url(url())
            .api_token(ApiToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        assert!(!format!("{config:?}").contains("very-secret"));
    }
}
