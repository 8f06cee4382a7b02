//! ActiveCampaign API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! of the ActiveCampaign API to use.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// ActiveCampaign API version.
///
/// The REST resources in this crate target version 3 of the API. A `Custom`
/// variant is kept for pointing the client at a different path segment
/// (e.g. a proxy that re-versions the API).
///
/// # Example
///
/// ```rust
/// use activecampaign::ApiVersion;
///
/// let version = ApiVersion::latest();
/// assert_eq!(version, ApiVersion::V3);
///
/// let version: ApiVersion = "3".parse().unwrap();
/// assert_eq!(version, ApiVersion::V3);
///
/// assert_eq!(format!("{}", ApiVersion::V3), "3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    /// API version 3.
    #[default]
    V3,
    /// Custom version segment.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest API version supported by the resources in this crate.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V3
    }

    /// Returns the base path for requests made with this version (`/api/3`).
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("/api/{self}")
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V3 => f.write_str("3"),
            Self::Custom(version) => f.write_str(version),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches(['v', 'V']);
        match trimmed {
            "3" => Ok(Self::V3),
            "" => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
            other if other.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') => {
                Ok(Self::Custom(other.to_string()))
            }
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}
