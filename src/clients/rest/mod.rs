//! REST API client for the ActiveCampaign v3 API.
//!
//! This module provides a higher-level REST API client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) that offers convenient methods
//! for interacting with the ActiveCampaign REST API.
//!
//! - [`RestClient`]: The REST API client with `get()`, `post()`, `put()`, `delete()` methods
//! - [`RestError`]: Error type for REST API operations
//!
//! # Example
//!
//! ```rust,ignore
//! use activecampaign::{ActiveCampaignConfig, ApiToken, ApiUrl, RestClient};
//!
//! let config = ActiveCampaignConfig::builder()
//!     .api_url(ApiUrl::new("https://myaccount.api-us1.com")?)
//!     .api_token(ApiToken::new("token")?)
//!     .build()?;
//!
//! let client = RestClient::new(&config)?;
//! let response = client.get("contacts", None).await?;
//! println!("Contacts: {}", response.body);
//! ```
//!
//! # Retry Behavior
//!
//! Every request is attempted [`ActiveCampaignConfig::tries`](crate::ActiveCampaignConfig::tries)
//! times when the API answers 429 (rate limited) or 500 (server error).

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
