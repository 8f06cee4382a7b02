//! # ActiveCampaign API Rust SDK
//!
//! A Rust SDK for the ActiveCampaign v3 REST API, providing type-safe
//! configuration, an async HTTP client with retry handling, and typed
//! resources for contacts, lists, tags, automations and e-commerce data.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ActiveCampaignConfig`] and [`ActiveCampaignConfigBuilder`]
//! - Validated newtypes for the account URL and API token
//! - Async HTTP client with retry logic for rate limits and server errors
//! - Typed resources with polymorphic references (id, natural key or value)
//! - Action groups on [`ActiveCampaign`] for connections, contacts,
//!   customers, lists and orders
//! - Order payload sanitization and product/discount hydration
//!
//! ## Quick Start
//!
//! ```rust
//! use activecampaign::{ActiveCampaignConfig, ApiToken, ApiUrl, ApiVersion};
//!
//! // Create configuration using the builder pattern
//! let config = ActiveCampaignConfig::builder()
//!     .api_url(ApiUrl::new("https://myaccount.api-us1.com").unwrap())
//!     .api_token(ApiToken::new("your-api-token").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working with Contacts
//!
//! ```rust,ignore
//! use activecampaign::ActiveCampaign;
//!
//! let ac = ActiveCampaign::new(&config)?;
//!
//! // Find or create, then subscribe to a list by name
//! let contact = ac
//!     .find_or_create_contact("jane@example.com", "Jane", "Doe", None)
//!     .await?;
//! ac.update_list_status("Newsletter", "jane@example.com", true).await?;
//! ```
//!
//! ## E-commerce Orders
//!
//! ```rust,ignore
//! use activecampaign::rest::resources::DiscountType;
//!
//! let customer = ac.find_customer(Some("jane@example.com"), None, Some(1)).await?;
//! if let Some(customer) = customer {
//!     let mut order = customer.new_order("ord-1001", 4599, "USD", chrono::Utc::now());
//!     order.add_product("Trail Shoe", 4999, 1, "sku-42");
//!     order.add_discount("WELCOME", DiscountType::Order, 400);
//!
//!     let created = ac.create_order(&order).await?;
//! }
//!
//! // Orders read by id come back with products and discounts
//! let order = ac.get_order(44).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Absence is not an error**: reads and reference resolution return
//!   `None` for missing resources

pub mod actions;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use actions::ActiveCampaign;
pub use config::{ActiveCampaignConfig, ActiveCampaignConfigBuilder, ApiToken, ApiUrl, ApiVersion};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, RestClient,
    RestError,
};

// Re-export resource layer types
pub use rest::{Reference, Resource, ResourceError};
