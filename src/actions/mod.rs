//! High-level actions grouped by resource kind.
//!
//! [`ActiveCampaign`] is the entry point for application code. Each resource
//! kind contributes an `impl` block in its own module:
//!
//! - [`connections`]: e-commerce connections
//! - [`contacts`]: contacts, their tags and automations
//! - [`customers`]: e-commerce customers
//! - [`lists`]: lists and list subscriptions
//! - [`orders`]: e-commerce orders with product and discount hydration
//!
//! Operations that take a `impl Into<Reference<T>>` accept an id, a natural
//! key or the resource itself; see [`Reference`].
//!
//! # Example
//!
//! ```rust,ignore
//! use activecampaign::{ActiveCampaign, ActiveCampaignConfig, ApiToken, ApiUrl};
//!
//! let config = ActiveCampaignConfig::builder()
//!     .api_url(ApiUrl::new("https://acme.api-us1.com")?)
//!     .api_token(ApiToken::new("token")?)
//!     .build()?;
//!
//! let ac = ActiveCampaign::new(&config)?;
//! let contact = ac.find_or_create_contact("jane@example.com", "Jane", "Doe", None).await?;
//! ```

pub mod connections;
pub mod contacts;
pub mod customers;
pub mod lists;
pub mod orders;

use serde_json::{Map, Value};

use crate::clients::{RestClient, RestError};
use crate::config::ActiveCampaignConfig;
use crate::rest::{Reference, Resolve, ResourceError};

/// ActiveCampaign API client.
///
/// Holds no state besides the underlying [`RestClient`]; every call is
/// independent and the client can be shared across tasks.
#[derive(Debug)]
pub struct ActiveCampaign {
    rest: RestClient,
}

// Verify ActiveCampaign is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ActiveCampaign>();
};

impl ActiveCampaign {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the HTTP client cannot be constructed.
    pub fn new(config: &ActiveCampaignConfig) -> Result<Self, RestError> {
        Ok(Self {
            rest: RestClient::new(config)?,
        })
    }

    /// Returns the underlying REST client.
    #[must_use]
    pub const fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Resolves `reference` and writes `fields` to the resolved resource.
    ///
    /// Empty `fields` sends the resolved resource's own writable fields back.
    /// A reference that does not resolve yields `None` without a write.
    pub(crate) async fn update_resource<T: Resolve>(
        &self,
        reference: Reference<T>,
        fields: Map<String, Value>,
    ) -> Result<Option<T>, ResourceError> {
        let Some(resource) = reference.resolve(&self.rest).await? else {
            return Ok(None);
        };

        self.write_resolved(resource, fields).await
    }

    pub(crate) async fn write_resolved<T: Resolve>(
        &self,
        resource: T,
        fields: Map<String, Value>,
    ) -> Result<Option<T>, ResourceError> {
        let Some(id) = resource.id() else {
            tracing::debug!(resource = T::NAME, "resolved resource has no id, skipping update");
            return Ok(None);
        };

        let fields = if fields.is_empty() {
            resource.writable_fields()?
        } else {
            fields
        };

        T::update(&self.rest, id, fields).await
    }
}
