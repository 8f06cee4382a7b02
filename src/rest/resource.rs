//! The [`Resource`] trait shared by every ActiveCampaign resource kind.
//!
//! A resource kind declares its wire names (singular envelope key, plural
//! envelope key, collection path) and gets generic `fetch`, `list`,
//! `create`, `update` and `delete` operations built on the
//! [`transform`](crate::rest::transform) envelope contract.
//!
//! # Example
//!
//! ```rust,ignore
//! use activecampaign::rest::{Resource, ResourceError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Tag {
//!     pub id: Option<u64>,
//!     pub tag: Option<String>,
//! }
//!
//! impl Resource for Tag {
//!     const NAME: &'static str = "Tag";
//!     const SINGULAR: &'static str = "tag";
//!     const PLURAL: &'static str = "tags";
//!     const PATH: &'static str = "tags";
//!
//!     fn id(&self) -> Option<u64> {
//!         self.id
//!     }
//! }
//!
//! let tag = Tag::fetch(&client, 5).await?;
//! let tags = Tag::list(&client, None).await?;
//! ```

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::{first_or_none, transform, ResourceError};

/// A REST resource kind of the ActiveCampaign v3 API.
///
/// Implementors are plain serde data structs. They hold no reference to a
/// client; the [`RestClient`] is passed to every operation that needs the
/// network.
#[allow(async_fn_in_trait)]
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// Human-readable type name used in errors (e.g., "Contact").
    const NAME: &'static str;

    /// Envelope key for a single resource (e.g., `"ecomOrder"`).
    const SINGULAR: &'static str;

    /// Envelope key for a list of resources (e.g., `"ecomOrders"`).
    const PLURAL: &'static str;

    /// Collection path relative to the API base path (e.g., `"ecomOrders"`).
    const PATH: &'static str;

    /// Returns the server-assigned id, or `None` before creation.
    fn id(&self) -> Option<u64>;

    /// Returns the field set sent back on an update with no explicit fields.
    ///
    /// The default is the serialized resource minus `id` and `null` values.
    /// Server-computed fields are excluded by marking them
    /// `#[serde(skip_serializing)]`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidField`] if the resource does not
    /// serialize to a JSON object.
    fn writable_fields(&self) -> Result<Map<String, Value>, ResourceError> {
        let value = serde_json::to_value(self).map_err(|e| ResourceError::InvalidField {
            field: Self::SINGULAR,
            reason: e.to_string(),
        })?;

        let Value::Object(mut fields) = value else {
            return Err(ResourceError::InvalidField {
                field: Self::SINGULAR,
                reason: "resource did not serialize to an object".to_string(),
            });
        };

        fields.remove("id");
        fields.retain(|_, value| !value.is_null());

        Ok(fields)
    }

    /// Wraps a field map in this kind's singular envelope key.
    #[must_use]
    fn envelope(fields: Map<String, Value>) -> Value {
        let mut body = Map::new();
        body.insert(Self::SINGULAR.to_string(), Value::Object(fields));
        Value::Object(body)
    }

    /// Fetches a resource by id.
    ///
    /// A 404 resolves to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for any other failed request or a malformed
    /// response.
    async fn fetch(client: &RestClient, id: u64) -> Result<Option<Self>, ResourceError> {
        let path = format!("{}/{id}", Self::PATH);

        match client.get(&path, None).await {
            Ok(response) => Ok(first_or_none(transform(&response.body, None)?)),
            Err(error) => {
                let error = ResourceError::from_rest_error(error, Self::NAME, Some(&id.to_string()));
                if error.is_not_found() {
                    tracing::debug!(resource = Self::NAME, id, "resource not found");
                    Ok(None)
                } else {
                    Err(error)
                }
            }
        }
    }

    /// Lists resources, optionally filtered by query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response is
    /// malformed.
    async fn list(
        client: &RestClient,
        query: Option<HashMap<String, String>>,
    ) -> Result<Vec<Self>, ResourceError> {
        let query = query.filter(|q| !q.is_empty());

        let response = client
            .get(Self::PATH, query)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, None))?;

        transform(&response.body, Some(Self::PLURAL))
    }

    /// Creates a resource from a field map and returns the stored resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ValidationFailed`] when the server rejects the
    /// fields, or another [`ResourceError`] if the request fails.
    async fn create(
        client: &RestClient,
        fields: Map<String, Value>,
    ) -> Result<Option<Self>, ResourceError> {
        let response = client
            .post(Self::PATH, Self::envelope(fields), None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, None))?;

        Ok(first_or_none(transform(&response.body, None)?))
    }

    /// Sends a field map to an existing resource and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource does not exist,
    /// or another [`ResourceError`] if the request fails.
    async fn update(
        client: &RestClient,
        id: u64,
        fields: Map<String, Value>,
    ) -> Result<Option<Self>, ResourceError> {
        let path = format!("{}/{id}", Self::PATH);

        let response = client
            .put(&path, Self::envelope(fields), None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(&id.to_string())))?;

        Ok(first_or_none(transform(&response.body, None)?))
    }

    /// Deletes a resource by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource does not exist,
    /// or another [`ResourceError`] if the request fails.
    async fn delete(client: &RestClient, id: u64) -> Result<(), ResourceError> {
        let path = format!("{}/{id}", Self::PATH);

        client
            .delete(&path, None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(&id.to_string())))?;

        Ok(())
    }
}
