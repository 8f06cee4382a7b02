//! Turning response envelopes into typed resources.
//!
//! Every ActiveCampaign response wraps its payload in an envelope object:
//! either a single resource under the kind's singular key
//! (`{"connection": {...}}`) or an array under a plural key
//! (`{"connections": [...]}`). [`transform`] unwraps both shapes into an
//! ordered `Vec` and [`first_or_none`] is the uniform way to read a single
//! resource out of it.

use serde_json::Value;

use crate::rest::{Resource, ResourceError};

/// Extracts typed resources from a response envelope.
///
/// With `Some(key)`, the array stored at `key` is deserialized element by
/// element in server order. A missing key or a non-array value yields an
/// empty `Vec`.
///
/// With `None`, the object stored at [`Resource::SINGULAR`] is returned as a
/// one-element `Vec`, or an empty `Vec` when the key is absent or holds
/// anything other than an object.
///
/// # Errors
///
/// Returns [`ResourceError::Deserialize`] if an element does not match the
/// shape of `T`.
///
/// # Example
///
/// ```rust
/// use activecampaign::rest::resources::Connection;
/// use activecampaign::rest::transform;
/// use serde_json::json;
///
/// let body = json!({"connections": [{"id": "1", "service": "shopify"}, {"id": "2"}]});
/// let connections: Vec<Connection> = transform(&body, Some("connections")).unwrap();
/// assert_eq!(connections.len(), 2);
///
/// let body = json!({"connection": {"id": "3", "service": "woo"}});
/// let connections: Vec<Connection> = transform(&body, None).unwrap();
/// assert_eq!(connections[0].id, Some(3));
///
/// let empty: Vec<Connection> = transform(&json!({}), None).unwrap();
/// assert!(empty.is_empty());
/// ```
pub fn transform<T: Resource>(
    body: &Value,
    envelope_key: Option<&str>,
) -> Result<Vec<T>, ResourceError> {
    let deserialize = |value: &Value| {
        T::deserialize(value).map_err(|source| ResourceError::Deserialize {
            resource: T::NAME,
            source,
        })
    };

    match envelope_key {
        Some(key) => match body.get(key) {
            Some(Value::Array(items)) => items.iter().map(deserialize).collect(),
            _ => Ok(Vec::new()),
        },
        None => match body.get(T::SINGULAR) {
            Some(value @ Value::Object(_)) => Ok(vec![deserialize(value)?]),
            _ => Ok(Vec::new()),
        },
    }
}

/// Returns the first resource of a transformed sequence, if any.
#[must_use]
pub fn first_or_none<T>(items: Vec<T>) -> Option<T> {
    items.into_iter().next()
}
