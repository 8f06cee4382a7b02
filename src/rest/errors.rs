//! Resource-specific error types for REST API operations.
//!
//! This module contains error types for REST resource operations, extending
//! the base [`RestError`](crate::clients::RestError) with resource-specific
//! semantics like `NotFound` and `ValidationFailed`.
//!
//! # Error Handling
//!
//! The SDK maps HTTP status codes to semantic error variants:
//!
//! - **404**: [`ResourceError::NotFound`] - Resource doesn't exist
//! - **422**: [`ResourceError::ValidationFailed`] - Validation errors from the API
//! - **Other 4xx/5xx**: [`ResourceError::Rest`] - Wrapped REST/HTTP error
//!
//! Client-side failures get their own variants: [`ResourceError::InvalidField`]
//! when an outbound value cannot be normalized, and
//! [`ResourceError::Deserialize`] when a response element does not match the
//! resource shape.
//!
//! # Example
//!
//! ```rust,ignore
//! use activecampaign::rest::ResourceError;
//!
//! match ac.delete_connection(12).await {
//!     Ok(()) => println!("Deleted"),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{} with id {} not found", resource, id);
//!     }
//!     Err(ResourceError::ValidationFailed { errors, .. }) => {
//!         for (field, messages) in errors {
//!             println!("{}: {:?}", field, messages);
//!         }
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use std::collections::HashMap;

use crate::clients::{HttpError, RestError};
use thiserror::Error;

/// Error type for REST resource operations.
///
/// # Example
///
/// ```rust
/// use activecampaign::rest::ResourceError;
/// use std::collections::HashMap;
///
/// let error = ResourceError::NotFound {
///     resource: "Contact",
///     id: "123".to_string(),
/// };
/// assert!(error.to_string().contains("Contact"));
/// assert!(error.to_string().contains("123"));
///
/// let mut errors = HashMap::new();
/// errors.insert("email".to_string(), vec!["Email address already exists in the system.".to_string()]);
/// let error = ResourceError::ValidationFailed {
///     errors,
///     request_id: None,
/// };
/// assert!(error.to_string().contains("Validation failed"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Contact", "Order").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
    },

    /// Validation failed for the resource (HTTP 422).
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// A map of field names to error messages.
        errors: HashMap<String, Vec<String>>,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// A field value could not be converted to its wire format.
    #[error("Invalid value for field {field}: {reason}")]
    InvalidField {
        /// The wire name of the field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A response element could not be deserialized into the resource type.
    #[error("Failed to deserialize {resource}: {source}")]
    Deserialize {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST-level error occurred.
    ///
    /// Non-2xx responses other than 404 and 422 surface here.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Maps a [`RestError`] to a semantic resource error.
    ///
    /// - 404 -> `NotFound`
    /// - 422 -> `ValidationFailed` (parsing errors from the response message)
    /// - Other -> `Rest`
    ///
    /// # Example
    ///
    /// ```rust
    /// use activecampaign::clients::{HttpError, HttpResponseError, RestError};
    /// use activecampaign::rest::ResourceError;
    ///
    /// let rest_error = RestError::Http(HttpError::Response(HttpResponseError {
    ///     code: 404,
    ///     message: r#"{"message":"No Result found"}"#.to_string(),
    ///     error_reference: None,
    /// }));
    ///
    /// let error = ResourceError::from_rest_error(rest_error, "Contact", Some("7"));
    /// assert!(matches!(error, ResourceError::NotFound { id, .. } if id == "7"));
    /// ```
    #[must_use]
    pub fn from_rest_error(error: RestError, resource: &'static str, id: Option<&str>) -> Self {
        let RestError::Http(HttpError::Response(response)) = &error else {
            return Self::Rest(error);
        };

        match response.code {
            404 => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
            },
            422 => {
                let body = serde_json::from_str(&response.message)
                    .unwrap_or(serde_json::Value::Null);
                Self::ValidationFailed {
                    errors: parse_validation_errors(&body),
                    request_id: response.error_reference.clone(),
                }
            }
            _ => Self::Rest(error),
        }
    }

    /// Returns `true` if this error represents a 404 response.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { request_id, .. } => request_id.as_deref(),
            Self::Http(HttpError::Response(e)) | Self::Rest(RestError::Http(HttpError::Response(e))) => {
                e.error_reference.as_deref()
            }
            Self::Http(HttpError::MaxRetries(e))
            | Self::Rest(RestError::Http(HttpError::MaxRetries(e))) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

/// Parses validation errors from an API error body.
///
/// ActiveCampaign reports validation failures as a list of error objects:
/// ```json
/// {
///   "errors": [
///     {
///       "title": "Email address already exists in the system.",
///       "detail": "",
///       "code": "duplicate",
///       "source": {"pointer": "/data/attributes/email"}
///     }
///   ]
/// }
/// ```
///
/// Messages are grouped under the last segment of `source.pointer`, or under
/// `base` when there is no pointer. Plain string entries and the
/// `{"field": ["message"]}` object form are accepted too.
fn parse_validation_errors(body: &serde_json::Value) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();

    match body.get("errors") {
        Some(serde_json::Value::Array(entries)) => {
            for entry in entries {
                match entry {
                    serde_json::Value::String(message) => {
                        result.entry("base".to_string()).or_default().push(message.clone());
                    }
                    serde_json::Value::Object(map) => {
                        let field = map
                            .get("source")
                            .and_then(|source| source.get("pointer"))
                            .and_then(serde_json::Value::as_str)
                            .and_then(|pointer| pointer.rsplit('/').next())
                            .filter(|segment| !segment.is_empty())
                            .unwrap_or("base");

                        let message = ["title", "detail"]
                            .iter()
                            .filter_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
                            .find(|text| !text.is_empty());

                        if let Some(message) = message {
                            result
                                .entry(field.to_string())
                                .or_default()
                                .push(message.to_string());
                        }
                    }
                    _ => {}
                }
            }
        }
        Some(serde_json::Value::Object(map)) => {
            for (field, messages) in map {
                let msgs: Vec<String> = match messages {
                    serde_json::Value::Array(arr) => arr
                        .iter()
                        .filter_map(|v| v.as_str().map(ToString::to_string))
                        .collect(),
                    serde_json::Value::String(s) => vec![s.clone()],
                    _ => vec![messages.to_string()],
                };
                result.insert(field.clone(), msgs);
            }
        }
        Some(serde_json::Value::String(message)) => {
            result.insert("base".to_string(), vec![message.clone()]);
        }
        _ => {}
    }

    if result.is_empty() {
        if let Some(message) = body.get("message").and_then(serde_json::Value::as_str) {
            result.insert("base".to_string(), vec![message.to_string()]);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;

    fn response_error(code: u16, body: &serde_json::Value, reference: Option<&str>) -> RestError {
        RestError::Http(HttpError::Response(HttpResponseError {
            code,
            message: body.to_string(),
            error_reference: reference.map(ToString::to_string),
        }))
    }

    #[test]
    fn test_404_maps_to_not_found() {
        let error = ResourceError::from_rest_error(
            response_error(404, &json!({"message": "No Result found"}), None),
            "Connection",
            Some("12"),
        );

        assert!(matches!(
            error,
            ResourceError::NotFound { resource: "Connection", ref id } if id == "12"
        ));
        assert!(error.is_not_found());
    }

    #[test]
    fn test_422_maps_pointer_segments_to_fields() {
        let body = json!({
            "errors": [
                {
                    "title": "Email address already exists in the system.",
                    "detail": "",
                    "code": "duplicate",
                    "source": {"pointer": "/data/attributes/email"}
                },
                {"title": "", "detail": "Something else went wrong"}
            ]
        });

        let error = ResourceError::from_rest_error(
            response_error(422, &body, Some("req-9")),
            "Contact",
            None,
        );

        let ResourceError::ValidationFailed { errors, request_id } = error else {
            panic!("expected ValidationFailed, got {error:?}");
        };
        assert_eq!(
            errors.get("email"),
            Some(&vec!["Email address already exists in the system.".to_string()])
        );
        assert_eq!(
            errors.get("base"),
            Some(&vec!["Something else went wrong".to_string()])
        );
        assert_eq!(request_id.as_deref(), Some("req-9"));
    }

    #[test]
    fn test_422_accepts_object_form() {
        let body = json!({"errors": {"name": ["can't be blank"]}});
        let error = ResourceError::from_rest_error(response_error(422, &body, None), "List", None);

        let ResourceError::ValidationFailed { errors, .. } = error else {
            panic!("expected ValidationFailed");
        };
        assert_eq!(errors.get("name"), Some(&vec!["can't be blank".to_string()]));
    }

    #[test]
    fn test_other_codes_stay_rest_errors() {
        let error = ResourceError::from_rest_error(
            response_error(403, &json!({"message": "Forbidden"}), Some("req-1")),
            "Contact",
            Some("1"),
        );

        assert!(matches!(error, ResourceError::Rest(_)));
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[test]
    fn test_invalid_path_is_not_mapped() {
        let error = ResourceError::from_rest_error(
            RestError::InvalidPath {
                path: String::new(),
            },
            "Contact",
            None,
        );
        assert!(matches!(error, ResourceError::Rest(RestError::InvalidPath { .. })));
    }

    #[test]
    fn test_invalid_field_message() {
        let error = ResourceError::InvalidField {
            field: "externalCreatedDate",
            reason: "unrecognized date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for field externalCreatedDate: unrecognized date"
        );
    }
}
