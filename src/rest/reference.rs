//! Polymorphic resource references.
//!
//! Mutating operations accept a resource in whatever form the caller has at
//! hand: a numeric id, a natural key (an email, a list name, ...) or the
//! resource itself. [`Reference`] captures those forms and
//! [`Reference::resolve`] turns any of them into the canonical resource.

use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::{Resource, ResourceError};

/// A reference to a resource of kind `T`.
///
/// # Example
///
/// ```rust
/// use activecampaign::rest::Reference;
/// use activecampaign::rest::resources::Contact;
///
/// assert!(matches!(Reference::<Contact>::from(12), Reference::ById(12)));
/// assert!(matches!(Reference::<Contact>::from("12"), Reference::ById(12)));
/// assert!(matches!(
///     Reference::<Contact>::from("jane@example.com"),
///     Reference::ByKey(ref key) if key == "jane@example.com"
/// ));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Reference<T> {
    /// Server-assigned id; resolved with one fetch.
    ById(u64),
    /// Natural key; resolved with a kind-specific search.
    ByKey(String),
    /// An already materialized resource; used as-is.
    ByValue(T),
    /// Anything else; resolves to `None` without touching the network.
    Unresolvable,
}

/// Natural-key lookup for a resource kind.
#[allow(async_fn_in_trait)]
pub trait Resolve: Resource {
    /// Finds the first resource whose natural key matches `key`.
    ///
    /// Returns `Ok(None)` without a request when `key` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the search request fails.
    async fn find_by_key(client: &RestClient, key: &str) -> Result<Option<Self>, ResourceError>;
}

impl<T> Reference<T> {
    /// Returns `true` for [`Reference::Unresolvable`].
    #[must_use]
    pub const fn is_unresolvable(&self) -> bool {
        matches!(self, Self::Unresolvable)
    }
}

impl<T: Resolve> Reference<T> {
    /// Resolves the reference to a resource.
    ///
    /// - `ById` fetches the resource; a 404 yields `None`.
    /// - `ByKey` runs [`Resolve::find_by_key`].
    /// - `ByValue` is returned without a request.
    /// - `Unresolvable` yields `None` without a request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] only when a request fails for a reason other
    /// than the resource being absent.
    pub async fn resolve(self, client: &RestClient) -> Result<Option<T>, ResourceError> {
        let resolved = match self {
            Self::ById(id) => T::fetch(client, id).await?,
            Self::ByKey(key) => T::find_by_key(client, &key).await?,
            Self::ByValue(value) => Some(value),
            Self::Unresolvable => None,
        };

        if resolved.is_none() {
            tracing::debug!(resource = T::NAME, "reference did not resolve");
        }

        Ok(resolved)
    }
}

impl<T: Resource> Reference<T> {
    /// Builds a reference from arbitrary JSON.
    ///
    /// Non-negative integers become `ById`, strings follow the `&str`
    /// conversion, objects that deserialize into `T` become `ByValue`.
    /// Everything else is `Unresolvable`.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_u64().map_or(Self::Unresolvable, Self::ById),
            Value::String(s) => Self::from(s.as_str()),
            Value::Object(_) => T::deserialize(value).map_or(Self::Unresolvable, Self::ByValue),
            _ => Self::Unresolvable,
        }
    }
}

impl<T> From<u64> for Reference<T> {
    fn from(id: u64) -> Self {
        Self::ById(id)
    }
}

impl<T> From<&str> for Reference<T> {
    fn from(key: &str) -> Self {
        key.trim()
            .parse::<u64>()
            .map_or_else(|_| Self::ByKey(key.to_string()), Self::ById)
    }
}

impl<T> From<String> for Reference<T> {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl<T> From<&String> for Reference<T> {
    fn from(key: &String) -> Self {
        Self::from(key.as_str())
    }
}

/// Implements `From<Kind>` and `From<&Kind>` for `Reference<Kind>`.
macro_rules! impl_reference_from_value {
    ($($kind:ty),+ $(,)?) => {
        $(
            impl From<$kind> for $crate::rest::Reference<$kind> {
                fn from(value: $kind) -> Self {
                    Self::ByValue(value)
                }
            }

            impl From<&$kind> for $crate::rest::Reference<$kind> {
                fn from(value: &$kind) -> Self {
                    Self::ByValue(value.clone())
                }
            }
        )+
    };
}

pub(crate) use impl_reference_from_value;
