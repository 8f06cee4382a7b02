//! Contact list resource implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::lenient::option_u64;
use crate::rest::reference::impl_reference_from_value;
use crate::rest::{first_or_none, Resolve, Resource, ResourceError};

/// Reminder sent with list confirmations when the caller supplies none.
pub const DEFAULT_SENDER_REMINDER: &str = "You signed up for my mailing list.";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContactsList {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stringid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_reminder: Option<String>,
}

impl Resource for ContactsList {
    const NAME: &'static str = "ContactsList";
    const SINGULAR: &'static str = "list";
    const PLURAL: &'static str = "lists";
    const PATH: &'static str = "lists";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl_reference_from_value!(ContactsList);

impl ContactsList {
    /// Finds the first list with the given name.
    ///
    /// An empty name yields `None` without a request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the search request fails.
    pub async fn find_by_name(
        client: &RestClient,
        name: &str,
    ) -> Result<Option<Self>, ResourceError> {
        if name.is_empty() {
            return Ok(None);
        }

        let mut query = HashMap::new();
        query.insert("filters[name]".to_string(), name.to_string());

        Ok(first_or_none(Self::list(client, Some(query)).await?))
    }
}

impl Resolve for ContactsList {
    async fn find_by_key(client: &RestClient, key: &str) -> Result<Option<Self>, ResourceError> {
        Self::find_by_name(client, key).await
    }
}

/// Derives a URL-safe list identifier from a list name.
///
/// Every run of characters outside `[A-Za-z0-9]` becomes a single `-` and
/// the result is lower-cased.
///
/// # Example
///
/// ```rust
/// use activecampaign::rest::resources::slugify;
///
/// assert_eq!(slugify("Weekly Newsletter (EU)"), "weekly-newsletter-eu-");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }

    slug
}
