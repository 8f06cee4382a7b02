//! Connection resource implementation.
//!
//! A connection links the ActiveCampaign account to an external e-commerce
//! service. It is identified naturally by `(service, externalid)`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::lenient::option_u64;
use crate::rest::reference::impl_reference_from_value;
use crate::rest::{first_or_none, Resolve, Resource, ResourceError};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Connection {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(rename = "externalid", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub status: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub sync_status: Option<u64>,
}

impl Resource for Connection {
    const NAME: &'static str = "Connection";
    const SINGULAR: &'static str = "connection";
    const PLURAL: &'static str = "connections";
    const PATH: &'static str = "connections";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl_reference_from_value!(Connection);

impl Connection {
    /// Finds the first connection matching the given service and/or external id.
    ///
    /// Absent or empty criteria are not sent. With no criteria at all the
    /// result is `None` and no request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the search request fails.
    pub async fn find(
        client: &RestClient,
        service: Option<&str>,
        external_id: Option<&str>,
    ) -> Result<Option<Self>, ResourceError> {
        let mut query = HashMap::new();
        if let Some(service) = service.filter(|s| !s.is_empty()) {
            query.insert("filters[service]".to_string(), service.to_string());
        }
        if let Some(external_id) = external_id.filter(|s| !s.is_empty()) {
            query.insert("filters[externalid]".to_string(), external_id.to_string());
        }

        if query.is_empty() {
            return Ok(None);
        }

        Ok(first_or_none(Self::list(client, Some(query)).await?))
    }
}

impl Resolve for Connection {
    async fn find_by_key(client: &RestClient, key: &str) -> Result<Option<Self>, ResourceError> {
        Self::find(client, Some(key), None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::transform;
    use serde_json::json;

    #[test]
    fn test_connection_deserializes_string_numbers() {
        let body = json!({
            "connection": {
                "id": "3",
                "service": "shopify",
                "externalid": "acme.myshopify.com",
                "name": "Acme",
                "logoUrl": "https://acme.test/logo.png",
                "linkUrl": "https://acme.test",
                "status": "1",
                "syncStatus": 0,
                "cdate": "2023-01-01T00:00:00-06:00"
            }
        });

        let connection = first_or_none(transform::<Connection>(&body, None).unwrap()).unwrap();

        assert_eq!(connection.id, Some(3));
        assert_eq!(connection.external_id.as_deref(), Some("acme.myshopify.com"));
        assert_eq!(connection.logo_url.as_deref(), Some("https://acme.test/logo.png"));
        assert_eq!(connection.status, Some(1));
        assert_eq!(connection.sync_status, Some(0));
    }

    #[test]
    fn test_connection_serializes_wire_names_without_id() {
        let connection = Connection {
            id: Some(3),
            service: Some("shopify".to_string()),
            external_id: Some("acct".to_string()),
            link_url: Some("https://acme.test".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&connection).unwrap();

        assert_eq!(
            value,
            json!({"service": "shopify", "externalid": "acct", "linkUrl": "https://acme.test"})
        );
    }
}
