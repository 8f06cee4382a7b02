//! E-commerce customer resource implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::lenient::option_u64;
use crate::rest::reference::impl_reference_from_value;
use crate::rest::resources::{Order, OrderDate};
use crate::rest::{first_or_none, Resolve, Resource, ResourceError};

/// Order source that triggers automations and shows on the dashboard.
const SOURCE_REAL_TIME: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Customer {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(
        rename = "connectionid",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "option_u64"
    )]
    pub connection_id: Option<u64>,
    #[serde(rename = "externalid", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub accepts_marketing: Option<u64>,
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub total_revenue: Option<u64>,
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub total_orders: Option<u64>,
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub total_products: Option<u64>,
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub avg_revenue_per_order: Option<u64>,
    #[serde(skip_serializing)]
    pub avg_product_category: Option<String>,
}

impl Resource for Customer {
    const NAME: &'static str = "Customer";
    const SINGULAR: &'static str = "ecomCustomer";
    const PLURAL: &'static str = "ecomCustomers";
    const PATH: &'static str = "ecomCustomers";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl_reference_from_value!(Customer);

impl Customer {
    /// Finds the first customer matching every supplied filter.
    ///
    /// Absent or empty filters are not sent. With no filters at all the
    /// result is `None` and no request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the search request fails.
    pub async fn find(
        client: &RestClient,
        email: Option<&str>,
        external_id: Option<&str>,
        connection_id: Option<u64>,
    ) -> Result<Option<Self>, ResourceError> {
        let mut query = HashMap::new();
        if let Some(email) = email.filter(|s| !s.is_empty()) {
            query.insert("filters[email]".to_string(), email.to_string());
        }
        if let Some(external_id) = external_id.filter(|s| !s.is_empty()) {
            query.insert("filters[externalid]".to_string(), external_id.to_string());
        }
        if let Some(connection_id) = connection_id.filter(|id| *id != 0) {
            query.insert("filters[connectionid]".to_string(), connection_id.to_string());
        }

        if query.is_empty() {
            return Ok(None);
        }

        Ok(first_or_none(Self::list(client, Some(query)).await?))
    }

    /// Builds an order placed by this customer.
    ///
    /// The order is linked to the customer and its connection and uses the
    /// real-time source. Nothing is sent until the order is created.
    #[must_use]
    pub fn new_order(
        &self,
        external_id: impl Into<String>,
        total_price: u64,
        currency: impl Into<String>,
        created: impl Into<OrderDate>,
    ) -> Order {
        Order {
            external_id: Some(external_id.into()),
            total_price: Some(total_price),
            currency: Some(currency.into()),
            external_created_date: Some(created.into()),
            ..self.order_template()
        }
    }

    /// Builds an abandoned cart for this customer.
    #[must_use]
    pub fn new_abandoned_cart(
        &self,
        external_checkout_id: impl Into<String>,
        total_price: u64,
        currency: impl Into<String>,
        created: impl Into<OrderDate>,
        abandoned: impl Into<OrderDate>,
    ) -> Order {
        Order {
            external_checkout_id: Some(external_checkout_id.into()),
            total_price: Some(total_price),
            currency: Some(currency.into()),
            external_created_date: Some(created.into()),
            abandoned_date: Some(abandoned.into()),
            ..self.order_template()
        }
    }

    fn order_template(&self) -> Order {
        Order {
            connection_id: self.connection_id,
            customer_id: self.id,
            source: Some(SOURCE_REAL_TIME),
            email: self.email.clone(),
            ..Order::default()
        }
    }
}

impl Resolve for Customer {
    async fn find_by_key(client: &RestClient, key: &str) -> Result<Option<Self>, ResourceError> {
        Self::find(client, Some(key), None, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn customer() -> Customer {
        serde_json::from_value(json!({
            "id": "9",
            "connectionid": "2",
            "externalid": "cust-1",
            "email": "jane@example.com",
            "acceptsMarketing": "1",
            "totalRevenue": "4500",
            "totalOrders": "3",
            "avgProductCategory": "Shoes"
        }))
        .unwrap()
    }

    #[test]
    fn test_customer_aggregates_are_read_only() {
        let customer = customer();

        assert_eq!(customer.total_revenue, Some(4500));
        assert_eq!(customer.total_orders, Some(3));

        let value = serde_json::to_value(&customer).unwrap();
        assert!(value.get("totalRevenue").is_none());
        assert!(value.get("avgProductCategory").is_none());
        assert_eq!(value.get("connectionid"), Some(&json!(2)));
    }

    #[test]
    fn test_new_order_links_customer_and_connection() {
        let order = customer().new_order("ord-1", 4599, "USD", 1_700_000_000_i64);

        assert_eq!(order.id, None);
        assert_eq!(order.customer_id, Some(9));
        assert_eq!(order.connection_id, Some(2));
        assert_eq!(order.email.as_deref(), Some("jane@example.com"));
        assert_eq!(order.source, Some(1));
        assert_eq!(order.external_id.as_deref(), Some("ord-1"));
        assert_eq!(order.external_checkout_id, None);
        assert_eq!(order.external_created_date, Some(OrderDate::Timestamp(1_700_000_000)));
    }

    #[test]
    fn test_new_abandoned_cart_sets_checkout_id_and_abandoned_date() {
        let cart = customer().new_abandoned_cart(
            "chk-1",
            1200,
            "EUR",
            "2023-11-14 22:13:20",
            1_700_003_600_i64,
        );

        assert_eq!(cart.external_id, None);
        assert_eq!(cart.external_checkout_id.as_deref(), Some("chk-1"));
        assert_eq!(
            cart.external_created_date,
            Some(OrderDate::Text("2023-11-14 22:13:20".to_string()))
        );
        assert_eq!(cart.abandoned_date, Some(OrderDate::Timestamp(1_700_003_600)));
    }
}
