//! E-commerce order resource implementation.
//!
//! An [`Order`] owns its line items ([`OrderProduct`]) and discounts
//! ([`OrderDiscount`]). The API returns those through separate endpoints, so
//! a fetched order starts without them and [`hydrate_order`] fills them in.
//!
//! Outbound bodies are built by [`build_order_payload`], which normalizes
//! the three date fields to ISO-8601 and drops unset values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::lenient::{option_u64, vec_or_null};
use crate::rest::reference::impl_reference_from_value;
use crate::rest::resources::{Connection, Customer};
use crate::rest::{transform, Resolve, Resource, ResourceError};

/// Wire format for normalized order dates.
const ISO_8601_UTC: &str = "%Y-%m-%dT%H:%M:%S+00:00";

/// A date on an order, as the caller supplied it.
///
/// Dates are normalized to ISO-8601 only when the order is sent.
///
/// # Example
///
/// ```rust
/// use activecampaign::rest::resources::OrderDate;
///
/// let date = OrderDate::from(1_700_000_000_i64);
/// assert_eq!(date.to_iso8601("externalCreatedDate").unwrap(), "2023-11-14T22:13:20+00:00");
///
/// let date = OrderDate::from("2023-11-14 16:13:20 -06:00");
/// assert_eq!(date.to_iso8601("externalCreatedDate").unwrap(), "2023-11-14T22:13:20+00:00");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OrderDate {
    /// Unix timestamp in seconds.
    Timestamp(i64),
    /// Free-text date, parsed on write.
    Text(String),
}

impl OrderDate {
    /// Normalizes the date to `YYYY-MM-DDTHH:MM:SS+00:00`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidField`] naming `field` when the
    /// timestamp is out of range or the text is not a recognizable date.
    pub fn to_iso8601(&self, field: &'static str) -> Result<String, ResourceError> {
        let parsed = match self {
            Self::Timestamp(seconds) => Utc.timestamp_opt(*seconds, 0).single(),
            Self::Text(text) => parse_free_text(text),
        };

        parsed
            .map(|date| date.format(ISO_8601_UTC).to_string())
            .ok_or_else(|| ResourceError::InvalidField {
                field,
                reason: match self {
                    Self::Timestamp(seconds) => format!("timestamp {seconds} is out of range"),
                    Self::Text(text) => format!("unrecognized date {text:?}"),
                },
            })
    }
}

impl From<i64> for OrderDate {
    fn from(seconds: i64) -> Self {
        Self::Timestamp(seconds)
    }
}

impl From<&str> for OrderDate {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for OrderDate {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for OrderDate {
    fn from(date: DateTime<Tz>) -> Self {
        Self::Timestamp(date.timestamp())
    }
}

/// Parses the date formats callers commonly hand over.
///
/// Offset-less inputs are taken as UTC.
fn parse_free_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(seconds) = text.parse::<i64>() {
        return Utc.timestamp_opt(seconds, 0).single();
    }

    match text.to_ascii_lowercase().as_str() {
        "now" => return Some(Utc::now()),
        "today" => return Utc::now().date_naive().and_hms_opt(0, 0, 0).map(|d| d.and_utc()),
        _ => {}
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S %:z", "%Y-%m-%d %H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%z"] {
        if let Ok(date) = DateTime::parse_from_str(text, format) {
            return Some(date.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(text, format) {
            return Some(date.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
        }
    }

    None
}

/// Kind of discount applied to an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Order,
    Shipping,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderProduct {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub quantity: Option<u64>,
    #[serde(rename = "externalid", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
}

impl Resource for OrderProduct {
    const NAME: &'static str = "OrderProduct";
    const SINGULAR: &'static str = "ecomOrderProduct";
    const PLURAL: &'static str = "ecomOrderProducts";
    const PATH: &'static str = "ecomOrderProducts";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderDiscount {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub discount_amount: Option<u64>,
}

impl Resource for OrderDiscount {
    const NAME: &'static str = "OrderDiscount";
    const SINGULAR: &'static str = "ecomOrderDiscount";
    const PLURAL: &'static str = "ecomOrderDiscounts";
    const PATH: &'static str = "ecomOrderDiscounts";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

/// An e-commerce order or abandoned cart.
///
/// Exactly one of `external_id` (placed order) and `external_checkout_id`
/// (abandoned cart, which also needs `abandoned_date`) should be set; the
/// server enforces this on write.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Order {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(
        rename = "connectionid",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "option_u64"
    )]
    pub connection_id: Option<u64>,
    #[serde(
        rename = "customerid",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "option_u64"
    )]
    pub customer_id: Option<u64>,
    #[serde(rename = "externalid", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "externalcheckoutid", skip_serializing_if = "Option::is_none")]
    pub external_checkout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub source: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub total_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub shipping_amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub tax_amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub discount_amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_created_date: Option<OrderDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_updated_date: Option<OrderDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abandoned_date: Option<OrderDate>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "vec_or_null")]
    pub order_products: Vec<OrderProduct>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "vec_or_null")]
    pub order_discounts: Vec<OrderDiscount>,
}

impl Resource for Order {
    const NAME: &'static str = "Order";
    const SINGULAR: &'static str = "ecomOrder";
    const PLURAL: &'static str = "ecomOrders";
    const PATH: &'static str = "ecomOrders";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn writable_fields(&self) -> Result<Map<String, Value>, ResourceError> {
        build_order_payload(self)
    }
}

impl_reference_from_value!(Order);

impl Resolve for Order {
    async fn find_by_key(_client: &RestClient, key: &str) -> Result<Option<Self>, ResourceError> {
        tracing::debug!(key, "orders have no natural key");
        Ok(None)
    }
}

impl Order {
    /// Appends a line item and returns it for further edits.
    pub fn add_product(
        &mut self,
        name: impl Into<String>,
        price: u64,
        quantity: u64,
        external_id: impl Into<String>,
    ) -> &mut OrderProduct {
        self.order_products.push(OrderProduct {
            name: Some(name.into()),
            price: Some(price),
            quantity: Some(quantity),
            external_id: Some(external_id.into()),
            ..OrderProduct::default()
        });
        let last = self.order_products.len() - 1;
        &mut self.order_products[last]
    }

    /// Appends a discount and returns it for further edits.
    pub fn add_discount(
        &mut self,
        name: impl Into<String>,
        discount_type: DiscountType,
        discount_amount: u64,
    ) -> &mut OrderDiscount {
        self.order_discounts.push(OrderDiscount {
            name: Some(name.into()),
            discount_type: Some(discount_type),
            discount_amount: Some(discount_amount),
            ..OrderDiscount::default()
        });
        let last = self.order_discounts.len() - 1;
        &mut self.order_discounts[last]
    }

    /// Fetches the customer who placed this order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn fetch_customer(&self, client: &RestClient) -> Result<Option<Customer>, ResourceError> {
        match self.customer_id {
            Some(id) => Customer::fetch(client, id).await,
            None => Ok(None),
        }
    }

    /// Fetches the connection this order came through.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn fetch_connection(
        &self,
        client: &RestClient,
    ) -> Result<Option<Connection>, ResourceError> {
        match self.connection_id {
            Some(id) => Connection::fetch(client, id).await,
            None => Ok(None),
        }
    }

    /// Lists the line items stored for an order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn products(client: &RestClient, order_id: u64) -> Result<Vec<OrderProduct>, ResourceError> {
        Self::sub_collection(client, order_id, "orderProducts").await
    }

    /// Lists the discounts stored for an order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn discounts(client: &RestClient, order_id: u64) -> Result<Vec<OrderDiscount>, ResourceError> {
        Self::sub_collection(client, order_id, "orderDiscounts").await
    }

    async fn sub_collection<T: Resource>(
        client: &RestClient,
        order_id: u64,
        segment: &str,
    ) -> Result<Vec<T>, ResourceError> {
        let path = format!("{}/{order_id}/{segment}", Self::PATH);
        tracing::debug!(order_id, segment, "hydrating order");

        let response = client
            .get(&path, None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(&order_id.to_string())))?;

        transform(&response.body, Some(T::PLURAL))
    }
}

/// Fills in an order's products and discounts when they are empty.
///
/// Each collection is fetched only if it is currently empty, products first.
/// Orders without an id are returned untouched. On error the order is
/// dropped, so callers never see a half-hydrated order.
///
/// # Errors
///
/// Returns [`ResourceError`] if either follow-up request fails.
pub async fn hydrate_order(client: &RestClient, mut order: Order) -> Result<Order, ResourceError> {
    let Some(id) = order.id else {
        return Ok(order);
    };

    if order.order_products.is_empty() {
        order.order_products = Order::products(client, id).await?;
    }

    if order.order_discounts.is_empty() {
        order.order_discounts = Order::discounts(client, id).await?;
    }

    Ok(order)
}

/// Builds the outbound field map for creating or updating an order.
///
/// - `id` and unset fields are dropped.
/// - `externalCreatedDate`, `externalUpdatedDate` and `abandonedDate` are
///   normalized to `YYYY-MM-DDTHH:MM:SS+00:00`.
/// - Each product and discount is flattened to its non-null fields; empty
///   collections are omitted.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidField`] if a date cannot be parsed.
///
/// # Example
///
/// ```rust
/// use activecampaign::rest::resources::{build_order_payload, Order};
/// use serde_json::json;
///
/// let order: Order = serde_json::from_value(json!({
///     "id": 5,
///     "totalPrice": 1000,
///     "externalCreatedDate": 1700000000,
///     "orderProducts": null
/// })).unwrap();
///
/// let payload = build_order_payload(&order).unwrap();
/// assert_eq!(
///     serde_json::Value::Object(payload),
///     json!({"totalPrice": 1000, "externalCreatedDate": "2023-11-14T22:13:20+00:00"})
/// );
/// ```
pub fn build_order_payload(order: &Order) -> Result<Map<String, Value>, ResourceError> {
    let value = serde_json::to_value(order).map_err(|e| ResourceError::InvalidField {
        field: Order::SINGULAR,
        reason: e.to_string(),
    })?;
    let Value::Object(mut fields) = value else {
        return Ok(Map::new());
    };

    fields.remove("id");
    fields.retain(|_, value| !value.is_null());

    for (field, date) in [
        ("externalCreatedDate", &order.external_created_date),
        ("externalUpdatedDate", &order.external_updated_date),
        ("abandonedDate", &order.abandoned_date),
    ] {
        if let Some(date) = date {
            fields.insert(field.to_string(), Value::String(date.to_iso8601(field)?));
        }
    }

    for field in ["orderProducts", "orderDiscounts"] {
        let Some(Value::Array(items)) = fields.remove(field) else {
            continue;
        };

        let flattened: Vec<Value> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(mut map) => {
                    map.retain(|_, value| !value.is_null());
                    Some(Value::Object(map))
                }
                _ => None,
            })
            .collect();

        if !flattened.is_empty() {
            fields.insert(field.to_string(), Value::Array(flattened));
        }
    }

    Ok(fields)
}
