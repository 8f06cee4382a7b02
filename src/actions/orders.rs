//! Order actions.
//!
//! Orders read through [`ActiveCampaign::get_order`] come back with their
//! products and discounts hydrated. Writes go through
//! [`build_order_payload`], so dates are normalized and unset fields are
//! never sent.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::actions::ActiveCampaign;
use crate::rest::resources::{build_order_payload, hydrate_order, Order};
use crate::rest::{Reference, Resource, ResourceError};

impl ActiveCampaign {
    /// Lists orders, optionally filtered.
    ///
    /// Each `(name, value)` filter is sent as `filter[name]=value`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn orders(&self, filters: &[(&str, &str)]) -> Result<Vec<Order>, ResourceError> {
        let query: HashMap<String, String> = filters
            .iter()
            .map(|(name, value)| (format!("filter[{name}]"), (*value).to_string()))
            .collect();

        Order::list(self.rest(), Some(query)).await
    }

    /// Fetches an order by id with its products and discounts.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the order or its hydration requests fail.
    pub async fn get_order(&self, id: u64) -> Result<Option<Order>, ResourceError> {
        match Order::fetch(self.rest(), id).await? {
            Some(order) => Ok(Some(hydrate_order(self.rest(), order).await?)),
            None => Ok(None),
        }
    }

    /// Creates an order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidField`] for an unparseable date, or
    /// another [`ResourceError`] if the request fails.
    pub async fn create_order(&self, order: &Order) -> Result<Option<Order>, ResourceError> {
        Order::create(self.rest(), build_order_payload(order)?).await
    }

    /// Deletes an order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the order does not exist.
    pub async fn delete_order(&self, id: u64) -> Result<(), ResourceError> {
        Order::delete(self.rest(), id).await
    }

    /// Updates an order given by id or value.
    ///
    /// An order given by id is fetched with [`get_order`](Self::get_order)
    /// first. Empty `fields` re-sends the order's full payload, products and
    /// discounts included.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if fetching or updating fails.
    pub async fn update_order(
        &self,
        order: impl Into<Reference<Order>>,
        fields: Map<String, Value>,
    ) -> Result<Option<Order>, ResourceError> {
        let reference: Reference<Order> = order.into();
        let order = match reference {
            Reference::ById(id) => self.get_order(id).await?,
            other => other.resolve(self.rest()).await?,
        };

        match order {
            Some(order) => self.write_resolved(order, fields).await,
            None => Ok(None),
        }
    }
}
