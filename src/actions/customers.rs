//! Customer actions.

use serde_json::{Map, Value};

use crate::actions::ActiveCampaign;
use crate::rest::resources::Customer;
use crate::rest::{Reference, Resource, ResourceError};

impl ActiveCampaign {
    /// Lists all customers.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn customers(&self) -> Result<Vec<Customer>, ResourceError> {
        Customer::list(self.rest(), None).await
    }

    /// Fetches a customer by id. A missing customer is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn get_customer(&self, id: u64) -> Result<Option<Customer>, ResourceError> {
        Customer::fetch(self.rest(), id).await
    }

    /// Finds the first customer matching all supplied filters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn find_customer(
        &self,
        email: Option<&str>,
        external_id: Option<&str>,
        connection_id: Option<u64>,
    ) -> Result<Option<Customer>, ResourceError> {
        Customer::find(self.rest(), email, external_id, connection_id).await
    }

    /// Creates a customer on a connection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create_customer(
        &self,
        connection_id: u64,
        external_id: &str,
        email: &str,
        accepts_marketing: bool,
    ) -> Result<Option<Customer>, ResourceError> {
        let customer = Customer {
            connection_id: Some(connection_id),
            external_id: Some(external_id.to_string()),
            email: Some(email.to_string()),
            accepts_marketing: Some(u64::from(accepts_marketing)),
            ..Customer::default()
        };

        Customer::create(self.rest(), customer.writable_fields()?).await
    }

    /// Deletes a customer.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the customer does not exist.
    pub async fn delete_customer(&self, id: u64) -> Result<(), ResourceError> {
        Customer::delete(self.rest(), id).await
    }

    /// Updates a customer given by id, email or value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if resolving or updating fails.
    pub async fn update_customer(
        &self,
        customer: impl Into<Reference<Customer>>,
        fields: Map<String, Value>,
    ) -> Result<Option<Customer>, ResourceError> {
        self.update_resource::<Customer>(customer.into(), fields).await
    }
}
