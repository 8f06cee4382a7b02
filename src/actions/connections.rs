//! Connection actions.

use serde_json::{Map, Value};

use crate::actions::ActiveCampaign;
use crate::rest::resources::Connection;
use crate::rest::{Reference, Resource, ResourceError};

impl ActiveCampaign {
    /// Lists all connections.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn connections(&self) -> Result<Vec<Connection>, ResourceError> {
        Connection::list(self.rest(), None).await
    }

    /// Fetches a connection by id. A missing connection is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn get_connection(&self, id: u64) -> Result<Option<Connection>, ResourceError> {
        Connection::fetch(self.rest(), id).await
    }

    /// Finds a connection by service and/or external id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn find_connection(
        &self,
        service: Option<&str>,
        external_id: Option<&str>,
    ) -> Result<Option<Connection>, ResourceError> {
        Connection::find(self.rest(), service, external_id).await
    }

    /// Creates a connection to an external service.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ValidationFailed`] if the server rejects the
    /// connection, or another [`ResourceError`] if the request fails.
    pub async fn create_connection(
        &self,
        service: &str,
        external_id: &str,
        name: &str,
        logo_url: &str,
        link_url: &str,
    ) -> Result<Option<Connection>, ResourceError> {
        let connection = Connection {
            service: Some(service.to_string()),
            external_id: Some(external_id.to_string()),
            name: Some(name.to_string()),
            logo_url: Some(logo_url.to_string()),
            link_url: Some(link_url.to_string()),
            ..Connection::default()
        };

        Connection::create(self.rest(), connection.writable_fields()?).await
    }

    /// Deletes a connection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the connection does not exist.
    pub async fn delete_connection(&self, id: u64) -> Result<(), ResourceError> {
        Connection::delete(self.rest(), id).await
    }

    /// Updates a connection given by id, service name or value.
    ///
    /// Empty `fields` re-sends the connection's current fields. Returns
    /// `None` without writing when the connection cannot be resolved.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if resolving or updating fails.
    pub async fn update_connection(
        &self,
        connection: impl Into<Reference<Connection>>,
        fields: Map<String, Value>,
    ) -> Result<Option<Connection>, ResourceError> {
        self.update_resource::<Connection>(connection.into(), fields).await
    }
}
