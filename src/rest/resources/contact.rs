//! Contact resource implementation.
//!
//! Contacts are identified naturally by email. Tags and automations are
//! attached to a contact through join-records ([`ContactTag`],
//! [`ContactAutomation`]) that have ids of their own; the [`JoinRecord`]
//! trait lets the contact-side operations treat both kinds alike.
//!
//! [`ContactTag`]: super::ContactTag
//! [`ContactAutomation`]: super::ContactAutomation

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::lenient::option_u64;
use crate::rest::reference::impl_reference_from_value;
use crate::rest::{first_or_none, transform, Resolve, Resource, ResourceError};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Resource for Contact {
    const NAME: &'static str = "Contact";
    const SINGULAR: &'static str = "contact";
    const PLURAL: &'static str = "contacts";
    const PATH: &'static str = "contacts";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl_reference_from_value!(Contact);

/// A server record linking a contact to another entity.
///
/// Join-records are listed under `contacts/{id}/{PLURAL}` and deleted by
/// their own id at `{PATH}/{id}`.
pub trait JoinRecord: Resource {
    /// The id of the entity the contact is linked to.
    fn related_id(&self) -> Option<u64>;
}

impl Contact {
    /// Finds the first contact with the given email.
    ///
    /// An empty email yields `None` without a request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the search request fails.
    pub async fn find_by_email(
        client: &RestClient,
        email: &str,
    ) -> Result<Option<Self>, ResourceError> {
        if email.is_empty() {
            return Ok(None);
        }

        let mut query = HashMap::new();
        query.insert("email".to_string(), email.to_string());

        Ok(first_or_none(Self::list(client, Some(query)).await?))
    }

    /// Lists the contacts subscribed to a list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn by_list(client: &RestClient, list_id: u64) -> Result<Vec<Self>, ResourceError> {
        let mut query = HashMap::new();
        query.insert("listid".to_string(), list_id.to_string());

        Self::list(client, Some(query)).await
    }

    /// Lists this contact's join-records of kind `J`.
    ///
    /// A contact without an id has none.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn join_records<J: JoinRecord>(
        &self,
        client: &RestClient,
    ) -> Result<Vec<J>, ResourceError> {
        let Some(id) = self.id else {
            return Ok(Vec::new());
        };

        let path = format!("{}/{id}/{}", Self::PATH, J::PLURAL);
        let response = client
            .get(&path, None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(&id.to_string())))?;

        transform(&response.body, Some(J::PLURAL))
    }

    /// Deletes the first join-record of kind `J` pointing at `related_id`.
    ///
    /// Returns `false` without deleting anything when no join-record matches.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if listing or deleting fails.
    pub async fn remove_relation<J: JoinRecord>(
        &self,
        client: &RestClient,
        related_id: u64,
    ) -> Result<bool, ResourceError> {
        let records: Vec<J> = self.join_records(client).await?;

        let Some(join_id) = records
            .iter()
            .find(|record| record.related_id() == Some(related_id))
            .and_then(J::id)
        else {
            tracing::debug!(
                join = J::NAME,
                related_id,
                "no join-record to remove"
            );
            return Ok(false);
        };

        J::delete(client, join_id).await?;
        Ok(true)
    }

    /// Deletes every join-record of kind `J` of this contact.
    ///
    /// Returns the number of deleted join-records.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if listing or any delete fails.
    pub async fn remove_all_relations<J: JoinRecord>(
        &self,
        client: &RestClient,
    ) -> Result<usize, ResourceError> {
        let records: Vec<J> = self.join_records(client).await?;

        let mut removed = 0;
        for join_id in records.iter().filter_map(J::id) {
            J::delete(client, join_id).await?;
            removed += 1;
        }

        Ok(removed)
    }
}

impl Resolve for Contact {
    async fn find_by_key(client: &RestClient, key: &str) -> Result<Option<Self>, ResourceError> {
        Self::find_by_email(client, key).await
    }
}
