//! List actions and list subscriptions.

use serde_json::{json, Map, Value};

use crate::actions::ActiveCampaign;
use crate::rest::resources::{slugify, Contact, ContactsList, DEFAULT_SENDER_REMINDER};
use crate::rest::{Reference, Resource, ResourceError};

/// Join endpoint for list subscriptions.
const CONTACT_LISTS_PATH: &str = "contactLists";

const STATUS_SUBSCRIBED: u64 = 1;
const STATUS_UNSUBSCRIBED: u64 = 2;

impl ActiveCampaign {
    /// Lists all lists.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn lists(&self) -> Result<Vec<ContactsList>, ResourceError> {
        ContactsList::list(self.rest(), None).await
    }

    /// Fetches a list by id. A missing list is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn get_list(&self, id: u64) -> Result<Option<ContactsList>, ResourceError> {
        ContactsList::fetch(self.rest(), id).await
    }

    /// Finds a list by name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn find_list(&self, name: &str) -> Result<Option<ContactsList>, ResourceError> {
        ContactsList::find_by_name(self.rest(), name).await
    }

    /// Creates a list.
    ///
    /// `params` carries any further list fields. `stringid` is derived from
    /// the name with [`slugify`] unless `params` supplies one, and
    /// `sender_reminder` defaults to [`DEFAULT_SENDER_REMINDER`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create_list(
        &self,
        name: &str,
        sender_url: &str,
        params: Map<String, Value>,
    ) -> Result<Option<ContactsList>, ResourceError> {
        let mut fields = params;
        fields.insert("name".to_string(), Value::from(name));
        fields
            .entry("stringid")
            .or_insert_with(|| Value::from(slugify(name)));
        fields.insert("sender_url".to_string(), Value::from(sender_url));
        fields
            .entry("sender_reminder")
            .or_insert_with(|| Value::from(DEFAULT_SENDER_REMINDER));

        ContactsList::create(self.rest(), fields).await
    }

    /// Deletes a list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the list does not exist.
    pub async fn delete_list(&self, id: u64) -> Result<(), ResourceError> {
        ContactsList::delete(self.rest(), id).await
    }

    /// Subscribes a contact to a list, or unsubscribes it.
    ///
    /// The list may be given by id, name or value and the contact by id,
    /// email or value. Returns `false` without a request when either does
    /// not resolve.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if resolving or the status change fails.
    pub async fn update_list_status(
        &self,
        list: impl Into<Reference<ContactsList>>,
        contact: impl Into<Reference<Contact>>,
        subscribe: bool,
    ) -> Result<bool, ResourceError> {
        let list: Reference<ContactsList> = list.into();
        let contact: Reference<Contact> = contact.into();

        let list_id = list.resolve(self.rest()).await?.and_then(|l| l.id);
        let contact_id = contact.resolve(self.rest()).await?.and_then(|c| c.id);

        let (Some(list_id), Some(contact_id)) = (list_id, contact_id) else {
            tracing::debug!(?list_id, ?contact_id, "list status not changed");
            return Ok(false);
        };

        let status = if subscribe {
            STATUS_SUBSCRIBED
        } else {
            STATUS_UNSUBSCRIBED
        };
        let body = json!({
            "contactList": {
                "list": list_id,
                "contact": contact_id,
                "status": status,
            }
        });

        self.rest()
            .post(CONTACT_LISTS_PATH, body, None)
            .await
            .map_err(|e| {
                ResourceError::from_rest_error(e, ContactsList::NAME, Some(&list_id.to_string()))
            })?;

        Ok(true)
    }

    /// Lists the contacts on a list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn contacts_by_list(&self, list_id: u64) -> Result<Vec<Contact>, ResourceError> {
        Contact::by_list(self.rest(), list_id).await
    }
}
