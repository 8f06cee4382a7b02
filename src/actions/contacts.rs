//! Contact actions, including tag and automation membership.

use serde_json::{Map, Value};

use crate::actions::ActiveCampaign;
use crate::rest::resources::{Automation, Contact, ContactAutomation, ContactTag, Tag};
use crate::rest::{Reference, Resource, ResourceError};

impl ActiveCampaign {
    /// Lists all contacts.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn contacts(&self) -> Result<Vec<Contact>, ResourceError> {
        Contact::list(self.rest(), None).await
    }

    /// Finds a contact by email.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn find_contact(&self, email: &str) -> Result<Option<Contact>, ResourceError> {
        Contact::find_by_email(self.rest(), email).await
    }

    /// Fetches a contact by id. A missing contact is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn get_contact(&self, id: u64) -> Result<Option<Contact>, ResourceError> {
        Contact::fetch(self.rest(), id).await
    }

    /// Creates a contact.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ValidationFailed`] if the server rejects the
    /// contact (for example a duplicate email).
    pub async fn create_contact(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
    ) -> Result<Option<Contact>, ResourceError> {
        let contact = Contact {
            email: Some(email.to_string()),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            phone: phone.map(str::to_string),
            ..Contact::default()
        };

        Contact::create(self.rest(), contact.writable_fields()?).await
    }

    /// Returns the contact with `email`, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the lookup or the creation fails.
    pub async fn find_or_create_contact(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
    ) -> Result<Option<Contact>, ResourceError> {
        if let Some(contact) = self.find_contact(email).await? {
            return Ok(Some(contact));
        }

        self.create_contact(email, first_name, last_name, phone).await
    }

    /// Updates a contact given by id, email or value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if resolving or updating fails.
    pub async fn update_contact(
        &self,
        contact: impl Into<Reference<Contact>>,
        fields: Map<String, Value>,
    ) -> Result<Option<Contact>, ResourceError> {
        self.update_resource::<Contact>(contact.into(), fields).await
    }

    /// Lists the automations a contact is in, as join-records.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn contact_automations(
        &self,
        contact: &Contact,
    ) -> Result<Vec<ContactAutomation>, ResourceError> {
        contact.join_records(self.rest()).await
    }

    /// Lists the tags on a contact, as join-records.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn contact_tags(&self, contact: &Contact) -> Result<Vec<ContactTag>, ResourceError> {
        contact.join_records(self.rest()).await
    }

    /// Takes a contact out of an automation.
    ///
    /// Returns `false` when the contact was not in the automation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if listing or deleting fails.
    pub async fn remove_automation_from_contact(
        &self,
        contact: &Contact,
        automation: &Automation,
    ) -> Result<bool, ResourceError> {
        let Some(automation_id) = automation.id else {
            return Ok(false);
        };

        contact
            .remove_relation::<ContactAutomation>(self.rest(), automation_id)
            .await
    }

    /// Takes a contact out of every automation. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if listing or any delete fails.
    pub async fn remove_all_automations_from_contact(
        &self,
        contact: &Contact,
    ) -> Result<usize, ResourceError> {
        contact
            .remove_all_relations::<ContactAutomation>(self.rest())
            .await
    }

    /// Removes a tag from a contact.
    ///
    /// Returns `false` when the contact did not carry the tag.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if listing or deleting fails.
    pub async fn remove_tag_from_contact(
        &self,
        contact: &Contact,
        tag: &Tag,
    ) -> Result<bool, ResourceError> {
        let Some(tag_id) = tag.id else {
            return Ok(false);
        };

        contact.remove_relation::<ContactTag>(self.rest(), tag_id).await
    }

    /// Removes every tag from a contact. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if listing or any delete fails.
    pub async fn remove_all_tags_from_contact(
        &self,
        contact: &Contact,
    ) -> Result<usize, ResourceError> {
        contact.remove_all_relations::<ContactTag>(self.rest()).await
    }

    /// Tags a contact. Returns `None` without a request if either side has no id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn add_tag_to_contact(
        &self,
        contact: &Contact,
        tag: &Tag,
    ) -> Result<Option<ContactTag>, ResourceError> {
        let (Some(contact_id), Some(tag_id)) = (contact.id, tag.id) else {
            return Ok(None);
        };

        let join = ContactTag {
            contact: Some(contact_id),
            tag: Some(tag_id),
            ..ContactTag::default()
        };

        ContactTag::create(self.rest(), join.writable_fields()?).await
    }

    /// Adds a contact to an automation. Returns `None` without a request if
    /// either side has no id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn add_contact_to_automation(
        &self,
        contact: &Contact,
        automation: &Automation,
    ) -> Result<Option<ContactAutomation>, ResourceError> {
        let (Some(contact_id), Some(automation_id)) = (contact.id, automation.id) else {
            return Ok(None);
        };

        let join = ContactAutomation {
            contact: Some(contact_id),
            automation: Some(automation_id),
            ..ContactAutomation::default()
        };

        ContactAutomation::create(self.rest(), join.writable_fields()?).await
    }

    /// Lists all tags.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn tags(&self) -> Result<Vec<Tag>, ResourceError> {
        Tag::list(self.rest(), None).await
    }

    /// Lists all automations.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn automations(&self) -> Result<Vec<Automation>, ResourceError> {
        Automation::list(self.rest(), None).await
    }
}
