//! Automation and contact-automation resources.

use serde::{Deserialize, Serialize};

use crate::rest::lenient::option_u64;
use crate::rest::resources::JoinRecord;
use crate::rest::Resource;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Automation {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub status: Option<u64>,
}

impl Resource for Automation {
    const NAME: &'static str = "Automation";
    const SINGULAR: &'static str = "automation";
    const PLURAL: &'static str = "automations";
    const PATH: &'static str = "automations";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

/// Join-record placing a contact in an automation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContactAutomation {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub contact: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub automation: Option<u64>,
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub status: Option<u64>,
}

impl Resource for ContactAutomation {
    const NAME: &'static str = "ContactAutomation";
    const SINGULAR: &'static str = "contactAutomation";
    const PLURAL: &'static str = "contactAutomations";
    const PATH: &'static str = "contactAutomations";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl JoinRecord for ContactAutomation {
    fn related_id(&self) -> Option<u64> {
        self.automation
    }
}
