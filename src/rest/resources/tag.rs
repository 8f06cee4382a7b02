//! Tag and contact-tag resources.

use serde::{Deserialize, Serialize};

use crate::rest::lenient::option_u64;
use crate::rest::resources::JoinRecord;
use crate::rest::Resource;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Tag {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for Tag {
    const NAME: &'static str = "Tag";
    const SINGULAR: &'static str = "tag";
    const PLURAL: &'static str = "tags";
    const PATH: &'static str = "tags";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

/// Join-record linking a contact to a tag.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContactTag {
    #[serde(skip_serializing, deserialize_with = "option_u64")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub contact: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "option_u64")]
    pub tag: Option<u64>,
}

impl Resource for ContactTag {
    const NAME: &'static str = "ContactTag";
    const SINGULAR: &'static str = "contactTag";
    const PLURAL: &'static str = "contactTags";
    const PATH: &'static str = "contactTags";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl JoinRecord for ContactTag {
    fn related_id(&self) -> Option<u64> {
        self.tag
    }
}
