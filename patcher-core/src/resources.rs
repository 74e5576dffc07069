use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{PatcherError, Result};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Item,
    Event,
    Trick,
    Damage,
    Version,
    Misc,
}

impl ResourceType {
    fn as_str(self) -> &'static str {
        match self {
            ResourceType::Item => "item",
            ResourceType::Event => "event",
            ResourceType::Trick => "trick",
            ResourceType::Damage => "damage",
            ResourceType::Version => "version",
            ResourceType::Misc => "misc",
        }
    }
}

/// Stable handle for a resource: its kind plus its index within that kind.
///
/// Serialized as `"<kind>:<index>"` so it can be used as a JSON object key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ResourceId {
    pub resource_type: ResourceType,
    pub index: u32,
}

impl ResourceId {
    pub fn item(index: u32) -> Self {
        ResourceId {
            resource_type: ResourceType::Item,
            index,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type.as_str(), self.index)
    }
}

impl FromStr for ResourceId {
    type Err = PatcherError;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, index) = s
            .split_once(':')
            .ok_or_else(|| PatcherError::Config(format!("malformed resource id '{s}'")))?;

        let resource_type = match kind {
            "item" => ResourceType::Item,
            "event" => ResourceType::Event,
            "trick" => ResourceType::Trick,
            "damage" => ResourceType::Damage,
            "version" => ResourceType::Version,
            "misc" => ResourceType::Misc,
            _ => {
                return Err(PatcherError::Config(format!(
                    "unknown resource kind '{kind}' in '{s}'"
                )))
            }
        };

        let index = index
            .parse::<u32>()
            .map_err(|e| PatcherError::Config(format!("bad resource index in '{s}': {e}")))?;

        Ok(ResourceId {
            resource_type,
            index,
        })
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for ResourceId {
    type Error = PatcherError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub resource_type: ResourceType,
    pub index: u32,
    pub long_name: String,
    pub short_name: String,
}

impl ResourceInfo {
    pub fn id(&self) -> ResourceId {
        ResourceId {
            resource_type: self.resource_type,
            index: self.index,
        }
    }
}

/// One `(resource, quantity)` pair of a gain.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourceQuantity {
    pub resource: ResourceId,
    pub amount: i32,
}

pub type CurrentResources = BTreeMap<ResourceId, i32>;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResourceDatabase {
    pub resources: Vec<ResourceInfo>,
}

impl ResourceDatabase {
    pub fn items(&self) -> impl Iterator<Item = &ResourceInfo> {
        self.resources
            .iter()
            .filter(|r| r.resource_type == ResourceType::Item)
    }

    pub fn get(&self, id: ResourceId) -> Result<&ResourceInfo> {
        self.resources
            .iter()
            .find(|r| r.id() == id)
            .ok_or(PatcherError::UnknownResource(id))
    }

    pub fn item_by_name(&self, long_name: &str) -> Result<&ResourceInfo> {
        self.items()
            .find(|r| r.long_name == long_name)
            .ok_or_else(|| PatcherError::UnknownResourceName(long_name.to_string()))
    }
}

const RESOURCE_NAME_TRANSLATION: &[(&str, &str)] = &[
    ("Temporary Missile", "Missile"),
    ("Temporary Power Bombs", "Power Bomb"),
];

/// Name shown to the player for a resource.
pub fn display_name(resource: &ResourceInfo) -> &str {
    RESOURCE_NAME_TRANSLATION
        .iter()
        .find(|(from, _)| *from == resource.long_name)
        .map(|(_, to)| *to)
        .unwrap_or(&resource.long_name)
}
