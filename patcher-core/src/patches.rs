use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::AreaLocation;
use crate::pickup::{PickupIndex, PickupTarget};
use crate::resources::{CurrentResources, ResourceId};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintType {
    Joke,
    Location,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintLocationPrecision {
    #[default]
    Detailed,
    WorldOnly,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintItemPrecision {
    #[default]
    Detailed,
    Category,
    Nothing,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    pub hint_type: HintType,
    #[serde(default)]
    pub target: Option<PickupIndex>,
    #[serde(default)]
    pub location_precision: HintLocationPrecision,
    #[serde(default)]
    pub item_precision: HintItemPrecision,
}

/// Everything the generator decided for one player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GamePatches {
    pub player_index: usize,
    #[serde(default)]
    pub pickup_assignment: BTreeMap<PickupIndex, PickupTarget>,
    /// Teleporter instance id to destination.
    #[serde(default)]
    pub elevator_connection: BTreeMap<u32, AreaLocation>,
    /// Translator gate index to the translator resource that opens it.
    #[serde(default)]
    pub translator_gates: BTreeMap<u32, ResourceId>,
    #[serde(default)]
    pub starting_items: CurrentResources,
    pub starting_location: AreaLocation,
    /// Logbook string asset id to hint.
    #[serde(default)]
    pub hints: BTreeMap<u32, Hint>,
}
