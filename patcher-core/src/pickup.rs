use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resources::{ResourceDatabase, ResourceId, ResourceQuantity};
use crate::Result;

/// Number of pickup slots in the game.
pub const TOTAL_PICKUP_COUNT: u32 = 119;

pub const ETM_MODEL_INDEX: u32 = 30;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickupIndex(pub u32);

impl fmt::Display for PickupIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PickupIndex {}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Visor,
    MorphBall,
    MorphBallRelated,
    Beam,
    BeamRelated,
    Missile,
    MissileRelated,
    Movement,
    Suit,
    Translator,
    EnergyTank,
    TempleKey,
    SkyTempleKey,
    Expansion,
    Etm,
}

impl ItemCategory {
    pub fn is_key(self) -> bool {
        matches!(self, ItemCategory::TempleKey | ItemCategory::SkyTempleKey)
    }

    pub fn is_major_category(self) -> bool {
        !matches!(
            self,
            ItemCategory::TempleKey
                | ItemCategory::SkyTempleKey
                | ItemCategory::Expansion
                | ItemCategory::Etm
        )
    }

    /// Word used by hints that only reveal the kind of item.
    pub fn hint_details(self) -> &'static str {
        match self {
            ItemCategory::Visor => "a visor",
            ItemCategory::MorphBall | ItemCategory::MorphBallRelated => "a morph ball system",
            ItemCategory::Beam | ItemCategory::BeamRelated => "a beam system",
            ItemCategory::Missile | ItemCategory::MissileRelated => "a missile system",
            ItemCategory::Movement => "a movement system",
            ItemCategory::Suit => "a suit",
            ItemCategory::Translator => "a translator",
            ItemCategory::EnergyTank => "an Energy Tank",
            ItemCategory::TempleKey => "a temple key",
            ItemCategory::SkyTempleKey => "a Sky Temple Key",
            ItemCategory::Expansion => "an expansion",
            ItemCategory::Etm => "an Energy Transfer Module",
        }
    }
}

/// One grant of a pickup. The first set of an entry is unconditional; later
/// sets apply once `item` has been collected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionalResources {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub item: Option<ResourceId>,
    #[serde(default)]
    pub resources: Vec<ResourceQuantity>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourceConversion {
    pub source: ResourceId,
    pub target: ResourceId,
    #[serde(default)]
    pub clear_source: bool,
    #[serde(default)]
    pub overwrite_target: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickupEntry {
    pub name: String,
    pub model_index: u32,
    pub item_category: ItemCategory,
    pub resources: Vec<ConditionalResources>,
    #[serde(default)]
    pub convert_resources: Vec<ResourceConversion>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickupTarget {
    pub pickup: PickupEntry,
    pub player: usize,
}

/// The pickup placed in slots the generator left empty.
pub fn create_useless_pickup(db: &ResourceDatabase) -> Result<PickupEntry> {
    let etm = db.item_by_name("Energy Transfer Module")?;

    Ok(PickupEntry {
        name: "Energy Transfer Module".to_string(),
        model_index: ETM_MODEL_INDEX,
        item_category: ItemCategory::Etm,
        resources: vec![ConditionalResources {
            name: None,
            item: None,
            resources: vec![ResourceQuantity {
                resource: etm.id(),
                amount: 1,
            }],
        }],
        convert_resources: Vec::new(),
    })
}

/// Neutral disguise used when every pickup should look the same.
pub fn create_visual_etm() -> PickupEntry {
    PickupEntry {
        name: "Unknown item".to_string(),
        model_index: ETM_MODEL_INDEX,
        item_category: ItemCategory::Etm,
        resources: vec![ConditionalResources {
            name: None,
            item: None,
            resources: Vec::new(),
        }],
        convert_resources: Vec::new(),
    }
}
