use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use xxhash_rust::xxh3::{xxh3_128, xxh3_64};

use crate::patches::GamePatches;
use crate::{PatcherError, Result};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickupModelStyle {
    #[default]
    AllVisible,
    HideModel,
    HideScan,
    HideAll,
}

impl PickupModelStyle {
    pub fn shows_real_scan(self) -> bool {
        matches!(self, PickupModelStyle::AllVisible | PickupModelStyle::HideModel)
    }
}

/// Where the disguise for a hidden pickup model comes from.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickupModelDataSource {
    #[default]
    Etm,
    Random,
    Location,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutElevators {
    #[default]
    Vanilla,
    TwoWayRandomized,
    TwoWayUnchecked,
    OneWayElevator,
    OneWayAnything,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkyTempleKeyHintMode {
    Disabled,
    HideArea,
    #[default]
    Precise,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HintConfiguration {
    pub sky_temple_keys: SkyTempleKeyHintMode,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutConfiguration {
    /// Raw game description, decoded by [`crate::game::decode_data`].
    pub game_data: serde_json::Value,
    #[serde(default)]
    pub elevators: LayoutElevators,
    #[serde(default)]
    pub hints: HintConfiguration,
    /// Items every seed of this preset starts with, by resource long name.
    #[serde(default)]
    pub starting_items: BTreeMap<String, i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PatcherConfiguration {
    pub pickup_model_style: PickupModelStyle,
    pub pickup_model_data_source: PickupModelDataSource,
    pub warp_to_start: bool,
    pub varia_suit_damage: f64,
    pub dark_suit_damage: f64,
}

impl Default for PatcherConfiguration {
    fn default() -> Self {
        Self {
            pickup_model_style: PickupModelStyle::AllVisible,
            pickup_model_data_source: PickupModelDataSource::Etm,
            warp_to_start: true,
            varia_suit_damage: 6.0,
            dark_suit_damage: 1.2,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub layout_configuration: LayoutConfiguration,
    #[serde(default)]
    pub patcher_configuration: PatcherConfiguration,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Permalink {
    pub seed_number: u32,
    #[serde(default)]
    pub spoiler: bool,
    /// One preset per player.
    pub presets: BTreeMap<usize, Preset>,
}

impl Permalink {
    pub fn player_count(&self) -> usize {
        self.presets.len()
    }

    pub fn get_preset(&self, player_index: usize) -> Result<&Preset> {
        self.presets
            .get(&player_index)
            .ok_or(PatcherError::MissingPreset(player_index))
    }

    /// Canonical text form. The RNG for a seed is derived from this string,
    /// so it must only depend on the permalink's contents.
    pub fn encode(&self) -> Result<String> {
        let presets = serde_json::to_vec(&self.presets)?;
        Ok(format!(
            "{:08x}{}{:032x}",
            self.seed_number,
            if self.spoiler { 's' } else { 'r' },
            xxh3_128(&presets)
        ))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmeticPatches {
    pub disable_hud_popup: bool,
    pub speed_up_credits: bool,
    pub open_map: bool,
    pub pickup_markers: bool,
}

impl Default for CosmeticPatches {
    fn default() -> Self {
        Self {
            disable_hud_popup: true,
            speed_up_credits: true,
            open_map: true,
            pickup_markers: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayersConfiguration {
    pub player_index: usize,
    pub player_names: BTreeMap<usize, String>,
}

impl PlayersConfiguration {
    pub fn solo() -> Self {
        Self {
            player_index: 0,
            player_names: BTreeMap::from([(0, "Player 1".to_string())]),
        }
    }

    pub fn player_name(&self, player: usize) -> Result<&str> {
        self.player_names
            .get(&player)
            .map(String::as_str)
            .ok_or(PatcherError::MissingPlayerName(player))
    }
}

const HASH_WORDS: &[&str] = &[
    "Aether", "Agon", "Torvus", "Sanctuary", "Ing", "Luminoth", "Splinter", "Grenchler",
    "Warrior", "Sandigger", "Bloatsac", "Quad", "Rezbit", "Spider", "Boost", "Grapple",
    "Seeker", "Screw", "Echo", "Darkburst", "Sunburst", "Sonic", "Annihilator", "Light",
    "Dark", "Kinetic", "Chykka", "Caretaker", "Alpha", "Amorbis", "Emperor", "Quadraxis",
    "Chozo", "Phazon", "Temple", "Bastion", "Hive", "Portal", "Beacon", "Gate",
    "Crypt", "Vault", "Reactor", "Mining", "Ventilation", "Catacombs", "Grove", "Abyss",
    "Oasis", "Crossroads", "Dynamo", "Hydrochamber", "Pirate", "Trooper", "Commando", "Lore",
    "Scan", "Visor", "Suit", "Missile", "Tank", "Translator", "Energy", "U-Mos",
];

/// A finished generation: the permalink that produced it and every player's
/// patches.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutDescription {
    pub permalink: Permalink,
    pub all_patches: BTreeMap<usize, GamePatches>,
}

impl LayoutDescription {
    pub fn patches_for(&self, player_index: usize) -> Result<&GamePatches> {
        self.all_patches
            .get(&player_index)
            .ok_or(PatcherError::MissingPatches(player_index))
    }

    fn shareable_hash_value(&self) -> Result<u64> {
        let mut bytes = self.permalink.encode()?.into_bytes();
        bytes.extend(serde_json::to_vec(&self.all_patches)?);
        Ok(xxh3_64(&bytes))
    }

    pub fn shareable_hash(&self) -> Result<String> {
        Ok(format!("{:08X}", self.shareable_hash_value()? >> 32))
    }

    /// Three words that let players compare seeds at a glance.
    pub fn shareable_word_hash(&self) -> Result<String> {
        let bytes = self.shareable_hash_value()?.to_le_bytes();
        let words: Vec<&str> = bytes[..3]
            .iter()
            .map(|b| HASH_WORDS[*b as usize % HASH_WORDS.len()])
            .collect();
        Ok(words.join(" "))
    }
}
