use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::elevators::create_elevator_scan_port_patches;
use crate::game::GameDescription;
use crate::hints;
use crate::layout::{HintConfiguration, PlayersConfiguration, SkyTempleKeyHintMode};
use crate::patches::GamePatches;
use crate::{PatcherError, Result};

/// Replacement text for one string table asset.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StringPatch {
    pub asset_id: u32,
    pub strings: Vec<String>,
}

/// Location hints, then Sky Temple Key hints, then elevator scans.
pub fn create_string_patches(
    hint_config: &HintConfiguration,
    game: &GameDescription,
    all_patches: &BTreeMap<usize, GamePatches>,
    players_config: &PlayersConfiguration,
    rng: &mut StdRng,
) -> Result<Vec<StringPatch>> {
    let patches = all_patches
        .get(&players_config.player_index)
        .ok_or(PatcherError::MissingPatches(players_config.player_index))?;

    let mut string_patches = hints::create_hints(patches, &game.world_list, rng)?;

    match hint_config.sky_temple_keys {
        SkyTempleKeyHintMode::Disabled => {
            string_patches.extend(hints::hide_sky_temple_key_hints());
        }
        mode => {
            string_patches.extend(hints::create_hints_for_sky_temple_keys(
                all_patches,
                players_config,
                &game.world_list,
                mode == SkyTempleKeyHintMode::HideArea,
            )?);
        }
    }

    string_patches.extend(create_elevator_scan_port_patches(
        &game.world_list,
        &patches.elevator_connection,
    )?);

    Ok(string_patches)
}
