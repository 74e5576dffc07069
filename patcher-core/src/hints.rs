use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

use crate::game::{NodeContext, NodeKind, WorldList};
use crate::layout::PlayersConfiguration;
use crate::patches::{GamePatches, Hint, HintItemPrecision, HintLocationPrecision, HintType};
use crate::pickup::{ItemCategory, PickupIndex};
use crate::{PatcherError, Result, StringPatch};

/// Logbook entries holding the Sky Temple Key hints, key 1 first.
const SKY_TEMPLE_KEY_SCAN_ASSETS: [u32; 9] = [
    0xD97685FE, 0x32413EFD, 0xDD8355C3, 0x3F5F4EBA, 0xD09D2584, 0x3BAA9E87, 0xD468F5B9,
    0x2563AE34, 0xCAA1C50A,
];

const JOKE_HINTS: &[&str] = &[
    "By this point in your run, you should have consumed at least 200 mL of water to maintain optimum hydration.",
    "Make sure to collect an Energy Transfer Module; otherwise your run won't be valid!",
    "Adam has not yet authorized the use of this hint.",
    "Back in my day, we didn't need hints!",
    "Hear the words of O-Lir, last Sentinel of the Fortress Temple. May they serve you well.",
    "Warning! Dark Aether's atmosphere is dangerous! Energized Safe Zones don't last forever!",
];

const NO_HINT_TEXT: &str = "Someone forgot to leave a message here.";

fn item_color(text: &str) -> String {
    format!("&push;&main-color=#FF6705B3;{text}&pop;")
}

fn location_color(text: &str) -> String {
    format!("&push;&main-color=#FF3333;{text}&pop;")
}

fn joke_color(text: &str) -> String {
    format!("&push;&main-color=#45F731;{text}&pop;")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn create_simple_logbook_hint(asset_id: u32, hint: String) -> StringPatch {
    StringPatch {
        asset_id,
        strings: vec![hint.clone(), String::new(), hint],
    }
}

fn location_name(ctx: &NodeContext<'_>, precision: HintLocationPrecision) -> String {
    match precision {
        HintLocationPrecision::Detailed => format!("{} - {}", ctx.world.name, ctx.area.name),
        HintLocationPrecision::WorldOnly => ctx.world.name.clone(),
    }
}

fn pickup_node<'a>(world_list: &'a WorldList, index: PickupIndex) -> Result<NodeContext<'a>> {
    world_list
        .node_for_pickup(index)
        .ok_or(PatcherError::UnknownPickupNode(index))
}

fn location_hint_text(
    patches: &GamePatches,
    world_list: &WorldList,
    hint: &Hint,
) -> Result<String> {
    let index = hint
        .target
        .ok_or_else(|| PatcherError::Config("location hint without a target".to_string()))?;

    let (name, category) = match patches.pickup_assignment.get(&index) {
        Some(target) => (target.pickup.name.as_str(), target.pickup.item_category),
        None => ("Energy Transfer Module", ItemCategory::Etm),
    };

    let item = match hint.item_precision {
        HintItemPrecision::Detailed => name.to_string(),
        HintItemPrecision::Category => category.hint_details().to_string(),
        HintItemPrecision::Nothing => "an item".to_string(),
    };

    let node = pickup_node(world_list, index)?;
    Ok(format!(
        "{} can be found in {}.",
        item_color(&capitalize(&item)),
        location_color(&location_name(&node, hint.location_precision))
    ))
}

/// One logbook text per logbook node, in graph order. Nodes without a hint
/// get a placeholder message.
pub fn create_hints(
    patches: &GamePatches,
    world_list: &WorldList,
    rng: &mut StdRng,
) -> Result<Vec<StringPatch>> {
    let mut hint_text: BTreeMap<u32, String> = BTreeMap::new();

    for ctx in world_list.all_nodes() {
        let NodeKind::Logbook { string_asset_id } = ctx.node.kind else {
            continue;
        };
        let Some(hint) = patches.hints.get(&string_asset_id) else {
            continue;
        };

        let text = match hint.hint_type {
            HintType::Joke => {
                let joke = JOKE_HINTS.choose(rng).copied().unwrap_or(NO_HINT_TEXT);
                joke_color(joke)
            }
            HintType::Location => location_hint_text(patches, world_list, hint)?,
        };
        hint_text.insert(string_asset_id, text);
    }

    Ok(world_list
        .all_nodes()
        .filter_map(|ctx| match ctx.node.kind {
            NodeKind::Logbook { string_asset_id } => Some(create_simple_logbook_hint(
                string_asset_id,
                hint_text
                    .remove(&string_asset_id)
                    .unwrap_or_else(|| NO_HINT_TEXT.to_string()),
            )),
            _ => None,
        })
        .collect())
}

fn sky_temple_key_name(key_number: usize) -> String {
    format!("Sky Temple Key {key_number}")
}

/// Where each Sky Temple Key of the local player lies, across every
/// player's world. Owner names are only shown when the layout has more than
/// one player.
pub fn create_hints_for_sky_temple_keys(
    all_patches: &BTreeMap<usize, GamePatches>,
    players_config: &PlayersConfiguration,
    world_list: &WorldList,
    hide_area: bool,
) -> Result<Vec<StringPatch>> {
    let multiworld = all_patches.len() > 1;
    let precision = if hide_area {
        HintLocationPrecision::WorldOnly
    } else {
        HintLocationPrecision::Detailed
    };

    let mut hints = Vec::with_capacity(SKY_TEMPLE_KEY_SCAN_ASSETS.len());

    for (key, asset_id) in SKY_TEMPLE_KEY_SCAN_ASSETS.iter().enumerate() {
        let key_name = sky_temple_key_name(key + 1);

        let placed = all_patches.iter().find_map(|(&player, patches)| {
            patches
                .pickup_assignment
                .iter()
                .find(|(_, target)| {
                    target.player == players_config.player_index
                        && target.pickup.item_category == ItemCategory::SkyTempleKey
                        && target.pickup.name == key_name
                })
                .map(|(&index, _)| (player, index))
        });

        let text = match placed {
            Some((player, index)) => {
                let node = pickup_node(world_list, index)?;
                let owner = if multiworld {
                    format!("{}'s ", players_config.player_name(player)?)
                } else {
                    String::new()
                };
                format!(
                    "The {} can be found in {}{}.",
                    item_color(&key_name),
                    owner,
                    location_color(&location_name(&node, precision))
                )
            }
            None => format!("The {} has no need to be located.", item_color(&key_name)),
        };

        hints.push(create_simple_logbook_hint(*asset_id, text));
    }

    Ok(hints)
}

pub fn hide_sky_temple_key_hints() -> Vec<StringPatch> {
    SKY_TEMPLE_KEY_SCAN_ASSETS
        .iter()
        .enumerate()
        .map(|(key, asset_id)| {
            create_simple_logbook_hint(
                *asset_id,
                format!(
                    "The {} is lost somewhere on Aether.",
                    item_color(&sky_temple_key_name(key + 1))
                ),
            )
        })
        .collect()
}
