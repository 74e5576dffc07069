use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

pub mod elevators;
pub mod game;
pub mod hints;
pub mod layout;
pub mod memo;
pub mod patches;
pub mod pickup;
pub mod pickups;
pub mod pool;
pub mod resources;
mod string_patches;

pub use string_patches::{create_string_patches, StringPatch};

use elevators::{
    apply_translator_gate_patches, create_elevators_field, create_translator_gates_field,
    ElevatorRecord, TranslatorGateRecord,
};
use game::{decode_data, AreaLocation};
use layout::{
    CosmeticPatches, LayoutConfiguration, LayoutDescription, PickupModelDataSource,
    PlayersConfiguration,
};
use memo::MemoData;
use patches::GamePatches;
use pickup::{create_useless_pickup, PickupIndex, PickupTarget, TOTAL_PICKUP_COUNT};
use pickups::{
    create_pickup_list, roll_dark_missile_troopers, PickupCreator, PickupRecord, ResourceAmount,
};
use pool::calculate_pool_results;
use resources::{display_name, CurrentResources, ResourceDatabase, ResourceId};

/// Version stamped into every patcher file.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
pub enum PatcherError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid elevator count. Expected {expected}, got {got}.")]
    InvalidElevatorCount { expected: usize, got: usize },
    #[error("pickup model data source {0:?} is not implemented")]
    UnimplementedDataSource(PickupModelDataSource),
    #[error("random pickup models need at least one assigned pickup")]
    EmptyPickupPool,
    #[error("unknown resource {0}")]
    UnknownResource(ResourceId),
    #[error("no item resource named '{0}'")]
    UnknownResourceName(String),
    #[error("no editable teleporter with instance id {0}")]
    UnknownTeleporter(u32),
    #[error("duplicate editable teleporter instance id {0}")]
    DuplicateTeleporter(u32),
    #[error("no area for world {} area {}", .0.world_asset_id, .0.area_asset_id)]
    UnknownArea(AreaLocation),
    #[error("no pickup node for {0}")]
    UnknownPickupNode(PickupIndex),
    #[error("no preset for player {0}")]
    MissingPreset(usize),
    #[error("no patches for player {0}")]
    MissingPatches(usize),
    #[error("no name for player {0}")]
    MissingPlayerName(usize),
    #[error("pickup '{0}' has a conditional grant without a triggering item")]
    ConditionalWithoutItem(String),
}

pub type Result<T> = std::result::Result<T, PatcherError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub location: AreaLocation,
    pub amount: Vec<ResourceAmount>,
    pub capacity: Vec<ResourceAmount>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecificPatches {
    pub hive_chamber_b_post_state: bool,
    pub intro_in_post_state: bool,
    pub warp_to_start: bool,
    pub speed_up_credits: bool,
    pub disable_hud_popup: bool,
    pub pickup_map_icons: bool,
    pub full_map_at_start: bool,
    pub dark_world_varia_suit_damage: f64,
    pub dark_world_dark_suit_damage: f64,
    pub always_up_gfmc_compound: bool,
    pub always_up_torvus_temple: bool,
    pub always_up_great_temple: bool,
}

/// Everything the external patcher needs to rewrite the game for one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatcherFile {
    pub permalink: String,
    pub seed_hash: String,
    pub randovania_version: String,
    pub spawn_point: SpawnPoint,
    pub starting_popup: Vec<String>,
    pub pickups: Vec<PickupRecord>,
    pub elevators: Vec<ElevatorRecord>,
    pub translator_gates: Vec<TranslatorGateRecord>,
    pub string_patches: Vec<StringPatch>,
    pub specific_patches: SpecificPatches,
}

fn create_spawn_point_field(patches: &GamePatches, db: &ResourceDatabase) -> SpawnPoint {
    // Starting amounts double as the starting capacities.
    let capacities: Vec<ResourceAmount> = db
        .items()
        .map(|item| ResourceAmount {
            index: item.index,
            amount: patches.starting_items.get(&item.id()).copied().unwrap_or(0),
        })
        .collect();

    SpawnPoint {
        location: patches.starting_location,
        amount: capacities.clone(),
        capacity: capacities,
    }
}

/// Starting items beyond what the preset always gives.
pub fn additional_starting_items(
    layout: &LayoutConfiguration,
    db: &ResourceDatabase,
    starting_items: &CurrentResources,
) -> Result<Vec<String>> {
    let initial_items = calculate_pool_results(layout, db)?.initial_resources;

    let mut extra = Vec::new();
    for (resource, &quantity) in starting_items {
        if quantity <= 0 || quantity == initial_items.get(resource).copied().unwrap_or(0) {
            continue;
        }
        let name = display_name(db.get(*resource)?);
        if quantity > 1 {
            extra.push(format!("{quantity} {name}"));
        } else {
            extra.push(name.to_string());
        }
    }
    Ok(extra)
}

fn create_starting_popup(
    layout: &LayoutConfiguration,
    db: &ResourceDatabase,
    starting_items: &CurrentResources,
) -> Result<Vec<String>> {
    let extra_items = additional_starting_items(layout, db, starting_items)?;
    if extra_items.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![
        "Extra starting items:".to_string(),
        extra_items.join(", "),
    ])
}

/// RNG for a seed. Every random choice in the patcher file comes from this
/// one stream.
pub fn rng_for_permalink(permalink: &str) -> StdRng {
    StdRng::seed_from_u64(xxh3_64(permalink.as_bytes()))
}

/// Build the patcher file for `players_config.player_index`.
///
/// The RNG is consumed in a fixed order: the pickup disguise shuffle, then
/// hint text, then the Dark Missile Trooper rolls.
pub fn create_patcher_file(
    description: &LayoutDescription,
    players_config: &PlayersConfiguration,
    cosmetic_patches: &CosmeticPatches,
) -> Result<PatcherFile> {
    let player_index = players_config.player_index;
    let preset = description.permalink.get_preset(player_index)?;
    let patcher_config = &preset.patcher_configuration;
    let layout = &preset.layout_configuration;
    let patches = description.patches_for(player_index)?;

    let permalink = description.permalink.encode()?;
    let mut rng = rng_for_permalink(&permalink);

    let game = decode_data(&layout.game_data)?;
    let db = &game.resource_database;
    let useless_target = PickupTarget {
        pickup: create_useless_pickup(db)?,
        player: player_index,
    };

    let seed_hash = format!(
        "- {} ({})",
        description.shareable_word_hash()?,
        description.shareable_hash()?
    );
    log::info!("creating patcher file for player {player_index}, seed hash {seed_hash}");

    let spawn_point = create_spawn_point_field(patches, db);
    let starting_popup = create_starting_popup(layout, db, &patches.starting_items)?;

    let player_count = description.permalink.player_count();
    if description.all_patches.len() != player_count {
        return Err(PatcherError::Config(format!(
            "permalink has {player_count} player(s) but the layout has {} patch set(s)",
            description.all_patches.len()
        )));
    }
    log::debug!(
        "{player_count} player(s), pickup model style {:?}",
        patcher_config.pickup_model_style
    );
    let creator = if player_count == 1 {
        let memo = if cosmetic_patches.disable_hud_popup {
            MemoData::simplified()
        } else {
            MemoData::full()
        };
        PickupCreator::Solo(memo)
    } else {
        PickupCreator::Multi(players_config.player_names.clone())
    };

    let mut pickups = create_pickup_list(
        patches,
        &useless_target,
        TOTAL_PICKUP_COUNT,
        &mut rng,
        patcher_config.pickup_model_style,
        patcher_config.pickup_model_data_source,
        &creator,
        db,
    )?;

    let elevators = create_elevators_field(&patches.elevator_connection, &game.world_list)?;
    let translator_gates = create_translator_gates_field(&patches.translator_gates);

    let string_patches = create_string_patches(
        &layout.hints,
        &game,
        &description.all_patches,
        players_config,
        &mut rng,
    )?;

    let troopers = roll_dark_missile_troopers(&mut pickups, &mut rng);
    if troopers > 0 {
        log::info!("{troopers} missile expansion(s) became Dark Missile Troopers");
    }

    // TODO: starting at the ship with 9 Sky Temple Keys and item loss should
    // disable hive_chamber_b_post_state.
    let mut specific_patches = SpecificPatches {
        hive_chamber_b_post_state: true,
        intro_in_post_state: true,
        warp_to_start: patcher_config.warp_to_start,
        speed_up_credits: cosmetic_patches.speed_up_credits,
        disable_hud_popup: cosmetic_patches.disable_hud_popup,
        pickup_map_icons: cosmetic_patches.pickup_markers,
        full_map_at_start: cosmetic_patches.open_map,
        dark_world_varia_suit_damage: patcher_config.varia_suit_damage,
        dark_world_dark_suit_damage: patcher_config.dark_suit_damage,
        ..SpecificPatches::default()
    };
    apply_translator_gate_patches(&mut specific_patches, layout.elevators);

    log::debug!(
        "patcher file: {} pickups, {} elevators, {} translator gates, {} string patches",
        pickups.len(),
        elevators.len(),
        translator_gates.len(),
        string_patches.len()
    );

    Ok(PatcherFile {
        permalink,
        seed_hash,
        randovania_version: VERSION.to_string(),
        spawn_point,
        starting_popup,
        pickups,
        elevators,
        translator_gates,
        string_patches,
        specific_patches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{HintConfiguration, LayoutElevators};
    use crate::resources::{ResourceInfo, ResourceType};
    use std::collections::BTreeMap;

    fn db() -> ResourceDatabase {
        let item = |index: u32, name: &str| ResourceInfo {
            resource_type: ResourceType::Item,
            index,
            long_name: name.to_string(),
            short_name: name.replace(' ', ""),
        };
        ResourceDatabase {
            resources: vec![
                item(0, "Power Beam"),
                item(44, "Missile"),
                item(45, "Temporary Missile"),
                item(60, "Dark Beam"),
            ],
        }
    }

    fn layout(starting_items: &[(&str, i32)]) -> LayoutConfiguration {
        LayoutConfiguration {
            game_data: serde_json::Value::Null,
            elevators: LayoutElevators::Vanilla,
            hints: HintConfiguration::default(),
            starting_items: starting_items
                .iter()
                .map(|(n, q)| (n.to_string(), *q))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn popup_lists_items_beyond_baseline() {
        let starting = CurrentResources::from([(ResourceId::item(44), 5)]);
        let popup = create_starting_popup(&layout(&[("Missile", 0)]), &db(), &starting).unwrap();
        assert_eq!(popup, vec!["Extra starting items:", "5 Missile"]);
    }

    #[test]
    fn popup_is_empty_when_start_matches_baseline() {
        let starting =
            CurrentResources::from([(ResourceId::item(0), 1), (ResourceId::item(44), 5)]);
        let popup = create_starting_popup(
            &layout(&[("Power Beam", 1), ("Missile", 5)]),
            &db(),
            &starting,
        )
        .unwrap();
        assert!(popup.is_empty());
    }

    #[test]
    fn popup_omits_single_quantities_and_renames() {
        let starting = CurrentResources::from([
            (ResourceId::item(0), 1),
            (ResourceId::item(45), 10),
            (ResourceId::item(60), 1),
        ]);
        let popup = create_starting_popup(&layout(&[("Power Beam", 1)]), &db(), &starting).unwrap();
        assert_eq!(popup, vec!["Extra starting items:", "10 Missile, Dark Beam"]);
    }

    #[test]
    fn spawn_point_lists_every_item() {
        let patches = GamePatches {
            player_index: 0,
            pickup_assignment: BTreeMap::new(),
            elevator_connection: BTreeMap::new(),
            translator_gates: BTreeMap::new(),
            starting_items: CurrentResources::from([(ResourceId::item(44), 5)]),
            starting_location: AreaLocation {
                world_asset_id: 1,
                area_asset_id: 2,
            },
            hints: BTreeMap::new(),
        };
        let spawn = create_spawn_point_field(&patches, &db());
        assert_eq!(spawn.amount.len(), 4);
        assert_eq!(spawn.amount[1], ResourceAmount { index: 44, amount: 5 });
        assert_eq!(spawn.amount[0], ResourceAmount { index: 0, amount: 0 });
        assert_eq!(spawn.amount, spawn.capacity);
    }

    #[test]
    fn great_temple_elevator_depends_on_elevator_mode() {
        let mut flags = SpecificPatches::default();
        apply_translator_gate_patches(&mut flags, LayoutElevators::Vanilla);
        assert!(flags.always_up_gfmc_compound);
        assert!(flags.always_up_torvus_temple);
        assert!(!flags.always_up_great_temple);

        apply_translator_gate_patches(&mut flags, LayoutElevators::TwoWayRandomized);
        assert!(flags.always_up_great_temple);
    }

    #[test]
    fn rng_depends_only_on_permalink() {
        use rand::Rng;
        let a: u64 = rng_for_permalink("abc").gen();
        let b: u64 = rng_for_permalink("abc").gen();
        let c: u64 = rng_for_permalink("abd").gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
