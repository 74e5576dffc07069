use patcher_core::layout::{CosmeticPatches, LayoutDescription, PlayersConfiguration};
use patcher_core::pickups::ResourceAmount;
use patcher_core::{create_patcher_file, PatcherError};
use serde_json::{json, Value};
use std::collections::BTreeMap;

const AGON_GATE: u32 = 1660916974;

fn game_data() -> Value {
    json!({
        "resource_database": { "resources": [
            { "resource_type": "item", "index": 0, "long_name": "Power Beam", "short_name": "PowerBeam" },
            { "resource_type": "item", "index": 24, "long_name": "Missile Launcher", "short_name": "MissileLauncher" },
            { "resource_type": "item", "index": 26, "long_name": "Violet Translator", "short_name": "VioletTranslator" },
            { "resource_type": "item", "index": 44, "long_name": "Missile", "short_name": "Missile" },
            { "resource_type": "item", "index": 47, "long_name": "Item Percentage", "short_name": "Percentage" },
            { "resource_type": "item", "index": 57, "long_name": "Sky Temple Key 1", "short_name": "TempleKey1" },
            { "resource_type": "item", "index": 60, "long_name": "Energy Transfer Module", "short_name": "EnergyTransferModule" },
            { "resource_type": "event", "index": 3, "long_name": "Dark Samus 1", "short_name": "DS1" }
        ]},
        "world_list": { "worlds": [
            {
                "name": "Temple Grounds",
                "world_asset_id": 1,
                "areas": [
                    {
                        "name": "Hive Transport Area",
                        "area_asset_id": 10,
                        "nodes": [
                            {
                                "name": "Elevator to Agon Wastes",
                                "node_type": "teleporter",
                                "teleporter_instance_id": 100,
                                "editable": true,
                                "keep_name_when_vanilla": true,
                                "default_connection": { "world_asset_id": 2, "area_asset_id": 30 },
                                "scan_asset_id": 7000
                            },
                            { "name": "Pickup (Missile Launcher)", "node_type": "pickup", "pickup_index": 0 },
                            { "name": "Lore Scan", "node_type": "logbook", "string_asset_id": 900 }
                        ]
                    },
                    {
                        "name": "GFMC Compound",
                        "area_asset_id": 20,
                        "nodes": [
                            {
                                "name": "Elevator",
                                "node_type": "teleporter",
                                "teleporter_instance_id": 101,
                                "editable": true,
                                "default_connection": { "world_asset_id": 2, "area_asset_id": 31 }
                            },
                            { "name": "Pickup (Ship)", "node_type": "pickup", "pickup_index": 1 }
                        ]
                    },
                    {
                        "name": "Transport to Agon Wastes",
                        "area_asset_id": AGON_GATE,
                        "nodes": [{
                            "name": "Elevator",
                            "node_type": "teleporter",
                            "teleporter_instance_id": 102,
                            "editable": true
                        }]
                    }
                ]
            },
            {
                "name": "Agon Wastes",
                "world_asset_id": 2,
                "areas": [
                    {
                        "name": "Transport to Temple Grounds",
                        "area_asset_id": 30,
                        "nodes": [
                            { "name": "Pickup (Missile)", "node_type": "pickup", "pickup_index": 2 },
                            { "name": "Door", "node_type": "generic" },
                            {
                                "name": "Locked Elevator",
                                "node_type": "teleporter",
                                "teleporter_instance_id": 103
                            }
                        ]
                    },
                    { "name": "Mining Plaza", "area_asset_id": 31 }
                ]
            }
        ]}
    })
}

fn preset() -> Value {
    json!({
        "name": "Starter Preset",
        "layout_configuration": {
            "game_data": game_data(),
            "elevators": "vanilla",
            "hints": { "sky_temple_keys": "precise" },
            "starting_items": { "Power Beam": 1 }
        },
        "patcher_configuration": {}
    })
}

fn missile_launcher(player: usize) -> Value {
    json!({
        "pickup": {
            "name": "Missile Launcher",
            "model_index": 24,
            "item_category": "missile",
            "resources": [{ "resources": [
                { "resource": "item:24", "amount": 1 },
                { "resource": "item:44", "amount": 5 },
                { "resource": "item:47", "amount": 1 }
            ]}]
        },
        "player": player
    })
}

fn missile_expansion(player: usize) -> Value {
    json!({
        "pickup": {
            "name": "Missile Expansion",
            "model_index": 22,
            "item_category": "expansion",
            "resources": [{ "resources": [
                { "resource": "item:44", "amount": 5 },
                { "resource": "item:47", "amount": 1 }
            ]}]
        },
        "player": player
    })
}

fn sky_temple_key(player: usize) -> Value {
    json!({
        "pickup": {
            "name": "Sky Temple Key 1",
            "model_index": 38,
            "item_category": "sky_temple_key",
            "resources": [{ "resources": [
                { "resource": "item:57", "amount": 1 },
                { "resource": "item:47", "amount": 1 }
            ]}]
        },
        "player": player
    })
}

fn patches(player_index: usize) -> Value {
    json!({
        "player_index": player_index,
        "pickup_assignment": {
            "0": missile_launcher(player_index),
            "2": missile_expansion(player_index)
        },
        "elevator_connection": {
            "100": { "world_asset_id": 2, "area_asset_id": 30 },
            "101": { "world_asset_id": 2, "area_asset_id": 31 },
            "102": { "world_asset_id": 1, "area_asset_id": AGON_GATE }
        },
        "translator_gates": { "0": "item:26" },
        "starting_items": { "item:0": 1, "item:44": 5 },
        "starting_location": { "world_asset_id": 1, "area_asset_id": 10 },
        "hints": {
            "900": {
                "hint_type": "location",
                "target": 0,
                "location_precision": "detailed",
                "item_precision": "detailed"
            }
        }
    })
}

fn solo_layout() -> Value {
    json!({
        "permalink": {
            "seed_number": 1000,
            "spoiler": true,
            "presets": { "0": preset() }
        },
        "all_patches": { "0": patches(0) }
    })
}

fn description(layout: Value) -> LayoutDescription {
    serde_json::from_value(layout).unwrap()
}

fn solo_file(layout: Value) -> patcher_core::PatcherFile {
    create_patcher_file(
        &description(layout),
        &PlayersConfiguration::solo(),
        &CosmeticPatches::default(),
    )
    .unwrap()
}

#[test]
fn same_layout_gives_identical_output() {
    let first = serde_json::to_string(&solo_file(solo_layout())).unwrap();
    let second = serde_json::to_string(&solo_file(solo_layout())).unwrap();
    assert_eq!(first, second);
}

fn relic(index: usize) -> Value {
    json!({
        "pickup": {
            "name": format!("Relic {index}"),
            "model_index": 100 + index,
            "item_category": "movement",
            "resources": [{ "resources": [{ "resource": "item:47", "amount": 1 }] }]
        },
        "player": 0
    })
}

/// Random disguises under HIDE_ALL plus a joke hint, so the seeded stream
/// shows up in the output.
fn shuffled_layout(seed_number: u32) -> Value {
    let mut layout = solo_layout();
    layout["permalink"]["seed_number"] = json!(seed_number);
    layout["permalink"]["presets"]["0"]["patcher_configuration"] = json!({
        "pickup_model_style": "hide-all",
        "pickup_model_data_source": "random"
    });
    let assignment: serde_json::Map<String, Value> =
        (0..8).map(|i| (i.to_string(), relic(i))).collect();
    layout["all_patches"]["0"]["pickup_assignment"] = Value::Object(assignment);
    layout["all_patches"]["0"]["hints"]["900"] = json!({ "hint_type": "joke" });
    layout
}

fn disguises(file: &patcher_core::PatcherFile) -> Vec<String> {
    file.pickups.iter().map(|p| p.scan.clone()).collect()
}

#[test]
fn shuffled_disguises_are_reproducible() {
    let first = solo_file(shuffled_layout(7));
    let second = solo_file(shuffled_layout(7));

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert!(first.pickups.iter().all(|p| p.scan.starts_with("Relic ")));
    assert!(first.string_patches[0]
        .strings[0]
        .starts_with("&push;&main-color=#45F731;"));
}

#[test]
fn seed_number_changes_the_disguises() {
    let first = disguises(&solo_file(shuffled_layout(1)));
    assert!((2..=10).any(|seed| disguises(&solo_file(shuffled_layout(seed))) != first));
}

#[test]
fn permalink_and_patches_must_agree_on_players() {
    let mut layout = solo_layout();
    layout["all_patches"]["1"] = patches(1);

    let result = create_patcher_file(
        &description(layout),
        &PlayersConfiguration::solo(),
        &CosmeticPatches::default(),
    );
    assert!(matches!(result, Err(PatcherError::Config(_))));
}

#[test]
fn solo_key_hints_ignore_extra_player_names() {
    let mut layout = solo_layout();
    layout["all_patches"]["0"]["pickup_assignment"]["2"] = sky_temple_key(0);
    let players = PlayersConfiguration {
        player_index: 0,
        player_names: BTreeMap::from([(0, "Samus".to_string()), (1, "Dark Samus".to_string())]),
    };

    let file =
        create_patcher_file(&description(layout), &players, &CosmeticPatches::default()).unwrap();
    assert_eq!(
        file.string_patches[1].strings[0],
        "The &push;&main-color=#FF6705B3;Sky Temple Key 1&pop; can be found in \
         &push;&main-color=#FF3333;Agon Wastes - Transport to Temple Grounds&pop;."
    );
    assert_eq!(file.pickups[2].scan, "Sky Temple Key 1");
}

#[test]
fn header_carries_permalink_and_hash() {
    let desc = description(solo_layout());
    let file = create_patcher_file(
        &desc,
        &PlayersConfiguration::solo(),
        &CosmeticPatches::default(),
    )
    .unwrap();

    assert_eq!(file.permalink, desc.permalink.encode().unwrap());
    assert_eq!(
        file.seed_hash,
        format!(
            "- {} ({})",
            desc.shareable_word_hash().unwrap(),
            desc.shareable_hash().unwrap()
        )
    );
    assert_eq!(file.randovania_version, patcher_core::VERSION);
}

#[test]
fn every_slot_gets_a_pickup() {
    let file = solo_file(solo_layout());
    assert_eq!(file.pickups.len(), 119);
    for (i, pickup) in file.pickups.iter().enumerate() {
        assert_eq!(pickup.pickup_index, i as u32);
    }
}

#[test]
fn empty_slots_hold_the_energy_transfer_module() {
    let file = solo_file(solo_layout());
    let empty = &file.pickups[1];

    assert_eq!(empty.resources, vec![ResourceAmount { index: 60, amount: 1 }]);
    assert_eq!(empty.scan, "Energy Transfer Module");
    assert_eq!(empty.model_index, 30);
    assert_eq!(empty.hud_text, vec!["Energy Transfer Module acquired!"]);
    assert_eq!(empty.jingle_index, 0);
}

#[test]
fn assigned_pickup_is_described_truthfully() {
    let file = solo_file(solo_layout());
    let launcher = &file.pickups[0];

    assert_eq!(
        launcher.resources,
        vec![
            ResourceAmount { index: 24, amount: 1 },
            ResourceAmount { index: 44, amount: 5 },
            ResourceAmount { index: 47, amount: 1 },
        ]
    );
    assert_eq!(launcher.scan, "Missile Launcher");
    assert_eq!(launcher.model_index, 24);
    assert_eq!(launcher.jingle_index, 1);
    assert_eq!(launcher.sound_index, 0);

    let expansion = &file.pickups[2];
    assert_eq!(expansion.scan, "Missile Expansion that provides 5 Missile and 1 Item Percentage");
    assert!(expansion.model_index == 22 || expansion.model_index == 23);
}

#[test]
fn full_memo_is_used_when_popups_are_enabled() {
    let cosmetic = CosmeticPatches {
        disable_hud_popup: false,
        ..CosmeticPatches::default()
    };
    let file = create_patcher_file(
        &description(solo_layout()),
        &PlayersConfiguration::solo(),
        &cosmetic,
    )
    .unwrap();

    assert_eq!(
        file.pickups[2].hud_text,
        vec!["Missile Expansion acquired! 5 Missiles added."]
    );
    assert!(!file.specific_patches.disable_hud_popup);
}

#[test]
fn spawn_point_and_starting_popup() {
    let file = solo_file(solo_layout());

    assert_eq!(file.spawn_point.location.world_asset_id, 1);
    assert_eq!(file.spawn_point.location.area_asset_id, 10);
    assert_eq!(file.spawn_point.amount.len(), 7);
    assert!(file
        .spawn_point
        .amount
        .contains(&ResourceAmount { index: 44, amount: 5 }));
    assert_eq!(file.starting_popup, vec!["Extra starting items:", "5 Missile"]);
}

#[test]
fn elevators_are_named_by_destination() {
    let file = solo_file(solo_layout());
    let names: Vec<(u32, &str)> = file
        .elevators
        .iter()
        .map(|e| (e.instance_id, e.room_name.as_str()))
        .collect();

    assert_eq!(
        names,
        vec![
            (100, "Hive Transport Area"),
            (101, "Transport to Mining Plaza"),
            (102, "Transport to Agon Gate"),
        ]
    );
    assert_eq!(file.elevators[1].origin_location.area_asset_id, 20);
}

#[test]
fn missing_elevator_connection_is_rejected() {
    let mut layout = solo_layout();
    layout["all_patches"]["0"]["elevator_connection"]
        .as_object_mut()
        .unwrap()
        .remove("102");

    let result = create_patcher_file(
        &description(layout),
        &PlayersConfiguration::solo(),
        &CosmeticPatches::default(),
    );
    assert!(matches!(
        result,
        Err(PatcherError::InvalidElevatorCount {
            expected: 3,
            got: 2
        })
    ));
}

#[test]
fn translator_gates_are_listed() {
    let file = solo_file(solo_layout());
    assert_eq!(file.translator_gates.len(), 1);
    assert_eq!(file.translator_gates[0].gate_index, 0);
    assert_eq!(file.translator_gates[0].translator_index, 26);
}

#[test]
fn string_patches_are_ordered_hints_keys_then_scans() {
    let file = solo_file(solo_layout());
    let ids: Vec<u32> = file.string_patches.iter().map(|p| p.asset_id).collect();

    assert_eq!(ids.len(), 11);
    assert_eq!(ids[0], 900);
    assert_eq!(ids[1], 0xD97685FE);
    assert_eq!(ids[10], 7000);

    assert_eq!(
        file.string_patches[0].strings[0],
        "&push;&main-color=#FF6705B3;Missile Launcher&pop; can be found in \
         &push;&main-color=#FF3333;Temple Grounds - Hive Transport Area&pop;."
    );
    assert_eq!(
        file.string_patches[10].strings,
        vec![
            "Access to &push;&main-color=#FF3333;Transport to Temple Grounds&pop; granted.",
            "",
        ]
    );
}

#[test]
fn disabled_sky_temple_key_hints_are_hidden() {
    let mut layout = solo_layout();
    layout["permalink"]["presets"]["0"]["layout_configuration"]["hints"]["sky_temple_keys"] =
        json!("disabled");

    let file = solo_file(layout);
    let key_hints = &file.string_patches[1..10];
    assert!(key_hints
        .iter()
        .all(|p| p.strings[0].ends_with("is lost somewhere on Aether.")));
}

#[test]
fn great_temple_elevator_follows_elevator_mode() {
    let file = solo_file(solo_layout());
    assert!(file.specific_patches.always_up_gfmc_compound);
    assert!(file.specific_patches.always_up_torvus_temple);
    assert!(!file.specific_patches.always_up_great_temple);

    let mut layout = solo_layout();
    layout["permalink"]["presets"]["0"]["layout_configuration"]["elevators"] =
        json!("two-way-randomized");
    let file = solo_file(layout);
    assert!(file.specific_patches.always_up_great_temple);
}

#[test]
fn specific_patches_copy_configuration() {
    let file = solo_file(solo_layout());
    let flags = &file.specific_patches;

    assert!(flags.hive_chamber_b_post_state);
    assert!(flags.intro_in_post_state);
    assert!(flags.warp_to_start);
    assert!(flags.pickup_map_icons);
    assert!(flags.full_map_at_start);
    assert_eq!(flags.dark_world_varia_suit_damage, 6.0);
    assert_eq!(flags.dark_world_dark_suit_damage, 1.2);
}

#[test]
fn location_data_source_is_not_supported() {
    let mut layout = solo_layout();
    layout["permalink"]["presets"]["0"]["patcher_configuration"] = json!({
        "pickup_model_style": "hide-all",
        "pickup_model_data_source": "location"
    });

    let result = create_patcher_file(
        &description(layout),
        &PlayersConfiguration::solo(),
        &CosmeticPatches::default(),
    );
    assert!(matches!(result, Err(PatcherError::UnimplementedDataSource(_))));
}

#[test]
fn hidden_models_share_the_disguise() {
    let mut layout = solo_layout();
    layout["permalink"]["presets"]["0"]["patcher_configuration"] = json!({
        "pickup_model_style": "hide-all"
    });

    let file = solo_file(layout);
    for pickup in &file.pickups {
        assert_eq!(pickup.model_index, 30);
        assert_eq!(pickup.scan, "Unknown item");
        assert_eq!(pickup.hud_text, vec!["Unknown item acquired!"]);
    }
}

#[test]
fn database_without_energy_transfer_module_is_rejected() {
    let mut layout = solo_layout();
    layout["permalink"]["presets"]["0"]["layout_configuration"]["game_data"]
        ["resource_database"]["resources"]
        .as_array_mut()
        .unwrap()
        .retain(|r| r["long_name"] != "Energy Transfer Module");

    let result = create_patcher_file(
        &description(layout),
        &PlayersConfiguration::solo(),
        &CosmeticPatches::default(),
    );
    assert!(matches!(result, Err(PatcherError::UnknownResourceName(_))));
}

fn multiworld_layout() -> Value {
    let mut theirs = patches(1);
    theirs["pickup_assignment"]["2"] = sky_temple_key(0);

    json!({
        "permalink": {
            "seed_number": 1000,
            "spoiler": true,
            "presets": { "0": preset(), "1": preset() }
        },
        "all_patches": { "0": patches(0), "1": theirs }
    })
}

fn players(player_index: usize) -> PlayersConfiguration {
    PlayersConfiguration {
        player_index,
        player_names: BTreeMap::from([(0, "Samus".to_string()), (1, "Dark Samus".to_string())]),
    }
}

#[test]
fn multiworld_pickups_notify_the_owner() {
    let desc = description(multiworld_layout());
    let file = create_patcher_file(&desc, &players(1), &CosmeticPatches::default()).unwrap();
    let key = &file.pickups[2];

    assert_eq!(
        key.resources,
        vec![
            ResourceAmount { index: 74, amount: 3 },
            ResourceAmount { index: 47, amount: 1 },
        ]
    );
    assert!(key.conditional_resources.is_empty());
    assert!(key.convert.is_empty());
    assert_eq!(key.hud_text, vec!["Samus acquired Sky Temple Key 1!"]);
    assert_eq!(key.scan, "Samus's Sky Temple Key 1");
    assert_eq!(key.jingle_index, 2);
}

#[test]
fn multiworld_key_hints_name_the_holding_world() {
    let desc = description(multiworld_layout());
    let file = create_patcher_file(&desc, &players(0), &CosmeticPatches::default()).unwrap();

    assert_eq!(file.string_patches[1].asset_id, 0xD97685FE);
    assert_eq!(
        file.string_patches[1].strings[0],
        "The &push;&main-color=#FF6705B3;Sky Temple Key 1&pop; can be found in \
         Dark Samus's &push;&main-color=#FF3333;Agon Wastes - Transport to Temple Grounds&pop;."
    );
    assert!(file.string_patches[2].strings[0].ends_with("has no need to be located."));
}

#[test]
fn multiworld_needs_every_player_name() {
    let desc = description(multiworld_layout());
    let players = PlayersConfiguration {
        player_index: 1,
        player_names: BTreeMap::from([(1, "Dark Samus".to_string())]),
    };
    assert!(matches!(
        create_patcher_file(&desc, &players, &CosmeticPatches::default()),
        Err(PatcherError::MissingPlayerName(0))
    ));
}
