use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::{AreaLocation, TeleporterContext, WorldList};
use crate::layout::LayoutElevators;
use crate::resources::ResourceId;
use crate::{PatcherError, Result, SpecificPatches, StringPatch};

/// Display names for elevator destinations whose room name reads badly.
const CUSTOM_NAMES_FOR_ELEVATORS: &[(u32, &str)] = &[
    // Great Temple
    (408633584, "Temple Transport Emerald"),
    (2399252740, "Temple Transport Violet"),
    (2556480432, "Temple Transport Amber"),
    // Temple Grounds to Great Temple
    (1345979968, "Sanctuary Quadrant"),
    (1287880522, "Agon Quadrant"),
    (2918020398, "Torvus Quadrant"),
    // Temple Grounds to Areas
    (1660916974, "Agon Gate"),
    (2889020216, "Torvus Gate"),
    (3455543403, "Sanctuary Gate"),
    // Agon
    (1473133138, "Agon Entrance"),
    (2806956034, "Agon Portal Access"),
    (3331021649, "Agon Temple Access"),
    // Torvus
    (1868895730, "Torvus Entrance"),
    (3479543630, "Torvus Temple Access"),
    (3205424168, "Lower Torvus Access"),
    // Sanctuary
    (3528156989, "Sanctuary Entrance"),
    (900285955, "Sanctuary Spider side"),
    (3145160350, "Sanctuary Vault side"),
];

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ElevatorRecord {
    pub instance_id: u32,
    pub origin_location: AreaLocation,
    pub target_location: AreaLocation,
    pub room_name: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TranslatorGateRecord {
    pub gate_index: u32,
    pub translator_index: u32,
}

fn custom_elevator_name(area_asset_id: u32) -> Option<&'static str> {
    CUSTOM_NAMES_FOR_ELEVATORS
        .iter()
        .find(|(id, _)| *id == area_asset_id)
        .map(|(_, name)| *name)
}

/// Name of the area an elevator leads to.
pub fn elevator_area_name(world_list: &WorldList, location: AreaLocation) -> Result<String> {
    if let Some(name) = custom_elevator_name(location.area_asset_id) {
        return Ok(name.to_string());
    }
    Ok(world_list.area_by_area_location(location)?.name.clone())
}

/// Name of the room holding an elevator, once it leads to `connection`.
///
/// Curated destinations always read `"Transport to <curated name>"`. Otherwise
/// an elevator flagged to keep its name that still leads to its vanilla
/// destination keeps its room's name.
pub fn pretty_name_for_elevator(
    world_list: &WorldList,
    origin: &TeleporterContext<'_>,
    connection: AreaLocation,
) -> Result<String> {
    if let Some(name) = custom_elevator_name(connection.area_asset_id) {
        return Ok(format!("Transport to {name}"));
    }

    if origin.teleporter.keep_name_when_vanilla
        && origin.teleporter.default_connection == Some(connection)
    {
        return Ok(origin.area.name.clone());
    }

    Ok(format!(
        "Transport to {}",
        elevator_area_name(world_list, connection)?
    ))
}

fn teleporter<'a>(
    nodes_by_teleporter_id: &BTreeMap<u32, TeleporterContext<'a>>,
    instance_id: u32,
) -> Result<TeleporterContext<'a>> {
    nodes_by_teleporter_id
        .get(&instance_id)
        .copied()
        .ok_or(PatcherError::UnknownTeleporter(instance_id))
}

pub fn create_elevators_field(
    elevator_connection: &BTreeMap<u32, AreaLocation>,
    world_list: &WorldList,
) -> Result<Vec<ElevatorRecord>> {
    let nodes_by_teleporter_id = world_list.editable_teleporters();

    if elevator_connection.len() != nodes_by_teleporter_id.len() {
        return Err(PatcherError::InvalidElevatorCount {
            expected: nodes_by_teleporter_id.len(),
            got: elevator_connection.len(),
        });
    }

    elevator_connection
        .iter()
        .map(|(&instance_id, &connection)| {
            let origin = teleporter(&nodes_by_teleporter_id, instance_id)?;
            Ok(ElevatorRecord {
                instance_id,
                origin_location: origin.area_location(),
                target_location: connection,
                room_name: pretty_name_for_elevator(world_list, &origin, connection)?,
            })
        })
        .collect()
}

pub fn create_translator_gates_field(
    gate_assignment: &BTreeMap<u32, ResourceId>,
) -> Vec<TranslatorGateRecord> {
    gate_assignment
        .iter()
        .map(|(&gate, translator)| TranslatorGateRecord {
            gate_index: gate,
            translator_index: translator.index,
        })
        .collect()
}

/// The scan point next to every elevator names where it now leads.
pub fn create_elevator_scan_port_patches(
    world_list: &WorldList,
    elevator_connection: &BTreeMap<u32, AreaLocation>,
) -> Result<Vec<StringPatch>> {
    let mut patches = Vec::new();

    for (teleporter_id, ctx) in world_list.editable_teleporters() {
        let Some(asset_id) = ctx.teleporter.scan_asset_id else {
            continue;
        };

        let connection = elevator_connection
            .get(&teleporter_id)
            .copied()
            .ok_or(PatcherError::UnknownTeleporter(teleporter_id))?;
        let target_area_name = elevator_area_name(world_list, connection)?;

        patches.push(StringPatch {
            asset_id,
            strings: vec![
                format!("Access to &push;&main-color=#FF3333;{target_area_name}&pop; granted."),
                String::new(),
            ],
        });
    }

    Ok(patches)
}

/// Temple elevators that are always powered. The Great Temple one stays
/// locked only when elevators are vanilla.
pub fn apply_translator_gate_patches(
    specific_patches: &mut SpecificPatches,
    elevators: LayoutElevators,
) {
    specific_patches.always_up_gfmc_compound = true;
    specific_patches.always_up_torvus_temple = true;
    specific_patches.always_up_great_temple = elevators != LayoutElevators::Vanilla;
}
