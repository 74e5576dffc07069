use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::pickup::PickupIndex;
use crate::resources::ResourceDatabase;
use crate::{PatcherError, Result};

/// A world/area pair identified by the game's asset ids.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AreaLocation {
    pub world_asset_id: u32,
    pub area_asset_id: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeleporterNode {
    pub teleporter_instance_id: u32,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub default_connection: Option<AreaLocation>,
    #[serde(default)]
    pub keep_name_when_vanilla: bool,
    #[serde(default)]
    pub scan_asset_id: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "snake_case")]
pub enum NodeKind {
    Generic,
    Pickup { pickup_index: PickupIndex },
    Teleporter(TeleporterNode),
    Logbook { string_asset_id: u32 },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
    pub area_asset_id: u32,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct World {
    pub name: String,
    pub world_asset_id: u32,
    #[serde(default)]
    pub areas: Vec<Area>,
}

impl World {
    pub fn area_by_asset_id(&self, area_asset_id: u32) -> Option<&Area> {
        self.areas.iter().find(|a| a.area_asset_id == area_asset_id)
    }
}

/// A node together with the world and area that contain it.
#[derive(Copy, Clone, Debug)]
pub struct NodeContext<'a> {
    pub world: &'a World,
    pub area: &'a Area,
    pub node: &'a Node,
}

impl NodeContext<'_> {
    pub fn area_location(&self) -> AreaLocation {
        AreaLocation {
            world_asset_id: self.world.world_asset_id,
            area_asset_id: self.area.area_asset_id,
        }
    }
}

/// An editable teleporter and the room it sits in.
#[derive(Copy, Clone, Debug)]
pub struct TeleporterContext<'a> {
    pub world: &'a World,
    pub area: &'a Area,
    pub teleporter: &'a TeleporterNode,
}

impl TeleporterContext<'_> {
    pub fn area_location(&self) -> AreaLocation {
        AreaLocation {
            world_asset_id: self.world.world_asset_id,
            area_asset_id: self.area.area_asset_id,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorldList {
    pub worlds: Vec<World>,
}

impl WorldList {
    /// Every node in graph order.
    pub fn all_nodes(&self) -> impl Iterator<Item = NodeContext<'_>> {
        self.worlds.iter().flat_map(|world| {
            world.areas.iter().flat_map(move |area| {
                area.nodes
                    .iter()
                    .map(move |node| NodeContext { world, area, node })
            })
        })
    }

    pub fn world_by_area_location(&self, location: AreaLocation) -> Result<&World> {
        self.worlds
            .iter()
            .find(|w| w.world_asset_id == location.world_asset_id)
            .ok_or(PatcherError::UnknownArea(location))
    }

    pub fn area_by_area_location(&self, location: AreaLocation) -> Result<&Area> {
        self.world_by_area_location(location)?
            .area_by_asset_id(location.area_asset_id)
            .ok_or(PatcherError::UnknownArea(location))
    }

    /// Editable teleporters keyed by instance id.
    pub fn editable_teleporters(&self) -> BTreeMap<u32, TeleporterContext<'_>> {
        self.all_nodes()
            .filter_map(|ctx| match &ctx.node.kind {
                NodeKind::Teleporter(t) if t.editable => Some((
                    t.teleporter_instance_id,
                    TeleporterContext {
                        world: ctx.world,
                        area: ctx.area,
                        teleporter: t,
                    },
                )),
                _ => None,
            })
            .collect()
    }

    pub fn node_for_pickup(&self, index: PickupIndex) -> Option<NodeContext<'_>> {
        self.all_nodes().find(|ctx| {
            matches!(ctx.node.kind, NodeKind::Pickup { pickup_index } if pickup_index == index)
        })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameDescription {
    pub resource_database: ResourceDatabase,
    pub world_list: WorldList,
}

/// Decode the raw game description carried by a layout configuration.
pub fn decode_data(game_data: &serde_json::Value) -> Result<GameDescription> {
    let game: GameDescription = serde_json::from_value(game_data.clone())?;

    let mut seen = BTreeSet::new();
    for ctx in game.world_list.all_nodes() {
        if let NodeKind::Teleporter(t) = &ctx.node.kind {
            if !t.editable {
                continue;
            }
            if !seen.insert(t.teleporter_instance_id) {
                return Err(PatcherError::DuplicateTeleporter(t.teleporter_instance_id));
            }
        }
    }

    log::debug!(
        "decoded game data: {} worlds, {} resources, {} editable teleporters",
        game.world_list.worlds.len(),
        game.resource_database.resources.len(),
        seen.len()
    );

    Ok(game)
}
