use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::layout::{PickupModelDataSource, PickupModelStyle};
use crate::memo::MemoData;
use crate::patches::GamePatches;
use crate::pickup::{
    create_visual_etm, ConditionalResources, ItemCategory, PickupEntry, PickupIndex, PickupTarget,
};
use crate::resources::{display_name, ResourceDatabase, ResourceQuantity, ResourceType};
use crate::{PatcherError, Result};

pub const MISSILE_EXPANSION_MODEL: u32 = 22;
pub const DARK_MISSILE_TROOPER_MODEL: u32 = 23;
const DARK_MISSILE_TROOPER_ODDS: u32 = 8192;

/// Resource the multiworld client watches to learn which slot was collected.
pub const MULTIWORLD_NOTIFICATION_INDEX: u32 = 74;
pub const ITEM_PERCENTAGE_INDEX: u32 = 47;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourceAmount {
    pub index: u32,
    pub amount: i32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRecord {
    pub item: u32,
    pub resources: Vec<ResourceAmount>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub from_item: u32,
    pub to_item: u32,
    pub clear_source: bool,
    pub overwrite_target: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PickupRecord {
    pub pickup_index: u32,
    pub resources: Vec<ResourceAmount>,
    pub conditional_resources: Vec<ConditionalRecord>,
    pub convert: Vec<ConversionRecord>,
    pub hud_text: Vec<String>,
    pub scan: String,
    pub model_index: u32,
    pub sound_index: u8,
    pub jingle_index: u8,
}

/// Fields that differ between solo and multiworld pickups.
struct PickupData {
    resources: Vec<ResourceAmount>,
    conditional_resources: Vec<ConditionalRecord>,
    convert: Vec<ConversionRecord>,
    hud_text: Vec<String>,
    scan: String,
}

#[derive(Clone, Debug)]
pub enum PickupCreator {
    Solo(MemoData),
    /// Player names by player index.
    Multi(BTreeMap<usize, String>),
}

pub fn jingle_index_for(category: ItemCategory) -> u8 {
    if category.is_key() {
        2
    } else if category.is_major_category() && category != ItemCategory::EnergyTank {
        1
    } else {
        0
    }
}

fn sound_index_for(category: ItemCategory) -> u8 {
    if category.is_key() {
        1
    } else {
        0
    }
}

/// Scan text describing what a pickup really gives.
pub fn pickup_scan(pickup: &PickupEntry, db: &ResourceDatabase) -> Result<String> {
    if pickup.item_category != ItemCategory::Expansion {
        let names: Option<Vec<&str>> = pickup
            .resources
            .iter()
            .map(|conditional| conditional.name.as_deref())
            .collect();

        return Ok(match names {
            Some(names) if pickup.resources.len() > 1 => format!(
                "{}. Provides the following in order: {}",
                pickup.name,
                names.join(", ")
            ),
            _ => pickup.name.clone(),
        });
    }

    let last = match pickup.resources.last() {
        Some(conditional) => &conditional.resources,
        None => return Ok(pickup.name.clone()),
    };

    let mut parts = Vec::with_capacity(last.len());
    for gain in last {
        let info = db.get(gain.resource)?;
        parts.push(format!("{} {}", gain.amount, display_name(info)));
    }

    Ok(format!("{} that provides {}", pickup.name, parts.join(" and ")))
}

fn pickup_resources_for(gain: &[ResourceQuantity]) -> Vec<ResourceAmount> {
    gain.iter()
        .filter(|q| q.amount > 0 && q.resource.resource_type == ResourceType::Item)
        .map(|q| ResourceAmount {
            index: q.resource.index,
            amount: q.amount,
        })
        .collect()
}

fn single_hud_text(
    pickup_name: &str,
    memo: &MemoData,
    gain: &[ResourceQuantity],
    db: &ResourceDatabase,
) -> Result<String> {
    let mut quantities = Vec::with_capacity(gain.len());
    for q in gain {
        quantities.push((display_name(db.get(q.resource)?), q.amount));
    }
    Ok(memo.hud_text(pickup_name, &quantities))
}

fn all_hud_text(
    pickup: &PickupEntry,
    memo: &MemoData,
    db: &ResourceDatabase,
) -> Result<Vec<String>> {
    pickup
        .resources
        .iter()
        .map(|conditional| {
            let name = conditional.name.as_deref().unwrap_or(&pickup.name);
            single_hud_text(name, memo, &conditional.resources, db)
        })
        .collect()
}

/// HUD text for each conditional set of `pickup`. When everything is hidden
/// the popup tells the disguise's story instead, one text per real
/// conditional set.
pub fn calculate_hud_text(
    pickup: &PickupEntry,
    visual_pickup: &PickupEntry,
    model_style: PickupModelStyle,
    memo: &MemoData,
    db: &ResourceDatabase,
) -> Result<Vec<String>> {
    if model_style != PickupModelStyle::HideAll {
        return all_hud_text(pickup, memo, db);
    }

    let hud_text = all_hud_text(visual_pickup, memo, db)?;
    if hud_text.len() == pickup.resources.len() {
        return Ok(hud_text);
    }

    let first = hud_text
        .into_iter()
        .next()
        .unwrap_or_else(|| memo.hud_text(&visual_pickup.name, &[]));
    Ok(vec![first; pickup.resources.len()])
}

fn conditional_record(
    pickup: &PickupEntry,
    conditional: &ConditionalResources,
) -> Result<ConditionalRecord> {
    let item = conditional
        .item
        .ok_or_else(|| PatcherError::ConditionalWithoutItem(pickup.name.clone()))?;

    Ok(ConditionalRecord {
        item: item.index,
        resources: pickup_resources_for(&conditional.resources),
    })
}

impl PickupCreator {
    fn pickup_data(
        &self,
        original_index: PickupIndex,
        target: &PickupTarget,
        visual_pickup: &PickupEntry,
        model_style: PickupModelStyle,
        scan_text: String,
        db: &ResourceDatabase,
    ) -> Result<PickupData> {
        let pickup = &target.pickup;
        let default_gain = pickup
            .resources
            .first()
            .map(|c| c.resources.as_slice())
            .unwrap_or(&[]);

        match self {
            PickupCreator::Solo(memo) => Ok(PickupData {
                resources: pickup_resources_for(default_gain),
                conditional_resources: pickup
                    .resources
                    .iter()
                    .skip(1)
                    .map(|conditional| conditional_record(pickup, conditional))
                    .collect::<Result<_>>()?,
                convert: pickup
                    .convert_resources
                    .iter()
                    .map(|conversion| ConversionRecord {
                        from_item: conversion.source.index,
                        to_item: conversion.target.index,
                        clear_source: conversion.clear_source,
                        overwrite_target: conversion.overwrite_target,
                    })
                    .collect(),
                hud_text: calculate_hud_text(pickup, visual_pickup, model_style, memo, db)?,
                scan: scan_text,
            }),

            PickupCreator::Multi(player_names) => {
                let owner = player_names
                    .get(&target.player)
                    .ok_or(PatcherError::MissingPlayerName(target.player))?;

                let mut resources = vec![ResourceAmount {
                    index: MULTIWORLD_NOTIFICATION_INDEX,
                    amount: original_index.0 as i32 + 1,
                }];
                resources.extend(
                    pickup_resources_for(default_gain)
                        .into_iter()
                        .filter(|entry| entry.index == ITEM_PERCENTAGE_INDEX),
                );

                Ok(PickupData {
                    resources,
                    conditional_resources: Vec::new(),
                    convert: Vec::new(),
                    hud_text: vec![format!("{} acquired {}!", owner, pickup.name)],
                    scan: format!("{}'s {}", owner, scan_text),
                })
            }
        }
    }

    /// Patcher record for one slot. `visual_pickup` is the disguise used
    /// when the model style hides the real pickup.
    pub fn create_pickup(
        &self,
        original_index: PickupIndex,
        target: &PickupTarget,
        visual_pickup: &PickupEntry,
        model_style: PickupModelStyle,
        db: &ResourceDatabase,
    ) -> Result<PickupRecord> {
        let model_pickup = if model_style == PickupModelStyle::AllVisible {
            &target.pickup
        } else {
            visual_pickup
        };

        let scan_text = if model_style.shows_real_scan() {
            pickup_scan(&target.pickup, db)?
        } else {
            visual_pickup.name.clone()
        };

        let data = self.pickup_data(
            original_index,
            target,
            visual_pickup,
            model_style,
            scan_text,
            db,
        )?;

        Ok(PickupRecord {
            pickup_index: original_index.0,
            resources: data.resources,
            conditional_resources: data.conditional_resources,
            convert: data.convert,
            hud_text: data.hud_text,
            scan: data.scan,
            model_index: model_pickup.model_index,
            sound_index: sound_index_for(model_pickup.item_category),
            jingle_index: jingle_index_for(model_pickup.item_category),
        })
    }
}

fn visual_model<'a>(
    original_index: u32,
    pickup_list: &'a [PickupTarget],
    data_source: PickupModelDataSource,
    visual_etm: &'a PickupEntry,
) -> Result<&'a PickupEntry> {
    match data_source {
        PickupModelDataSource::Etm => Ok(visual_etm),
        PickupModelDataSource::Random => {
            if pickup_list.is_empty() {
                return Err(PatcherError::EmptyPickupPool);
            }
            Ok(&pickup_list[original_index as usize % pickup_list.len()].pickup)
        }
        PickupModelDataSource::Location => Err(PatcherError::UnimplementedDataSource(data_source)),
    }
}

/// Records for slots `0..pickup_count`, in slot order. Slots the generator
/// left empty get `useless_target`.
#[allow(clippy::too_many_arguments)]
pub fn create_pickup_list(
    patches: &GamePatches,
    useless_target: &PickupTarget,
    pickup_count: u32,
    rng: &mut StdRng,
    model_style: PickupModelStyle,
    data_source: PickupModelDataSource,
    creator: &PickupCreator,
    db: &ResourceDatabase,
) -> Result<Vec<PickupRecord>> {
    let pickup_assignment = &patches.pickup_assignment;

    let mut pickup_list: Vec<PickupTarget> = pickup_assignment.values().cloned().collect();
    pickup_list.shuffle(rng);

    let visual_etm = create_visual_etm();

    (0..pickup_count)
        .map(|i| {
            let index = PickupIndex(i);
            let target = pickup_assignment.get(&index).unwrap_or(useless_target);
            let visual = visual_model(i, &pickup_list, data_source, &visual_etm)?;
            creator.create_pickup(index, target, visual, model_style, db)
        })
        .collect()
}

/// Missile expansion models turn into a Dark Missile Trooper, rarely.
/// Draws once per missile-expansion model, in slot order.
pub fn roll_dark_missile_troopers(pickups: &mut [PickupRecord], rng: &mut StdRng) -> usize {
    let mut swapped = 0;
    for record in pickups
        .iter_mut()
        .filter(|p| p.model_index == MISSILE_EXPANSION_MODEL)
    {
        if rng.gen_range(0..DARK_MISSILE_TROOPER_ODDS) == 0 {
            record.model_index = DARK_MISSILE_TROOPER_MODEL;
            swapped += 1;
        }
    }
    swapped
}
