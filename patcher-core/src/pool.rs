use crate::layout::LayoutConfiguration;
use crate::resources::{CurrentResources, ResourceDatabase};
use crate::Result;

/// What the item pool looks like before any placement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoolResults {
    pub initial_resources: CurrentResources,
}

/// Resources a preset grants at the start of every seed.
pub fn calculate_pool_results(
    layout: &LayoutConfiguration,
    db: &ResourceDatabase,
) -> Result<PoolResults> {
    let mut initial_resources = CurrentResources::new();

    for (name, quantity) in &layout.starting_items {
        let item = db.item_by_name(name)?;
        *initial_resources.entry(item.id()).or_insert(0) += *quantity;
    }

    Ok(PoolResults { initial_resources })
}
