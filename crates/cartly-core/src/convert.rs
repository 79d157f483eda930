// ── Post-processing of fetched catalogs ──
//
// Runs exactly once per resource, immediately before the cache resolves
// the fetch. Callers only ever see the processed values.

use std::collections::HashSet;

use crate::model::{PlayerUpgrade, Product, ProductCatalog, UpgradesResponse};

impl ProductCatalog {
    /// Split a server product list into coin packs and subscriptions.
    ///
    /// Subscriptions are not ordered by the server, so they are sorted by
    /// price here. The sort is stable: equal prices keep server order.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut coins = Vec::new();
        let mut subscriptions = Vec::new();

        for product in &products {
            match product {
                Product::Regular(p) => coins.push(p.clone()),
                Product::Subscription(p) => subscriptions.push(p.clone()),
            }
        }

        subscriptions.sort_by_key(|s| s.info.price);

        Self {
            products,
            coins,
            subscriptions,
        }
    }
}

/// Replace `player_upgrades` with one entry per distinct upgrade in the
/// catalog, each at that upgrade's max level.
pub fn seed_player_upgrades(response: &mut UpgradesResponse) {
    let mut seen = HashSet::new();

    response.player_upgrades = response
        .upgrades
        .iter()
        .filter(|tier| seen.insert(tier.upgrade_id))
        .map(|tier| PlayerUpgrade {
            upgrade_id: tier.upgrade_id,
            internal_name: tier.internal_name.clone(),
            level: tier.max_level,
        })
        .collect();
}
