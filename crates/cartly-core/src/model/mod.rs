// ── Domain model ──
//
// Resource identities, subtab identities, and the post-processed
// catalog values held by the cache.

mod catalog;
mod resource;
mod subtab;

pub use catalog::{CatalogData, ProductCatalog};
pub use resource::Resource;
pub use subtab::Subtab;

// Wire types re-exported unchanged; the cache never reshapes them.
pub use cartly_api::{
    PlayerUpgrade, Product, ProductInfo, RegularProduct, SubscriptionProduct, UpgradeTier,
    UpgradesResponse,
};
