use std::sync::Arc;

use super::{Product, RegularProduct, Resource, SubscriptionProduct, UpgradesResponse};

/// The products resource after post-processing.
///
/// `products` keeps server order, `coins` is the regular subset in server
/// order, and `subscriptions` is sorted ascending by price.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
    pub coins: Vec<RegularProduct>,
    pub subscriptions: Vec<SubscriptionProduct>,
}

impl ProductCatalog {
    /// Look up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A resolved cache value. Cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogData {
    Products(Arc<ProductCatalog>),
    Upgrades(Arc<UpgradesResponse>),
}

impl CatalogData {
    /// Which resource this value belongs to.
    pub fn resource(&self) -> Resource {
        match self {
            Self::Products(_) => Resource::Products,
            Self::Upgrades(_) => Resource::Upgrades,
        }
    }

    pub fn as_products(&self) -> Option<&Arc<ProductCatalog>> {
        match self {
            Self::Products(p) => Some(p),
            Self::Upgrades(_) => None,
        }
    }

    pub fn as_upgrades(&self) -> Option<&Arc<UpgradesResponse>> {
        match self {
            Self::Upgrades(u) => Some(u),
            Self::Products(_) => None,
        }
    }
}
