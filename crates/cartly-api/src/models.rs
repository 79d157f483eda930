// Wire models for the catalog endpoints.
//
// Products arrive as a flat JSON array where the boolean `subscription`
// field selects the variant. Upgrades arrive as a single object with
// camelCase keys.

use serde::{Deserialize, Serialize};

// ── Products ────────────────────────────────────────────────────────

/// Fields shared by every product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    /// Price in the smallest currency unit.
    pub price: u64,
    /// Coins granted on purchase.
    pub coins: u64,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// A one-off coin pack.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularProduct {
    pub info: ProductInfo,
}

/// A recurring subscription with a bonus multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionProduct {
    pub info: ProductInfo,
    pub quark_bonus: f64,
    pub tier: u32,
}

/// A catalog product, tagged on the wire by `"subscription": bool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduct", into = "RawProduct")]
pub enum Product {
    Regular(RegularProduct),
    Subscription(SubscriptionProduct),
}

impl Product {
    pub fn info(&self) -> &ProductInfo {
        match self {
            Self::Regular(p) => &p.info,
            Self::Subscription(p) => &p.info,
        }
    }

    pub fn id(&self) -> &str {
        &self.info().id
    }

    pub fn price(&self) -> u64 {
        self.info().price
    }

    pub fn is_subscription(&self) -> bool {
        matches!(self, Self::Subscription(_))
    }
}

/// Flat wire shape of a product record.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(flatten)]
    info: ProductInfo,
    subscription: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quark_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tier: Option<u32>,
}

impl TryFrom<RawProduct> for Product {
    type Error = String;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        if !raw.subscription {
            return Ok(Self::Regular(RegularProduct { info: raw.info }));
        }

        match (raw.quark_bonus, raw.tier) {
            (Some(quark_bonus), Some(tier)) => Ok(Self::Subscription(SubscriptionProduct {
                info: raw.info,
                quark_bonus,
                tier,
            })),
            _ => Err(format!(
                "subscription product {:?} is missing quarkBonus or tier",
                raw.info.id
            )),
        }
    }
}

impl From<Product> for RawProduct {
    fn from(product: Product) -> Self {
        match product {
            Product::Regular(p) => Self {
                info: p.info,
                subscription: false,
                quark_bonus: None,
                tier: None,
            },
            Product::Subscription(p) => Self {
                info: p.info,
                subscription: true,
                quark_bonus: Some(p.quark_bonus),
                tier: Some(p.tier),
            },
        }
    }
}

// ── Upgrades ────────────────────────────────────────────────────────

/// Response of the upgrades endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradesResponse {
    /// Coin balance of the requesting player.
    pub coins: u64,
    /// One entry per purchasable (upgrade, level) pair.
    pub upgrades: Vec<UpgradeTier>,
    /// Levels the player owns. Re-derived from `upgrades` after fetch.
    #[serde(default)]
    pub player_upgrades: Vec<PlayerUpgrade>,
}

/// A single purchasable level of an upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeTier {
    pub upgrade_id: u32,
    pub max_level: u32,
    pub name: String,
    pub description: String,
    pub internal_name: String,
    pub level: u32,
    pub cost: u64,
}

/// An upgrade level held by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpgrade {
    pub upgrade_id: u32,
    pub internal_name: String,
    pub level: u32,
}
