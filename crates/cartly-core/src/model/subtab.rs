//! Subtab identifier enum.

use std::fmt;

use super::Resource;

/// The mutually exclusive panels of the storefront tab, in button order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Subtab {
    #[default]
    Coins, // 0
    Subscriptions, // 1
    Upgrades,      // 2
    Consumables,   // 3
    Checkout,      // 4
    Merch,         // 5
}

impl Subtab {
    /// All subtabs in button order.
    pub const ALL: [Subtab; 6] = [
        Self::Coins,
        Self::Subscriptions,
        Self::Upgrades,
        Self::Consumables,
        Self::Checkout,
        Self::Merch,
    ];

    /// Position of this subtab in the button row.
    pub fn index(self) -> usize {
        match self {
            Self::Coins => 0,
            Self::Subscriptions => 1,
            Self::Upgrades => 2,
            Self::Consumables => 3,
            Self::Checkout => 4,
            Self::Merch => 5,
        }
    }

    /// Subtab from a button index. Returns None for out-of-range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The remote dataset this subtab needs before it can be shown.
    pub fn resource(self) -> Option<Resource> {
        match self {
            Self::Coins | Self::Subscriptions | Self::Checkout => Some(Resource::Products),
            Self::Upgrades => Some(Resource::Upgrades),
            Self::Consumables | Self::Merch => None,
        }
    }

    /// Short label for the button row.
    pub fn label(self) -> &'static str {
        match self {
            Self::Coins => "Coins",
            Self::Subscriptions => "Subscriptions",
            Self::Upgrades => "Upgrades",
            Self::Consumables => "Consumables",
            Self::Checkout => "Checkout",
            Self::Merch => "Merch",
        }
    }
}

impl fmt::Display for Subtab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
