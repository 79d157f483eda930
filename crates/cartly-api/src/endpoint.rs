use serde::{Deserialize, Serialize};

/// Default host serving both catalog endpoints.
pub const DEFAULT_BASE_URL: &str = "https://synergism.cc";

/// Which backend deployment to talk to.
///
/// Only the products endpoint differs between environments; upgrades are
/// always served from the production path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Test,
}

/// The two catalog endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Products,
    Upgrades,
}

impl Endpoint {
    /// Path below the base URL, without a leading slash.
    pub fn path(self, environment: Environment) -> &'static str {
        match (self, environment) {
            (Self::Products, Environment::Production) => "stripe/products",
            (Self::Products, Environment::Test) => "stripe/test/products",
            (Self::Upgrades, _) => "stripe/upgrades",
        }
    }
}
