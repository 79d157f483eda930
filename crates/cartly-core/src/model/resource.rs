use strum::Display;

use cartly_api::Endpoint;

/// A cacheable remote dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    Products,
    Upgrades,
}

impl From<Resource> for Endpoint {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Products => Endpoint::Products,
            Resource::Upgrades => Endpoint::Upgrades,
        }
    }
}
