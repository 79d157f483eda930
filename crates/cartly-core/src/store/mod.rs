// ── Catalog store ──
//
// Single-flight, process-lifetime cache for the remote catalog resources.

mod cache;

pub use cache::{CatalogCache, CatalogDeferred};
