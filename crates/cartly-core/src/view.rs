//! View-layer collaborator driven by the subtab controller.

use crate::error::CoreError;
use crate::model::Subtab;

/// Rendering surface for the storefront subtabs.
///
/// Every call is synchronous and must be idempotent: `clear` is invoked for
/// every subtab on each transition, whether or not it was visible.
/// Implementations must not call back into the controller's selection
/// methods from inside these hooks.
pub trait SubtabView: Send + Sync {
    /// Hide `subtab`'s content.
    fn clear(&self, subtab: Subtab);

    /// Display `subtab`. Any data it needs is already cached.
    fn show(&self, subtab: Subtab);

    /// Mark `active` as the selected button.
    fn highlight(&self, _active: Subtab) {}

    /// The fetch backing the still-active `subtab` was rejected.
    fn fetch_failed(&self, _subtab: Subtab, _error: &CoreError) {}
}
