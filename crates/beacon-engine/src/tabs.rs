//! Tab navigation capability.

use async_trait::async_trait;

use crate::EngineError;

/// Capability interface for driving browser tabs.
///
/// The production implementation lives with the host integration; tests
/// substitute a recording double.
#[async_trait]
pub trait Tabs: Send + Sync {
    /// Navigate the current tab to `url`. Host failures are reported as
    /// [`EngineError::Navigation`].
    async fn update_current(&self, url: &str) -> Result<(), EngineError>;

    /// Open `url` in a new tab, focused when `active` is true. Host
    /// failures are reported as [`EngineError::Navigation`].
    async fn create(&self, url: &str, active: bool) -> Result<(), EngineError>;
}
