use sweep_core::Item;

use crate::{HostError, ProbeReport};

/// Opaque reference to a live element on the host page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub String);

/// One entry of an open popup menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub element: ElementHandle,
    pub text: String,
}

/// The item's action button and the locator that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedTrigger {
    pub element: ElementHandle,
    pub locator: &'static str,
}

/// The external page the pipeline drives. Every lookup may come back empty;
/// only transport problems are errors.
#[async_trait::async_trait]
pub trait HostPage: Send + Sync {
    async fn scan(&self) -> Result<Vec<Item>, HostError>;

    async fn locate_trigger(&self, item: &Item) -> Result<Option<LocatedTrigger>, HostError>;

    async fn click(&self, element: &ElementHandle) -> Result<(), HostError>;

    /// Entries of the currently open menu; empty while no menu is shown.
    async fn menu_entries(&self) -> Result<Vec<MenuEntry>, HostError>;

    async fn find_confirm_button(&self) -> Result<Option<ElementHandle>, HostError>;

    /// Closes any open menu by clicking elsewhere.
    async fn dismiss_menu(&self) -> Result<(), HostError>;

    /// Shows or hides entries; `visible` is parallel to `items`.
    async fn apply_visibility(&self, items: &[Item], visible: &[bool]) -> Result<(), HostError>;

    /// Inspects the first `limit` entries without clicking anything.
    async fn probe(&self, limit: usize) -> Result<Vec<ProbeReport>, HostError>;

    /// Releases host resources when the engine shuts down.
    async fn close(&self) {}
}
