/// Best-effort identifier of a playlist entry.
///
/// Taken from the watch link, a data attribute, or synthesized. Not
/// guaranteed to be unique or stable across page reloads.
pub type ItemId = String;

/// One entry of the externally rendered list, as seen by the latest scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    /// 1-based number shown by the host page, when it could be read.
    pub display_index: Option<u32>,
    pub title: String,
    pub channel_name: String,
    /// 0-based order within the scan that produced this item.
    pub position: usize,
}

impl Item {
    /// Title and channel joined the way the text filter searches them.
    pub fn searchable_text(&self) -> String {
        if self.channel_name.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.channel_name)
        }
    }
}
