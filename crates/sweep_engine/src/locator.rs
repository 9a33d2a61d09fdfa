//! Declarative locator tables for the playlist page.
//!
//! Every table is tried in order and the first selector that matches wins.
//! The host markup changes without notice, so each concern carries several
//! fallbacks ordered from most to least specific.

use scraper::{ElementRef, Selector};

/// Markers that identify a playlist page (any one is enough).
pub const PAGE_MARKERS: &[&str] = &[
    r#"ytd-browse[page-subtype="playlist"]"#,
    "ytd-playlist-header-renderer",
    r#"[role="main"] ytd-playlist-video-list-renderer"#,
];

/// One element per playlist entry.
pub const ITEM_CONTAINERS: &[&str] = &[
    "ytd-playlist-video-renderer",
    "ytd-playlist-panel-video-renderer",
];

/// Links carrying the `v=` parameter used as the item id.
pub const ITEM_LINKS: &[&str] = &[
    "a#video-title",
    r#"h3 a[href*="/watch"]"#,
    r#"a[href*="/watch"]"#,
];

/// Attributes consulted when no link yields an id.
pub const ID_ATTRIBUTES: &[&str] = &["data-video-id", "data-ytid"];

pub const TITLES: &[&str] = &[
    "#video-title",
    r#"h3 a[href*="/watch"]"#,
    r#"a[href*="/watch"] #video-title"#,
    r#"[id="video-title"]"#,
    "ytd-video-meta-block #video-title",
    r#"a[href*="/watch"] span[title]"#,
    "h3 a span",
    r#"a[href*="/watch"]"#,
];

pub const CHANNELS: &[&str] = &[
    "#channel-name a",
    "#channel-name",
    "ytd-channel-name a",
    "ytd-channel-name",
    "#metadata #channel-name a",
    "#metadata #channel-name",
    "ytd-video-owner-renderer a",
    "ytd-video-owner-renderer #channel-name",
];

/// The displayed 1-based position.
pub const INDEXES: &[&str] = &[
    ".ytd-playlist-video-renderer .index",
    ".index .style-scope.ytd-playlist-video-renderer",
    ".index-message",
    ".index",
    r#"[class*="index"]"#,
];

/// The per-item action menu button.
pub const TRIGGERS: &[&str] = &[
    r#"button[aria-label*="操作メニュー"]"#,
    r#"button[aria-label*="Action menu"]"#,
    "ytd-menu-renderer button",
    r#"button[aria-label*="More actions"]"#,
    r#"yt-icon-button[aria-label*="操作"]"#,
    r#"yt-icon-button[aria-label*="Action"]"#,
    r#"[class*="menu-button"]"#,
];

/// Entries of an open popup menu.
pub const MENU_ENTRIES: &[&str] = &["ytd-menu-service-item-renderer", r#"[role="menuitem"]"#];

/// Confirmation controls of a removal dialog, when the host shows one.
pub const CONFIRM_BUTTONS: &[&str] = &[
    "yt-confirm-dialog-renderer #confirm-button button",
    "yt-confirm-dialog-renderer #confirm-button",
    "tp-yt-paper-dialog #confirm-button",
];

/// A compiled locator table.
#[derive(Debug, Clone)]
pub struct LocatorTable {
    entries: Vec<(&'static str, Selector)>,
}

impl LocatorTable {
    /// Compiles a table, skipping selectors the parser rejects.
    pub fn compile(table: &[&'static str]) -> Self {
        let entries = table
            .iter()
            .filter_map(|raw| match Selector::parse(raw) {
                Ok(selector) => Some((*raw, selector)),
                Err(err) => {
                    sweep_logging::sweep_warn!("Skipping unparsable locator {raw}: {err}");
                    None
                }
            })
            .collect();
        Self { entries }
    }

    /// First element under `scope` matched by the earliest selector.
    pub fn first_in<'a>(&self, scope: ElementRef<'a>) -> Option<(ElementRef<'a>, &'static str)> {
        self.entries
            .iter()
            .find_map(|(raw, selector)| scope.select(selector).next().map(|el| (el, *raw)))
    }

    /// All elements matched by the earliest selector that matches anything.
    pub fn all_in<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        self.entries
            .iter()
            .map(|(_, selector)| scope.select(selector).collect::<Vec<_>>())
            .find(|found| !found.is_empty())
            .unwrap_or_default()
    }

    /// First element under `scope` whose trimmed text satisfies `accept`.
    pub fn first_text_in<F>(&self, scope: ElementRef<'_>, accept: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        self.entries.iter().find_map(|(_, selector)| {
            scope
                .select(selector)
                .map(element_text)
                .find(|text| accept(text))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collapsed, trimmed text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
