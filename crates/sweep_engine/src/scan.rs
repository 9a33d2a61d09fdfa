//! Item discovery over a snapshot of the page markup.

use scraper::{ElementRef, Html};
use sha2::{Digest, Sha256};
use sweep_core::{Item, ItemId};
use url::Url;

use crate::locator::{self, element_text, LocatorTable};

const PAGE_BASE: &str = "https://www.youtube.com/";
/// Prefix of ids made up when the markup carries none.
pub const SYNTHETIC_ID_PREFIX: &str = "item-";

/// Parses playlist entries out of page markup using the locator tables.
#[derive(Debug, Clone)]
pub struct ItemScanner {
    markers: LocatorTable,
    containers: LocatorTable,
    links: LocatorTable,
    titles: LocatorTable,
    channels: LocatorTable,
    indexes: LocatorTable,
    triggers: LocatorTable,
}

impl Default for ItemScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemScanner {
    pub fn new() -> Self {
        Self {
            markers: LocatorTable::compile(locator::PAGE_MARKERS),
            containers: LocatorTable::compile(locator::ITEM_CONTAINERS),
            links: LocatorTable::compile(locator::ITEM_LINKS),
            titles: LocatorTable::compile(locator::TITLES),
            channels: LocatorTable::compile(locator::CHANNELS),
            indexes: LocatorTable::compile(locator::INDEXES),
            triggers: LocatorTable::compile(locator::TRIGGERS),
        }
    }

    pub fn is_playlist_page(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        self.markers.first_in(document.root_element()).is_some()
    }

    /// Every entry in page order. An empty result means nothing was found.
    pub fn scan(&self, html: &str) -> Vec<Item> {
        let document = Html::parse_document(html);
        let items: Vec<Item> = self
            .containers
            .all_in(document.root_element())
            .into_iter()
            .enumerate()
            .map(|(position, element)| self.read_item(element, position))
            .collect();
        sweep_logging::sweep_debug!("Scanned {} items", items.len());
        items
    }

    /// Which trigger locator matches each entry, without touching anything.
    pub fn trigger_locators(&self, html: &str) -> Vec<Option<&'static str>> {
        let document = Html::parse_document(html);
        self.containers
            .all_in(document.root_element())
            .into_iter()
            .map(|element| self.triggers.first_in(element).map(|(_, raw)| raw))
            .collect()
    }

    fn read_item(&self, element: ElementRef<'_>, position: usize) -> Item {
        let title = self
            .titles
            .first_text_in(element, |text| !text.is_empty())
            .unwrap_or_default();
        let channel_name = self
            .channels
            .first_text_in(element, |text| !text.is_empty())
            .unwrap_or_default();
        let display_index = self.display_index(element);
        let id = self
            .linked_id(element)
            .or_else(|| attribute_id(element))
            .unwrap_or_else(|| synthesized_id(&title, &channel_name, position));

        if title.is_empty() {
            sweep_logging::sweep_warn!("No title found for entry {}", position + 1);
        }

        Item {
            id,
            display_index,
            title,
            channel_name,
            position,
        }
    }

    fn linked_id(&self, element: ElementRef<'_>) -> Option<ItemId> {
        let (link, _) = self.links.first_in(element)?;
        link.value().attr("href").and_then(video_id_from_href)
    }

    fn display_index(&self, element: ElementRef<'_>) -> Option<u32> {
        let labelled = self
            .indexes
            .first_text_in(element, |text| leading_number(text).is_some())
            .and_then(|text| leading_number(&text));
        labelled.or_else(|| {
            element
                .descendants()
                .filter_map(ElementRef::wrap)
                .map(element_text)
                .filter(|text| {
                    (1..=4).contains(&text.len()) && text.chars().all(|c| c.is_ascii_digit())
                })
                .find_map(|text| text.parse::<u32>().ok().filter(|n| (1..10_000).contains(n)))
        })
    }
}

/// Extracts the `v` query parameter from a relative or absolute watch link.
pub fn video_id_from_href(href: &str) -> Option<ItemId> {
    let base = Url::parse(PAGE_BASE).ok()?;
    let url = base.join(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn attribute_id(element: ElementRef<'_>) -> Option<ItemId> {
    locator::ID_ATTRIBUTES
        .iter()
        .find_map(|name| element.value().attr(name))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn synthesized_id(title: &str, channel: &str, position: usize) -> ItemId {
    let mut hasher = Sha256::new();
    if title.is_empty() && channel.is_empty() {
        hasher.update(position.to_string().as_bytes());
    } else {
        hasher.update(title.as_bytes());
        hasher.update([0x1f]);
        hasher.update(channel.as_bytes());
    }
    let digest = hasher.finalize();
    let hex: String = digest[..8].iter().map(|b| format!("{b:02x}")).collect();
    format!("{SYNTHETIC_ID_PREFIX}{hex}")
}

fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
