//! Recognizes the "remove from playlist" entry in an item's action menu.

use sweep_core::normalize::normalize;

/// Phrases that mark a removal entry. Compared against normalized
/// (lowercased, width-folded) menu text, so they are stored the same way.
const REMOVAL_PHRASES: &[&str] = &[
    "再生リストから削除",
    "リストから",
    "削除",
    "remove from",
    "remove",
    "delete",
    "entfernen",
    "supprimer",
    "retirer",
    "eliminar",
    "quitar",
    "rimuovi",
    "remover",
];

/// Phrase table matcher for removal entries.
#[derive(Debug, Clone)]
pub struct RemovalIntent {
    phrases: Vec<String>,
}

impl Default for RemovalIntent {
    fn default() -> Self {
        Self::new(REMOVAL_PHRASES.iter().copied())
    }
}

impl RemovalIntent {
    pub fn new<'a>(phrases: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            phrases: phrases
                .into_iter()
                .map(normalize)
                .filter(|phrase| !phrase.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, entry_text: &str) -> bool {
        let text = normalize(entry_text);
        !text.is_empty() && self.phrases.iter().any(|phrase| text.contains(phrase.as_str()))
    }

    /// Index of the first entry that reads as a removal action.
    pub fn pick<S: AsRef<str>>(&self, entries: &[S]) -> Option<usize> {
        entries.iter().position(|entry| self.matches(entry.as_ref()))
    }
}
