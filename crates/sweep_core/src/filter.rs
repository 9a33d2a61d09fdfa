use crate::normalize::TextVariants;
use crate::{Item, RangeFilter};

/// Combined text and range filter, rebuilt from the raw inputs on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    text_query: String,
    range_input: String,
    range: Option<RangeFilter>,
    query: TextVariants,
}

/// Why an item ended up shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Shown,
    HiddenByRange,
    HiddenByText,
}

impl Verdict {
    pub fn is_shown(self) -> bool {
        self == Verdict::Shown
    }
}

/// Tally of one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    pub shown: usize,
    pub total: usize,
    pub hidden_by_range: usize,
    pub hidden_by_text: usize,
}

impl FilterSpec {
    pub fn from_inputs(text_query: &str, range_input: &str) -> Self {
        let text_query = text_query.trim().to_string();
        Self {
            query: TextVariants::new(&text_query),
            range: RangeFilter::parse(range_input),
            range_input: range_input.trim().to_string(),
            text_query,
        }
    }

    pub fn text_query(&self) -> &str {
        &self.text_query
    }

    pub fn range_input(&self) -> &str {
        &self.range_input
    }

    pub fn range(&self) -> Option<RangeFilter> {
        self.range
    }

    pub fn has_text(&self) -> bool {
        !self.text_query.is_empty()
    }

    pub fn has_range(&self) -> bool {
        self.range.is_some()
    }

    /// No text and no usable range: everything is shown.
    pub fn is_identity(&self) -> bool {
        !self.has_text() && !self.has_range()
    }

    pub fn evaluate(&self, item: &Item) -> Verdict {
        if let Some(range) = self.range {
            // Unknown position never passes an active range.
            match item.display_index {
                Some(index) if range.contains(index) => {}
                _ => return Verdict::HiddenByRange,
            }
        }

        // An unreadable title is shown by default.
        if self.has_text() && !item.title.trim().is_empty() {
            let target = TextVariants::new(&item.searchable_text());
            if !self.query.found_in(&target) {
                return Verdict::HiddenByText;
            }
        }

        Verdict::Shown
    }

    /// Evaluates every item, returning per-item visibility in input order.
    pub fn apply(&self, items: &[Item]) -> (Vec<bool>, FilterOutcome) {
        let mut outcome = FilterOutcome {
            total: items.len(),
            ..FilterOutcome::default()
        };
        let visibility = items
            .iter()
            .map(|item| {
                let verdict = self.evaluate(item);
                match verdict {
                    Verdict::Shown => outcome.shown += 1,
                    Verdict::HiddenByRange => outcome.hidden_by_range += 1,
                    Verdict::HiddenByText => outcome.hidden_by_text += 1,
                }
                verdict.is_shown()
            })
            .collect();
        (visibility, outcome)
    }
}
