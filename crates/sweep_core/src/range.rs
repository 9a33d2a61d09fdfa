use std::fmt;

/// Inclusive band of 1-based playlist positions.
///
/// Accepted spellings are `A-B`, `A-`, `-B` and `A`. Anything else means "no
/// range filter" rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter {
    start: u32,
    end: u32,
}

impl RangeFilter {
    /// Builds a range, swapping reversed bounds so `start <= end`.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn is_open_ended(&self) -> bool {
        self.end == u32::MAX
    }

    pub fn contains(&self, index: u32) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.split_once('-') {
            None => parse_number(trimmed).map(|single| Self::new(single, single)),
            Some((head, tail)) => match (head.is_empty(), tail.is_empty()) {
                (false, false) => Some(Self::new(parse_number(head)?, parse_number(tail)?)),
                (false, true) => Some(Self::new(parse_number(head)?, u32::MAX)),
                (true, false) => Some(Self::new(1, parse_number(tail)?)),
                (true, true) => None,
            },
        }
    }
}

impl fmt::Display for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open_ended() {
            write!(f, "{}-", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

// `str::parse` alone would also take "+5".
fn parse_number(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
