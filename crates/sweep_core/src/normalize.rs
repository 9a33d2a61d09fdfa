//! Text folding for permissive, multi-script substring matching.
//!
//! Titles on the watch-later page mix Latin, full-width Latin, hiragana,
//! katakana and half-width katakana freely, so a query typed one way has to
//! find a title written another way. Every string is expanded into a handful
//! of equivalent spellings and two strings match when any query spelling is a
//! substring of any target spelling.

/// Half-width forms `U+FF61..=U+FF9F` mapped to their full-width counterparts.
const HALFWIDTH_KANA: &str = "。「」、・ヲァィゥェォャュョッーアイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン゛゜";

const HALFWIDTH_VOICED_MARK: char = '\u{FF9E}';
const HALFWIDTH_SEMI_VOICED_MARK: char = '\u{FF9F}';

/// Equivalent spellings of one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextVariants {
    pub original: String,
    pub normalized: String,
    pub variants: Vec<String>,
}

impl TextVariants {
    pub fn new(text: &str) -> Self {
        let original = text.trim().to_string();
        if original.is_empty() {
            return Self::default();
        }

        let normalized = normalize(&original);
        let mut variants = vec![original.clone(), normalized.clone()];

        let hiragana = to_hiragana(&normalized);
        if hiragana != normalized {
            variants.push(hiragana);
        }
        let katakana = to_katakana(&normalized);
        if katakana != normalized {
            variants.push(katakana);
        }

        let mut unique: Vec<String> = Vec::with_capacity(variants.len());
        for variant in variants {
            if !unique.contains(&variant) {
                unique.push(variant);
            }
        }

        Self {
            original,
            normalized,
            variants: unique,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// True when any of `self`'s spellings occurs inside any of `target`'s.
    pub fn found_in(&self, target: &TextVariants) -> bool {
        if self.is_empty() || target.is_empty() {
            return false;
        }
        self.variants.iter().any(|needle| {
            target
                .variants
                .iter()
                .any(|haystack| haystack.contains(needle.as_str()))
        })
    }
}

/// Convenience wrapper for one-off comparisons.
pub fn matches_text(query: &str, target: &str) -> bool {
    TextVariants::new(query).found_in(&TextVariants::new(target))
}

/// Lowercases and folds character widths.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut chars = lowered.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\u{FF01}'..='\u{FF5E}' => {
                out.push(char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch));
            }
            '\u{3000}' => out.push(' '),
            '\u{FF61}'..='\u{FF9F}' => {
                let base = widen_kana(ch);
                let composed = match chars.peek() {
                    Some(&mark @ (HALFWIDTH_VOICED_MARK | HALFWIDTH_SEMI_VOICED_MARK)) => {
                        compose_voiced(base, mark)
                    }
                    _ => None,
                };
                match composed {
                    Some(voiced) => {
                        chars.next();
                        out.push(voiced);
                    }
                    None => out.push(base),
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

fn widen_kana(ch: char) -> char {
    let offset = (ch as u32 - 0xFF61) as usize;
    HALFWIDTH_KANA.chars().nth(offset).unwrap_or(ch)
}

fn compose_voiced(base: char, mark: char) -> Option<char> {
    let code = base as u32;
    let step = match mark {
        HALFWIDTH_VOICED_MARK => {
            if base == 'ウ' {
                return Some('ヴ');
            }
            if !"カキクケコサシスセソタチツテトハヒフヘホ".contains(base) {
                return None;
            }
            1
        }
        HALFWIDTH_SEMI_VOICED_MARK => {
            if !"ハヒフヘホ".contains(base) {
                return None;
            }
            2
        }
        _ => return None,
    };
    char::from_u32(code + step)
}

/// Katakana `ァ..=ヶ` shifted onto hiragana.
pub fn to_hiragana(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{30A1}'..='\u{30F6}' => char::from_u32(ch as u32 - 0x60).unwrap_or(ch),
            _ => ch,
        })
        .collect()
}

/// Hiragana `ぁ..=ゖ` shifted onto katakana.
pub fn to_katakana(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{3041}'..='\u{3096}' => char::from_u32(ch as u32 + 0x60).unwrap_or(ch),
            _ => ch,
        })
        .collect()
}
