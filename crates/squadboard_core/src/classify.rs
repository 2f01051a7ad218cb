//! Free-text category classification.
//!
//! Pure and deterministic: the same text and context always yield the same
//! category, and classification never touches storage. The coordinator
//! resolves channel context (default category, venue presets) before
//! calling in, which keeps this function independently unit-testable.

use crate::CategoryPreset;
use derive_getters::Getters;

/// Placeholder category used when nothing else matches.
pub const GENERAL_CATEGORY: &str = "General";

/// Fixed-order synonym table. Scanned top to bottom; the first group with a
/// substring match of the lowercased text wins, so more specific names sit
/// above ones that share tokens with them.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Valorant", &["valorant", "valo"]),
    ("League of Legends", &["league of legends", "league", "aram"]),
    ("Minecraft", &["minecraft", "hypixel"]),
    ("Overwatch", &["overwatch", "ow2"]),
    ("Counter-Strike", &["counter-strike", "counter strike", "cs2", "csgo"]),
    ("Fortnite", &["fortnite"]),
    ("Apex Legends", &["apex legends", "apex"]),
    ("Rocket League", &["rocket league"]),
    ("Call of Duty", &["call of duty", "warzone", "cod "]),
    ("Among Us", &["among us", "amongus"]),
    ("Dead by Daylight", &["dead by daylight", "dbd"]),
    ("Rainbow Six", &["rainbow six", "siege", "r6"]),
    ("Destiny", &["destiny"]),
    ("Chess", &["chess"]),
];

/// Result of classifying a request text.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Classification {
    /// The resolved category label.
    category: String,
    /// The trimmed original text, unmodified by classification.
    body: String,
}

/// Classify free text into a category label.
///
/// Resolution order:
/// 1. the fixed keyword table (case-insensitive substring, first group wins)
/// 2. the channel's default category, when supplied
/// 3. a venue preset whose name appears in the text
/// 4. the first capitalized word of the text, if longer than two characters
/// 5. the [`GENERAL_CATEGORY`] placeholder
///
/// The body is always the trimmed input text.
///
/// # Examples
///
/// ```
/// use squadboard_core::{classify, GENERAL_CATEGORY};
///
/// let hit = classify("Looking for valorant teammates", None, &[]);
/// assert_eq!(hit.category(), "Valorant");
///
/// let fallback = classify("anyone up for a game?", Some("Minecraft"), &[]);
/// assert_eq!(fallback.category(), "Minecraft");
///
/// let none = classify("xyz", None, &[]);
/// assert_eq!(none.category(), GENERAL_CATEGORY);
/// ```
pub fn classify(
    text: &str,
    default_category: Option<&str>,
    presets: &[CategoryPreset],
) -> Classification {
    let body = text.trim().to_string();
    let category = resolve_category(&body, default_category, presets);
    Classification { category, body }
}

fn resolve_category(
    body: &str,
    default_category: Option<&str>,
    presets: &[CategoryPreset],
) -> String {
    let lowered = body.to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return (*category).to_string();
        }
    }

    if let Some(category) = default_category {
        return category.to_string();
    }

    for preset in presets {
        let name = preset.name().to_lowercase();
        if !name.is_empty() && lowered.contains(&name) {
            return preset.name().clone();
        }
    }

    if let Some(word) = first_capitalized_word(body) {
        return word.to_string();
    }

    GENERAL_CATEGORY.to_string()
}

/// The first capitalized word of the text, stripped of surrounding
/// punctuation, when it is longer than two characters.
fn first_capitalized_word(body: &str) -> Option<&str> {
    let word = body
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .find(|token| token.chars().next().is_some_and(char::is_uppercase))?;
    (word.chars().count() > 2).then_some(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert_eq!(classify("LFG VALORANT ranked", None, &[]).category(), "Valorant");
        assert_eq!(classify("valo tonight?", None, &[]).category(), "Valorant");
    }

    #[test]
    fn keyword_table_beats_channel_default() {
        let hit = classify("Looking for valorant teammates", Some("Minecraft"), &[]);
        assert_eq!(hit.category(), "Valorant");
    }

    #[test]
    fn channel_default_applies_when_no_keyword_matches() {
        let hit = classify("anyone up for a game?", Some("Minecraft"), &[]);
        assert_eq!(hit.category(), "Minecraft");
    }

    #[test]
    fn preset_name_applies_after_channel_default() {
        let presets = vec![CategoryPreset::new(
            "Board Games".to_string(),
            None,
            None,
            None,
        )];
        let hit = classify("board games at 8?", None, &presets);
        assert_eq!(hit.category(), "Board Games");

        // A supplied channel default still wins over presets.
        let defaulted = classify("board games at 8?", Some("Tabletop"), &presets);
        assert_eq!(defaulted.category(), "Tabletop");
    }

    #[test]
    fn capitalized_word_fallback_requires_three_chars() {
        assert_eq!(classify("Terraria run tonight?", None, &[]).category(), "Terraria");
        // First capitalized word too short: placeholder, no further scanning.
        assert_eq!(classify("Go play with me", None, &[]).category(), GENERAL_CATEGORY);
    }

    #[test]
    fn unmatched_text_gets_placeholder() {
        assert_eq!(classify("xyz", None, &[]).category(), GENERAL_CATEGORY);
    }

    #[test]
    fn body_is_trimmed_original_text() {
        let hit = classify("  lfg valorant ranked  ", None, &[]);
        assert_eq!(hit.body(), "lfg valorant ranked");
    }

    #[test]
    fn classification_is_deterministic() {
        let first = classify("anyone for league or valorant?", None, &[]);
        let second = classify("anyone for league or valorant?", None, &[]);
        assert_eq!(first, second);
        // Fixed scan order: Valorant sits above League in the table.
        assert_eq!(first.category(), "Valorant");
    }
}
