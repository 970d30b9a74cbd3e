//! @acp:module "Intent Classifier"
//! @acp:summary "Weighted keyword-overlap scoring of intent categories"
//! @acp:domain analysis
//! @acp:layer logic

use std::collections::BTreeMap;

use super::normalize::NormalizedText;
use super::tables::{AnalysisTables, IntentCategory};

pub const UI_INTERACTION: &str = "ui_interaction";
pub const CONTENT_MODIFICATION: &str = "content_modification";
pub const BACKGROUND_AUTOMATION: &str = "background_automation";
pub const DATA_STORAGE: &str = "data_storage";
pub const BROWSER_INTEGRATION: &str = "browser_integration";

/// Confidence per intent category, in `[0, 1]`.
///
/// Categories with no keyword hits are absent rather than zero.
pub type IntentScores = BTreeMap<String, f64>;

/// Score every category in the tables against the normalized prompt
pub fn classify_intents(text: &NormalizedText, tables: &AnalysisTables) -> IntentScores {
    tables
        .intents
        .iter()
        .filter_map(|category| {
            score_category(text, category).map(|score| (category.name.clone(), score))
        })
        .collect()
}

/// Confidence for one category, or `None` when no keyword matched
pub fn score_category(text: &NormalizedText, category: &IntentCategory) -> Option<f64> {
    let matches = category
        .keywords
        .iter()
        .filter(|kw| text.contains(kw))
        .count();

    if matches == 0 {
        return None;
    }

    let base = (matches as f64 / category.keywords.len() as f64 * 2.0).min(1.0);
    Some((base * category.weight).min(1.0))
}

/// Score lookup treating an absent category as zero
pub fn score_of(scores: &IntentScores, category: &str) -> f64 {
    scores.get(category).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::tables::tables;

    fn classify(raw: &str) -> IntentScores {
        classify_intents(&NormalizedText::new(raw), tables())
    }

    #[test]
    fn test_unmatched_categories_absent() {
        let scores = classify("Create an extension that shows a popup with today's date.");
        assert!(scores.contains_key(UI_INTERACTION));
        assert!(!scores.contains_key(DATA_STORAGE));
        assert!(!scores.contains_key(CONTENT_MODIFICATION));
    }

    #[test]
    fn test_ui_interaction_score() {
        // popup + show out of 9 keywords: 2/9*2 = 0.444..., weight 1.0
        let scores = classify("Create an extension that shows a popup with today's date.");
        let score = score_of(&scores, UI_INTERACTION);
        assert!((score - 4.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_clamped_to_one() {
        // 7 of 14 content keywords hits base 1.0; weight 1.2 must clamp to 1.0
        let scores = classify("modify change highlight extract replace inject webpage");
        assert_eq!(score_of(&scores, CONTENT_MODIFICATION), 1.0);
    }

    #[test]
    fn test_multi_word_keyword() {
        let scores = classify("Block Facebook every time the browser opens.");
        // block, browser opens: 2/11*2*1.1
        let expected = 2.0 / 11.0 * 2.0 * 1.1;
        assert!((score_of(&scores, BACKGROUND_AUTOMATION) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_scores_bounded() {
        let scores = classify(
            "popup button menu interface display show view click toolbar save store \
             remember persist settings tabs browser url",
        );
        assert!(scores.values().all(|s| *s > 0.0 && *s <= 1.0));
    }
}
