//! @acp:module "Variant Selection"
//! @acp:summary "Ordered first-match-wins rule chains choosing template variants"
//! @acp:domain generation
//! @acp:layer logic
//!
//! Each artifact has one chain of `(predicate, variant)` rules evaluated top to
//! bottom. The first predicate that holds picks the variant; when none holds
//! the chain's fallback is used, so selection is total.

use crate::analyze::AnalysisProfile;

use super::templates;

/// One entry of a selection chain
pub struct Rule<V> {
    pub name: &'static str,
    pub when: fn(&AnalysisProfile) -> bool,
    pub variant: V,
}

/// @acp:summary "Priority-ordered rules plus the variant used when none match"
pub struct Chain<V: 'static> {
    pub rules: &'static [Rule<V>],
    pub fallback: V,
}

/// Name used in logs when the fallback is chosen
pub const FALLBACK: &str = "fallback";

impl<V: Copy> Chain<V> {
    /// First matching rule's variant, and the rule name for tracing
    pub fn select(&self, profile: &AnalysisProfile) -> (&'static str, V) {
        self.rules
            .iter()
            .find(|rule| (rule.when)(profile))
            .map(|rule| (rule.name, rule.variant))
            .unwrap_or((FALLBACK, self.fallback))
    }
}

fn live_date(p: &AnalysisProfile) -> bool {
    p.features.show_date && p.features.refresh_timer
}

fn shows_date(p: &AnalysisProfile) -> bool {
    p.features.show_date
}

fn recolors(p: &AnalysisProfile) -> bool {
    p.features.change_color
}

fn recolors_or_mentions_blue(p: &AnalysisProfile) -> bool {
    p.features.change_color || p.normalized.contains("blue")
}

fn highlights_phones(p: &AnalysisProfile) -> bool {
    p.features.highlight_phone
}

fn highlights_emails(p: &AnalysisProfile) -> bool {
    p.features.highlight_email
}

fn highlights_anything(p: &AnalysisProfile) -> bool {
    p.features.highlight_phone || p.features.highlight_email
}

fn recolors_or_dark_mode(p: &AnalysisProfile) -> bool {
    p.features.change_color || p.features.dark_mode
}

fn blocks_on_schedule(p: &AnalysisProfile) -> bool {
    blocks(p) && p.features.time_based
}

fn blocks(p: &AnalysisProfile) -> bool {
    p.features.block_sites && !p.blocked_sites.is_empty()
}

fn runs_periodically(p: &AnalysisProfile) -> bool {
    p.features.time_based
}

/// Title and button label of popup.html
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupMarkup {
    DateTime,
    PageModifier,
    PhoneFinder,
    EmailFinder,
    Generic,
}

impl PopupMarkup {
    pub fn title(&self) -> &'static str {
        match self {
            PopupMarkup::DateTime => "Date & Time",
            PopupMarkup::PageModifier => "Page Modifier",
            PopupMarkup::PhoneFinder => "Phone Finder",
            PopupMarkup::EmailFinder => "Email Finder",
            PopupMarkup::Generic => "Extension Popup",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            PopupMarkup::DateTime => "Refresh",
            PopupMarkup::PageModifier => "Change Color",
            PopupMarkup::PhoneFinder => "Find Phones",
            PopupMarkup::EmailFinder => "Find Emails",
            PopupMarkup::Generic => "Run Action",
        }
    }
}

pub static POPUP_MARKUP_CHAIN: Chain<PopupMarkup> = Chain {
    rules: &[
        Rule {
            name: "date",
            when: shows_date,
            variant: PopupMarkup::DateTime,
        },
        Rule {
            name: "color",
            when: recolors,
            variant: PopupMarkup::PageModifier,
        },
        Rule {
            name: "phone",
            when: highlights_phones,
            variant: PopupMarkup::PhoneFinder,
        },
        Rule {
            name: "email",
            when: highlights_emails,
            variant: PopupMarkup::EmailFinder,
        },
    ],
    fallback: PopupMarkup::Generic,
};

/// Behaviour of popup.js
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupScript {
    LiveDate,
    Date,
    ColorChange,
    Highlight,
    Generic,
}

impl PopupScript {
    pub fn template(&self) -> &'static str {
        match self {
            PopupScript::LiveDate => templates::POPUP_DATE_LIVE,
            PopupScript::Date => templates::POPUP_DATE,
            PopupScript::ColorChange => templates::POPUP_COLOR,
            PopupScript::Highlight => templates::POPUP_HIGHLIGHT,
            PopupScript::Generic => templates::POPUP_GENERIC,
        }
    }
}

pub static POPUP_SCRIPT_CHAIN: Chain<PopupScript> = Chain {
    rules: &[
        Rule {
            name: "live-date",
            when: live_date,
            variant: PopupScript::LiveDate,
        },
        Rule {
            name: "date",
            when: shows_date,
            variant: PopupScript::Date,
        },
        Rule {
            name: "color",
            when: recolors_or_mentions_blue,
            variant: PopupScript::ColorChange,
        },
        Rule {
            name: "highlight",
            when: highlights_anything,
            variant: PopupScript::Highlight,
        },
    ],
    fallback: PopupScript::Generic,
};

/// Behaviour of content.js
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentScript {
    PhoneHighlight,
    EmailHighlight,
    Recolor,
    Generic,
}

impl ContentScript {
    pub fn template(&self) -> &'static str {
        match self {
            ContentScript::PhoneHighlight => templates::CONTENT_PHONE,
            ContentScript::EmailHighlight => templates::CONTENT_EMAIL,
            ContentScript::Recolor => templates::CONTENT_RECOLOR,
            ContentScript::Generic => templates::CONTENT_GENERIC,
        }
    }
}

pub static CONTENT_SCRIPT_CHAIN: Chain<ContentScript> = Chain {
    rules: &[
        Rule {
            name: "phone",
            when: highlights_phones,
            variant: ContentScript::PhoneHighlight,
        },
        Rule {
            name: "email",
            when: highlights_emails,
            variant: ContentScript::EmailHighlight,
        },
        Rule {
            name: "recolor",
            when: recolors_or_dark_mode,
            variant: ContentScript::Recolor,
        },
    ],
    fallback: ContentScript::Generic,
};

/// Behaviour of background.js
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundScript {
    ScheduledBlocking,
    Blocking,
    Periodic,
    Idle,
}

impl BackgroundScript {
    pub fn template(&self) -> &'static str {
        match self {
            BackgroundScript::ScheduledBlocking => templates::BACKGROUND_BLOCK_SCHEDULED,
            BackgroundScript::Blocking => templates::BACKGROUND_BLOCK,
            BackgroundScript::Periodic => templates::BACKGROUND_PERIODIC,
            BackgroundScript::Idle => templates::BACKGROUND_IDLE,
        }
    }
}

pub static BACKGROUND_CHAIN: Chain<BackgroundScript> = Chain {
    rules: &[
        Rule {
            name: "scheduled-blocking",
            when: blocks_on_schedule,
            variant: BackgroundScript::ScheduledBlocking,
        },
        Rule {
            name: "blocking",
            when: blocks,
            variant: BackgroundScript::Blocking,
        },
        Rule {
            name: "periodic",
            when: runs_periodically,
            variant: BackgroundScript::Periodic,
        },
    ],
    fallback: BackgroundScript::Idle,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;

    fn pick<V: Copy>(chain: &Chain<V>, prompt: &str) -> V {
        chain.select(&analyze(prompt)).1
    }

    #[test]
    fn test_rule_name_reported() {
        let p = analyze("Create a popup with the date and a refresh button.");
        assert_eq!(POPUP_SCRIPT_CHAIN.select(&p).0, "live-date");
        let mut p = p;
        p.features = Default::default();
        p.normalized = crate::analyze::NormalizedText::new("nothing here");
        assert_eq!(POPUP_SCRIPT_CHAIN.select(&p).0, FALLBACK);
    }

    #[test]
    fn test_date_outranks_timer_only_when_both_set() {
        assert_eq!(
            pick(&POPUP_SCRIPT_CHAIN, "Create a popup with the date and a refresh button."),
            PopupScript::LiveDate
        );
        assert_eq!(
            pick(
                &POPUP_SCRIPT_CHAIN,
                "Create an extension that shows a popup with today's date."
            ),
            PopupScript::Date
        );
    }

    #[test]
    fn test_phone_outranks_email_in_content_script() {
        let mut p = analyze("Highlight every phone number and email address on the page.");
        p.features.highlight_phone = true;
        p.features.highlight_email = true;
        assert_eq!(CONTENT_SCRIPT_CHAIN.select(&p).1, ContentScript::PhoneHighlight);
        assert_eq!(POPUP_MARKUP_CHAIN.select(&p).1, PopupMarkup::PhoneFinder);
    }

    #[test]
    fn test_blue_mention_selects_color_popup() {
        let mut p = analyze("Create a popup that turns the page blue.");
        p.features.show_date = false;
        p.features.change_color = false;
        assert_eq!(POPUP_SCRIPT_CHAIN.select(&p).1, PopupScript::ColorChange);
    }

    #[test]
    fn test_dark_mode_recolors() {
        let mut p = analyze("Add a toggle on every page.");
        p.features.dark_mode = true;
        assert_eq!(CONTENT_SCRIPT_CHAIN.select(&p).1, ContentScript::Recolor);
    }

    #[test]
    fn test_background_precedence() {
        assert_eq!(
            pick(&BACKGROUND_CHAIN, "Block social media during work hours"),
            BackgroundScript::ScheduledBlocking
        );
        assert_eq!(
            pick(
                &BACKGROUND_CHAIN,
                "Block Facebook and TikTok every time the browser opens."
            ),
            BackgroundScript::Blocking
        );
    }

    #[test]
    fn test_blocking_without_sites_falls_through() {
        let mut p = analyze("Run a background task every hour.");
        p.features.block_sites = true;
        p.blocked_sites.clear();
        p.features.time_based = false;
        assert_eq!(BACKGROUND_CHAIN.select(&p).1, BackgroundScript::Idle);
    }

    #[test]
    fn test_generic_fallbacks() {
        let mut p = analyze("Do something useful for me please.");
        p.features = Default::default();
        p.normalized = crate::analyze::NormalizedText::new("nothing here");
        assert_eq!(POPUP_MARKUP_CHAIN.select(&p).1, PopupMarkup::Generic);
        assert_eq!(POPUP_SCRIPT_CHAIN.select(&p).1, PopupScript::Generic);
        assert_eq!(CONTENT_SCRIPT_CHAIN.select(&p).1, ContentScript::Generic);
        assert_eq!(BACKGROUND_CHAIN.select(&p).1, BackgroundScript::Idle);
    }
}
