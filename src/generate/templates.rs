//! @acp:module "Artifact Templates"
//! @acp:summary "Bundled handlebars templates and the shared registry"
//! @acp:domain generation
//! @acp:layer rendering
//!
//! Templates carry no logic beyond substitution and partial inclusion. Every
//! branch between behaviours lives in [`super::select`].

use std::sync::LazyLock;

use handlebars::{no_escape, Handlebars};
use serde::Serialize;

use crate::error::Result;

pub const POPUP_HTML: &str = "popup_html";
pub const POPUP_DATE: &str = "popup_date";
pub const POPUP_DATE_LIVE: &str = "popup_date_live";
pub const POPUP_COLOR: &str = "popup_color";
pub const POPUP_HIGHLIGHT: &str = "popup_highlight";
pub const POPUP_GENERIC: &str = "popup_generic";
pub const CONTENT_PHONE: &str = "content_phone";
pub const CONTENT_EMAIL: &str = "content_email";
pub const CONTENT_RECOLOR: &str = "content_recolor";
pub const CONTENT_GENERIC: &str = "content_generic";
pub const BACKGROUND_IDLE: &str = "background_idle";
pub const BACKGROUND_PERIODIC: &str = "background_periodic";
pub const BACKGROUND_BLOCK: &str = "background_block";
pub const BACKGROUND_BLOCK_SCHEDULED: &str = "background_block_scheduled";
pub const STYLES: &str = "styles";

const PARTIALS: &[(&str, &str)] = &[
    (
        "popup_prelude",
        include_str!("../../templates/popup_prelude.js.hbs"),
    ),
    (
        "popup_date_fn",
        include_str!("../../templates/popup_date_fn.js.hbs"),
    ),
    (
        "content_walker",
        include_str!("../../templates/content_walker.js.hbs"),
    ),
    (
        "content_color_stub",
        include_str!("../../templates/content_color_stub.js.hbs"),
    ),
    (
        "content_messages",
        include_str!("../../templates/content_messages.js.hbs"),
    ),
    (
        "background_base",
        include_str!("../../templates/background_base.js.hbs"),
    ),
    (
        "background_rules",
        include_str!("../../templates/background_rules.js.hbs"),
    ),
];

const TEMPLATES: &[(&str, &str)] = &[
    (POPUP_HTML, include_str!("../../templates/popup.html.hbs")),
    (POPUP_DATE, include_str!("../../templates/popup_date.js.hbs")),
    (
        POPUP_DATE_LIVE,
        include_str!("../../templates/popup_date_live.js.hbs"),
    ),
    (POPUP_COLOR, include_str!("../../templates/popup_color.js.hbs")),
    (
        POPUP_HIGHLIGHT,
        include_str!("../../templates/popup_highlight.js.hbs"),
    ),
    (
        POPUP_GENERIC,
        include_str!("../../templates/popup_generic.js.hbs"),
    ),
    (
        CONTENT_PHONE,
        include_str!("../../templates/content_phone.js.hbs"),
    ),
    (
        CONTENT_EMAIL,
        include_str!("../../templates/content_email.js.hbs"),
    ),
    (
        CONTENT_RECOLOR,
        include_str!("../../templates/content_recolor.js.hbs"),
    ),
    (
        CONTENT_GENERIC,
        include_str!("../../templates/content_generic.js.hbs"),
    ),
    (
        BACKGROUND_IDLE,
        include_str!("../../templates/background_idle.js.hbs"),
    ),
    (
        BACKGROUND_PERIODIC,
        include_str!("../../templates/background_periodic.js.hbs"),
    ),
    (
        BACKGROUND_BLOCK,
        include_str!("../../templates/background_block.js.hbs"),
    ),
    (
        BACKGROUND_BLOCK_SCHEDULED,
        include_str!("../../templates/background_block_scheduled.js.hbs"),
    ),
    (STYLES, include_str!("../../templates/styles.css.hbs")),
];

static REGISTRY: LazyLock<Handlebars<'static>> =
    LazyLock::new(|| build_registry().expect("bundled templates compile"));

/// Build a registry holding every bundled partial and template
pub fn build_registry() -> Result<Handlebars<'static>> {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(no_escape);
    hb.set_strict_mode(true);

    for (name, source) in PARTIALS {
        hb.register_partial(name, *source)?;
    }
    for (name, source) in TEMPLATES {
        hb.register_template_string(name, *source)?;
    }

    Ok(hb)
}

/// @acp:summary "Render a bundled template against a serializable context"
pub fn render<T: Serialize>(template: &str, context: &T) -> Result<String> {
    Ok(REGISTRY.render(template, context)?)
}
