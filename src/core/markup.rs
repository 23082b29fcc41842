//! In-game Markup Translation
//!
//! Skill and eidolon descriptions arrive as templates such as
//! `Deals DMG equal to #1[i]% of ATK.<color=#f29e38ff>Weakness</color>\n`.
//! [`translate`] substitutes the numeric parameters and rewrites the game's
//! tags into inert presentational markup.
//!
//! # Example
//!
//! ```
//! use cornerstone_db::core::markup::translate;
//!
//! let html = translate("Deals #1[i]% DMG", Some(&[0.28]));
//! assert_eq!(html, r#"Deals <span class="text-amber-400 font-bold">28%</span> DMG"#);
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Rendered in place of a placeholder that has no value to show.
pub const MISSING_VALUE: &str = "[ X ]";

const HIGHLIGHT_OPEN: &str = r#"<span class="text-amber-400 font-bold">"#;
const SPAN_CLOSE: &str = "</span>";

// ============================================================================
// Regex Patterns
// ============================================================================

/// `#<index>[<format>]` with an optional trailing `%`.
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#(?P<index>\d+)\[.*?\](?P<percent>%?)")
        .expect("Failed to compile placeholder regex")
});

static COLOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<color=(?P<hex>#[0-9A-Fa-f]{6}(?:[0-9A-Fa-f]{2})?)>(?P<body>.*?)</color>")
        .expect("Failed to compile color tag regex")
});

// ============================================================================
// Translation
// ============================================================================

/// Translate a template into marked-up text.
///
/// With non-empty `params`, each placeholder resolves to `params[index - 1]`;
/// a `%` sigil scales the value by 100 and rounds it to one decimal place.
/// Without params every placeholder renders as [`MISSING_VALUE`].
pub fn translate(template: &str, params: Option<&[f64]>) -> String {
    if template.is_empty() {
        return String::new();
    }

    let params = params.filter(|p| !p.is_empty());

    let resolved = PLACEHOLDER_PATTERN.replace_all(template, |caps: &Captures<'_>| {
        let percent = &caps["percent"];
        let value = params.and_then(|p| {
            caps["index"]
                .parse::<usize>()
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| p.get(i).copied())
        });

        match value {
            Some(value) => highlight(&format_param(value, !percent.is_empty()), percent),
            None => highlight(MISSING_VALUE, percent),
        }
    });

    clean_tags(&resolved)
}

/// Render a parameter value; percent values are scaled and rounded.
pub fn format_param(value: f64, percent: bool) -> String {
    if percent {
        format_number(round_one_decimal(value * 100.0))
    } else {
        format_number(value)
    }
}

/// Round to one decimal place, hiding floating point noise such as
/// `28.000000000000004`.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn format_number(value: f64) -> String {
    // `-0` would otherwise print with its sign
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn highlight(text: &str, percent: &str) -> String {
    format!("{HIGHLIGHT_OPEN}{text}{percent}{SPAN_CLOSE}")
}

fn clean_tags(text: &str) -> String {
    let text = text.replace("<unbreak>", "").replace("</unbreak>", "");
    let text = COLOR_PATTERN.replace_all(&text, r#"<span style="color: $hex">$body</span>"#);
    text.replace("\\n", "<br>")
}
