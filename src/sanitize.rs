use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Valid regex pattern"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Valid regex pattern"));

/// Turn the HTML instructions of a recipe into a single line of plain text.
///
/// Tags are removed, `&nbsp;` becomes a space, whitespace runs collapse to a
/// single space and the result is trimmed. No other entities are decoded.
pub fn clean_instructions(html: &str) -> String {
    let without_tags = TAG.replace_all(html, "");
    let spaced = without_tags.replace("&nbsp;", " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}
