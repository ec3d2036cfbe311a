//! Asset key conventions.

use once_cell::sync::Lazy;
use regex::Regex;

use shopsync_core::Asset;

static TEMPLATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"templates/.*\.json").expect("static regex is valid"));

/// Whether `key` names a JSON template (e.g. `templates/product.json`,
/// `templates/customers/account.json`).
pub fn is_template_key(key: &str) -> bool {
    TEMPLATE_KEY_RE.is_match(key)
}

/// Keep only template assets, preserving order.
pub fn filter_templates(assets: Vec<Asset>) -> Vec<Asset> {
    assets.into_iter().filter(|a| is_template_key(&a.key)).collect()
}

/// `sections/<type>.liquid`. The type is used verbatim.
pub fn section_key(section_type: &str) -> String {
    format!("sections/{section_type}.liquid")
}
