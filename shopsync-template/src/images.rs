//! Store-image references embedded in a template body.
//!
//! The scan runs over the raw text, not the parsed JSON: image URIs also show
//! up inside string values that are themselves serialized JSON or markup, at
//! any depth, and template schemas are not stable enough to walk.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Scheme prefix the storefront platform uses for files in its media library.
pub const SHOP_IMAGES_SCHEME: &str = "shopify://shop_images/";

// A token ends at a quote, a backslash (escaped quote in nested JSON) or whitespace.
static SHOP_IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"shopify://shop_images/([^"\\\s]+)"#).expect("static regex is valid")
});

/// Distinct image tokens in `template_value`, in first-seen order.
pub fn extract_image_references(template_value: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    SHOP_IMAGE_RE
        .captures_iter(template_value)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
