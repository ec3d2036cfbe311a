//! Section references of a JSON template.
//!
//! A template body looks like:
//!
//! ```json
//! {
//!   "sections": {
//!     "main": { "type": "main-product", "settings": {} },
//!     "16589": { "type": "hero", "blocks": {} }
//!   },
//!   "order": ["main", "16589"]
//! }
//! ```
//!
//! Only the `type` of each entry under `sections` matters here.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::TemplateError;

/// Distinct section types referenced by `template_value`.
pub fn extract_section_types(template_value: &str) -> Result<BTreeSet<String>, TemplateError> {
    let parsed: Value = serde_json::from_str(template_value)
        .map_err(|e| TemplateError::Malformed(format!("invalid JSON: {e}")))?;

    let sections = parsed
        .get("sections")
        .and_then(Value::as_object)
        .ok_or_else(|| TemplateError::Malformed("missing `sections` object".to_string()))?;

    sections
        .iter()
        .map(|(slot, descriptor)| {
            descriptor
                .get("type")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| {
                    TemplateError::Malformed(format!("section `{slot}` has no string `type`"))
                })
        })
        .collect()
}
