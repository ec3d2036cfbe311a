//! # shopsync-template
//!
//! Reads JSON theme templates: which sections they reference, which store
//! images they embed, and which asset keys are templates at all.
//!
//! ## Usage
//!
//! ```rust
//! use shopsync_template::{extract_image_references, extract_section_types};
//!
//! let body = r#"{"sections":{"main":{"type":"hero","settings":{"image":"shopify://shop_images/a.jpg"}}}}"#;
//! let types = extract_section_types(body).unwrap();
//! assert!(types.contains("hero"));
//! assert_eq!(extract_image_references(body), vec!["a.jpg".to_string()]);
//! ```

pub mod error;
pub mod images;
pub mod keys;
pub mod sections;

pub use error::TemplateError;
pub use images::extract_image_references;
pub use keys::{filter_templates, is_template_key, section_key};
pub use sections::extract_section_types;
