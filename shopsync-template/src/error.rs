//! Error types for shopsync-template.

use thiserror::Error;

/// All errors that can arise from reading a template body.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The body is not JSON, has no `sections` object, or a section has no
    /// string `type`.
    #[error("malformed template: {0}")]
    Malformed(String),
}
