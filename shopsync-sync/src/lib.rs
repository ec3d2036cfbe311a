//! # shopsync-sync
//!
//! Template propagation between storefronts.
//!
//! Call [`TemplateSync::sync_templates`] to copy templates (and the sections
//! and images they reference) from one theme to the main theme of each target
//! shop, or [`dispatch`] to run any JSON [`ActionRequest`].

pub mod action;
pub mod error;
pub mod images;
pub mod orchestrator;
pub mod sections;

pub use action::{dispatch, ActionReply, ActionRequest, ActionResponse};
pub use error::SyncError;
pub use images::{sync_images, ImageOutcome};
pub use orchestrator::{SyncRequest, TemplateSync};
pub use sections::{ensure_section, SectionOutcome, ThemeRef};
