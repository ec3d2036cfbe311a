//! Error types for shopsync-sync.

use thiserror::Error;

use shopsync_client::ClientError;
use shopsync_core::{ShopDomain, ThemeId};
use shopsync_template::TemplateError;

/// All errors that can arise from sync operations.
///
/// Only [`SyncError::SourceTheme`] aborts a whole sync run; everything else is
/// caught per target store or per template and recorded as text.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A storefront call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A template body could not be read.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The source theme could not be fetched; there is nothing to sync from.
    #[error("failed to fetch source theme {theme_id} on shop {shop}: {source}")]
    SourceTheme {
        shop: ShopDomain,
        theme_id: ThemeId,
        #[source]
        source: ClientError,
    },

    /// The target store has no published theme to write into.
    #[error("No main theme found for shop {0}")]
    NoMainTheme(ShopDomain),

    /// A graph query answered with an unexpected shape.
    #[error("unexpected {what} response: {source}")]
    Response {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Required request parameters are absent or unusable.
    #[error("{0}")]
    InvalidRequest(String),
}
