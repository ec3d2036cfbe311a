//! Error types for shopsync-client.

use thiserror::Error;

use shopsync_core::ShopDomain;

/// All errors that can arise from a storefront API call.
///
/// The client never retries; every failure is returned to the caller as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The shop has no entry in the loaded configuration.
    #[error("shop configuration not found for: {0}")]
    UnknownShop(ShopDomain),

    /// The platform answered 404 for the requested resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Transport { status: u16, message: String },

    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("connection error: {0}")]
    Connection(String),

    /// A GraphQL call returned `errors` and no `data`.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
