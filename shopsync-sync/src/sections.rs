//! Section reconciler: make sure a section referenced by a template exists on
//! the target theme.
//!
//! Sections already on the target are left alone even if the source copy has
//! changed since; only missing ones are copied. Source assets are only read.

use shopsync_client::StorefrontClient;
use shopsync_core::{ShopDomain, ThemeId};
use shopsync_template::section_key;

use crate::error::SyncError;

/// One side of a copy: a store and one of its themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeRef<'a> {
    pub shop: &'a ShopDomain,
    pub theme_id: ThemeId,
}

/// What [`ensure_section`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    /// Target already has the section; nothing written.
    AlreadyPresent { key: String },
    /// Section copied from source to target.
    Copied { key: String },
    /// Neither side has it. Logged and skipped, not an error.
    MissingInSource { key: String },
}

/// Ensure `sections/<section_type>.liquid` exists on `target`.
///
/// Performs no write when the target already has the section. Transport
/// failures on either side are returned as errors.
pub fn ensure_section<C: StorefrontClient + ?Sized>(
    client: &C,
    source: ThemeRef<'_>,
    target: ThemeRef<'_>,
    section_type: &str,
) -> Result<SectionOutcome, SyncError> {
    let key = section_key(section_type);

    match client.get_asset(target.shop, target.theme_id, &key) {
        Ok(_) => {
            tracing::debug!(shop = %target.shop, %key, "section present on target");
            return Ok(SectionOutcome::AlreadyPresent { key });
        }
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(err.into()),
    }

    let section = match client.get_asset(source.shop, source.theme_id, &key) {
        Ok(asset) => asset,
        Err(err) if err.is_not_found() => {
            tracing::warn!(
                shop = %source.shop,
                theme_id = %source.theme_id,
                %key,
                "section file not found in source theme, skipping"
            );
            return Ok(SectionOutcome::MissingInSource { key });
        }
        Err(err) => return Err(err.into()),
    };

    let value = section.value.unwrap_or_default();
    client.create_asset(target.shop, target.theme_id, &key, &value)?;
    tracing::info!(from = %source.shop, to = %target.shop, %key, "section copied");
    Ok(SectionOutcome::Copied { key })
}
