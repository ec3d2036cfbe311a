//! Template propagation across storefronts.
//!
//! ## `sync_templates` — order of work
//!
//! 1. Fetch the source theme once. Failure here aborts the run.
//! 2. For each target shop, in caller order:
//!    a. find its `main` theme (none → store-level error, next shop);
//!    b. for each template key, in caller order:
//!       fetch the source template → ensure referenced sections →
//!       re-upload referenced images → upsert the template on the target.
//! 3. Fold recorded errors into a [`SyncResult`].
//!
//! Everything runs on the calling thread, one request at a time. Concurrent
//! writes to one theme can corrupt it, so this must stay sequential.

use shopsync_client::StorefrontClient;
use shopsync_core::{Asset, ShopDomain, SyncResult, Theme, ThemeId};
use shopsync_template::{extract_image_references, extract_section_types, section_key};

use crate::error::SyncError;
use crate::images::sync_images;
use crate::sections::{ensure_section, ThemeRef};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Parameters of one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub source_shop: ShopDomain,
    pub source_theme_id: ThemeId,
    pub template_keys: Vec<String>,
    pub target_shops: Vec<ShopDomain>,
}

impl SyncRequest {
    /// Build a request, dropping repeated keys and shops but keeping the
    /// order of first appearance.
    pub fn new(
        source_shop: impl Into<ShopDomain>,
        source_theme_id: ThemeId,
        template_keys: impl IntoIterator<Item = String>,
        target_shops: impl IntoIterator<Item = ShopDomain>,
    ) -> Self {
        Self {
            source_shop: source_shop.into(),
            source_theme_id,
            template_keys: dedup(template_keys),
            target_shops: dedup(target_shops),
        }
    }
}

fn dedup<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives a sync run over any [`StorefrontClient`].
pub struct TemplateSync<'a, C: StorefrontClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: StorefrontClient + ?Sized> TemplateSync<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Copy every requested template to the main theme of every target shop.
    ///
    /// Returns `Err` only when the source theme cannot be fetched. Every other
    /// failure is recorded in the returned [`SyncResult`].
    pub fn sync_templates(&self, request: &SyncRequest) -> Result<SyncResult, SyncError> {
        let source_theme = self
            .client
            .get_theme(&request.source_shop, request.source_theme_id)
            .map_err(|source| {
                tracing::error!(
                    shop = %request.source_shop,
                    theme_id = %request.source_theme_id,
                    error = %source,
                    "template sync failed"
                );
                SyncError::SourceTheme {
                    shop: request.source_shop.clone(),
                    theme_id: request.source_theme_id,
                    source,
                }
            })?;

        let mut errors = Vec::new();
        for target in &request.target_shops {
            if let Err(err) = self.sync_target(request, &source_theme, target, &mut errors) {
                record(
                    &mut errors,
                    format!("Error processing target shop {target}: {err}"),
                );
            }
        }

        if errors.is_empty() {
            let result =
                SyncResult::succeeded(request.template_keys.len(), request.target_shops.len());
            tracing::info!("{}", result.message);
            Ok(result)
        } else {
            Ok(SyncResult::failed(errors))
        }
    }

    /// All templates for one target shop. `Err` is a store-level failure.
    fn sync_target(
        &self,
        request: &SyncRequest,
        source_theme: &Theme,
        target: &ShopDomain,
        errors: &mut Vec<String>,
    ) -> Result<(), SyncError> {
        let themes = self.client.list_themes(target)?;
        let target_theme = themes
            .into_iter()
            .find(Theme::is_main)
            .ok_or_else(|| SyncError::NoMainTheme(target.clone()))?;

        let source = ThemeRef {
            shop: &request.source_shop,
            theme_id: source_theme.id,
        };
        let target_ref = ThemeRef {
            shop: target,
            theme_id: target_theme.id,
        };

        for key in &request.template_keys {
            match self.sync_template(source, target_ref, key, errors) {
                Ok(()) => tracing::info!(%key, shop = %target, "successfully synced template"),
                Err(err) => record(
                    errors,
                    format!("Error syncing template {key} to shop {target}: {err}"),
                ),
            }
        }
        Ok(())
    }

    /// One template into one target theme. `Err` is a template-level failure;
    /// section and image failures are recorded and do not stop the upsert.
    fn sync_template(
        &self,
        source: ThemeRef<'_>,
        target: ThemeRef<'_>,
        key: &str,
        errors: &mut Vec<String>,
    ) -> Result<(), SyncError> {
        let asset = self.client.get_asset(source.shop, source.theme_id, key)?;

        if let Some(body) = asset.text() {
            self.reconcile_dependencies(source, target, &asset, body, errors);
        }

        let value = asset.value.as_deref().unwrap_or_default();
        self.client
            .create_asset(target.shop, target.theme_id, &asset.key, value)?;
        Ok(())
    }

    fn reconcile_dependencies(
        &self,
        source: ThemeRef<'_>,
        target: ThemeRef<'_>,
        asset: &Asset,
        body: &str,
        errors: &mut Vec<String>,
    ) {
        let section_types = match extract_section_types(body) {
            Ok(types) => types,
            Err(err) => {
                // Still upserted verbatim by the caller.
                record(
                    errors,
                    format!(
                        "Error syncing template {} to shop {}: {err}",
                        asset.key, target.shop
                    ),
                );
                return;
            }
        };

        for section_type in &section_types {
            if let Err(err) = ensure_section(self.client, source, target, section_type) {
                record(
                    errors,
                    format!(
                        "Error syncing section {} to shop {}: {err}",
                        section_key(section_type),
                        target.shop
                    ),
                );
            }
        }

        let tokens = extract_image_references(body);
        if let Err(err) = sync_images(self.client, source.shop, target.shop, &tokens) {
            record(
                errors,
                format!(
                    "Error syncing images for template {} to shop {}: {err}",
                    asset.key, target.shop
                ),
            );
        }
    }
}

fn record(errors: &mut Vec<String>, message: String) {
    tracing::error!("{message}");
    errors.push(message);
}
