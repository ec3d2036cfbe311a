//! Image reconciler: re-upload store images a template points at.
//!
//! One files query against the source resolves every token to a public URL,
//! then one `fileCreate` mutation asks the target to import them. The
//! mutation's per-file status and `userErrors` are not inspected; only a
//! failed call is an error.

use serde::Deserialize;
use serde_json::{json, Value};

use shopsync_client::StorefrontClient;
use shopsync_core::ShopDomain;

use crate::error::SyncError;

/// Maximum number of files resolved per template.
pub const FILES_PAGE_SIZE: usize = 100;

pub const FILES_QUERY: &str = "query($query: String!, $first: Int!) { files(first: $first, query: $query) { edges { node { preview { image { src altText } } } } } }";

pub const FILE_CREATE_MUTATION: &str = "mutation fileCreate($files: [FileCreateInput!]!) { fileCreate(files: $files) { files { fileStatus } userErrors { field message } } }";

// ---------------------------------------------------------------------------
// Query response shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FilesData {
    files: Option<FileConnection>,
}

#[derive(Debug, Deserialize)]
struct FileConnection {
    #[serde(default)]
    edges: Vec<FileEdge>,
}

#[derive(Debug, Deserialize)]
struct FileEdge {
    node: FileNode,
}

#[derive(Debug, Deserialize)]
struct FileNode {
    preview: Option<FilePreview>,
}

#[derive(Debug, Deserialize)]
struct FilePreview {
    image: Option<PreviewImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewImage {
    src: String,
    alt_text: Option<String>,
}

/// A source image resolved from a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub src: String,
    pub alt_text: Option<String>,
}

/// What [`sync_images`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// No tokens; no calls made.
    NoReferences,
    /// The source query matched nothing with a preview image; no upload made.
    NoneResolved,
    /// A `fileCreate` mutation was sent for this many files.
    Submitted(usize),
}

/// Disjunctive search string: `a.jpg OR b.png`.
pub fn files_search(tokens: &[String]) -> String {
    tokens.join(" OR ")
}

/// Resolve `tokens` on `source` and submit them for import on `target`.
pub fn sync_images<C: StorefrontClient + ?Sized>(
    client: &C,
    source: &ShopDomain,
    target: &ShopDomain,
    tokens: &[String],
) -> Result<ImageOutcome, SyncError> {
    if tokens.is_empty() {
        return Ok(ImageOutcome::NoReferences);
    }

    let images = resolve_images(client, source, tokens)?;
    if images.is_empty() {
        tracing::debug!(shop = %source, count = tokens.len(), "no source images resolved");
        return Ok(ImageOutcome::NoneResolved);
    }

    let files: Vec<Value> = images
        .iter()
        .map(|image| {
            json!({
                "alt": image.alt_text,
                "contentType": "IMAGE",
                "originalSource": image.src,
            })
        })
        .collect();
    client.run_graph_query(target, FILE_CREATE_MUTATION, Some(json!({ "files": files })))?;

    tracing::info!(from = %source, to = %target, count = images.len(), "images submitted");
    Ok(ImageOutcome::Submitted(images.len()))
}

/// Run the files query on `source` and keep every edge with a preview image.
pub fn resolve_images<C: StorefrontClient + ?Sized>(
    client: &C,
    source: &ShopDomain,
    tokens: &[String],
) -> Result<Vec<SourceImage>, SyncError> {
    let variables = json!({ "query": files_search(tokens), "first": FILES_PAGE_SIZE });
    let data = client.run_graph_query(source, FILES_QUERY, Some(variables))?;
    if data.is_null() {
        return Ok(Vec::new());
    }

    let parsed: FilesData = serde_json::from_value(data)
        .map_err(|e| SyncError::Response { what: "files", source: e })?;

    Ok(parsed
        .files
        .map(|conn| conn.edges)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|edge| edge.node.preview.and_then(|p| p.image))
        .map(|image| SourceImage {
            src: image.src,
            alt_text: image.alt_text,
        })
        .collect())
}
