//! Native file dialogs for the image library and document pickers.

use std::fs;
use std::path::{Path, PathBuf};

use rfd::AsyncFileDialog;
use tracing::{debug, info};

use portal_bridge::{Asset, DocumentOptions, ImageOptions};
use portal_common::{mime_from_extension, PlatformError};

use crate::images::{file_uri, prepare_image};

/// Extensions offered by the image library dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

/// Extensions considered when turning MIME filters into dialog filters.
const KNOWN_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "heic", "svg", "pdf", "txt", "csv",
    "json", "xml", "html", "zip", "mp3", "wav", "mp4", "webm",
];

/// Picks files with the OS dialog and hands out cached copies.
#[derive(Debug, Clone)]
pub struct DialogPickers {
    picked_dir: PathBuf,
}

impl DialogPickers {
    pub fn new(picked_dir: impl Into<PathBuf>) -> Self {
        Self {
            picked_dir: picked_dir.into(),
        }
    }

    /// Show the image dialog. `Ok(None)` when the user cancels.
    pub async fn pick_image(&self, options: &ImageOptions) -> Result<Option<Asset>, PlatformError> {
        let handle = AsyncFileDialog::new()
            .set_title("Choose an image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
            .await;
        let Some(handle) = handle else {
            debug!("image dialog cancelled");
            return Ok(None);
        };

        let source = handle.path().to_path_buf();
        info!(path = %source.display(), "image selected");
        let quality = options.quality;
        let dest_dir = self.picked_dir.clone();
        let asset = tokio::task::spawn_blocking(move || prepare_image(&source, quality, &dest_dir))
            .await
            .map_err(|e| PlatformError::ImageError(format!("image task failed: {e}")))??;
        Ok(Some(asset))
    }

    /// Show the document dialog. `Ok(None)` when the user cancels.
    pub async fn pick_document(
        &self,
        options: &DocumentOptions,
    ) -> Result<Option<Asset>, PlatformError> {
        let mut dialog = AsyncFileDialog::new().set_title("Choose a file");
        let extensions = extensions_for_mime_types(&options.mime_types);
        if !extensions.is_empty() {
            dialog = dialog.add_filter("Files", extensions.as_slice());
        }

        let Some(handle) = dialog.pick_file().await else {
            debug!("document dialog cancelled");
            return Ok(None);
        };

        let source = handle.path().to_path_buf();
        info!(path = %source.display(), "document selected");
        let asset = if options.copy_to_cache {
            copy_into(&source, &self.picked_dir)?
        } else {
            describe_file(&source, &source)?
        };
        Ok(Some(asset))
    }
}

/// Dialog extensions for a list of MIME patterns. Empty means "no filter".
pub fn extensions_for_mime_types(mime_types: &[String]) -> Vec<&'static str> {
    if mime_types.is_empty() || mime_types.iter().any(|m| m == "*/*" || m == "*") {
        return Vec::new();
    }
    KNOWN_EXTENSIONS
        .iter()
        .copied()
        .filter(|ext| {
            let mime = mime_from_extension(Path::new(&format!("f.{ext}")));
            mime_types.iter().any(|pattern| mime_matches(pattern, mime))
        })
        .collect()
}

fn mime_matches(pattern: &str, mime: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(prefix) => mime
            .split_once('/')
            .is_some_and(|(major, _)| major.eq_ignore_ascii_case(prefix)),
        None => pattern.eq_ignore_ascii_case(mime),
    }
}

/// Copy `source` into `dir` under a collision-free name.
pub fn copy_into(source: &Path, dir: &Path) -> Result<Asset, PlatformError> {
    fs::create_dir_all(dir).map_err(|e| {
        PlatformError::PathError(format!("failed to create {}: {e}", dir.display()))
    })?;
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PlatformError::PickerError(format!("{} is not a file", source.display())))?;
    let dest = dir.join(format!("{}-{name}", uuid::Uuid::new_v4()));
    fs::copy(source, &dest)?;
    describe_file(source, &dest)
}

/// Describe `stored` as an asset, keeping `original`'s file name.
fn describe_file(original: &Path, stored: &Path) -> Result<Asset, PlatformError> {
    let size = fs::metadata(stored)?.len();
    Ok(Asset {
        uri: file_uri(stored),
        name: original
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
        mime_type: Some(mime_from_extension(stored).to_string()),
        size: Some(size),
        width: None,
        height: None,
    })
}
