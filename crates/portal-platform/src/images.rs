//! Image preparation for picked and captured images.
//!
//! Images handed to the page are re-encoded as JPEG at the requested
//! quality and written into the cache. Quality 1.0 keeps the original
//! bytes untouched.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use tracing::debug;

use portal_bridge::Asset;
use portal_common::{mime_from_extension, PlatformError};

/// Build a `file://` URI for an absolute path.
pub fn file_uri(path: &Path) -> String {
    let display = path.to_string_lossy().replace('\\', "/");
    if display.starts_with('/') {
        format!("file://{display}")
    } else {
        format!("file:///{display}")
    }
}

/// Map a `0.0..=1.0` quality onto the JPEG encoder's `1..=100` scale.
pub fn jpeg_quality(quality: f64) -> u8 {
    if quality.is_nan() {
        return 80;
    }
    (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}

/// Decode `source`, re-encode it into `dest_dir`, and describe the result.
pub fn prepare_image(source: &Path, quality: f64, dest_dir: &Path) -> Result<Asset, PlatformError> {
    let img = image::open(source).map_err(|e| {
        PlatformError::ImageError(format!("failed to decode {}: {e}", source.display()))
    })?;
    let (width, height) = (img.width(), img.height());

    fs::create_dir_all(dest_dir).map_err(|e| {
        PlatformError::PathError(format!("failed to create {}: {e}", dest_dir.display()))
    })?;

    let dest = if quality >= 1.0 {
        let dest = unique_dest(dest_dir, source.extension().and_then(|e| e.to_str()));
        fs::copy(source, &dest)?;
        dest
    } else {
        let dest = unique_dest(dest_dir, Some("jpg"));
        let writer = BufWriter::new(File::create(&dest)?);
        let mut encoder = JpegEncoder::new_with_quality(writer, jpeg_quality(quality));
        encoder
            .encode_image(&img.to_rgb8())
            .map_err(|e| PlatformError::ImageError(format!("failed to encode JPEG: {e}")))?;
        dest
    };

    let size = fs::metadata(&dest)?.len();
    debug!(path = %dest.display(), width, height, size, "image prepared");

    Ok(Asset {
        uri: file_uri(&dest),
        name: source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
        mime_type: Some(mime_from_extension(&dest).to_string()),
        size: Some(size),
        width: Some(width),
        height: Some(height),
    })
}

fn unique_dest(dir: &Path, extension: Option<&str>) -> PathBuf {
    let stem = uuid::Uuid::new_v4().to_string();
    match extension {
        Some(ext) if !ext.is_empty() => dir.join(format!("{stem}.{ext}")),
        _ => dir.join(stem),
    }
}
