// Reads a photo from disk into an RGBA buffer and writes the finished image back out.
// Visual expectation: after `load_image()` the window shows the photo exactly as
// decoded; after `export_png()` a `<name>_mosa.png` sits next to it (or in --output-dir).

use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader, RgbaImage};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::PixelBuffer;

/// Largest file we try to decode (50 MiB).
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Suffix added to the exported file's stem.
pub const EXPORT_SUFFIX: &str = "_mosa";

const ACCEPTED: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP];

/// A decoded photo plus the name used later for the export.
pub struct LoadedImage {
    pub buffer: PixelBuffer,
    pub stem: String,
    pub format: ImageFormat,
}

/// Open `path`, check size and format, decode to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    // 1) Size gate before reading any pixels.
    let size = std::fs::metadata(path)?.len();
    if size > MAX_FILE_BYTES {
        warn!(?path, size, "loader: file over size limit");
        return Err(Error::FileTooLarge { path: path.to_path_buf(), size, limit: MAX_FILE_BYTES });
    }

    // 2) Sniff the real format from the bytes (extensions lie).
    let reader = ImageReader::open(path)?
        .with_guessed_format()
        .map_err(|e| Error::ImageDecode(format!("Read header: {e}")))?;
    let format = match reader.format() {
        Some(f) if ACCEPTED.contains(&f) => f,
        Some(f) => return Err(Error::UnsupportedFormat(format!("{f:?}"))),
        None => return Err(Error::UnsupportedFormat("unknown".into())),
    };

    // 3) Decode and normalise to 4 channels.
    let rgba = reader
        .decode()
        .map_err(|e| Error::ImageDecode(format!("Decode {}: {e}", path.display())))?
        .to_rgba8();
    let (w, h) = rgba.dimensions();
    let buffer = PixelBuffer::from_raw(w as usize, h as usize, rgba.into_raw())?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    info!(?path, ?format, width = w, height = h, bytes = size, "loader: image decoded");
    Ok(LoadedImage { buffer, stem, format })
}

/// File name the export uses for a given stem.
pub fn export_file_name(stem: &str) -> String {
    format!("{stem}{EXPORT_SUFFIX}.png")
}

/// Write `buffer` as `<dir>/<stem>_mosa.png` and return the path.
pub fn export_png(buffer: &PixelBuffer, dir: &Path, stem: &str) -> Result<PathBuf> {
    let img = RgbaImage::from_raw(buffer.width() as u32, buffer.height() as u32, buffer.as_bytes().to_vec())
        .ok_or_else(|| Error::ImageEncode("buffer does not fit its dimensions".into()))?;

    let out = dir.join(export_file_name(stem));
    img.save_with_format(&out, ImageFormat::Png)
        .map_err(|e| Error::ImageEncode(format!("Write {}: {e}", out.display())))?;

    info!(path = ?out, "loader: image exported");
    Ok(out)
}
