//! PNG persistence of a finished [`Canvas`].
//!
//! Feature-gated behind `png` (default on). The image is encoded into a
//! temporary file next to the destination and renamed into place only after
//! encoding succeeds, so a failed write never leaves a truncated PNG behind.

use brushgen_core::error::BrushError;
use brushgen_core::Canvas;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `canvas` as a lossless 8-bit RGB PNG at `path`, replacing any
/// existing file.
///
/// Returns `BrushError::InvalidDimensions` if the canvas does not fit the
/// PNG size fields, or `BrushError::Io` if encoding or any filesystem step
/// fails.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), BrushError> {
    let w = u32::try_from(canvas.width()).map_err(|_| BrushError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| BrushError::InvalidDimensions)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".brushgen-").suffix(".png.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        PngEncoder::new(&mut writer)
            .write_image(canvas.as_raw(), w, h, ExtendedColorType::Rgb8)
            .map_err(|e| BrushError::Io(e.to_string()))?;
        writer.flush()?;
    }

    tmp.persist(path)
        .map_err(|e| BrushError::Io(format!("{}: {}", path.display(), e.error)))?;
    log::debug!("wrote {}x{} PNG to {}", w, h, path.display());
    Ok(())
}
