use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::info;

use crate::error::{Error, Result};

/// Encode RGBA8 as PNG into `output`.
///
/// The bytes go to a temporary file next to `output` which is renamed into
/// place once fully written, so a failed encode never leaves a partial file.
/// Missing parent directories are created.
pub fn write_rgba_png(output: &Path, img: &RgbaImage) -> Result<()> {
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp = tempfile::Builder::new()
        .prefix(".spritekey-")
        .suffix(".png")
        .tempfile_in(parent)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        PngEncoder::new(&mut writer)
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|source| Error::Encode {
                path: output.to_path_buf(),
                source,
            })?;
        writer.flush()?;
    }
    tmp.persist(output).map_err(|e| Error::Io(e.error))?;

    info!(
        "Saved {}x{} PNG: {:?}",
        img.width(),
        img.height(),
        output
    );
    Ok(())
}
