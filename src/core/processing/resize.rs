use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbaImage;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::ResizePolicy;

/// Target dimensions for `policy`, or `None` when the image should be left as is.
pub fn calculate_resize_dimensions(
    original_cols: u32,
    original_rows: u32,
    policy: ResizePolicy,
) -> Option<(u32, u32)> {
    let target = match policy {
        ResizePolicy::None => return None,
        ResizePolicy::Exact { width, height } => (width, height),
        ResizePolicy::Fit {
            max_size,
            allow_upscale,
        } => {
            if !allow_upscale && original_cols <= max_size && original_rows <= max_size {
                debug!(
                    "Image {}x{} already fits within {}; skipping resize",
                    original_cols, original_rows, max_size
                );
                return None;
            }
            let scale_factor = (max_size as f64 / original_cols as f64)
                .min(max_size as f64 / original_rows as f64);
            let new_cols = ((original_cols as f64 * scale_factor).round() as u32).max(1);
            let new_rows = ((original_rows as f64 * scale_factor).round() as u32).max(1);
            (new_cols, new_rows)
        }
    };

    // Already at requested size
    if target == (original_cols, original_rows) {
        return None;
    }
    Some(target)
}

/// Lanczos3 resample of an RGBA8 image. Color is premultiplied by alpha during
/// convolution so keyed pixels do not bleed into edges.
pub fn resize_rgba_image(img: &RgbaImage, target_cols: u32, target_rows: u32) -> Result<RgbaImage> {
    if target_cols == 0 || target_rows == 0 {
        return Err(Error::invalid(
            "size",
            format!("{}x{}", target_cols, target_rows),
        ));
    }

    let resize_options = ResizeOptions::new()
        .resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3))
        .use_alpha(true);
    let mut resizer = Resizer::new();

    let (original_cols, original_rows) = img.dimensions();
    let src_image = ImageRef::new(original_cols, original_rows, img.as_raw(), PixelType::U8x4)
        .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    RgbaImage::from_raw(target_cols, target_rows, dst_image.into_vec())
        .ok_or_else(|| Error::Resize("resized buffer has unexpected length".to_string()))
}

/// Apply `policy` to `img`, returning the original buffer untouched when no
/// scaling is needed.
pub fn resize_with_policy(img: RgbaImage, policy: ResizePolicy) -> Result<RgbaImage> {
    let (original_cols, original_rows) = img.dimensions();
    match calculate_resize_dimensions(original_cols, original_rows, policy) {
        Some((new_cols, new_rows)) => {
            info!(
                "Resizing ({}): {}x{} -> {}x{}",
                policy, original_cols, original_rows, new_cols, new_rows
            );
            resize_rgba_image(&img, new_cols, new_rows)
        }
        None => Ok(img),
    }
}
