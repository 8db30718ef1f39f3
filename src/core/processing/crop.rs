use image::{RgbaImage, imageops};
use ndarray::Axis;
use tracing::debug;

use crate::core::processing::matte::pixel_view;
use crate::error::{Error, Result};
use crate::types::BoundingBox;

/// Minimal rectangle enclosing every pixel with non-zero alpha, or `None`
/// when the image is entirely transparent.
pub fn alpha_bounding_box(img: &RgbaImage) -> Result<Option<BoundingBox>> {
    let pixels = pixel_view(img)?;
    let alpha = pixels.index_axis(Axis(2), 3);

    let occupied_rows: Vec<bool> = alpha
        .axis_iter(Axis(0))
        .map(|row| row.iter().any(|&a| a != 0))
        .collect();
    let occupied_cols: Vec<bool> = alpha
        .axis_iter(Axis(1))
        .map(|col| col.iter().any(|&a| a != 0))
        .collect();

    let span = |occupied: &[bool]| -> Option<(u32, u32)> {
        let first = occupied.iter().position(|&o| o)?;
        let last = occupied.iter().rposition(|&o| o)?;
        Some((first as u32, last as u32 + 1))
    };

    let (Some((top, bottom)), Some((left, right))) = (span(&occupied_rows), span(&occupied_cols))
    else {
        return Ok(None);
    };
    Ok(BoundingBox::new(left, top, right, bottom))
}

/// Pure sub-rectangle copy; no resampling or blending.
pub fn crop_to_box(img: &RgbaImage, bbox: &BoundingBox) -> RgbaImage {
    imageops::crop_imm(img, bbox.left, bbox.top, bbox.width(), bbox.height()).to_image()
}

/// Crop to the non-transparent content. Fails with `Error::EmptyImage` when
/// nothing is left after matting.
pub fn crop_to_content(img: &RgbaImage) -> Result<(RgbaImage, BoundingBox)> {
    let bbox = alpha_bounding_box(img)?.ok_or(Error::EmptyImage)?;
    debug!(
        "Content bounding box {} in {}x{} image",
        bbox,
        img.width(),
        img.height()
    );
    Ok((crop_to_box(img, &bbox), bbox))
}
