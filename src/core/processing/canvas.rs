use image::RgbaImage;
use tracing::{info, warn};

use crate::core::processing::crop::alpha_bounding_box;
use crate::error::{Error, Result};
use crate::types::ReferenceBoxSpec;

/// Straight-alpha source-over of one pixel onto another.
#[inline]
fn blend_over(dst: &mut [u8], src: &[u8]) {
    let sa = src[3] as u32;
    match sa {
        0 => {}
        255 => dst.copy_from_slice(src),
        _ => {
            let da = dst[3] as u32;
            // out_a = sa + da * (1 - sa), all scaled by 255
            let dw = da * (255 - sa);
            let out_a255 = sa * 255 + dw;
            for c in 0..3 {
                let num = src[c] as u32 * sa * 255 + dst[c] as u32 * dw;
                dst[c] = ((num + out_a255 / 2) / out_a255) as u8;
            }
            dst[3] = ((out_a255 + 127) / 255) as u8;
        }
    }
}

/// Paste `fg` at (`left`, `top`) using its own alpha as the mask. Pixels
/// falling outside the canvas are clipped.
pub fn paste_with_alpha(canvas: &mut RgbaImage, fg: &RgbaImage, left: u32, top: u32) {
    let (canvas_cols, canvas_rows) = canvas.dimensions();
    if left >= canvas_cols || top >= canvas_rows {
        return;
    }
    let cols = fg.width().min(canvas_cols - left) as usize;
    let rows = fg.height().min(canvas_rows - top) as usize;

    let src_stride = fg.width() as usize * 4;
    let dst_stride = canvas_cols as usize * 4;
    let src = fg.as_raw();
    let dst: &mut [u8] = canvas;

    // Blend per row slice to avoid per-pixel coordinate math
    for row in 0..rows {
        let src_offset = row * src_stride;
        let dst_offset = (row + top as usize) * dst_stride + left as usize * 4;
        let src_row = &src[src_offset..src_offset + cols * 4];
        let dst_row = &mut dst[dst_offset..dst_offset + cols * 4];
        for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            blend_over(d, s);
        }
    }
}

/// Place an already-resized foreground on a fresh transparent canvas at the
/// reference box offset.
pub fn compose_on_canvas(fg: &RgbaImage, spec: &ReferenceBoxSpec) -> Result<RgbaImage> {
    let reference = spec.reference;
    if fg.dimensions() != (reference.width(), reference.height()) {
        return Err(Error::Processing(format!(
            "foreground {}x{} does not match reference box {}",
            fg.width(),
            fg.height(),
            reference
        )));
    }
    if !reference.fits_within(spec.canvas_width, spec.canvas_height) {
        return Err(Error::invalid("reference_box", reference));
    }

    let mut canvas = RgbaImage::new(spec.canvas_width, spec.canvas_height);
    paste_with_alpha(&mut canvas, fg, reference.left, reference.top);

    info!(
        "Composited {}x{} foreground at {} on {}x{} canvas",
        fg.width(),
        fg.height(),
        reference,
        spec.canvas_width,
        spec.canvas_height
    );

    match alpha_bounding_box(&canvas)? {
        Some(actual) if actual == reference => {}
        actual => warn!(
            "Canvas content box {:?} differs from reference {} (faint resized edges)",
            actual, reference
        ),
    }

    Ok(canvas)
}
