use image::RgbaImage;
use ndarray::{Array2, ArrayView1, ArrayView3, Axis, Zip};
use tracing::debug;

use crate::core::params::MatteParams;
use crate::error::{Error, Result};
use crate::types::MatteStrategy;

/// Above this many pixels the matte is computed with rayon.
const PARALLEL_PIXEL_THRESHOLD: usize = 64 * 1024;

/// View an RGBA buffer as a (rows, cols, 4) array.
pub(crate) fn pixel_view(img: &RgbaImage) -> Result<ArrayView3<'_, u8>> {
    let (cols, rows) = img.dimensions();
    ArrayView3::from_shape((rows as usize, cols as usize, 4), img.as_raw().as_slice())
        .map_err(|e| Error::Processing(format!("pixel buffer shape: {}", e)))
}

#[derive(Clone, Copy)]
struct Classifier {
    strategy: MatteStrategy,
    floor: u8,
    cutoff: u8,
}

impl Classifier {
    fn new(params: &MatteParams) -> Self {
        Self {
            strategy: params.strategy,
            floor: 255 - params.tolerance,
            cutoff: params.cutoff,
        }
    }

    #[inline]
    fn is_background(&self, px: ArrayView1<'_, u8>) -> bool {
        let (r, g, b) = (px[0], px[1], px[2]);
        match self.strategy {
            MatteStrategy::Conjunctive => r >= self.floor && g >= self.floor && b >= self.floor,
            MatteStrategy::Disjunctive => {
                !(r < self.cutoff || g < self.cutoff || b < self.cutoff)
            }
        }
    }
}

/// Classify every pixel; `true` marks background. Shape is (rows, cols).
/// Source alpha does not take part in the classification.
pub fn generate_matte(img: &RgbaImage, params: &MatteParams) -> Result<Array2<bool>> {
    let pixels = pixel_view(img)?;
    let (rows, cols, _) = pixels.dim();
    let classifier = Classifier::new(params);
    let mut matte = Array2::<bool>::from_elem((rows, cols), false);

    let zip = Zip::from(&mut matte).and(pixels.lanes(Axis(2)));
    if rows * cols >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(|bg, px| *bg = classifier.is_background(px));
    } else {
        zip.for_each(|bg, px| *bg = classifier.is_background(px));
    }

    debug!(
        "Matte ({}): {} of {} pixels keyed as background",
        params.strategy,
        matte.iter().filter(|&&bg| bg).count(),
        rows * cols
    );
    Ok(matte)
}
