use image::RgbaImage;
use tracing::debug;

use crate::core::params::PipelineParams;
use crate::core::processing::alpha::apply_matte;
use crate::core::processing::canvas::compose_on_canvas;
use crate::core::processing::crop::crop_to_content;
use crate::core::processing::matte::generate_matte;
use crate::core::processing::resize::resize_with_policy;
use crate::error::{Error, Result};

/// Matte, key, crop, resize and (optionally) composite one decoded image.
///
/// Stages run strictly in order and each consumes the previous stage's output.
/// With `resize_first` the resize happens before matting instead of after the crop.
pub fn process_rgba_pipeline(img: RgbaImage, params: &PipelineParams) -> Result<RgbaImage> {
    params.validate()?;
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::Processing(format!(
            "image has zero size {}x{}",
            img.width(),
            img.height()
        )));
    }
    debug!(
        "Pipeline start: {}x{}, matte={}, tolerance={}, cutoff={}",
        img.width(),
        img.height(),
        params.matte.strategy,
        params.matte.tolerance,
        params.matte.cutoff
    );

    let mut img = if params.resize_first {
        resize_with_policy(img, params.resize)?
    } else {
        img
    };

    let matte = generate_matte(&img, &params.matte)?;
    apply_matte(
        &mut img,
        &matte,
        params.alpha,
        params.fill,
        params.feather.as_ref(),
    )?;
    drop(matte);

    if params.crop {
        let (cropped, _) = crop_to_content(&img)?;
        img = cropped;
    }

    if !params.resize_first {
        img = resize_with_policy(img, params.effective_resize())?;
    }

    if let Some(spec) = &params.canvas {
        img = compose_on_canvas(&img, spec)?;
    }

    debug!("Pipeline done: {}x{}", img.width(), img.height());
    Ok(img)
}
