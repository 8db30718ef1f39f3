use image::RgbaImage;
use ndarray::{Array2, ArrayViewMut3, Axis, Zip};
use tracing::debug;

use crate::core::params::EdgeFeather;
use crate::error::{Error, Result};
use crate::types::{AlphaMode, BackgroundFill};

fn feathered_alpha(r: u8, g: u8, b: u8, alpha: u8, feather: &EdgeFeather) -> u8 {
    if r <= feather.floor || g <= feather.floor || b <= feather.floor {
        return alpha;
    }
    // Three times (mean - floor) * slope, kept exact until the final truncation
    let sum = r as u32 + g as u32 + b as u32;
    let loss3 = (sum - 3 * feather.floor as u32) * feather.slope as u32;
    let ramp = 255u32.saturating_sub(loss3.div_ceil(3)) as u8;
    alpha.min(ramp)
}

/// Clear alpha on background pixels in place. Only the alpha channel changes,
/// except that `BackgroundFill::White` also whitens keyed pixels' RGB.
pub fn apply_matte(
    img: &mut RgbaImage,
    matte: &Array2<bool>,
    mode: AlphaMode,
    fill: BackgroundFill,
    feather: Option<&EdgeFeather>,
) -> Result<()> {
    let (cols, rows) = img.dimensions();
    if matte.dim() != (rows as usize, cols as usize) {
        return Err(Error::Processing(format!(
            "matte shape {:?} does not match image {}x{}",
            matte.dim(),
            cols,
            rows
        )));
    }

    let raw: &mut [u8] = img;
    let mut pixels = ArrayViewMut3::from_shape((rows as usize, cols as usize, 4), raw)
        .map_err(|e| Error::Processing(format!("pixel buffer shape: {}", e)))?;

    Zip::from(pixels.lanes_mut(Axis(2)))
        .and(matte)
        .for_each(|mut px, &background| {
            if background {
                if fill == BackgroundFill::White {
                    px[0] = 255;
                    px[1] = 255;
                    px[2] = 255;
                }
                px[3] = 0;
                return;
            }
            if mode == AlphaMode::Opaque {
                px[3] = 255;
            }
            if let Some(feather) = feather {
                px[3] = feathered_alpha(px[0], px[1], px[2], px[3], feather);
            }
        });

    debug!(
        "Applied matte: mode={:?}, fill={:?}, feather={}",
        mode,
        fill,
        feather.is_some()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn setup() -> (RgbaImage, Array2<bool>) {
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(0, 0, Rgba([250, 251, 252, 255]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 128]));
        img.put_pixel(2, 0, Rgba([200, 100, 50, 255]));
        let matte = Array2::from_shape_vec((1, 3), vec![true, false, false]).unwrap();
        (img, matte)
    }

    #[test]
    fn preserve_keeps_foreground_untouched() {
        let (mut img, matte) = setup();
        apply_matte(&mut img, &matte, AlphaMode::Preserve, BackgroundFill::White, None).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 255, 255, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([10, 20, 30, 128]));
        assert_eq!(img.get_pixel(2, 0), &Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn opaque_forces_full_alpha() {
        let (mut img, matte) = setup();
        apply_matte(&mut img, &matte, AlphaMode::Opaque, BackgroundFill::White, None).unwrap();
        assert_eq!(img.get_pixel(1, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn keep_fill_leaves_keyed_rgb() {
        let (mut img, matte) = setup();
        apply_matte(&mut img, &matte, AlphaMode::Preserve, BackgroundFill::Keep, None).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgba([250, 251, 252, 0]));
    }

    #[test]
    fn feather_ramps_light_fringe() {
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(0, 0, Rgba([230, 230, 230, 255]));
        img.put_pixel(1, 0, Rgba([210, 210, 210, 100]));
        img.put_pixel(2, 0, Rgba([250, 250, 150, 255]));
        let matte = Array2::from_elem((1, 3), false);
        let feather = EdgeFeather::default();
        apply_matte(
            &mut img,
            &matte,
            AlphaMode::Preserve,
            BackgroundFill::White,
            Some(&feather),
        )
        .unwrap();
        // 255 - (230 - 200) * 4
        assert_eq!(img.get_pixel(0, 0)[3], 135);
        // ramp 215 does not raise an already lower alpha
        assert_eq!(img.get_pixel(1, 0)[3], 100);
        // one dark channel disables feathering
        assert_eq!(img.get_pixel(2, 0)[3], 255);
    }

    #[test]
    fn feather_uses_exact_channel_mean() {
        // mean 230.33: 255 - 121.33 truncates to 133
        assert_eq!(
            feathered_alpha(230, 230, 231, 255, &EdgeFeather::default()),
            133
        );
        assert_eq!(
            feathered_alpha(201, 201, 202, 255, &EdgeFeather::default()),
            249
        );
    }

    #[test]
    fn feather_bottoms_out_at_zero() {
        assert_eq!(
            feathered_alpha(255, 255, 255, 255, &EdgeFeather::default()),
            35
        );
        let steep = EdgeFeather {
            floor: 200,
            slope: 10,
        };
        assert_eq!(feathered_alpha(255, 255, 255, 255, &steep), 0);
    }

    #[test]
    fn rejects_mismatched_matte() {
        let (mut img, _) = setup();
        let matte = Array2::from_elem((2, 2), false);
        assert!(
            apply_matte(&mut img, &matte, AlphaMode::Preserve, BackgroundFill::White, None)
                .is_err()
        );
    }
}
