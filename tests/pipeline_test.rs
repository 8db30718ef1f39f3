use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use spritekey::io::{ManifestJob, load_manifest};
use spritekey::{
    AlphaMode, BatchOptions, BoundingBox, Error, MatteParams, PipelineParams, Preset,
    ReferenceBoxSpec, ResizePolicy, alpha_bounding_box, process_file, process_image,
    process_manifest,
};

fn square_on_white() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
    for y in 25..75 {
        for x in 25..75 {
            img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    img
}

fn save(img: &RgbaImage, path: &Path) {
    img.save(path).unwrap();
}

fn load(path: &Path) -> RgbaImage {
    image::open(path).unwrap().to_rgba8()
}

#[test]
fn conjunctive_keying_property() {
    let tolerance = 30u8;
    let mut img = RgbaImage::new(16, 16);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let v = (x * 16 + y) as u8;
        *px = Rgba([255 - (v % 60), 255 - (v % 45), 200 + (v % 56), 128 + (v % 128)]);
    }
    let params = PipelineParams {
        matte: MatteParams::conjunctive(tolerance),
        crop: false,
        ..PipelineParams::default()
    };
    let out = process_image(img.clone(), &params).unwrap();

    let floor = 255 - tolerance;
    for (src, dst) in img.pixels().zip(out.pixels()) {
        if src[0] >= floor && src[1] >= floor && src[2] >= floor {
            assert_eq!(dst[3], 0);
        } else {
            assert_eq!(src, dst);
        }
    }
}

#[test]
fn opaque_mode_forces_foreground_alpha() {
    let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
    img.put_pixel(1, 1, Rgba([40, 50, 60, 90]));
    let params = PipelineParams {
        alpha: AlphaMode::Opaque,
        ..PipelineParams::default()
    };
    let out = process_image(img, &params).unwrap();
    assert_eq!(out.dimensions(), (1, 1));
    assert_eq!(out.get_pixel(0, 0), &Rgba([40, 50, 60, 255]));
}

#[test]
fn square_scenario_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("square.png");
    save(&square_on_white(), &input);

    let cropped = dir.path().join("cropped.png");
    process_file(&input, &cropped, &PipelineParams::default()).unwrap();
    assert_eq!(load(&cropped).dimensions(), (50, 50));

    let fitted = dir.path().join("fitted.png");
    let fit = PipelineParams {
        resize: ResizePolicy::Fit {
            max_size: 400,
            allow_upscale: true,
        },
        ..PipelineParams::default()
    };
    process_file(&input, &fitted, &fit).unwrap();
    assert_eq!(load(&fitted).dimensions(), (400, 400));

    let aligned = dir.path().join("aligned.png");
    let reference = BoundingBox::new(60, 9, 580, 632).unwrap();
    let canvas = PipelineParams {
        canvas: Some(ReferenceBoxSpec::new(reference)),
        ..PipelineParams::default()
    };
    process_file(&input, &aligned, &canvas).unwrap();
    let out = load(&aligned);
    assert_eq!(out.dimensions(), (640, 640));
    assert_eq!(alpha_bounding_box(&out).unwrap(), Some(reference));
    assert_eq!(out.get_pixel(60, 9)[3], 255);
    assert_eq!(out.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
}

#[test]
fn aligned_output_matches_reference_for_irregular_shapes() {
    // A diagonal stroke: every row and column of the crop holds content
    let mut img = RgbaImage::from_pixel(80, 60, Rgba([250, 250, 250, 255]));
    for i in 0..40u32 {
        for t in 0..4u32 {
            img.put_pixel(10 + i, 10 + i / 2 + t, Rgba([120, 30, 10, 255]));
        }
    }
    let reference = BoundingBox::new(88, 34, 552, 596).unwrap();
    let out = process_image(img, &Preset::Lamp.params()).unwrap();
    let bbox = alpha_bounding_box(&out).unwrap().unwrap();

    // Lanczos fringes may fade at most a pixel of the outermost edge
    assert!(bbox.left.abs_diff(reference.left) <= 1);
    assert!(bbox.top.abs_diff(reference.top) <= 1);
    assert!(bbox.right.abs_diff(reference.right) <= 1);
    assert!(bbox.bottom.abs_diff(reference.bottom) <= 1);
    assert!(bbox.fits_within(640, 640));
}

/// Dark ellipse with a mid-gray rim and a light anti-aliased halo that keys away.
fn soft_ellipse() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(100, 80, Rgba([255, 255, 255, 255]));
    for (x, y, px) in img.enumerate_pixels_mut() {
        let dx = (x as f64 + 0.5 - 50.0) / 30.0;
        let dy = (y as f64 + 0.5 - 40.0) / 18.0;
        let d = dx * dx + dy * dy;
        if d < 0.64 {
            *px = Rgba([20, 20, 20, 255]);
        } else if d < 1.0 {
            *px = Rgba([180, 180, 180, 255]);
        } else if d < 1.2 {
            *px = Rgba([235, 235, 235, 255]);
        }
    }
    img
}

#[test]
fn rerun_does_not_shrink_content() {
    let params = PipelineParams {
        resize: ResizePolicy::Fit {
            max_size: 120,
            allow_upscale: true,
        },
        ..PipelineParams::default()
    };
    let first = process_image(soft_ellipse(), &params).unwrap();
    assert_eq!(first.width(), 120);
    // Upscaling leaves partially transparent fringes for the second matte to see
    assert!(first.pixels().any(|p| p[3] > 0 && p[3] < 255));

    let second = process_image(first.clone(), &PipelineParams::default()).unwrap();
    let (w1, h1) = first.dimensions();
    let (w2, h2) = second.dimensions();
    assert!(w2 <= w1 && h2 <= h1);
    assert!(w1 - w2 <= 2, "{}x{} vs {}x{}", w1, h1, w2, h2);
    assert!(h1 - h2 <= 2, "{}x{} vs {}x{}", w1, h1, w2, h2);
}

#[test]
fn soft_preset_feathers_light_edges() {
    let mut img = RgbaImage::from_pixel(3, 1, Rgba([255, 255, 255, 255]));
    img.put_pixel(0, 0, Rgba([230, 230, 231, 255]));
    img.put_pixel(1, 0, Rgba([90, 40, 10, 255]));
    let out = process_image(img, &Preset::Soft.params()).unwrap();
    assert_eq!(out.get_pixel(0, 0), &Rgba([230, 230, 231, 133]));
    assert_eq!(out.get_pixel(1, 0), &Rgba([90, 40, 10, 255]));
    assert_eq!(out.get_pixel(2, 0)[3], 0);
}

#[test]
fn all_white_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("white.png");
    let output = dir.path().join("out.png");
    save(
        &RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255])),
        &input,
    );

    let result = process_file(&input, &output, &PipelineParams::default());
    assert!(matches!(result, Err(Error::EmptyImage)));
    assert!(!output.exists());
}

#[test]
fn corrupt_input_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.png");
    fs::write(&input, b"\x89PNG\r\n\x1a\nnot really").unwrap();

    let result = process_file(&input, &dir.path().join("out.png"), &PipelineParams::default());
    assert!(matches!(result, Err(Error::Decode { .. })));
}

#[test]
fn clean_v2_keys_light_gray_but_keeps_its_rgb() {
    let mut img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
    // Saturated yellow: blue is dark, red and green are near white
    img.put_pixel(3, 3, Rgba([250, 245, 40, 255]));
    img.put_pixel(6, 6, Rgba([235, 235, 235, 255]));

    let cropped = process_image(img.clone(), &Preset::CleanV2.params()).unwrap();
    assert_eq!(cropped.dimensions(), (1, 1));
    assert_eq!(cropped.get_pixel(0, 0), &Rgba([250, 245, 40, 255]));

    let keyed = PipelineParams {
        crop: false,
        ..Preset::CleanV2.params()
    };
    let out = process_image(img.clone(), &keyed).unwrap();
    assert_eq!(out.get_pixel(6, 6), &Rgba([235, 235, 235, 0]));

    let whitened = process_image(img, &Preset::Cutout.params()).unwrap();
    assert_eq!(whitened.get_pixel(6, 6), &Rgba([255, 255, 255, 0]));
    assert_eq!(whitened.get_pixel(3, 3), &Rgba([250, 245, 40, 255]));
}

#[test]
fn manifest_batch_continues_past_failures() {
    let dir = tempfile::tempdir().unwrap();
    save(&square_on_white(), &dir.path().join("a.png"));
    save(
        &RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255])),
        &dir.path().join("blank.png"),
    );
    fs::write(
        dir.path().join("jobs.json"),
        r#"{
            "defaults": { "resize": { "mode": "fit", "max_size": 25, "allow_upscale": false } },
            "jobs": [
                { "input": "a.png", "output": "out/a.png" },
                { "input": "missing.png", "output": "out/missing.png" },
                { "input": "blank.png", "output": "out/blank.png" },
                { "input": "a.png", "output": "out/a_ledger.png", "preset": "ledger" }
            ]
        }"#,
    )
    .unwrap();

    let manifest = load_manifest(&dir.path().join("jobs.json")).unwrap();
    for parallel in [false, true] {
        let report = process_manifest(
            &manifest,
            &PipelineParams::default(),
            BatchOptions {
                continue_on_error: true,
                parallel,
            },
        )
        .unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.errors, 2);
        assert_eq!(report.failures[0].input, dir.path().join("missing.png"));
        assert_eq!(report.failures[1].input, dir.path().join("blank.png"));
    }

    assert_eq!(load(&dir.path().join("out/a.png")).dimensions(), (25, 25));
    assert_eq!(
        load(&dir.path().join("out/a_ledger.png")).dimensions(),
        (640, 640)
    );
    assert!(!dir.path().join("out/missing.png").exists());
    assert!(!dir.path().join("out/blank.png").exists());
}

#[test]
fn manifest_job_builder_round_trips_through_json() {
    let job = ManifestJob {
        preset: Some(Preset::Cover),
        ..ManifestJob::new("in.png", "out.png")
    };
    let json = serde_json::to_string(&vec![job.clone()]).unwrap();
    let manifest = spritekey::io::Manifest::from_json(&json).unwrap();
    assert_eq!(manifest.jobs, vec![job]);
}
