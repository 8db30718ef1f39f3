#![doc = r#"
SPRITEKEY: near-white background removal and canvas alignment for art assets.

This crate turns images shot or rendered on a light background into clean,
transparent PNG sprites: it keys near-white pixels to transparency, crops to
the remaining content, resizes with a Lanczos3 filter, and can place the
result on a fixed-size transparent canvas so that it exactly covers a
reference slot. It powers the `spritekey` CLI and can be embedded in your own
Rust applications.

Pipeline
--------
Loader → Matte → Alpha → Crop → Resize → (Canvas) → PNG writer. Every stage
consumes the previous stage's output; files are processed independently.

Quick start: process a file
---------------------------
```rust,no_run
use std::path::Path;
use spritekey::{process_file, MatteParams, PipelineParams, ResizePolicy};

fn main() -> spritekey::Result<()> {
    let params = PipelineParams {
        matte: MatteParams::conjunctive(30),
        resize: ResizePolicy::Fit { max_size: 400, allow_upscale: true },
        ..PipelineParams::default()
    };

    process_file(
        Path::new("raw/whiskey_crate.png"),
        Path::new("assets/whiskey_crate.png"),
        &params,
    )
}
```

Align to a reference slot
-------------------------
```rust
use image::{Rgba, RgbaImage};
use spritekey::{process_image, BoundingBox, PipelineParams, ReferenceBoxSpec};

fn main() -> spritekey::Result<()> {
    let mut img = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
    for y in 25..75 {
        for x in 25..75 {
            img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }

    let slot = BoundingBox::new(60, 9, 580, 632).expect("non-empty box");
    let params = PipelineParams {
        canvas: Some(ReferenceBoxSpec::new(slot)),
        ..PipelineParams::default()
    };

    let canvas = process_image(img, &params)?;
    assert_eq!(canvas.dimensions(), (640, 640));
    Ok(())
}
```

Batch manifests
---------------
```rust,no_run
use std::path::Path;
use spritekey::{io::load_manifest, process_manifest, BatchOptions, Preset};

fn main() -> spritekey::Result<()> {
    let manifest = load_manifest(Path::new("assets/jobs.json"))?;
    let report = process_manifest(&manifest, &Preset::Clean.params(), BatchOptions::default())?;
    println!("processed={} errors={}", report.processed, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `spritekey::Result<T>`; match on `spritekey::Error`
to handle specific cases.

```rust,no_run
use std::path::Path;
use spritekey::{process_file, Error, PipelineParams};

fn main() {
    match process_file(Path::new("in.png"), Path::new("out.png"), &PipelineParams::default()) {
        Ok(()) => {}
        Err(Error::EmptyImage) => eprintln!("nothing left after keying"),
        Err(Error::InputNotFound { path }) => eprintln!("missing: {}", path.display()),
        Err(other) => eprintln!("error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`]: high-level entry points.
- [`core`]: parameters, presets and the individual pipeline stages.
- [`types`]: enums and geometry types (`MatteStrategy`, `ResizePolicy`, `BoundingBox`).
- [`io`]: image loading, manifests and the PNG writer.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::params::{EdgeFeather, MatteParams, PipelineParams};
pub use core::presets::Preset;
pub use error::{Error, Result};
pub use types::{
    AlphaMode, BackgroundFill, BoundingBox, MatteStrategy, ReferenceBoxSpec, ResizePolicy,
};

// Stage helpers
pub use core::processing::crop::alpha_bounding_box;

// High-level API re-exports
pub use api::{
    BatchOptions, BatchReport, JobFailure, process_file, process_image, process_manifest,
};
