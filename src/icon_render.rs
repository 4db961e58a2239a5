// ============================================================================
// icon_render.rs — Pixel transforms and encoding for a single icon target
// ============================================================================
//
// Everything here is pure: a decoded source image goes in, encoded bytes come
// out. Writing to disk is the generator's job, so the check mode can render
// the exact same bytes without touching the file system.
// ============================================================================

use std::io::Cursor;

use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbImage, RgbaImage};

use crate::error::IconError;
use crate::icon_targets::{FitMode, IconFormat, IconTarget};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Size of the content after an aspect-preserving fit into `max_w` x `max_h`.
/// Images that already fit are left alone (no upscaling).
pub fn fit_dimensions(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let scale = f64::min(max_w as f64 / width as f64, max_h as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

/// Fit-then-pad: scale into the bounds and center on a transparent canvas,
/// optionally composited over a solid background.
pub fn fit_pad(source: &RgbaImage, width: u32, height: u32, background: Option<[u8; 3]>) -> RgbaImage {
    let (sw, sh) = fit_dimensions(source.width(), source.height(), width, height);
    let scaled = if (sw, sh) == source.dimensions() {
        source.clone()
    } else {
        imageops::resize(source, sw, sh, FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::new(width, height);
    let x = (width - sw) / 2;
    let y = (height - sh) / 2;
    imageops::replace(&mut canvas, &scaled, x as i64, y as i64);

    match background {
        Some([r, g, b]) => {
            let mut base = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
            imageops::overlay(&mut base, &canvas, 0, 0);
            base
        }
        None => canvas,
    }
}

/// Composites the image over opaque white and drops the alpha channel.
pub fn flatten_on_white(source: &DynamicImage) -> RgbImage {
    let rgba = source.to_rgba8();
    let mut base = RgbaImage::from_pixel(rgba.width(), rgba.height(), WHITE);
    imageops::overlay(&mut base, &rgba, 0, 0);
    DynamicImage::ImageRgba8(base).to_rgb8()
}

/// Non-proportional resize to exactly `width` x `height`, without alpha.
pub fn stretch_opaque(source: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let flat = flatten_on_white(source);
    if flat.dimensions() == (width, height) {
        return flat;
    }
    imageops::resize(&flat, width, height, FilterType::Lanczos3)
}

fn encode_png<P>(image: &image::ImageBuffer<P, Vec<P::Subpixel>>, what: &str) -> Result<Vec<u8>, IconError>
where
    P: image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
{
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| IconError::Encode { what: what.to_string(), reason: e.to_string() })?;
    Ok(buf.into_inner())
}

/// Bundles every size into one ICO. Each entry is fit-padded from the source
/// at its own size, so small entries are not shrunk copies of the largest.
pub fn encode_ico(source: &RgbaImage, sizes: &[u32], background: Option<[u8; 3]>) -> Result<Vec<u8>, IconError> {
    let encode_err = |e: std::io::Error| IconError::Encode { what: "ICO".to_string(), reason: e.to_string() };

    let mut dir = IconDir::new(ResourceType::Icon);
    for &size in sizes {
        let entry = fit_pad(source, size, size, background);
        let icon = IconImage::from_rgba_data(size, size, entry.into_raw());
        dir.add_entry(IconDirEntry::encode(&icon).map_err(encode_err)?);
    }

    let mut out = Vec::new();
    dir.write(&mut out).map_err(encode_err)?;
    Ok(out)
}

/// Renders one catalog entry to its encoded file contents.
pub fn render_target(source: &DynamicImage, target: &IconTarget) -> Result<Vec<u8>, IconError> {
    let what = target.path.display().to_string();
    match target.mode {
        FitMode::Stretch => {
            let image = stretch_opaque(source, target.width, target.height);
            encode_png(&image, &what)
        }
        FitMode::FitPad => {
            let rgba = source.to_rgba8();
            match &target.format {
                IconFormat::Png => {
                    let canvas = fit_pad(&rgba, target.width, target.height, target.background);
                    encode_png(&canvas, &what)
                }
                IconFormat::Ico { sizes } => encode_ico(&rgba, sizes, target.background),
            }
        }
    }
}
