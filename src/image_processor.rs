use crate::error::{PaletteError, Result};
use image::GenericImageView;
use image::imageops::FilterType;
use rgb::RGBA8;

/// Longest side, in pixels, an image is scaled down to before sampling.
pub const DEFAULT_MAX_DIMENSION: u32 = 420;

/// A decoded RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<RGBA8>,
}

impl ImageData {
    /// Build from interleaved R,G,B,A bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(PaletteError::InvalidOption(format!(
                "expected {} RGBA bytes for {}x{}, got {}",
                expected,
                width,
                height,
                bytes.len()
            )));
        }

        let pixels = bytes
            .chunks_exact(4)
            .map(|p| RGBA8::new(p[0], p[1], p[2], p[3]))
            .collect();

        Ok(ImageData {
            width,
            height,
            pixels,
        })
    }
}

/// Target size keeping aspect ratio so the longest side is at most `max_dimension`.
/// Images already small enough are left alone; each side stays at least 1.
pub fn scaled_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest == 0 || longest <= max_dimension {
        return (width, height);
    }
    let scale = max_dimension as f64 / longest as f64;
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// Decode an image file and scale it down to fit `max_dimension`.
pub fn load_image(path: &std::path::Path, max_dimension: u32) -> Result<ImageData> {
    let img = image::open(path)?;
    let (orig_w, orig_h) = img.dimensions();
    let (w, h) = scaled_dimensions(orig_w, orig_h, max_dimension);
    let img = if (w, h) != (orig_w, orig_h) {
        log::debug!(
            "scaling {} from {}x{} to {}x{}",
            path.display(),
            orig_w,
            orig_h,
            w,
            h
        );
        img.resize_exact(w, h, FilterType::Triangle)
    } else {
        img
    };
    let rgba = img.to_rgba8();

    let pixels: Vec<RGBA8> = rgba
        .pixels()
        .map(|p| RGBA8::new(p[0], p[1], p[2], p[3]))
        .collect();

    Ok(ImageData {
        width: rgba.width(),
        height: rgba.height(),
        pixels,
    })
}
