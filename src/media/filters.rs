//! Desaturation filters

use super::{Image, ensure_pixels};
use crate::core::error::Result;
use image::{DynamicImage, GrayImage, Luma, Pixel, Rgba};

const SATURATION: f32 = 0.0;
const BRIGHTNESS: f32 = 0.0;
const CONTRAST: f32 = 1.1;
const EXPOSURE_EV: f32 = 0.7;

/// Rec. 709 luma weights used for desaturation.
const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Single-channel copy at the stored pixel dimensions, with no alpha.
///
/// Transparent areas come out black, as if drawn over an empty canvas.
///
/// # Errors
///
/// [`Error::Render`](crate::Error::Render) for an image without pixels.
pub fn grayscale(image: &Image) -> Result<Image> {
    ensure_pixels(image.bitmap())?;
    let rgba = image.bitmap().to_rgba8();

    let gray = GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let pixel = rgba.get_pixel(x, y);
        let Luma([luma]) = pixel.to_luma();
        let alpha = u16::from(pixel[3]);
        Luma([(u16::from(luma) * alpha / 255) as u8])
    });

    Ok(Image::new(DynamicImage::ImageLuma8(gray), image.scale()))
}

/// Saturation, brightness and contrast adjustment on linear-ish [0, 1]
/// channels. Values may leave the unit range; callers clamp at the end.
fn color_controls(rgb: [f32; 3]) -> [f32; 3] {
    let luma = rgb
        .iter()
        .zip(LUMA_WEIGHTS)
        .map(|(channel, weight)| channel * weight)
        .sum::<f32>();

    rgb.map(|channel| {
        let saturated = luma + (channel - luma) * SATURATION;
        let brightened = saturated + BRIGHTNESS;
        (brightened - 0.5) * CONTRAST + 0.5
    })
}

/// High-contrast black and white: zero saturation and brightness with
/// contrast 1.1, then +0.7 EV exposure. Keeps alpha and orientation.
pub fn black_and_white(image: &Image) -> Result<Image> {
    ensure_pixels(image.bitmap())?;
    let gain = EXPOSURE_EV.exp2();
    let mut rgba = image.bitmap().to_rgba8();

    for pixel in rgba.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let adjusted = color_controls([r, g, b].map(|v| f32::from(v) / 255.0));
        let [r, g, b] = adjusted.map(|v| ((v * gain).clamp(0.0, 1.0) * 255.0).round() as u8);
        *pixel = Rgba([r, g, b, a]);
    }

    Ok(Image::from_bitmap(DynamicImage::ImageRgba8(rgba)).with_orientation(image.orientation()))
}
