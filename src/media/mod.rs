//! Image resizing and desaturation
//!
//! [`Image`] pairs a bitmap with a display scale (pixels per point) and an
//! orientation, so sizes are expressed in points like the UI measures them.
//! Every operation renders into a fresh canvas owned by the call.
//!
//! - [`filters`]: grayscale and black-and-white conversion
//! - [`button`]: solid-color images for button backgrounds

pub mod button;
pub mod filters;

pub use button::{ButtonBackgrounds, ControlState, image_with_color};
pub use filters::{black_and_white, grayscale};

use crate::core::error::{Error, Result};
use crate::dispatch::MainQueue;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

/// JPEG quality used by [`resize_async`] callers that don't choose one (0.5).
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Largest RGBA canvas a resize will allocate, matching the `image` crate's
/// default decoder allocation limit (512 MiB).
pub const MAX_CANVAS_BYTES: u64 = 512 * 1024 * 1024;

/// Size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// How the stored bitmap must be turned to display upright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Up,
    Down,
    /// Stored rotated 90° counterclockwise
    Left,
    /// Stored rotated 90° clockwise
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

impl Orientation {
    fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Left | Self::Right | Self::LeftMirrored | Self::RightMirrored
        )
    }
}

#[derive(Debug, Clone)]
pub struct Image {
    bitmap: DynamicImage,
    scale: f64,
    orientation: Orientation,
}

impl Image {
    /// Non-positive or non-finite scales fall back to 1.
    pub fn new(bitmap: DynamicImage, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            bitmap,
            scale,
            orientation: Orientation::Up,
        }
    }

    pub fn from_bitmap(bitmap: DynamicImage) -> Self {
        Self::new(bitmap, 1.0)
    }

    /// Decodes PNG or JPEG bytes at scale 1.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_bitmap(image::load_from_memory(bytes)?))
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn bitmap(&self) -> &DynamicImage {
        &self.bitmap
    }

    pub fn into_bitmap(self) -> DynamicImage {
        self.bitmap
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Stored bitmap dimensions, ignoring orientation.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.bitmap.width(), self.bitmap.height())
    }

    /// Upright size in points.
    pub fn size(&self) -> Size {
        let (mut w, mut h) = self.pixel_size();
        if self.orientation.swaps_axes() {
            std::mem::swap(&mut w, &mut h);
        }
        Size::new(f64::from(w) / self.scale, f64::from(h) / self.scale)
    }

    /// Bitmap turned upright.
    fn upright(&self) -> DynamicImage {
        match self.orientation {
            Orientation::Up => self.bitmap.clone(),
            Orientation::Down => self.bitmap.rotate180(),
            Orientation::Left => self.bitmap.rotate270(),
            Orientation::Right => self.bitmap.rotate90(),
            Orientation::UpMirrored => self.bitmap.fliph(),
            Orientation::DownMirrored => self.bitmap.flipv(),
            Orientation::LeftMirrored => self.bitmap.rotate270().fliph(),
            Orientation::RightMirrored => self.bitmap.rotate90().fliph(),
        }
    }
}

/// Pixel dimensions of a canvas covering `size` points at `scale`.
fn canvas_dimensions(size: Size, scale: f64) -> Result<(u32, u32)> {
    let width = (size.width * scale).round();
    let height = (size.height * scale).round();
    let max = f64::from(u32::MAX);

    if !(width.is_finite() && height.is_finite())
        || width < 1.0
        || height < 1.0
        || width > max
        || height > max
    {
        return Err(Error::Render(format!(
            "cannot create a {}x{} point canvas at scale {scale}",
            size.width, size.height
        )));
    }

    let (width, height) = (width as u32, height as u32);
    let bytes = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(4));
    if bytes.is_none_or(|bytes| bytes > MAX_CANVAS_BYTES) {
        return Err(Error::Render(format!(
            "{width}x{height} canvas exceeds the {MAX_CANVAS_BYTES} byte limit"
        )));
    }

    Ok((width, height))
}

/// Largest rect with the source's aspect ratio that fits the canvas,
/// centered: `(x, y, width, height)`.
fn aspect_fit(source: (u32, u32), canvas: (u32, u32)) -> (u32, u32, u32, u32) {
    let ratio = (f64::from(canvas.0) / f64::from(source.0))
        .min(f64::from(canvas.1) / f64::from(source.1));
    let width = ((f64::from(source.0) * ratio).round() as u32).clamp(1, canvas.0);
    let height = ((f64::from(source.1) * ratio).round() as u32).clamp(1, canvas.1);
    (
        (canvas.0 - width) / 2,
        (canvas.1 - height) / 2,
        width,
        height,
    )
}

fn ensure_pixels(bitmap: &DynamicImage) -> Result<()> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(Error::Render("image has no pixel data".to_string()));
    }
    Ok(())
}

/// Scales both dimensions by `factor`, keeping the aspect ratio, at the
/// image's own scale.
///
/// # Errors
///
/// [`Error::Render`] when the target canvas would be empty, unbounded
/// (zero, negative or non-finite `factor`) or larger than
/// [`MAX_CANVAS_BYTES`].
pub fn resize_by_percentage(image: &Image, factor: f64) -> Result<Image> {
    ensure_pixels(&image.bitmap)?;
    let size = image.size();
    let target = Size::new(size.width * factor, size.height * factor);
    let (width, height) = canvas_dimensions(target, image.scale)?;

    let upright = image.upright();
    let (x, y, fit_w, fit_h) = aspect_fit((upright.width(), upright.height()), (width, height));
    let fitted = upright.resize_exact(fit_w, fit_h, RESAMPLE_FILTER).to_rgba8();

    let mut canvas = RgbaImage::new(width, height);
    imageops::overlay(&mut canvas, &fitted, i64::from(x), i64::from(y));

    Ok(Image::new(DynamicImage::ImageRgba8(canvas), image.scale))
}

/// Stretches the image to exactly `width` x `height` points at the image's
/// own scale; the aspect ratio is not kept.
pub fn resize_to_exact_size(image: &Image, width: f64, height: f64) -> Result<Image> {
    ensure_pixels(&image.bitmap)?;
    let (px_w, px_h) = canvas_dimensions(Size::new(width, height), image.scale)?;
    let bitmap = image.upright().resize_exact(px_w, px_h, RESAMPLE_FILTER);
    Ok(Image::new(
        DynamicImage::ImageRgba8(bitmap.to_rgba8()),
        image.scale,
    ))
}

/// JPEG bytes for `bitmap`; alpha is dropped. `quality` is 1..=100.
pub fn encode_jpeg(bitmap: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let rgb = DynamicImage::ImageRgb8(bitmap.to_rgb8());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)))?;
    Ok(bytes)
}

/// Stretches to `size` pixels (scale 1) and JPEG-encodes the result.
pub fn resize_and_encode(image: &Image, size: Size, quality: u8) -> Result<(Image, Vec<u8>)> {
    ensure_pixels(&image.bitmap)?;
    let (width, height) = canvas_dimensions(size, 1.0)?;
    let bitmap = image.upright().resize_exact(width, height, RESAMPLE_FILTER);
    let bytes = encode_jpeg(&bitmap, quality)?;
    Ok((Image::from_bitmap(bitmap), bytes))
}

/// [`resize_and_encode`] on the blocking pool.
pub async fn resize_in_background(image: Image, size: Size, quality: u8) -> Result<(Image, Vec<u8>)> {
    tokio::task::spawn_blocking(move || resize_and_encode(&image, size, quality))
        .await
        .map_err(|e| Error::Render(format!("resize task failed: {e}")))?
}

/// Resizes and encodes off the main thread, then hands the result to
/// `completion` on the main queue.
///
/// `completion` runs exactly once, after encoding has finished. The returned
/// handle fails only if the main loop is gone before the result is posted.
pub fn resize_async<F>(
    image: Image,
    size: Size,
    quality: u8,
    main: &MainQueue,
    completion: F,
) -> tokio::task::JoinHandle<Result<()>>
where
    F: FnOnce(Result<(Image, Vec<u8>)>) + Send + 'static,
{
    let main = main.clone();
    tokio::spawn(async move {
        let result = resize_in_background(image, size, quality).await;
        main.post(move || completion(result))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::main_queue;
    use image::Rgba;
    use std::sync::{Arc, Mutex};

    fn solid(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    #[test]
    fn test_size_accounts_for_scale_and_orientation() {
        let image = Image::new(solid(40, 20, [0, 0, 0, 255]), 2.0);
        assert_eq!(image.size(), Size::new(20.0, 10.0));

        let turned = image.with_orientation(Orientation::Right);
        assert_eq!(turned.size(), Size::new(10.0, 20.0));
        assert_eq!(turned.pixel_size(), (40, 20));
    }

    #[test]
    fn test_invalid_scale_falls_back() {
        assert_eq!(Image::new(solid(1, 1, [0; 4]), 0.0).scale(), 1.0);
        assert_eq!(Image::new(solid(1, 1, [0; 4]), f64::NAN).scale(), 1.0);
    }

    #[test]
    fn test_aspect_fit() {
        assert_eq!(aspect_fit((100, 50), (50, 25)), (0, 0, 50, 25));
        assert_eq!(aspect_fit((100, 50), (50, 50)), (0, 12, 50, 25));
        assert_eq!(aspect_fit((10, 40), (40, 40)), (15, 0, 10, 40));
    }

    #[test]
    fn test_resize_by_percentage() {
        let image = Image::new(solid(200, 100, [255, 0, 0, 255]), 2.0);
        let half = resize_by_percentage(&image, 0.5).unwrap();
        assert_eq!(half.pixel_size(), (100, 50));
        assert_eq!(half.scale(), 2.0);
        assert_eq!(half.size(), Size::new(50.0, 25.0));
    }

    #[test]
    fn test_resize_by_percentage_applies_orientation() {
        let image = Image::from_bitmap(solid(40, 20, [0, 0, 255, 255]))
            .with_orientation(Orientation::Left);
        let resized = resize_by_percentage(&image, 1.0).unwrap();
        assert_eq!(resized.pixel_size(), (20, 40));
        assert_eq!(resized.orientation(), Orientation::Up);
    }

    #[test]
    fn test_resize_by_percentage_rejects_empty_canvas() {
        let image = Image::from_bitmap(solid(10, 10, [0; 4]));
        assert!(matches!(resize_by_percentage(&image, 0.0), Err(Error::Render(_))));
        assert!(matches!(resize_by_percentage(&image, -1.0), Err(Error::Render(_))));
        assert!(matches!(
            resize_by_percentage(&image, f64::INFINITY),
            Err(Error::Render(_))
        ));
    }

    #[test]
    fn test_oversized_canvas_is_render_failure() {
        let image = Image::from_bitmap(solid(100, 100, [0; 4]));
        assert!(matches!(
            resize_by_percentage(&image, 4.0e7),
            Err(Error::Render(_))
        ));
        assert!(matches!(
            resize_to_exact_size(&image, 1.0e9, 1.0e9),
            Err(Error::Render(_))
        ));
        assert!(matches!(
            resize_and_encode(&image, Size::new(100_000.0, 100_000.0), 50),
            Err(Error::Render(_))
        ));
        // one pixel row over the limit
        let width = 16_384.0;
        let height = (MAX_CANVAS_BYTES / 4 / 16_384 + 1) as f64;
        assert!(matches!(
            canvas_dimensions(Size::new(width, height), 1.0),
            Err(Error::Render(_))
        ));
        assert!(canvas_dimensions(Size::new(width, height - 1.0), 1.0).is_ok());
    }

    #[test]
    fn test_resize_to_exact_size_ignores_aspect() {
        let image = Image::new(solid(100, 100, [0, 255, 0, 255]), 3.0);
        let stretched = resize_to_exact_size(&image, 10.0, 40.0).unwrap();
        assert_eq!(stretched.pixel_size(), (30, 120));
        assert_eq!(stretched.size(), Size::new(10.0, 40.0));
        assert_eq!(
            stretched.bitmap().to_rgba8().get_pixel(5, 60),
            &Rgba([0, 255, 0, 255])
        );
    }

    #[test]
    fn test_empty_source_is_render_failure() {
        let image = Image::from_bitmap(DynamicImage::new_rgba8(0, 0));
        assert!(matches!(
            resize_to_exact_size(&image, 5.0, 5.0),
            Err(Error::Render(_))
        ));
    }

    #[test]
    fn test_resize_and_encode_produces_jpeg() {
        let image = Image::new(solid(64, 64, [10, 20, 30, 255]), 2.0);
        let (resized, bytes) =
            resize_and_encode(&image, Size::new(16.0, 8.0), DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(resized.pixel_size(), (16, 8));
        assert_eq!(resized.scale(), 1.0);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = Image::decode(&bytes).unwrap();
        assert_eq!(decoded.pixel_size(), (16, 8));
    }

    #[tokio::test]
    async fn test_resize_async_delivers_once_on_main_queue() {
        let (queue, mut main) = main_queue();
        let delivered = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&delivered);
        let image = Image::from_bitmap(solid(32, 32, [200, 100, 50, 255]));
        let handle = resize_async(image, Size::new(8.0, 8.0), 50, &queue, move |result| {
            let (resized, bytes) = result.unwrap();
            sink.lock().unwrap().push((resized.pixel_size(), bytes.len()));
        });

        handle.await.unwrap().unwrap();
        assert!(delivered.lock().unwrap().is_empty());

        assert_eq!(main.run_pending(), 1);
        let seen = delivered.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, (8, 8));
        assert!(seen[0].1 > 0);
    }

    #[tokio::test]
    async fn test_resize_async_reports_failure() {
        let (queue, mut main) = main_queue();
        let failed = Arc::new(Mutex::new(false));

        let flag = Arc::clone(&failed);
        let image = Image::from_bitmap(solid(4, 4, [0; 4]));
        resize_async(image, Size::new(0.0, 4.0), 50, &queue, move |result| {
            *flag.lock().unwrap() = matches!(result, Err(Error::Render(_)));
        })
        .await
        .unwrap()
        .unwrap();

        main.run_pending();
        assert!(*failed.lock().unwrap());
    }
}
