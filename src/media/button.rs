//! Solid-color backgrounds for buttons
//!
//! Buttons take per-state background images; a 1x1 image stretches to
//! any size, so a plain color becomes a background image.

use super::Image;
use image::{DynamicImage, Rgba, RgbaImage};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlState {
    Normal,
    Highlighted,
    Disabled,
    Selected,
    Focused,
}

/// 1x1 image filled with `color`.
pub fn image_with_color(color: Rgba<u8>) -> Image {
    Image::from_bitmap(DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, color)))
}

/// Background image per control state.
#[derive(Debug, Clone, Default)]
pub struct ButtonBackgrounds {
    images: HashMap<ControlState, Image>,
}

impl ButtonBackgrounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_background_color(&mut self, color: Rgba<u8>, state: ControlState) {
        self.images.insert(state, image_with_color(color));
    }

    /// Background for `state`, falling back to the normal-state image.
    pub fn background(&self, state: ControlState) -> Option<&Image> {
        self.images
            .get(&state)
            .or_else(|| self.images.get(&ControlState::Normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_with_color_is_one_pixel() {
        let image = image_with_color(Rgba([12, 34, 56, 255]));
        assert_eq!(image.pixel_size(), (1, 1));
        assert_eq!(
            image.bitmap().to_rgba8().get_pixel(0, 0),
            &Rgba([12, 34, 56, 255])
        );
    }

    #[test]
    fn test_background_falls_back_to_normal() {
        let mut backgrounds = ButtonBackgrounds::new();
        assert!(backgrounds.background(ControlState::Normal).is_none());

        backgrounds.set_background_color(Rgba([0, 0, 255, 255]), ControlState::Normal);
        backgrounds.set_background_color(Rgba([255, 0, 0, 255]), ControlState::Highlighted);

        let pixel = |state| {
            *backgrounds
                .background(state)
                .unwrap()
                .bitmap()
                .to_rgba8()
                .get_pixel(0, 0)
        };
        assert_eq!(pixel(ControlState::Highlighted), Rgba([255, 0, 0, 255]));
        assert_eq!(pixel(ControlState::Disabled), Rgba([0, 0, 255, 255]));
    }
}
