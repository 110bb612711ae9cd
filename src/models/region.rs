use image::GrayImage;

/// Axis-aligned rectangle in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region spanning inclusive corner coordinates
    pub fn from_bounds(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Self::new(
            min_x as u32,
            min_y as u32,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        )
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Area in pixels
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Copy this region out of `image`, clipped to the image bounds
    pub fn crop(&self, image: &GrayImage) -> GrayImage {
        let x = self.x.min(image.width());
        let y = self.y.min(image.height());
        let width = self.width.min(image.width() - x);
        let height = self.height.min(image.height() - y);
        image::imageops::crop_imm(image, x, y, width, height).to_image()
    }
}
