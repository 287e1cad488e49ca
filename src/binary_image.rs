
/// Represents an image with each pixel being either inside or outside the shape.
/// Coordinates outside of the canvas belong to neither class.
pub trait BinaryImage {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn is_inside(&self, x: u32, y: u32) -> bool;

    /// The class of a possibly off-canvas coordinate.
    /// Returns `None` for coordinates outside of the canvas,
    /// which never match either class.
    #[inline]
    fn class_at(&self, x: i64, y: i64) -> Option<bool> {
        if x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64 {
            Some(self.is_inside(x as u32, y as u32))
        }
        else {
            None
        }
    }
}

/// Decides from an alpha value whether a pixel is inside the shape.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ThresholdPolicy {
    /// Any pixel that is not fully transparent is inside.
    /// Suited for assets with hard, binary alpha.
    #[default]
    NonZero,

    /// A pixel is inside if its alpha is at least half of the maximum alpha.
    /// Suited for anti-aliased assets.
    AtLeastHalf,
}

impl ThresholdPolicy {
    /// Classify an alpha value, where `max` is the largest value
    /// the source color model can represent.
    #[inline]
    pub fn is_inside(self, alpha: u16, max: u16) -> bool {
        match self {
            ThresholdPolicy::NonZero => alpha != 0,
            ThresholdPolicy::AtLeastHalf => 2 * alpha as u32 >= max as u32,
        }
    }
}


/// An owned, row-major grid with one byte per pixel,
/// each byte being `1` for inside-the-shape and `0` for outside.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BinaryGrid {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl BinaryGrid {

    /// Classify every pixel with the predicate.
    pub fn from_fn(width: u32, height: u32, is_inside: impl Fn(u32, u32) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);

        for y in 0..height {
            for x in 0..width {
                cells.push(is_inside(x, y) as u8);
            }
        }

        BinaryGrid { width, height, cells }
    }

    /// Classify a row-major alpha buffer with the threshold policy.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u16], max: u16, policy: ThresholdPolicy) -> Self {
        debug_assert_eq!(alpha.len(), width as usize * height as usize, "Buffer dimension mismatch");

        let cells = alpha.iter()
            .map(|&alpha| policy.is_inside(alpha, max) as u8)
            .collect();

        BinaryGrid { width, height, cells }
    }

    /// The raw cells, each being either `0` or `1`.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of pixels inside the shape.
    pub fn count_inside(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == 1).count()
    }
}

impl BinaryImage for BinaryGrid {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn is_inside(&self, x: u32, y: u32) -> bool {
        self.cells[self.width as usize * y as usize + x as usize] == 1
    }
}

/// Create binary grids from piston images.
#[cfg(feature = "piston_image")]
pub mod piston_image {
    use image::DynamicImage;
    use super::{ BinaryGrid, ThresholdPolicy };

    /// Classify the alpha channel of any decoded image.
    /// The image is widened to 16 bits per channel first,
    /// so the threshold always works on the range `0..=65535`,
    /// and images without alpha are entirely inside.
    pub fn of_alpha(image: &DynamicImage, policy: ThresholdPolicy) -> BinaryGrid {
        let rgba = image.to_rgba16();
        let alpha: Vec<u16> = rgba.pixels().map(|pixel| pixel.0[3]).collect();
        BinaryGrid::from_alpha(rgba.width(), rgba.height(), &alpha, u16::MAX, policy)
    }
}
