//! Binary foreground/background masks.

use image::{GrayImage, Luma};

/// Pixel value that marks foreground in 8-bit mask images.
pub const FOREGROUND_VALUE: u8 = 255;

/// A binary mask with the pixel dimensions of its source image.
///
/// Stored row-major; `true` means the pixel belongs to the object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Silhouette {
    width: u32,
    height: u32,
    mask: Vec<bool>,
}

impl Silhouette {
    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut mask = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                mask.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            mask,
        }
    }

    /// A mask with every pixel set to `foreground`.
    pub fn filled(width: u32, height: u32, foreground: bool) -> Self {
        Self {
            width,
            height,
            mask: vec![foreground; width as usize * height as usize],
        }
    }

    /// Wrap a row-major mask; returns `None` if its length is not `width * height`.
    pub fn from_raw(width: u32, height: u32, mask: Vec<bool>) -> Option<Self> {
        (mask.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            mask,
        })
    }

    /// Interpret an already-thresholded grayscale image; 255 is foreground.
    pub fn from_gray(image: &GrayImage) -> Self {
        let mask = image.pixels().map(|p| p.0[0] == FOREGROUND_VALUE).collect();
        Self {
            width: image.width(),
            height: image.height(),
            mask,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether pixel `(x, y)` lies inside the mask bounds.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Foreground test for an in-bounds pixel; `None` outside the frame.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.mask[y as usize * self.width as usize + x as usize])
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.mask.iter().filter(|&&fg| fg).count()
    }

    /// Render as a 0/255 grayscale image.
    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let fg = self.mask[y as usize * self.width as usize + x as usize];
            Luma([if fg { FOREGROUND_VALUE } else { 0 }])
        })
    }
}
