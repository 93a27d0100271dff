//! Procedural texture presets
//!
//! The viewer ships without image assets. Each of the three selectable
//! textures is generated on the CPU as a square RGBA8 image and uploaded once,
//! together with its box-filtered mip chain.

use gasket_core::TextureId;

/// Edge length of every preset, in texels
pub const PRESET_SIZE: u32 = 64;

/// A CPU-side RGBA8 image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 texels, top row first
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Build an image by evaluating `texel(u, v)` at every texel center
    ///
    /// `u` and `v` run from 0 to 1 across the image; `v = 0` is the bottom row.
    pub fn from_fn(width: u32, height: u32, texel: impl Fn(f32, f32) -> [u8; 4]) -> Self {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for row in 0..height {
            let v = 1.0 - (row as f32 + 0.5) / height as f32;
            for col in 0..width {
                let u = (col as f32 + 0.5) / width as f32;
                rgba.extend_from_slice(&texel(u, v));
            }
        }
        Self { width, height, rgba }
    }

    /// Texel at column `x`, row `y` (top row is 0)
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }

    /// Number of levels in a full mip chain down to 1x1
    pub fn mip_level_count(&self) -> u32 {
        32 - self.width.max(self.height).max(1).leading_zeros()
    }

    /// Half-size image, each texel the average of a 2x2 block
    ///
    /// Odd edges repeat their last row or column.
    pub fn downsample(&self) -> TextureImage {
        let width = (self.width / 2).max(1);
        let height = (self.height / 2).max(1);
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let y0 = (y * 2).min(self.height - 1);
            let y1 = (y * 2 + 1).min(self.height - 1);
            for x in 0..width {
                let x0 = (x * 2).min(self.width - 1);
                let x1 = (x * 2 + 1).min(self.width - 1);
                let block = [
                    self.texel(x0, y0),
                    self.texel(x1, y0),
                    self.texel(x0, y1),
                    self.texel(x1, y1),
                ];
                for c in 0..4 {
                    let sum: u32 = block.iter().map(|t| t[c] as u32).sum();
                    rgba.push(((sum + 2) / 4) as u8);
                }
            }
        }
        TextureImage { width, height, rgba }
    }

    /// This image followed by every smaller mip level
    pub fn mip_chain(&self) -> Vec<TextureImage> {
        let mut levels = vec![self.clone()];
        while let Some(last) = levels.last() {
            if last.width == 1 && last.height == 1 {
                break;
            }
            let next = last.downsample();
            levels.push(next);
        }
        levels
    }
}

/// Square checkerboard with `cells` squares per side
pub fn checkerboard(size: u32, cells: u32, dark: [u8; 4], light: [u8; 4]) -> TextureImage {
    let cells = cells.max(1) as f32;
    TextureImage::from_fn(size, size, |u, v| {
        let cu = (u * cells) as u32;
        let cv = (v * cells) as u32;
        if (cu + cv) % 2 == 0 {
            dark
        } else {
            light
        }
    })
}

/// Diagonal stripes, `count` pairs across the image
pub fn stripes(size: u32, count: u32, a: [u8; 4], b: [u8; 4]) -> TextureImage {
    let count = count.max(1) as f32;
    TextureImage::from_fn(size, size, |u, v| {
        let band = ((u + v) * 0.5 * count * 2.0) as u32;
        if band % 2 == 0 {
            a
        } else {
            b
        }
    })
}

/// Concentric rings around the image center
pub fn rings(size: u32, count: u32, a: [u8; 4], b: [u8; 4]) -> TextureImage {
    let count = count.max(1) as f32;
    TextureImage::from_fn(size, size, |u, v| {
        let du = u - 0.5;
        let dv = v - 0.5;
        // Distance normalized so the corners sit at 1
        let r = (du * du + dv * dv).sqrt() / std::f32::consts::FRAC_1_SQRT_2;
        if ((r * count * 2.0) as u32) % 2 == 0 {
            a
        } else {
            b
        }
    })
}

/// The image behind each selectable texture
pub fn preset(texture: TextureId) -> TextureImage {
    match texture {
        TextureId::First => checkerboard(
            PRESET_SIZE,
            8,
            [40, 40, 40, 255],
            [235, 235, 235, 255],
        ),
        TextureId::Second => stripes(
            PRESET_SIZE,
            6,
            [250, 200, 60, 255],
            [60, 90, 200, 255],
        ),
        TextureId::Third => rings(
            PRESET_SIZE,
            5,
            [255, 255, 255, 255],
            [120, 200, 120, 255],
        ),
    }
}
