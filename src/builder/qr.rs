use image::{GrayImage, Luma};
use qrcode::{Color, QrCode};

use crate::common::ECLevel;

const QUIET_ZONE: u32 = 4;

/// Largest raster, in pixels, that [`QR::render_size`] accepts.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Color>,
    w: usize,
    ver: i16,
    ecl: ECLevel,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn from_code(code: &QrCode, ver: i16, ecl: ECLevel) -> Self {
        Self { grid: code.to_colors(), w: code.width(), ver, ecl }
    }

    pub fn version(&self) -> i16 {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m == Color::Dark).count()
    }

    pub fn get(&self, r: usize, c: usize) -> Color {
        debug_assert!(r < self.w && c < self.w, "Module {r} {c} out of bounds for width {}", self.w);
        self.grid[r * self.w + c]
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for r in 0..self.w {
            for c in 0..self.w {
                res.push(if self.get(r, c) == Color::Dark { 'd' } else { '.' });
            }
            res.push('\n');
        }
        res
    }
}

// Render
//------------------------------------------------------------------------------

impl QR {
    /// Side of the rendered image in pixels, or `None` when it overflows or the canvas would
    /// exceed [`MAX_CANVAS_PIXELS`].
    pub fn render_size(&self, module_sz: u32) -> Option<u32> {
        let modules = u32::try_from(self.w).ok()?.checked_add(2 * QUIET_ZONE)?;
        let total_sz = modules.checked_mul(module_sz)?;
        let pixels = u64::from(total_sz) * u64::from(total_sz);
        (pixels <= MAX_CANVAS_PIXELS).then_some(total_sz)
    }

    pub fn render(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE * module_sz;
        let qr_sz = self.w as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, Luma([255]));
                    continue;
                }
                let r = (i - qz_sz) / module_sz;
                let c = (j - qz_sz) / module_sz;

                let pixel = match self.get(r as usize, c as usize) {
                    Color::Dark => Luma([0]),
                    Color::Light => Luma([255]),
                };

                canvas.put_pixel(j, i, pixel);
            }
        }

        canvas
    }
}
