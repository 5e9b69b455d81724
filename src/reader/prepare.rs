use image::{GrayImage, Luma};
use imageproc::{
    contrast::{equalize_histogram, otsu_level},
    filter::gaussian_blur_f32,
};

const BLUR_SIGMA: f32 = 1.5;

// Preparation
//------------------------------------------------------------------------------

/// Greyscale transforms tried in order until the detector finds a decodable grid.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Preparation {
    Raw,
    Equalized,
    Blurred,
    Otsu,
}

impl Preparation {
    pub const CASCADE: [Preparation; 4] = [Self::Raw, Self::Equalized, Self::Blurred, Self::Otsu];

    pub fn apply(self, img: &GrayImage) -> GrayImage {
        match self {
            Self::Raw => img.clone(),
            Self::Equalized => equalize_histogram(img),
            Self::Blurred => gaussian_blur_f32(img, BLUR_SIGMA),
            Self::Otsu => binarize(img, otsu_level(img)),
        }
    }
}

fn binarize(img: &GrayImage, thresh: u8) -> GrayImage {
    let mut out = img.clone();
    for p in out.pixels_mut() {
        *p = if p[0] > thresh { Luma([255]) } else { Luma([0]) };
    }
    out
}

#[cfg(test)]
mod prepare_tests {
    use image::{GrayImage, Luma};

    use super::{binarize, Preparation};

    fn gradient() -> GrayImage {
        GrayImage::from_fn(16, 16, |x, y| Luma([(x * 8 + y) as u8]))
    }

    #[test]
    fn test_binarize() {
        let img = gradient();
        let out = binarize(&img, 64);
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(15, 15)[0], 255);
    }

    #[test]
    fn test_cascade_keeps_dimensions() {
        let img = gradient();
        for prep in Preparation::CASCADE {
            assert_eq!(prep.apply(&img).dimensions(), img.dimensions(), "{prep:?}");
        }
    }

    #[test]
    fn test_raw_is_identity() {
        let img = gradient();
        assert_eq!(Preparation::Raw.apply(&img), img);
    }
}
