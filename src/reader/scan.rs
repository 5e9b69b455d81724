use std::path::Path;

use image::{DynamicImage, GrayImage, ImageError};
use rqrr::PreparedImage;
use tracing::{debug, info};

use super::{prepare::Preparation, BarcodeFormat, MetadataKey, ScanResult};
use crate::common::{BinQRError, BinQRResult, ECLevel};

/// Opens the image at `path` and scans it for a QR symbol.
pub fn scan_file(path: impl AsRef<Path>) -> BinQRResult<ScanResult> {
    let path = path.as_ref();
    debug!("Opening {}...", path.display());
    let img = image::open(path).map_err(|e| match e {
        ImageError::IoError(source) => BinQRError::io(path, source),
        e => BinQRError::Image(e),
    })?;
    scan_image(&img)
}

/// Detects and decodes the first readable QR symbol in `img`.
///
/// The whole decoded data stream is reported as a single byte segment.
pub fn scan_image(img: &DynamicImage) -> BinQRResult<ScanResult> {
    let grey = img.to_luma8();
    let mut failure = BinQRError::DecodeFailure("No QR code found".into());

    for prep in Preparation::CASCADE {
        debug!("Scanning {}x{} image with {prep:?} preparation...", grey.width(), grey.height());
        match detect(&prep.apply(&grey)) {
            Ok(scan) => {
                info!("QR decoded with {prep:?} preparation");
                return Ok(scan);
            }
            Err(e) => {
                debug!("{prep:?} preparation failed: {e}");
                failure = e;
            }
        }
    }

    Err(failure)
}

fn detect(img: &GrayImage) -> BinQRResult<ScanResult> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let mut prepared =
        PreparedImage::prepare_from_greyscale(w, h, |x, y| img.get_pixel(x as u32, y as u32)[0]);

    let grids = prepared.detect_grids();
    if grids.is_empty() {
        return Err(BinQRError::DecodeFailure("No QR code found".into()));
    }

    let mut errors = Vec::with_capacity(grids.len());
    for grid in grids.iter() {
        let mut data = Vec::new();
        match grid.decode_to(&mut data) {
            Ok(meta) => {
                let mut scan = ScanResult::new(BarcodeFormat::QrCode)
                    .with_metadata(MetadataKey::Version, meta.version.0.to_string())
                    .with_metadata(MetadataKey::Mask, meta.mask.to_string())
                    .with_segment(data);
                if let Some(ecl) = ECLevel::from_format_bits(meta.ecc_level) {
                    scan = scan.with_metadata(MetadataKey::ErrorCorrectionLevel, ecl.to_string());
                }
                return Ok(scan);
            }
            Err(e) => errors.push(format!("{e:?}")),
        }
    }

    Err(BinQRError::DecodeFailure(errors.join(", ")))
}
