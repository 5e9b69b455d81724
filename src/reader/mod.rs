mod prepare;
mod scan;

pub use scan::{scan_file, scan_image};

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use tracing::{debug, warn};

use crate::common::{BinQRError, BinQRResult};

// Barcode format
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum BarcodeFormat {
    QrCode,
}

impl Display for BarcodeFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QrCode => f.write_str("QR_CODE"),
        }
    }
}

// Metadata key
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum MetadataKey {
    ErrorCorrectionLevel,
    Version,
    Mask,
}

impl Display for MetadataKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ErrorCorrectionLevel => "ERROR_CORRECTION_LEVEL",
            Self::Version => "VERSION",
            Self::Mask => "MASK",
        };
        f.write_str(s)
    }
}

// Scan result
//------------------------------------------------------------------------------

/// Raw output of the symbol detector, before any payload reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub format: BarcodeFormat,
    pub metadata: BTreeMap<MetadataKey, String>,
    pub byte_segments: Vec<Vec<u8>>,
}

impl ScanResult {
    pub fn new(format: BarcodeFormat) -> Self {
        Self { format, metadata: BTreeMap::new(), byte_segments: Vec::new() }
    }

    pub fn with_metadata(mut self, key: MetadataKey, value: impl Into<String>) -> Self {
        self.metadata.insert(key, value.into());
        self
    }

    pub fn with_segment(mut self, segment: Vec<u8>) -> Self {
        self.byte_segments.push(segment);
        self
    }
}

/// Reconstructs the payload carried by `scan`.
///
/// Only the first byte segment is used. Any later segments are dropped.
pub fn extract(scan: ScanResult) -> BinQRResult<Vec<u8>> {
    let seg_count = scan.byte_segments.len();
    let payload = scan.byte_segments.into_iter().next().ok_or(BinQRError::NoBinaryData)?;
    if seg_count > 1 {
        warn!("Scan carries {seg_count} byte segments, keeping only the first");
    }
    debug!("Extracted payload of {} bytes", payload.len());
    Ok(payload)
}
