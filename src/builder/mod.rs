mod qr;

pub use qr::{MAX_CANVAS_PIXELS, QR};

use image::GrayImage;
use qrcode::{bits::Bits, types::QrError, QrCode, Version};
use tracing::{debug, info};

use crate::common::{BinQRError, BinQRResult, ECLevel};

pub const DEFAULT_MODULE_SIZE: u32 = 38;

const MAX_VERSION: i16 = 40;

/// Encodes `payload` into a QR symbol image with `module_sz` pixels per module.
///
/// Fails with [`BinQRError::PayloadTooLarge`] when the payload exceeds the capacity of `ecl`
/// and with [`BinQRError::InvalidParameter`] when `module_sz` is zero or the image would be
/// larger than [`MAX_CANVAS_PIXELS`].
pub fn encode(payload: &[u8], ecl: ECLevel, module_sz: u32) -> BinQRResult<GrayImage> {
    if module_sz == 0 {
        return Err(BinQRError::InvalidParameter("module size must be a positive integer".into()));
    }
    let qr = QRBuilder::new(payload).ec_level(ecl).build()?;
    if qr.render_size(module_sz).is_none() {
        return Err(BinQRError::InvalidParameter(format!(
            "{module_sz} pixels per module is too large for a {0}x{0} module symbol",
            qr.width()
        )));
    }
    Ok(qr.render(module_sz))
}

pub struct QRBuilder<'a> {
    data: &'a [u8],
    ec_level: ECLevel,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, ec_level: ECLevel::M }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Size: {}, Ec level: {:?}, Capacity: {} }}",
            self.data.len(),
            self.ec_level,
            self.ec_level.capacity()
        )
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::ECLevel;

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let mut qr_builder = QRBuilder::new(data);
        qr_builder.ec_level(ECLevel::L);
        assert_eq!(qr_builder.metadata(), "{ Size: 13, Ec level: L, Capacity: 2953 }");
        qr_builder.ec_level(ECLevel::H);
        assert_eq!(qr_builder.metadata(), "{ Size: 13, Ec level: H, Capacity: 1273 }");
    }
}

impl QRBuilder<'_> {
    pub fn build(&self) -> BinQRResult<QR> {
        debug!("Generating QR {}...", self.metadata());
        self.ec_level.check_capacity(self.data.len())?;

        debug!("Finding smallest version...");
        let (ver, bits) = self.fit_version()?;

        debug!("Constructing QR with version {ver}...");
        let code = QrCode::with_bits(bits, self.ec_level.into())
            .map_err(|e| BinQRError::InvalidParameter(format!("cannot construct symbol: {e}")))?;
        let qr = QR::from_code(&code, ver, self.ec_level);

        info!(
            "QR generated: {} bytes, version {}, width {} modules, {} dark modules",
            self.data.len(),
            ver,
            qr.width(),
            qr.count_dark_modules()
        );
        Ok(qr)
    }

    // Writes the whole payload as one byte segment into the smallest version that holds it
    fn fit_version(&self) -> BinQRResult<(i16, Bits)> {
        let ecl: qrcode::EcLevel = self.ec_level.into();
        for v in 1..=MAX_VERSION {
            let mut bits = Bits::new(Version::Normal(v));
            let pushed = bits.push_byte_data(self.data).and_then(|_| bits.push_terminator(ecl));
            match pushed {
                Ok(()) => return Ok((v, bits)),
                Err(QrError::DataTooLong) => continue,
                Err(e) => {
                    return Err(BinQRError::InvalidParameter(format!("cannot encode payload: {e}")))
                }
            }
        }
        Err(BinQRError::PayloadTooLarge { limit: self.ec_level.capacity(), actual: self.data.len() })
    }
}
