use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::error::{BinQRError, BinQRResult};

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    #[default]
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Maximum number of payload bytes a single byte-mode segment can carry at this level.
    /// Figures are for the largest symbol (version 40).
    pub const fn capacity(self) -> usize {
        match self {
            Self::L => 2953,
            Self::M => 2331,
            Self::Q => 1663,
            Self::H => 1273,
        }
    }

    /// Fails with `PayloadTooLarge` when `len` does not fit.
    pub fn check_capacity(self, len: usize) -> BinQRResult<()> {
        let limit = self.capacity();
        if len > limit {
            return Err(BinQRError::PayloadTooLarge { limit, actual: len });
        }
        Ok(())
    }

    // Format information stores the level as L=01, M=00, Q=11, H=10
    pub(crate) fn from_format_bits(bits: u16) -> Option<Self> {
        match bits & 0b11 {
            0b01 => Some(Self::L),
            0b00 => Some(Self::M),
            0b11 => Some(Self::Q),
            0b10 => Some(Self::H),
            _ => None,
        }
    }
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for ECLevel {
    type Err = BinQRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(BinQRError::InvalidParameter(format!(
                "error correction level must be one of L, M, Q, H, got {s:?}"
            ))),
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod ec_level_tests {
    use test_case::test_case;

    use super::ECLevel;
    use crate::common::error::BinQRError;

    #[test]
    fn test_default_is_m() {
        assert_eq!(ECLevel::default(), ECLevel::M);
    }

    #[test_case(ECLevel::L, 2953)]
    #[test_case(ECLevel::M, 2331)]
    #[test_case(ECLevel::Q, 1663)]
    #[test_case(ECLevel::H, 1273)]
    fn test_capacity_boundary(ecl: ECLevel, limit: usize) {
        assert_eq!(ecl.capacity(), limit);
        assert!(ecl.check_capacity(limit).is_ok());
        match ecl.check_capacity(limit + 1) {
            Err(BinQRError::PayloadTooLarge { limit: l, actual }) => {
                assert_eq!(l, limit);
                assert_eq!(actual, limit + 1);
            }
            other => panic!("Expected PayloadTooLarge, got {other:?}"),
        }
    }

    #[test_case("L", ECLevel::L)]
    #[test_case("m", ECLevel::M)]
    #[test_case(" Q ", ECLevel::Q)]
    #[test_case("h", ECLevel::H)]
    fn test_parse(text: &str, exp: ECLevel) {
        assert_eq!(text.parse::<ECLevel>().unwrap(), exp);
    }

    #[test_case("" ; "empty")]
    #[test_case("X" ; "unknown letter")]
    #[test_case("LM" ; "two letters")]
    #[test_case("medium" ; "long name")]
    fn test_parse_invalid(text: &str) {
        assert!(matches!(text.parse::<ECLevel>(), Err(BinQRError::InvalidParameter(_))));
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(ECLevel::from_format_bits(0b01), Some(ECLevel::L));
        assert_eq!(ECLevel::from_format_bits(0b00), Some(ECLevel::M));
        assert_eq!(ECLevel::from_format_bits(0b11), Some(ECLevel::Q));
        assert_eq!(ECLevel::from_format_bits(0b10), Some(ECLevel::H));
    }
}
