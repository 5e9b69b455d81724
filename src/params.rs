use std::path::{Path, PathBuf};

use tracing::debug;

use crate::builder::DEFAULT_MODULE_SIZE;
use crate::common::{BinQRError, BinQRResult, ECLevel};

/// A validated encode request. Only [`validate`] constructs one.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EncodingParameters {
    input: PathBuf,
    output: PathBuf,
    ec_level: ECLevel,
    module_size: u32,
    overwrite: bool,
}

impl EncodingParameters {
    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn module_size(&self) -> u32 {
        self.module_size
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }
}

/// Validates and normalizes an external encode request.
///
/// Absent `ec_level` defaults to M and absent `module_size` to 38. The output gate is checked
/// here, before any encoding work is done.
pub fn validate(
    input: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
    ec_level: Option<&str>,
    module_size: Option<&str>,
    overwrite: bool,
) -> BinQRResult<EncodingParameters> {
    let (input, output) = (input.into(), output.into());

    let ec_level = ec_level.map(str::parse::<ECLevel>).transpose()?.unwrap_or_default();
    let module_size = module_size.map(parse_module_size).transpose()?.unwrap_or(DEFAULT_MODULE_SIZE);

    if !input.is_file() {
        return Err(BinQRError::io(
            &input,
            std::io::Error::new(std::io::ErrorKind::NotFound, "input file not found"),
        ));
    }
    if !overwrite && output.exists() {
        return Err(BinQRError::OutputExists(output));
    }

    let params = EncodingParameters { input, output, ec_level, module_size, overwrite };
    debug!("Validated {params:?}");
    Ok(params)
}

fn parse_module_size(text: &str) -> BinQRResult<u32> {
    match text.trim().parse::<u32>() {
        Ok(sz) if sz > 0 => Ok(sz),
        _ => Err(BinQRError::InvalidParameter(format!(
            "pixels per module must be a positive integer, got {text:?}"
        ))),
    }
}

#[cfg(test)]
mod validate_tests {
    use std::fs;

    use test_case::test_case;

    use super::validate;
    use crate::common::{BinQRError, ECLevel};

    fn workspace() -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.bin");
        fs::write(&input, b"payload").unwrap();
        let output = dir.path().join("output.png");
        (dir, input, output)
    }

    #[test]
    fn test_defaults() {
        let (_dir, input, output) = workspace();
        let params = validate(&input, &output, None, None, false).unwrap();
        assert_eq!(params.ec_level(), ECLevel::M);
        assert_eq!(params.module_size(), 38);
        assert!(!params.overwrite());
        assert_eq!(params.input(), input);
        assert_eq!(params.output(), output);
    }

    #[test]
    fn test_explicit() {
        let (_dir, input, output) = workspace();
        let params = validate(&input, &output, Some("h"), Some("12"), true).unwrap();
        assert_eq!(params.ec_level(), ECLevel::H);
        assert_eq!(params.module_size(), 12);
        assert!(params.overwrite());
    }

    #[test_case(Some("Z"), None ; "bad ec level")]
    #[test_case(None, Some("0") ; "zero pixels")]
    #[test_case(None, Some("-4") ; "negative pixels")]
    #[test_case(None, Some("big") ; "non numeric pixels")]
    #[test_case(None, Some("") ; "empty pixels")]
    fn test_invalid(ec_level: Option<&str>, module_size: Option<&str>) {
        let (_dir, input, output) = workspace();
        let res = validate(&input, &output, ec_level, module_size, false);
        assert!(matches!(res, Err(BinQRError::InvalidParameter(_))), "{res:?}");
    }

    #[test]
    fn test_output_exists() {
        let (_dir, input, output) = workspace();
        fs::write(&output, b"old").unwrap();

        match validate(&input, &output, None, None, false) {
            Err(BinQRError::OutputExists(p)) => assert_eq!(p, output),
            other => panic!("Expected OutputExists, got {other:?}"),
        }
        assert!(validate(&input, &output, None, None, true).is_ok());
    }

    #[test]
    fn test_missing_input() {
        let (dir, _input, output) = workspace();
        let res = validate(dir.path().join("nope.bin"), &output, None, None, false);
        assert!(matches!(res, Err(BinQRError::Io { .. })));
    }
}
