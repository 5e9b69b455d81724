use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::common::{BinQRError, BinQRResult};
use crate::reader::{extract, ScanResult};
use crate::render::{RenderDecision, RenderRouter};
use crate::sniff::{classify, ContentClassification};

// Scan source
//------------------------------------------------------------------------------

/// A producer of scan results, such as a camera feed, that can be paused while a result is
/// processed.
pub trait ScanSource {
    fn start(&mut self) -> BinQRResult<()>;
    fn stop(&mut self) -> BinQRResult<()>;
}

/// A source with nothing to pause, for one-shot scans of still images.
#[derive(Debug, Default, Clone, Copy)]
pub struct StillImage;

impl ScanSource for StillImage {
    fn start(&mut self) -> BinQRResult<()> {
        Ok(())
    }

    fn stop(&mut self) -> BinQRResult<()> {
        Ok(())
    }
}

// Recovery
//------------------------------------------------------------------------------

/// Everything one recovery cycle produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub payload: Vec<u8>,
    pub classification: ContentClassification,
    pub decision: RenderDecision,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct RecoveryPipeline {
    router: RenderRouter,
}

impl RecoveryPipeline {
    pub fn new(router: RenderRouter) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &RenderRouter {
        &self.router
    }

    /// Runs extract, classify and route on one scan result while `source` is stopped.
    ///
    /// The source is restarted whether or not the run succeeds. A failed restart is logged and
    /// does not replace the outcome of the run.
    pub fn on_scan_result<S: ScanSource + ?Sized>(
        &mut self,
        source: &mut S,
        scan: ScanResult,
    ) -> BinQRResult<Recovery> {
        source.stop()?;
        let res = self.recover(scan);
        if let Err(e) = &res {
            warn!("Recovery abandoned: {e}");
        }
        if let Err(e) = source.start() {
            warn!("Scan source did not restart: {e}");
        }
        res
    }

    fn recover(&self, scan: ScanResult) -> BinQRResult<Recovery> {
        let mut status = String::new();
        let _ = writeln!(status, "Format: {}", scan.format);
        for (k, v) in scan.metadata.iter() {
            let _ = writeln!(status, "{k}: {v}");
        }
        let seg_count = scan.byte_segments.len();

        debug!("Extracting payload...");
        let payload = extract(scan)?;
        let _ = writeln!(status, "Byte arrays: {seg_count}. Size {} bytes", payload.len());

        debug!("Classifying payload...");
        let classification = classify(&payload);
        let _ = writeln!(status, "{classification}");

        debug!("Routing payload...");
        let decision = self.router.route(&payload, &classification)?;

        info!("Recovered {} bytes as {}", payload.len(), classification.mime_type);
        Ok(Recovery { payload, classification, decision, status })
    }
}

// Save
//------------------------------------------------------------------------------

/// Writes a recovered payload to `path`, appending the classified extension when `path` has none.
pub fn save_payload(
    payload: &[u8],
    classification: &ContentClassification,
    path: impl AsRef<Path>,
    overwrite: bool,
) -> BinQRResult<PathBuf> {
    let mut path = path.as_ref().to_path_buf();
    if path.extension().is_none() {
        path.set_extension(classification.extension.trim_start_matches('.'));
    }
    if !overwrite && path.exists() {
        return Err(BinQRError::OutputExists(path));
    }
    fs::write(&path, payload).map_err(|e| BinQRError::io(&path, e))?;
    info!("Saved {} bytes to {}", payload.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod pipeline_tests {
    use std::fs;

    use super::{save_payload, RecoveryPipeline, ScanSource};
    use crate::common::{BinQRError, BinQRResult};
    use crate::reader::{BarcodeFormat, MetadataKey, ScanResult};
    use crate::render::{MediaCache, RenderAction, RenderRouter};
    use crate::sniff::{classify, ContentClassification};

    #[derive(Default)]
    struct Camera {
        running: bool,
        broken: bool,
        calls: Vec<&'static str>,
    }

    impl ScanSource for Camera {
        fn start(&mut self) -> BinQRResult<()> {
            self.calls.push("start");
            if self.broken {
                return Err(BinQRError::DecodeFailure("camera unavailable".into()));
            }
            self.running = true;
            Ok(())
        }

        fn stop(&mut self) -> BinQRResult<()> {
            self.running = false;
            self.calls.push("stop");
            Ok(())
        }
    }

    fn pipeline() -> (tempfile::TempDir, RecoveryPipeline) {
        let dir = tempfile::tempdir().unwrap();
        let router = RenderRouter::new(MediaCache::new(dir.path()));
        (dir, RecoveryPipeline::new(router))
    }

    #[test]
    fn test_recovery_status() {
        let (_dir, mut pipeline) = pipeline();
        let mut camera = Camera::default();
        let payload = b"\x89PNG\r\n\x1a\n\x00\x00".to_vec();
        let scan = ScanResult::new(BarcodeFormat::QrCode)
            .with_metadata(MetadataKey::ErrorCorrectionLevel, "M")
            .with_segment(payload.clone());

        let rec = pipeline.on_scan_result(&mut camera, scan).unwrap();
        assert_eq!(rec.payload, payload);
        assert_eq!(rec.decision.action, RenderAction::ShowImage);
        assert_eq!(
            rec.status,
            "Format: QR_CODE\nERROR_CORRECTION_LEVEL: M\nByte arrays: 1. Size 10 bytes\n\
             MIME type image/png. 8000 points certainty\n"
        );
        assert_eq!(camera.calls, ["stop", "start"]);
        assert!(camera.running);
    }

    #[test]
    fn test_source_resumes_after_failure() {
        let (_dir, mut pipeline) = pipeline();
        let mut camera = Camera::default();
        let scan = ScanResult::new(BarcodeFormat::QrCode);

        let res = pipeline.on_scan_result(&mut camera, scan);
        assert!(matches!(res, Err(BinQRError::NoBinaryData)));
        assert_eq!(camera.calls, ["stop", "start"]);
        assert!(camera.running);
    }

    #[test]
    fn test_restart_failure_keeps_recovery() {
        let (_dir, mut pipeline) = pipeline();
        let mut camera = Camera { broken: true, ..Camera::default() };
        let payload = b"fLaC\x00\x00\x00\x22stream".to_vec();
        let scan = ScanResult::new(BarcodeFormat::QrCode).with_segment(payload.clone());

        let rec = pipeline.on_scan_result(&mut camera, scan).unwrap();
        assert_eq!(rec.payload, payload);
        assert_eq!(rec.decision.action, RenderAction::PlayMedia);
        assert!(rec.decision.materialized_path.unwrap().exists());
        assert_eq!(camera.calls, ["stop", "start"]);
        assert!(!camera.running);
    }

    #[test]
    fn test_restart_failure_keeps_recovery_error() {
        let (_dir, mut pipeline) = pipeline();
        let mut camera = Camera { broken: true, ..Camera::default() };
        let scan = ScanResult::new(BarcodeFormat::QrCode);

        let res = pipeline.on_scan_result(&mut camera, scan);
        assert!(matches!(res, Err(BinQRError::NoBinaryData)), "{res:?}");
    }

    #[test]
    fn test_media_materialized() {
        let (_dir, mut pipeline) = pipeline();
        let payload = b"fLaC\x00\x00\x00\x22stream".to_vec();
        let scan = ScanResult::new(BarcodeFormat::QrCode).with_segment(payload.clone());

        let rec = pipeline.on_scan_result(&mut Camera::default(), scan).unwrap();
        assert_eq!(rec.decision.action, RenderAction::PlayMedia);
        let path = rec.decision.materialized_path.unwrap();
        assert_eq!(fs::read(path).unwrap(), payload);
    }

    #[test]
    fn test_unknown_status() {
        let (_dir, mut pipeline) = pipeline();
        let scan = ScanResult::new(BarcodeFormat::QrCode).with_segment(b"hello".to_vec());
        let rec = pipeline.on_scan_result(&mut Camera::default(), scan).unwrap();
        assert_eq!(rec.classification, ContentClassification::UNKNOWN);
        assert!(rec.status.ends_with("Unknown MIME type\n"));
        assert_eq!(rec.decision.action, RenderAction::ShowText);
    }

    #[test]
    fn test_save_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let payload = b"GIF89a\x01\x00\x01\x00".to_vec();
        let path = save_payload(&payload, &classify(&payload), dir.path().join("Name"), false)
            .unwrap();
        assert_eq!(path, dir.path().join("Name.gif"));
        assert_eq!(fs::read(&path).unwrap(), payload);

        let res = save_payload(&payload, &classify(&payload), dir.path().join("Name"), false);
        assert!(matches!(res, Err(BinQRError::OutputExists(_))));
    }

    #[test]
    fn test_save_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_payload(b"x", &ContentClassification::UNKNOWN, dir.path().join("a.bin"), true)
            .unwrap();
        assert_eq!(path, dir.path().join("a.bin"));
    }
}
