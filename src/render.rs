use std::env;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::{debug, info};

use crate::common::{BinQRError, BinQRResult};
use crate::sniff::{Category, ContentClassification};

pub const CACHE_DIR_ENV: &str = "BINQR_CACHE_DIR";

const CACHE_SLOT: &str = "qr";

// Render decision
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum RenderAction {
    ShowImage,
    PlayMedia,
    ShowText,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RenderDecision {
    pub action: RenderAction,
    pub materialized_path: Option<PathBuf>,
}

impl RenderDecision {
    fn in_memory(action: RenderAction) -> Self {
        Self { action, materialized_path: None }
    }
}

// Media cache
//------------------------------------------------------------------------------

/// Cache directory holding one reusable file per media extension.
///
/// Every recovery cycle overwrites the slot, even if a player still reads the previous file.
#[derive(Debug, Clone)]
pub struct MediaCache {
    dir: PathBuf,
}

impl MediaCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$BINQR_CACHE_DIR` when set, else `binqr` under the system temp directory.
    pub fn default_dir() -> PathBuf {
        env::var_os(CACHE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("binqr"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{CACHE_SLOT}{extension}"))
    }

    pub fn materialize(&self, payload: &[u8], extension: &str) -> BinQRResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| BinQRError::io(&self.dir, e))?;
        let path = self.slot_path(extension);
        fs::write(&path, payload).map_err(|e| BinQRError::io(&path, e))?;
        debug!("Materialized {} bytes at {}", payload.len(), path.display());
        Ok(path)
    }
}

impl Default for MediaCache {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

// Render router
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RenderRouter {
    cache: MediaCache,
}

impl RenderRouter {
    pub fn new(cache: MediaCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &MediaCache {
        &self.cache
    }

    /// Picks the preview for a classified payload.
    ///
    /// Audio and video are written to the cache slot for the classified extension so a player
    /// can stream them from disk. Images and everything else stay in memory.
    pub fn route(
        &self,
        payload: &[u8],
        classification: &ContentClassification,
    ) -> BinQRResult<RenderDecision> {
        let decision = match classification.category {
            Category::Image => RenderDecision::in_memory(RenderAction::ShowImage),
            Category::Audio | Category::Video => {
                let path = self.cache.materialize(payload, classification.extension)?;
                RenderDecision { action: RenderAction::PlayMedia, materialized_path: Some(path) }
            }
            Category::Text | Category::Unknown => RenderDecision::in_memory(RenderAction::ShowText),
        };
        info!("Routing {} payload to {:?}", classification.category, decision.action);
        Ok(decision)
    }
}

// Text preview
//------------------------------------------------------------------------------

/// The payload decoded with a single-byte and a variable-width encoding, since the true
/// encoding is unknown.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TextPreview {
    pub single_byte: String,
    pub utf8: String,
}

impl TextPreview {
    pub fn new(payload: &[u8]) -> Self {
        let (single_byte, _) = WINDOWS_1252.decode_without_bom_handling(payload);
        let (utf8, _) = UTF_8.decode_without_bom_handling(payload);
        Self { single_byte: single_byte.into_owned(), utf8: utf8.into_owned() }
    }
}

impl Display for TextPreview {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "No preview available. Please use the save option to save the file.")?;
        writeln!(f, "Single-byte text: {}", self.single_byte)?;
        write!(f, "UTF-8 text: {}", self.utf8)
    }
}
