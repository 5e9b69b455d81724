//! Signature sniffing for recovered payloads.
//!
//! Payload bytes are compared against an ordered table of [`Definition`]s. Every definition
//! whose anchored segments and strings all match scores a certainty, and the highest score wins.
//! Equal scores keep the earliest definition in table order.

mod definitions;

pub use definitions::{Definition, DEFINITIONS};

use std::fmt::{Display, Formatter};

use tracing::debug;

const SEGMENT_WEIGHT: u32 = 1000;
const STRING_WEIGHT: u32 = 100;

// Strings are searched in this many leading bytes
const STRING_WINDOW: usize = 4096;

pub const FALLBACK_MIME: &str = "application/octet-stream";
pub const FALLBACK_EXTENSION: &str = ".txt";

// Category
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Category {
    Image,
    Audio,
    Video,
    Text,
    Unknown,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Image => "Image",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Text => "Text",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

// Content classification
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ContentClassification {
    pub mime_type: &'static str,
    pub category: Category,
    pub extension: &'static str,
    pub certainty: u32,
}

impl ContentClassification {
    pub const UNKNOWN: Self = Self {
        mime_type: FALLBACK_MIME,
        category: Category::Unknown,
        extension: FALLBACK_EXTENSION,
        certainty: 0,
    };

    pub fn is_known(&self) -> bool {
        self.certainty > 0
    }
}

impl Display for ContentClassification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.is_known() {
            return f.write_str("Unknown MIME type");
        }
        write!(f, "MIME type {}. {} points certainty", self.mime_type, self.certainty)
    }
}

/// Classifies `payload` against [`DEFINITIONS`].
pub fn classify(payload: &[u8]) -> ContentClassification {
    classify_with(DEFINITIONS, payload)
}

/// Classifies `payload` against a custom definition table, in priority order.
pub fn classify_with(definitions: &[Definition], payload: &[u8]) -> ContentClassification {
    let mut best: Option<(&Definition, u32)> = None;
    for d in definitions {
        let Some(points) = score(d, payload) else { continue };
        // Strictly greater keeps the earliest definition on ties
        if best.map_or(true, |(_, p)| points > p) {
            best = Some((d, points));
        }
    }

    let res = match best {
        Some((d, certainty)) => ContentClassification {
            mime_type: d.mime,
            category: d.category,
            extension: d.extensions[0],
            certainty,
        },
        None => ContentClassification::UNKNOWN,
    };
    debug!("Classified {} bytes as {:?}", payload.len(), res);
    res
}

fn score(d: &Definition, payload: &[u8]) -> Option<u32> {
    let mut points = 0;
    for &(offset, seg) in d.segments {
        if payload.get(offset..offset + seg.len())? != seg {
            return None;
        }
        points += seg.len() as u32 * SEGMENT_WEIGHT;
    }

    let window = &payload[..payload.len().min(STRING_WINDOW)];
    for &s in d.strings {
        if !window.windows(s.len()).any(|w| w == s) {
            return None;
        }
        points += s.len() as u32 * STRING_WEIGHT;
    }
    Some(points)
}
