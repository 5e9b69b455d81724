//! # binqr
//!
//! Round-trips arbitrary binary files through QR codes.
//!
//! ## Features
//!
//! - **Generation**: Encode file bytes as a single byte-mode segment into the smallest QR symbol
//!   that fits, and render it with a configurable number of pixels per module
//! - **Recovery**: Detect a QR symbol in an image and rebuild the original bytes
//! - **Sniffing**: Classify recovered bytes by magic numbers and container markers
//! - **Routing**: Decide whether the payload is previewed as an image, played as media or shown
//!   as text
//!
//! ## Quick Start
//!
//! ### Encoding a payload
//!
//! ```rust
//! use binqr::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = encode(b"\x00\x01\x02 any bytes", ECLevel::M, 4)?;
//! img.save("payload_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Recovering a payload
//!
//! ```rust,no_run
//! use binqr::{scan_file, RecoveryPipeline, StillImage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scan = scan_file("payload_qr.png")?;
//! let rec = RecoveryPipeline::default().on_scan_result(&mut StillImage, scan)?;
//! println!("{}", rec.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Capacity
//!
//! | Level | Recovery | Max payload |
//! |-------|----------|-------------|
//! | L     | ~7%      | 2953 bytes  |
//! | M     | ~15%     | 2331 bytes  |
//! | Q     | ~25%     | 1663 bytes  |
//! | H     | ~30%     | 1273 bytes  |

pub mod builder;
pub(crate) mod common;
pub mod params;
pub mod pipeline;
pub mod reader;
pub mod render;
pub mod sniff;

pub use builder::{encode, QRBuilder, DEFAULT_MODULE_SIZE, MAX_CANVAS_PIXELS, QR};
pub use common::{BinQRError, BinQRResult, ECLevel};
pub use params::{validate, EncodingParameters};
pub use pipeline::{save_payload, Recovery, RecoveryPipeline, ScanSource, StillImage};
pub use reader::{extract, scan_file, scan_image, BarcodeFormat, MetadataKey, ScanResult};
pub use render::{MediaCache, RenderAction, RenderDecision, RenderRouter, TextPreview};
pub use sniff::{classify, Category, ContentClassification};
