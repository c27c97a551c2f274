//! ABR (Adobe Brush) file parser
//!
//! Decodes modern (v6+) Photoshop ABR brush files into brush presets with
//! alpha-mask tips. Legacy V1/V2 files are reported as unsupported.
//!
//! # Example
//!
//! ```ignore
//! use sutu_assets::abr::AbrParser;
//!
//! let data = std::fs::read("brush.abr")?;
//! let result = AbrParser::parse(&data);
//!
//! for brush in &result.brushes {
//!     println!("Brush: {} ({}x{})",
//!         brush.name,
//!         brush.tip_image.as_ref().map(|i| i.width()).unwrap_or(0),
//!         brush.tip_image.as_ref().map(|i| i.height()).unwrap_or(0)
//!     );
//! }
//! for warning in &result.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! ```

pub mod defaults;
mod parser;
mod samp;
mod types;

pub use defaults::AbrDefaults;
pub use parser::AbrParser;
pub use samp::SAMPLE_HEADER_LEN;
pub use types::{AbrParseResult, AlphaMask, BrushDescriptor, BrushPreset, BrushSample};
