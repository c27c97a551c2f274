//! ASL (Adobe Style Library) file parser
//!
//! Decodes Photoshop layer style presets and maps their layer effects onto
//! typed records. Effects without a mapping are reported by name in
//! [`AslParseResult::skipped_effects`].
//!
//! # Example
//!
//! ```ignore
//! use sutu_assets::asl::AslParser;
//!
//! let data = std::fs::read("styles.asl")?;
//! let result = AslParser::parse(&data);
//!
//! for style in &result.styles {
//!     println!("Style: {} ({} effects)", style.name, style.effects.len());
//! }
//! ```

mod effects;
mod parser;
mod types;

pub use effects::{
    is_effect_key, map_effect, skipped_effect_name, MappedEffect, SUPPORTED_EFFECT_KEYS,
};
pub use parser::AslParser;
pub use types::{
    AslParseResult, BevelDirection, BevelEmbossEffect, BevelStyle, BevelTechnique, BlendMode,
    ColorOverlayEffect, GlowSource, GlowTechnique, GradientOverlayEffect, GradientStop,
    GradientStyle, InnerGlowEffect, LayerEffect, LayerStylePreset, OuterGlowEffect, ShadowEffect,
    StrokeEffect, StrokePosition,
};
