//! ASL data types
//!
//! Layer style presets and the effect records they carry. Percent-like
//! values are normalized to 0-1, angles are degrees and distances are pixels.

use serde::{Deserialize, Serialize};

use crate::descriptor::Color;

/// A named layer style from an ASL file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStylePreset {
    pub id: String,
    pub name: String,
    pub effects: Vec<LayerEffect>,
    pub source: String,
}

/// Outcome of parsing an ASL buffer.
///
/// Parsing never fails outright: problems are reported in `warnings` and
/// styles decoded before them are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AslParseResult {
    pub version: u16,
    pub styles: Vec<LayerStylePreset>,
    /// Names of effects present in the file but not supported, deduplicated
    pub skipped_effects: Vec<String>,
    pub warnings: Vec<String>,
}

/// Supported layer effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayerEffect {
    DropShadow(ShadowEffect),
    InnerShadow(ShadowEffect),
    OuterGlow(OuterGlowEffect),
    InnerGlow(InnerGlowEffect),
    ColorOverlay(ColorOverlayEffect),
    GradientOverlay(GradientOverlayEffect),
    Stroke(StrokeEffect),
    BevelEmboss(BevelEmbossEffect),
}

impl LayerEffect {
    /// Display name as shown in Photoshop's Layer Style dialog
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DropShadow(_) => "Drop Shadow",
            Self::InnerShadow(_) => "Inner Shadow",
            Self::OuterGlow(_) => "Outer Glow",
            Self::InnerGlow(_) => "Inner Glow",
            Self::ColorOverlay(_) => "Color Overlay",
            Self::GradientOverlay(_) => "Gradient Overlay",
            Self::Stroke(_) => "Stroke",
            Self::BevelEmboss(_) => "Bevel & Emboss",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            Self::DropShadow(e) | Self::InnerShadow(e) => e.enabled,
            Self::OuterGlow(e) => e.enabled,
            Self::InnerGlow(e) => e.enabled,
            Self::ColorOverlay(e) => e.enabled,
            Self::GradientOverlay(e) => e.enabled,
            Self::Stroke(e) => e.enabled,
            Self::BevelEmboss(e) => e.enabled,
        }
    }
}

/// Drop shadow or inner shadow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowEffect {
    pub enabled: bool,
    pub blend_mode: BlendMode,
    pub color: Color,
    pub opacity: f32,
    /// Light angle in degrees
    pub angle: f32,
    pub use_global_light: bool,
    pub distance: f32,
    /// Spread for drop shadows, choke for inner shadows (0-1)
    pub spread: f32,
    pub size: f32,
    pub noise: f32,
    /// Layer knocks out drop shadow
    pub knocks_out: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OuterGlowEffect {
    pub enabled: bool,
    pub blend_mode: BlendMode,
    pub color: Color,
    pub opacity: f32,
    pub noise: f32,
    pub technique: GlowTechnique,
    pub spread: f32,
    pub size: f32,
    pub range: f32,
    pub jitter: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerGlowEffect {
    pub enabled: bool,
    pub blend_mode: BlendMode,
    pub color: Color,
    pub opacity: f32,
    pub noise: f32,
    pub technique: GlowTechnique,
    pub source: GlowSource,
    pub choke: f32,
    pub size: f32,
    pub range: f32,
    pub jitter: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOverlayEffect {
    pub enabled: bool,
    pub blend_mode: BlendMode,
    pub color: Color,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientOverlayEffect {
    pub enabled: bool,
    pub blend_mode: BlendMode,
    pub opacity: f32,
    /// Color stops sorted by position
    pub stops: Vec<GradientStop>,
    pub style: GradientStyle,
    pub angle: f32,
    /// Percent, 10-150
    pub scale: f32,
    pub reverse: bool,
    pub align_with_layer: bool,
    pub dither: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    /// 0-1 along the gradient
    pub position: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeEffect {
    pub enabled: bool,
    pub blend_mode: BlendMode,
    pub color: Color,
    pub opacity: f32,
    pub size: f32,
    pub position: StrokePosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BevelEmbossEffect {
    pub enabled: bool,
    pub style: BevelStyle,
    pub technique: BevelTechnique,
    /// Percent, 1-1000
    pub depth: f32,
    pub direction: BevelDirection,
    pub size: f32,
    pub soften: f32,
    pub angle: f32,
    /// Degrees, 0-90
    pub altitude: f32,
    pub use_global_light: bool,
    pub highlight_mode: BlendMode,
    pub highlight_color: Color,
    pub highlight_opacity: f32,
    pub shadow_mode: BlendMode,
    pub shadow_color: Color,
    pub shadow_opacity: f32,
}

/// Layer blend modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlendMode {
    Normal,
    Dissolve,
    Darken,
    Multiply,
    ColorBurn,
    LinearBurn,
    DarkerColor,
    Lighten,
    Screen,
    ColorDodge,
    LinearDodge,
    LighterColor,
    Overlay,
    SoftLight,
    HardLight,
    VividLight,
    LinearLight,
    PinLight,
    HardMix,
    Difference,
    Exclusion,
    Subtract,
    Divide,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// Map a descriptor enum value, accepting both the OSType code and the
    /// long-form id Photoshop uses for newer modes
    pub fn from_code(code: &str) -> Option<Self> {
        let mode = match code {
            "Nrml" | "normal" => Self::Normal,
            "Dslv" | "dissolve" => Self::Dissolve,
            "Drkn" | "darken" => Self::Darken,
            "Mltp" | "multiply" => Self::Multiply,
            "CBrn" | "colorBurn" => Self::ColorBurn,
            "linearBurn" => Self::LinearBurn,
            "darkerColor" => Self::DarkerColor,
            "Lghn" | "lighten" => Self::Lighten,
            "Scrn" | "screen" => Self::Screen,
            "CDdg" | "colorDodge" => Self::ColorDodge,
            "linearDodge" => Self::LinearDodge,
            "lighterColor" => Self::LighterColor,
            "Ovrl" | "overlay" => Self::Overlay,
            "SftL" | "softLight" => Self::SoftLight,
            "HrdL" | "hardLight" => Self::HardLight,
            "vividLight" => Self::VividLight,
            "linearLight" => Self::LinearLight,
            "pinLight" => Self::PinLight,
            "hardMix" => Self::HardMix,
            "Dfrn" | "difference" => Self::Difference,
            "Xclu" | "exclusion" => Self::Exclusion,
            "blendSubtraction" | "subtract" => Self::Subtract,
            "blendDivide" | "divide" => Self::Divide,
            "H   " | "hue" => Self::Hue,
            "Strt" | "saturation" => Self::Saturation,
            "Clr " | "color" => Self::Color,
            "Lmns" | "luminosity" => Self::Luminosity,
            _ => return None,
        };
        Some(mode)
    }
}

/// Glow edge technique. Unknown values map to `Softer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlowTechnique {
    Softer,
    Precise,
}

impl GlowTechnique {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SfBL" | "softer" => Some(Self::Softer),
            "PrBL" | "precise" => Some(Self::Precise),
            _ => None,
        }
    }
}

/// Inner glow origin. Unknown values map to `Edge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlowSource {
    Center,
    Edge,
}

impl GlowSource {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SrcC" | "center" => Some(Self::Center),
            "SrcE" | "edge" => Some(Self::Edge),
            _ => None,
        }
    }
}

/// Gradient geometry. Unknown values map to `Linear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientStyle {
    Linear,
    Radial,
    Angle,
    Reflected,
    Diamond,
}

impl GradientStyle {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Lnr " | "linear" => Some(Self::Linear),
            "Rdl " | "radial" => Some(Self::Radial),
            "Angl" | "angle" => Some(Self::Angle),
            "Rflc" | "reflected" => Some(Self::Reflected),
            "Dmnd" | "diamond" => Some(Self::Diamond),
            _ => None,
        }
    }
}

/// Stroke placement relative to the layer edge. Unknown values map to `Outside`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrokePosition {
    Outside,
    Inside,
    Center,
}

impl StrokePosition {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "OutF" | "outside" => Some(Self::Outside),
            "InsF" | "inside" => Some(Self::Inside),
            "CtrF" | "center" => Some(Self::Center),
            _ => None,
        }
    }
}

/// Unknown values map to `InnerBevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BevelStyle {
    OuterBevel,
    InnerBevel,
    Emboss,
    PillowEmboss,
    StrokeEmboss,
}

impl BevelStyle {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "OtrB" | "outerBevel" => Some(Self::OuterBevel),
            "InrB" | "innerBevel" => Some(Self::InnerBevel),
            "Embs" | "emboss" => Some(Self::Emboss),
            "PlEb" | "pillowEmboss" => Some(Self::PillowEmboss),
            "strokeEmboss" => Some(Self::StrokeEmboss),
            _ => None,
        }
    }
}

/// Unknown values map to `Smooth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BevelTechnique {
    Smooth,
    ChiselHard,
    ChiselSoft,
}

impl BevelTechnique {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SfBL" | "smooth" => Some(Self::Smooth),
            "PrBL" | "chiselHard" => Some(Self::ChiselHard),
            "Slmt" | "chiselSoft" => Some(Self::ChiselSoft),
            _ => None,
        }
    }
}

/// Unknown values map to `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BevelDirection {
    Up,
    Down,
}

impl BevelDirection {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "In  " | "up" => Some(Self::Up),
            "Out " | "down" => Some(Self::Down),
            _ => None,
        }
    }
}
