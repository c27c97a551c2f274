//! Preset import APIs
//!
//! File-level entry points over the ABR and ASL parsers. Brush presets are
//! converted to serializable payloads with the tip encoded as base64 PNG.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::abr::{AbrParser, BrushPreset};
use crate::asl::{AslParser, LayerStylePreset};
use crate::error::ImportError;
use crate::ids::UuidGenerator;
use crate::options::ParseOptions;

/// Preset file formats, detected by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Abr,
    Asl,
}

impl AssetKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "abr" => Some(Self::Abr),
            "asl" => Some(Self::Asl),
            _ => None,
        }
    }
}

/// Brush preset in the shape the frontend consumes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushPresetPayload {
    pub id: String,
    pub name: String,
    pub diameter: f32,
    pub hardness: f32,
    pub spacing: f32,
    pub angle: f32,
    pub roundness: f32,
    pub has_texture: bool,
    pub texture_width: Option<u32>,
    pub texture_height: Option<u32>,
    /// Base64 PNG of the tip mask
    pub texture_data: Option<String>,
    /// Hex SHA-256 of the tip mask, for de-duplication
    pub content_hash: Option<String>,
    pub source: String,
}

impl TryFrom<&BrushPreset> for BrushPresetPayload {
    type Error = ImportError;

    fn try_from(preset: &BrushPreset) -> Result<Self, Self::Error> {
        let (texture_data, content_hash) = match &preset.tip_image {
            Some(tip) => {
                let data = tip
                    .to_png_base64()
                    .map_err(|e| ImportError::Encode(format!("{}: {}", preset.name, e)))?;
                (Some(data), Some(tip.content_hash()))
            }
            None => (None, None),
        };

        Ok(Self {
            id: preset.id.clone(),
            name: preset.name.clone(),
            diameter: preset.diameter,
            hardness: preset.hardness,
            spacing: preset.spacing,
            angle: preset.angle,
            roundness: preset.roundness,
            has_texture: preset.tip_image.is_some(),
            texture_width: preset.tip_image.as_ref().map(|t| t.width()),
            texture_height: preset.tip_image.as_ref().map(|t| t.height()),
            texture_data,
            content_hash,
            source: preset.source.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportAbrResult {
    pub version: u16,
    pub subversion: u16,
    pub sample_count: usize,
    pub presets: Vec<BrushPresetPayload>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportAslResult {
    pub version: u16,
    pub styles: Vec<LayerStylePreset>,
    pub skipped_effects: Vec<String>,
    pub warnings: Vec<String>,
}

/// Result of importing one file of either kind
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImportedAsset {
    Abr(ImportAbrResult),
    Asl(ImportAslResult),
}

impl ImportedAsset {
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Abr(_) => AssetKind::Abr,
            Self::Asl(_) => AssetKind::Asl,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Abr(result) => &result.warnings,
            Self::Asl(result) => &result.warnings,
        }
    }
}

pub fn import_abr_from_bytes(data: &[u8]) -> Result<ImportAbrResult, ImportError> {
    import_abr_with(data, &ParseOptions::new("memory://abr", &UuidGenerator))
}

pub fn import_abr_from_path(path: &Path) -> Result<ImportAbrResult, ImportError> {
    let data = std::fs::read(path)?;
    let source = path.to_string_lossy().to_string();
    import_abr_with(&data, &ParseOptions::new(&source, &UuidGenerator))
}

/// Decode ABR bytes and build frontend payloads
pub fn import_abr_with(
    data: &[u8],
    options: &ParseOptions<'_>,
) -> Result<ImportAbrResult, ImportError> {
    let parsed = AbrParser::parse_with(data, options);
    let presets = parsed
        .brushes
        .iter()
        .map(BrushPresetPayload::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        "Imported {} brush presets from {} ({} warnings)",
        presets.len(),
        options.source,
        parsed.warnings.len()
    );

    Ok(ImportAbrResult {
        version: parsed.version,
        subversion: parsed.subversion,
        sample_count: parsed.samples.len(),
        presets,
        warnings: parsed.warnings,
    })
}

pub fn import_asl_from_bytes(data: &[u8]) -> Result<ImportAslResult, ImportError> {
    Ok(import_asl_with(data, &ParseOptions::new("memory://asl", &UuidGenerator)))
}

pub fn import_asl_from_path(path: &Path) -> Result<ImportAslResult, ImportError> {
    let data = std::fs::read(path)?;
    let source = path.to_string_lossy().to_string();
    Ok(import_asl_with(&data, &ParseOptions::new(&source, &UuidGenerator)))
}

/// Decode ASL bytes
pub fn import_asl_with(data: &[u8], options: &ParseOptions<'_>) -> ImportAslResult {
    let parsed = AslParser::parse_with(data, options);

    tracing::info!(
        "Imported {} layer styles from {} ({} skipped effects, {} warnings)",
        parsed.styles.len(),
        options.source,
        parsed.skipped_effects.len(),
        parsed.warnings.len()
    );

    ImportAslResult {
        version: parsed.version,
        styles: parsed.styles,
        skipped_effects: parsed.skipped_effects,
        warnings: parsed.warnings,
    }
}

/// Import a file, choosing the parser from its extension
pub fn import_from_path(path: &Path) -> Result<ImportedAsset, ImportError> {
    match AssetKind::from_path(path) {
        Some(AssetKind::Abr) => import_abr_from_path(path).map(ImportedAsset::Abr),
        Some(AssetKind::Asl) => import_asl_from_path(path).map(ImportedAsset::Asl),
        None => Err(ImportError::UnknownFormat(path.display().to_string())),
    }
}

/// Import many files in parallel. Results keep the order of `paths`.
pub fn import_many<P>(paths: &[P]) -> Vec<(PathBuf, Result<ImportedAsset, ImportError>)>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            (path.to_path_buf(), import_from_path(path))
        })
        .collect()
}
