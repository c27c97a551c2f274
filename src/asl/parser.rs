//! ASL file parser
//!
//! ```text
//! "8BSL"
//! u16 version (2)
//! u32 style count
//! per style: one descriptor
//! ```

use indexmap::IndexSet;

use super::effects::{is_effect_key, map_effect, MappedEffect};
use super::types::{AslParseResult, LayerStylePreset};
use crate::binary::ByteCursor;
use crate::descriptor::{get_object, get_text, read_descriptor, Descriptor, ItemMap};
use crate::options::ParseOptions;
use crate::push_warning;

const STYLE_SIGNATURE: &[u8; 4] = b"8BSL";
const EXPECTED_VERSION: u16 = 2;
/// Signature, version and style count
const HEADER_LEN: usize = 10;

/// Main ASL parser
pub struct AslParser;

impl AslParser {
    /// Parse an ASL buffer with random preset ids
    pub fn parse(data: &[u8]) -> AslParseResult {
        Self::parse_with(data, &ParseOptions::default())
    }

    /// Parse an ASL buffer
    pub fn parse_with(data: &[u8], options: &ParseOptions<'_>) -> AslParseResult {
        let mut result = AslParseResult::default();

        if data.len() < HEADER_LEN {
            push_warning(
                &mut result.warnings,
                format!("File too small to be an ASL file ({} bytes)", data.len()),
            );
            return result;
        }

        let mut cursor = ByteCursor::new(data);
        let header = cursor.read_bytes(4).and_then(|signature| {
            let version = cursor.read_u16()?;
            let count = cursor.read_u32()?;
            Ok((signature, version, count))
        });
        let (signature, version, count) = match header {
            Ok(header) => header,
            Err(e) => {
                push_warning(&mut result.warnings, format!("Failed to read ASL header: {}", e));
                return result;
            }
        };

        if signature != STYLE_SIGNATURE {
            push_warning(
                &mut result.warnings,
                format!(
                    "Invalid ASL signature '{}' (expected '8BSL')",
                    signature.iter().map(|&b| char::from(b)).collect::<String>()
                ),
            );
            return result;
        }

        result.version = version;
        if version != EXPECTED_VERSION {
            push_warning(
                &mut result.warnings,
                format!(
                    "Unexpected ASL version {} (expected {}), continuing",
                    version, EXPECTED_VERSION
                ),
            );
        }

        tracing::debug!("ASL header: version={}, {} styles", version, count);

        let mut skipped = IndexSet::new();
        for index in 0..count {
            if cursor.eof() {
                tracing::debug!("ASL data ended after {} of {} styles", index, count);
                break;
            }

            match read_descriptor(&mut cursor) {
                Ok(desc) => {
                    let style = Self::build_style(index as usize, &desc, options, &mut skipped);
                    result.styles.push(style);
                }
                Err(e) => {
                    push_warning(
                        &mut result.warnings,
                        format!("Failed to parse style {}: {}", index + 1, e),
                    );
                    break;
                }
            }
        }
        result.skipped_effects = skipped.into_iter().collect();

        tracing::debug!(
            "ASL parsed: {} styles, {} skipped effects, {} warnings",
            result.styles.len(),
            result.skipped_effects.len(),
            result.warnings.len()
        );

        result
    }

    fn build_style(
        index: usize,
        desc: &Descriptor,
        options: &ParseOptions<'_>,
        skipped: &mut IndexSet<String>,
    ) -> LayerStylePreset {
        let name = get_text(&desc.items, "Nm  ")
            .map(str::to_string)
            .unwrap_or_else(|| format!("Style {}", index + 1));

        let mut effects = Vec::new();
        for (key, items) in Self::effect_entries(desc) {
            match map_effect(key, items) {
                MappedEffect::Effect(effect) => effects.push(effect),
                MappedEffect::Skipped(effect_name) => {
                    skipped.insert(effect_name);
                }
            }
        }

        tracing::debug!("Style '{}': {} effects", name, effects.len());

        LayerStylePreset {
            id: options.ids.next_id(),
            name,
            effects,
            source: options.source.to_string(),
        }
    }

    /// Effect objects of a style: the children of `Lefx` when present,
    /// otherwise known effect keys at the top level
    fn effect_entries(desc: &Descriptor) -> Vec<(&str, &ItemMap)> {
        match get_object(&desc.items, "Lefx") {
            Some(lefx) => object_items(&lefx.items).collect(),
            None => object_items(&desc.items)
                .filter(|(key, _)| is_effect_key(key))
                .collect(),
        }
    }
}

/// Items whose value is an object, with the object's own items
fn object_items(items: &ItemMap) -> impl Iterator<Item = (&str, &ItemMap)> {
    items
        .iter()
        .filter_map(|(key, value)| value.as_object().map(|obj| (key.as_str(), &obj.items)))
}
