//! ABR file parser
//!
//! Layout of a modern (v6+) ABR file:
//!
//! ```text
//! u16 version, u16 subversion
//! repeated: "8BIM", 4-byte key, u32 length, payload
//! ```
//!
//! `samp` blocks hold tip bitmaps, `desc` blocks hold brush metadata, and
//! every other block is skipped. Brushes are assembled by pairing the i-th
//! descriptor with the i-th sample.

use super::samp::parse_samples;
use super::types::{AbrParseResult, AlphaMask, BrushDescriptor, BrushPreset, BrushSample};
use crate::binary::ByteCursor;
use crate::error::DecodeError;
use crate::options::ParseOptions;
use crate::push_warning;

const BLOCK_SIGNATURE: &[u8; 4] = b"8BIM";
const SAMPLE_KEY: &str = "samp";
const DESCRIPTOR_KEY: &str = "desc";

/// Oldest version with the 8BIM block layout. V1/V2 are not supported.
const MIN_SUPPORTED_VERSION: u16 = 6;

/// Main ABR parser
pub struct AbrParser;

impl AbrParser {
    /// Parse an ABR buffer with random preset ids
    pub fn parse(data: &[u8]) -> AbrParseResult {
        Self::parse_with(data, &ParseOptions::default())
    }

    /// Parse an ABR buffer
    pub fn parse_with(data: &[u8], options: &ParseOptions<'_>) -> AbrParseResult {
        let mut result = AbrParseResult::default();

        if data.len() < 4 {
            push_warning(
                &mut result.warnings,
                format!("File too small to be an ABR file ({} bytes)", data.len()),
            );
            return result;
        }

        let mut cursor = ByteCursor::new(data);
        match Self::read_header(&mut cursor) {
            Ok((version, subversion)) => {
                result.version = version;
                result.subversion = subversion;
            }
            Err(e) => {
                push_warning(&mut result.warnings, format!("Failed to read ABR header: {}", e));
                return result;
            }
        }

        tracing::debug!(
            "ABR header: version={}, subversion={}",
            result.version,
            result.subversion
        );

        if result.version < MIN_SUPPORTED_VERSION {
            push_warning(
                &mut result.warnings,
                format!(
                    "ABR version {} is not supported (legacy format, need {} or later)",
                    result.version, MIN_SUPPORTED_VERSION
                ),
            );
            return result;
        }

        Self::walk_blocks(&mut cursor, &mut result);

        result.brushes = Self::assemble_presets(
            &result.descriptors,
            &result.samples,
            options,
            &mut result.warnings,
        );

        tracing::debug!(
            "ABR parsed: {} brushes, {} samples, {} descriptors, {} warnings",
            result.brushes.len(),
            result.samples.len(),
            result.descriptors.len(),
            result.warnings.len()
        );

        result
    }

    /// Read ABR file header
    fn read_header(cursor: &mut ByteCursor<'_>) -> Result<(u16, u16), DecodeError> {
        let version = cursor.read_u16()?;
        let subversion = cursor.read_u16()?;
        Ok((version, subversion))
    }

    /// Read a block key and length after its signature
    fn read_block_header(cursor: &mut ByteCursor<'_>) -> Result<(String, usize), DecodeError> {
        let key = cursor.read_fixed_string(4)?;
        let length = cursor.read_u32()? as usize;
        Ok((key, length))
    }

    /// Iterate 8BIM blocks until the data runs out or a block is malformed
    fn walk_blocks(cursor: &mut ByteCursor<'_>, result: &mut AbrParseResult) {
        while cursor.remaining() >= 4 {
            let block_start = cursor.position();
            let signature = match cursor.read_bytes(4) {
                Ok(signature) => signature,
                Err(_) => break,
            };

            if signature != BLOCK_SIGNATURE {
                push_warning(
                    &mut result.warnings,
                    format!(
                        "Invalid block signature '{}' at offset {}, stopping",
                        signature.iter().map(|&b| char::from(b)).collect::<String>(),
                        block_start
                    ),
                );
                break;
            }

            let (key, length) = match Self::read_block_header(cursor) {
                Ok(header) => header,
                Err(e) => {
                    push_warning(
                        &mut result.warnings,
                        format!("Truncated block header at offset {}: {}", block_start, e),
                    );
                    break;
                }
            };

            if length > cursor.remaining() {
                push_warning(
                    &mut result.warnings,
                    format!(
                        "Block '{}' at offset {} extends beyond file end ({} bytes declared, {} available)",
                        key,
                        block_start,
                        length,
                        cursor.remaining()
                    ),
                );
                break;
            }

            // Length was checked, so this lands exactly on the block end
            let payload = match cursor.read_bytes(length) {
                Ok(payload) => payload,
                Err(_) => break,
            };

            tracing::debug!("8BIM block '{}' at offset {}: {} bytes", key, block_start, length);

            match key.as_str() {
                SAMPLE_KEY => parse_samples(payload, &mut result.samples, &mut result.warnings),
                DESCRIPTOR_KEY => result.descriptors.push(Self::read_brush_descriptor(payload)),
                _ => tracing::debug!("Skipping block '{}'", key),
            }
        }
    }

    /// Brush metadata for a `desc` block.
    ///
    /// The brush descriptor tree is not decoded; every block yields default
    /// metadata.
    fn read_brush_descriptor(payload: &[u8]) -> BrushDescriptor {
        tracing::debug!(
            "desc block of {} bytes, using default brush metadata",
            payload.len()
        );
        BrushDescriptor::default()
    }

    /// Pair descriptors with samples by position
    fn assemble_presets(
        descriptors: &[BrushDescriptor],
        samples: &[BrushSample],
        options: &ParseOptions<'_>,
        warnings: &mut Vec<String>,
    ) -> Vec<BrushPreset> {
        if descriptors.is_empty() {
            if !samples.is_empty() {
                push_warning(
                    warnings,
                    format!(
                        "Found {} brush samples but no descriptors, no presets created",
                        samples.len()
                    ),
                );
            }
            return Vec::new();
        }

        descriptors
            .iter()
            .enumerate()
            .map(|(i, desc)| {
                let tip_image = samples.get(i).and_then(AlphaMask::from_sample);
                let name = if desc.name.is_empty() {
                    format!("Brush {}", i + 1)
                } else {
                    desc.name.clone()
                };

                BrushPreset {
                    id: options.ids.next_id(),
                    name,
                    tip_image,
                    diameter: desc.diameter,
                    hardness: desc.hardness,
                    spacing: desc.spacing,
                    angle: desc.angle,
                    roundness: desc.roundness,
                    source: options.source.to_string(),
                }
            })
            .collect()
    }
}
