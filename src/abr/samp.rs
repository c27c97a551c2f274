//! `samp` block: brush tip bitmaps
//!
//! ```text
//! u32  sample count
//! per sample:
//!   u32  sample length (bytes after this field)
//!   37   misc bytes (ignored)
//!   u32  top, left, bottom, right
//!   u16  depth (8 or 16)
//!   u8   compression (0 = raw, 1 = RLE)
//!   ...  pixel data
//! ```

use super::defaults::AbrDefaults;
use super::types::BrushSample;
use crate::binary::{decode_rle, ByteCursor};
use crate::error::DecodeError;
use crate::push_warning;

const SAMPLE_MISC_LEN: usize = 37;

/// Fixed bytes every sample carries before its pixel data
pub const SAMPLE_HEADER_LEN: usize = SAMPLE_MISC_LEN + 16 + 2 + 1;

/// Decode every sample in a `samp` payload, appending to `samples`.
///
/// An oversized sample stops the block; an undersized one is skipped; a
/// zero-dimension or undecodable one becomes an empty placeholder.
pub(super) fn parse_samples(
    payload: &[u8],
    samples: &mut Vec<BrushSample>,
    warnings: &mut Vec<String>,
) {
    let mut cursor = ByteCursor::new(payload);

    let count = match cursor.read_u32() {
        Ok(count) => count,
        Err(e) => {
            push_warning(warnings, format!("Sample block has no sample count: {}", e));
            return;
        }
    };
    tracing::debug!("samp block: {} samples in {} bytes", count, payload.len());

    for index in 0..count {
        let number = index + 1;
        let length = match cursor.read_u32() {
            Ok(length) => length as usize,
            Err(_) => {
                push_warning(
                    warnings,
                    format!("Sample block ended after {} of {} samples", index, count),
                );
                break;
            }
        };

        if length > cursor.remaining() {
            push_warning(
                warnings,
                format!(
                    "Sample {} extends beyond block end ({} bytes declared, {} available)",
                    number,
                    length,
                    cursor.remaining()
                ),
            );
            break;
        }

        // Bounds were checked above, so this also moves to the sample's end
        let body = match cursor.read_bytes(length) {
            Ok(body) => body,
            Err(_) => break,
        };

        if length < SAMPLE_HEADER_LEN {
            push_warning(
                warnings,
                format!(
                    "Sample {} is too small ({} bytes, header needs {}), skipped",
                    number, length, SAMPLE_HEADER_LEN
                ),
            );
            continue;
        }

        match decode_sample(body, number, warnings) {
            Ok(sample) => samples.push(sample),
            Err(e) => {
                push_warning(warnings, format!("Failed to decode sample {}: {}", number, e));
                samples.push(BrushSample::empty());
            }
        }
    }
}

fn decode_sample(
    body: &[u8],
    number: u32,
    warnings: &mut Vec<String>,
) -> Result<BrushSample, DecodeError> {
    let mut cursor = ByteCursor::new(body);
    cursor.skip(SAMPLE_MISC_LEN);

    let top = i64::from(cursor.read_u32()?);
    let left = i64::from(cursor.read_u32()?);
    let bottom = i64::from(cursor.read_u32()?);
    let right = i64::from(cursor.read_u32()?);
    let depth = cursor.read_u16()?;
    let compression = cursor.read_u8()?;

    let width = right - left;
    let height = bottom - top;

    if width <= 0 || height <= 0 {
        push_warning(
            warnings,
            format!(
                "Sample {} has zero dimensions ({}x{}), keeping an empty placeholder",
                number, width, height
            ),
        );
        return Ok(BrushSample::empty());
    }

    let max = i64::from(AbrDefaults::MAX_TIP_DIMENSION);
    if width > max || height > max {
        push_warning(
            warnings,
            format!(
                "Sample {} is too large ({}x{}), keeping an empty placeholder",
                number, width, height
            ),
        );
        return Ok(BrushSample::empty());
    }

    let (width, height) = (width as u32, height as u32);
    let bytes_per_pixel = match depth {
        8 => 1,
        16 => 2,
        other => {
            tracing::debug!("Sample {} has unusual depth {}, reading as 8-bit", number, other);
            1
        }
    };

    let pixels = match compression {
        0 => decode_raw(&mut cursor, width, height, bytes_per_pixel)?,
        1 => decode_rle(&mut cursor, width, height, bytes_per_pixel)?,
        other => {
            push_warning(
                warnings,
                format!(
                    "Sample {} uses unknown compression {}, keeping an empty placeholder",
                    number, other
                ),
            );
            return Ok(BrushSample::empty());
        }
    };

    tracing::debug!(
        "Sample {}: {}x{}, depth {}, compression {}",
        number,
        width,
        height,
        depth,
        compression
    );

    Ok(BrushSample::new(width, height, pixels))
}

/// Read uncompressed pixels. 16-bit samples keep the high byte of each pair.
fn decode_raw(
    cursor: &mut ByteCursor<'_>,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>, DecodeError> {
    let size = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(bytes_per_pixel))
        .ok_or_else(|| {
            DecodeError::InvalidFormat(format!("Image too large: {}x{}", width, height))
        })?;

    let buffer = cursor.read_bytes(size)?;
    if bytes_per_pixel > 1 {
        Ok(buffer.iter().step_by(bytes_per_pixel).copied().collect())
    } else {
        Ok(buffer.to_vec())
    }
}
