//! PackBits run-length decoding for brush tip bitmaps
//!
//! The stream starts with one big-endian u16 byte count per row, followed by
//! the rows themselves. Each row is a sequence of runs introduced by a
//! control byte:
//!
//! - `0..=127`: literal run, the next `c + 1` bytes are copied
//! - `129..=255`: repeat run, the next byte is emitted `257 - c` times
//! - `128`: no-op

use super::cursor::ByteCursor;
use crate::error::DecodeError;

/// Decode a row-prefixed PackBits stream into `width * height` gray bytes.
///
/// `bytes_per_pixel` is 1 for 8-bit sources and 2 for 16-bit sources. For
/// 16-bit sources the run values are the high bytes; after every run one low
/// byte per emitted pixel is consumed and dropped.
///
/// The cursor always ends a row at that row's declared boundary, and output
/// stops once the buffer is full. A short stream leaves the remaining pixels
/// at zero.
pub fn decode_rle(
    cursor: &mut ByteCursor<'_>,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>, DecodeError> {
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| {
            DecodeError::InvalidFormat(format!("Image too large: {}x{}", width, height))
        })?;

    let mut row_lengths = Vec::with_capacity(height as usize);
    for _ in 0..height {
        row_lengths.push(cursor.read_u16()? as usize);
    }

    let mut pixels = vec![0u8; pixel_count];
    let mut written = 0usize;

    for row_length in row_lengths {
        let row_end = cursor.position() + row_length;

        while cursor.position() < row_end && written < pixel_count {
            let control = cursor.read_u8()?;
            let emitted = match control {
                0..=127 => {
                    let run = control as usize + 1;
                    let bytes = cursor.read_bytes(run)?;
                    let n = run.min(pixel_count - written);
                    pixels[written..written + n].copy_from_slice(&bytes[..n]);
                    n
                }
                128 => 0,
                _ => {
                    let run = 257 - control as usize;
                    let value = cursor.read_u8()?;
                    let n = run.min(pixel_count - written);
                    pixels[written..written + n].fill(value);
                    n
                }
            };

            written += emitted;
            if bytes_per_pixel == 2 {
                cursor.skip(emitted);
            }
        }

        cursor.seek(row_end);
    }

    if written < pixel_count {
        tracing::debug!(
            "RLE stream produced {} of {} pixels, padding with zeros",
            written,
            pixel_count
        );
    }

    Ok(pixels)
}
