//! Binary descriptor reader
//!
//! Layout of a descriptor:
//!
//! ```text
//! u32 + UTF-16BE   display name (skipped)
//! key              class id
//! u32              item count
//! (key, value)*    items
//! ```
//!
//! A key is a u32 length followed by that many bytes, or, when the length is
//! zero, a 4-byte OSType. A value is a 4-byte type tag followed by a
//! type-specific payload.

use indexmap::IndexMap;

use super::{Descriptor, TaggedValue};
use crate::binary::ByteCursor;
use crate::error::DecodeError;

/// Maximum nesting of objects and lists before a descriptor is rejected
pub const MAX_DEPTH: usize = 256;

/// Read one descriptor at the cursor
pub fn read_descriptor(cursor: &mut ByteCursor<'_>) -> Result<Descriptor, DecodeError> {
    read_descriptor_at_depth(cursor, 0)
}

fn read_descriptor_at_depth(
    cursor: &mut ByteCursor<'_>,
    depth: usize,
) -> Result<Descriptor, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::InvalidFormat(format!(
            "Descriptor nesting exceeds {} levels at offset {}",
            MAX_DEPTH,
            cursor.position()
        )));
    }

    // Display name is never used; skip its UTF-16 code units
    let name_units = cursor.read_u32()? as usize;
    cursor.read_bytes(name_units.saturating_mul(2))?;

    let class_id = read_key(cursor)?;
    let count = cursor.read_u32()?;

    let mut items = IndexMap::new();
    for _ in 0..count {
        let key = read_key(cursor)?;
        let value = read_value_at_depth(cursor, depth)?;
        tracing::trace!("Descriptor item '{}' ({})", key, value.kind());
        items.insert(key, value);
    }

    Ok(Descriptor { class_id, items })
}

/// Read a class id, item key or enum identifier
pub fn read_key(cursor: &mut ByteCursor<'_>) -> Result<String, DecodeError> {
    let len = cursor.read_u32()? as usize;
    if len == 0 {
        cursor.read_fixed_string(4)
    } else {
        cursor.read_fixed_string(len)
    }
}

/// Read a type tag and its payload
pub fn read_value(cursor: &mut ByteCursor<'_>) -> Result<TaggedValue, DecodeError> {
    read_value_at_depth(cursor, 0)
}

fn read_value_at_depth(
    cursor: &mut ByteCursor<'_>,
    depth: usize,
) -> Result<TaggedValue, DecodeError> {
    let os_type = cursor.read_fixed_string(4)?;

    let value = match os_type.as_str() {
        "long" => TaggedValue::Integer(cursor.read_i32()?),
        "doub" => TaggedValue::Float(cursor.read_f64()?),
        "UntF" => {
            let unit = cursor.read_fixed_string(4)?;
            let value = cursor.read_f64()?;
            TaggedValue::UnitFloat { unit, value }
        }
        "TEXT" => TaggedValue::Text(cursor.read_unicode_string()?),
        "enum" => {
            let type_id = read_key(cursor)?;
            let value = read_key(cursor)?;
            TaggedValue::Enum { type_id, value }
        }
        "bool" => TaggedValue::Bool(cursor.read_u8()? != 0),
        "Objc" | "GlbO" => TaggedValue::Object(read_descriptor_at_depth(cursor, depth + 1)?),
        "VlLs" => {
            if depth + 1 > MAX_DEPTH {
                return Err(DecodeError::InvalidFormat(format!(
                    "List nesting exceeds {} levels at offset {}",
                    MAX_DEPTH,
                    cursor.position()
                )));
            }
            let count = cursor.read_u32()?;
            let mut values = Vec::new();
            for _ in 0..count {
                values.push(read_value_at_depth(cursor, depth + 1)?);
            }
            TaggedValue::List(values)
        }
        "tdta" => {
            let len = cursor.read_u32()? as usize;
            TaggedValue::RawBlob(cursor.read_bytes(len)?.to_vec())
        }
        _ => {
            // No self-describing length: the enclosing container decides
            // how to reposition after this.
            tracing::debug!(
                "Unknown descriptor type '{}' at offset {}",
                os_type,
                cursor.position()
            );
            TaggedValue::Unknown { os_type }
        }
    };

    Ok(value)
}
