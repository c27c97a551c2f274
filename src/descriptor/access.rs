//! Typed lookups over descriptor item maps

use super::{Color, Descriptor, ItemMap, TaggedValue};

/// Numeric payload of a `long`, `doub` or `UntF` item. The unit is ignored.
pub fn get_number(items: &ItemMap, key: &str) -> Option<f64> {
    get_unit_number(items, key).map(|(_, value)| value)
}

/// Numeric payload with its unit tag, if the item is a `UntF`
pub fn get_unit_number<'a>(items: &'a ItemMap, key: &str) -> Option<(Option<&'a str>, f64)> {
    match items.get(key)? {
        TaggedValue::Integer(v) => Some((None, f64::from(*v))),
        TaggedValue::Float(v) => Some((None, *v)),
        TaggedValue::UnitFloat { unit, value } => Some((Some(unit.as_str()), *value)),
        _ => None,
    }
}

pub fn get_text<'a>(items: &'a ItemMap, key: &str) -> Option<&'a str> {
    match items.get(key)? {
        TaggedValue::Text(s) => Some(s.as_str()),
        _ => None,
    }
}

/// Value id of an `enum` item
pub fn get_enum<'a>(items: &'a ItemMap, key: &str) -> Option<&'a str> {
    match items.get(key)? {
        TaggedValue::Enum { value, .. } => Some(value.as_str()),
        _ => None,
    }
}

pub fn get_bool(items: &ItemMap, key: &str) -> Option<bool> {
    match items.get(key)? {
        TaggedValue::Bool(b) => Some(*b),
        _ => None,
    }
}

pub fn get_object<'a>(items: &'a ItemMap, key: &str) -> Option<&'a Descriptor> {
    items.get(key)?.as_object()
}

pub fn get_list<'a>(items: &'a ItemMap, key: &str) -> Option<&'a [TaggedValue]> {
    match items.get(key)? {
        TaggedValue::List(values) => Some(values.as_slice()),
        _ => None,
    }
}

/// RGB color stored as a nested object with `Rd  `, `Grn `, `Bl  ` channels.
///
/// Channels are rounded and clamped to 0-255. Descriptor colors carry no
/// alpha, so the result is fully opaque.
pub fn get_color(items: &ItemMap, key: &str) -> Option<Color> {
    let color = get_object(items, key)?;
    let channel = |name: &str| -> Option<u8> {
        let v = get_number(&color.items, name)?;
        if v.is_nan() {
            return None;
        }
        Some(v.round().clamp(0.0, 255.0) as u8)
    };

    Some(Color::rgb(channel("Rd  ")?, channel("Grn ")?, channel("Bl  ")?))
}
