//! Synthetic buffer builders for parser tests
//!
//! These write the same big-endian layouts the parsers read, so tests can
//! describe a file structurally instead of as hex dumps.

use crate::descriptor::{Descriptor, TaggedValue};

/// Big-endian byte buffer builder
#[derive(Debug, Default, Clone)]
pub struct BeWriter {
    buf: Vec<u8>,
}

impl BeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.buf.push(value);
        self
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn i32(mut self, value: i32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn f64(mut self, value: f64) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.buf.extend_from_slice(value);
        self
    }

    /// Raw 4-byte tag, no length prefix
    pub fn tag(self, tag: &str) -> Self {
        assert_eq!(tag.len(), 4, "tag must be 4 bytes: {:?}", tag);
        self.bytes(tag.as_bytes())
    }

    /// Descriptor key: zero length + tag for 4-byte keys, else length + bytes
    pub fn key(self, key: &str) -> Self {
        if key.len() == 4 {
            self.u32(0).tag(key)
        } else {
            self.u32(key.len() as u32).bytes(key.as_bytes())
        }
    }

    /// u32 code-unit count followed by UTF-16BE units
    pub fn unicode(mut self, value: &str) -> Self {
        let units: Vec<u16> = value.encode_utf16().collect();
        self = self.u32(units.len() as u32);
        for unit in units {
            self = self.u16(unit);
        }
        self
    }

    /// 8BIM resource block with the given key and payload
    pub fn block(self, key: &str, payload: &[u8]) -> Self {
        self.tag("8BIM")
            .tag(key)
            .u32(payload.len() as u32)
            .bytes(payload)
    }

    pub fn descriptor(self, desc: &Descriptor) -> Self {
        self.bytes(&encode_descriptor(desc))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode a descriptor with an empty display name
pub fn encode_descriptor(desc: &Descriptor) -> Vec<u8> {
    let mut w = BeWriter::new()
        .unicode("")
        .key(&desc.class_id)
        .u32(desc.items.len() as u32);
    for (key, value) in &desc.items {
        w = w.key(key);
        w = encode_value(w, value);
    }
    w.into_bytes()
}

fn encode_value(w: BeWriter, value: &TaggedValue) -> BeWriter {
    match value {
        TaggedValue::Integer(v) => w.tag("long").i32(*v),
        TaggedValue::Float(v) => w.tag("doub").f64(*v),
        TaggedValue::UnitFloat { unit, value } => w.tag("UntF").tag(unit).f64(*value),
        TaggedValue::Text(s) => w.tag("TEXT").unicode(s),
        TaggedValue::Enum { type_id, value } => w.tag("enum").key(type_id).key(value),
        TaggedValue::Bool(b) => w.tag("bool").u8(u8::from(*b)),
        TaggedValue::Object(d) => w.tag("Objc").descriptor(d),
        TaggedValue::List(values) => {
            let mut w = w.tag("VlLs").u32(values.len() as u32);
            for v in values {
                w = encode_value(w, v);
            }
            w
        }
        TaggedValue::RawBlob(data) => w.tag("tdta").u32(data.len() as u32).bytes(data),
        TaggedValue::Unknown { os_type } => w.tag(os_type),
    }
}

pub fn unit(unit: &str, value: f64) -> TaggedValue {
    TaggedValue::UnitFloat {
        unit: unit.to_string(),
        value,
    }
}

pub fn enumerated(type_id: &str, value: &str) -> TaggedValue {
    TaggedValue::Enum {
        type_id: type_id.to_string(),
        value: value.to_string(),
    }
}

pub fn text(value: &str) -> TaggedValue {
    TaggedValue::Text(value.to_string())
}

pub fn rgb(r: f64, g: f64, b: f64) -> TaggedValue {
    TaggedValue::Object(
        Descriptor::new("RGBC")
            .with("Rd  ", TaggedValue::Float(r))
            .with("Grn ", TaggedValue::Float(g))
            .with("Bl  ", TaggedValue::Float(b)),
    )
}
