//! Photoshop Action Descriptor values
//!
//! Both brush (ABR) and layer style (ASL) files embed metadata in the
//! descriptor format: a class id followed by an ordered list of keyed,
//! type-tagged values that may nest objects and lists to any depth.

mod access;
mod reader;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use access::{
    get_bool, get_color, get_enum, get_list, get_number, get_object, get_text, get_unit_number,
};
pub use reader::{read_descriptor, read_key, read_value, MAX_DEPTH};

/// Ordered item map of a descriptor. Duplicate keys overwrite in place.
pub type ItemMap = IndexMap<String, TaggedValue>;

/// A decoded descriptor value
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    /// `long`
    Integer(i32),
    /// `doub`
    Float(f64),
    /// `UntF`, e.g. `#Prc` (percent), `#Pxl` (pixels), `#Ang` (degrees)
    UnitFloat { unit: String, value: f64 },
    /// `TEXT`
    Text(String),
    /// `enum`
    Enum { type_id: String, value: String },
    /// `bool`
    Bool(bool),
    /// `Objc` (and `GlbO`)
    Object(Descriptor),
    /// `VlLs`, may be heterogeneous
    List(Vec<TaggedValue>),
    /// `tdta`
    RawBlob(Vec<u8>),
    /// Any type tag the reader does not interpret
    Unknown { os_type: String },
}

impl TaggedValue {
    /// Short name of the variant, for log messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "long",
            Self::Float(_) => "doub",
            Self::UnitFloat { .. } => "UntF",
            Self::Text(_) => "TEXT",
            Self::Enum { .. } => "enum",
            Self::Bool(_) => "bool",
            Self::Object(_) => "Objc",
            Self::List(_) => "VlLs",
            Self::RawBlob(_) => "tdta",
            Self::Unknown { .. } => "unknown",
        }
    }

    pub fn as_object(&self) -> Option<&Descriptor> {
        match self {
            Self::Object(d) => Some(d),
            _ => None,
        }
    }
}

/// A descriptor object: class id plus ordered items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor {
    pub class_id: String,
    pub items: ItemMap,
}

impl Descriptor {
    pub fn new(class_id: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            items: IndexMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: TaggedValue) -> Self {
        self.items.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&TaggedValue> {
        self.items.get(key)
    }
}

/// Opaque RGB color decoded from a descriptor, with a 0-1 alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}
