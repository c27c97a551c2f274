//! Low-level binary readers shared by the preset container parsers

pub mod cursor;
pub mod rle;

pub use cursor::ByteCursor;
pub use rle::decode_rle;
