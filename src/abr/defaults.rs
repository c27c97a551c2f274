//! ABR default values for brush parameters
//!
//! The `desc` block is not decoded, so every brush preset carries these.

/// Default values for ABR brush parameters
pub struct AbrDefaults;

impl AbrDefaults {
    /// Default brush diameter in pixels
    pub const DIAMETER: f32 = 30.0;

    /// Default hardness (1.0 = hard edge, 0.0 = soft)
    pub const HARDNESS: f32 = 1.0;

    /// Default spacing as fraction of diameter
    pub const SPACING: f32 = 0.25;

    /// Default brush angle in degrees
    pub const ANGLE: f32 = 0.0;

    /// Default roundness (1.0 = circular)
    pub const ROUNDNESS: f32 = 1.0;

    /// Largest tip edge we are willing to allocate for
    pub const MAX_TIP_DIMENSION: u32 = 16384;
}
