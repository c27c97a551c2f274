//! Layer effect mapping
//!
//! Turns the descriptor items of one effect (e.g. the object under `DrSh`)
//! into a typed [`LayerEffect`]. Missing or malformed fields fall back to
//! Photoshop's dialog defaults; nothing here fails.

use super::types::{
    BevelDirection, BevelEmbossEffect, BevelStyle, BevelTechnique, BlendMode, ColorOverlayEffect,
    GlowSource, GlowTechnique, GradientOverlayEffect, GradientStop, GradientStyle,
    InnerGlowEffect, LayerEffect, OuterGlowEffect, ShadowEffect, StrokeEffect, StrokePosition,
};
use crate::descriptor::{
    get_bool, get_color, get_enum, get_list, get_object, get_unit_number, Color, ItemMap,
};

/// Effect keys the mapper understands
pub const SUPPORTED_EFFECT_KEYS: &[&str] =
    &["DrSh", "IrSh", "OrGl", "IrGl", "SoFi", "GrFl", "FrFX", "ebbl"];

/// Effect keys recognized but not mapped, with the name reported for them
const SKIPPED_EFFECT_NAMES: &[(&str, &str)] = &[
    ("ChFX", "Satin"),
    ("patternFill", "Pattern Overlay"),
    ("dropShadowMulti", "Drop Shadow (multiple)"),
    ("innerShadowMulti", "Inner Shadow (multiple)"),
    ("solidFillMulti", "Color Overlay (multiple)"),
    ("gradientFillMulti", "Gradient Overlay (multiple)"),
    ("frameFXMulti", "Stroke (multiple)"),
];

const DEFAULT_GRADIENT_INTERPOLATION: f64 = 4096.0;
const DEFAULT_SHADOW_ANGLE: f32 = 120.0;
const DEFAULT_GRADIENT_ANGLE: f32 = 90.0;
const DEFAULT_GLOW_COLOR: Color = Color::rgb(255, 255, 190);
const DEFAULT_OVERLAY_COLOR: Color = Color::rgb(255, 0, 0);

/// Result of looking at one effect entry
#[derive(Debug, Clone, PartialEq)]
pub enum MappedEffect {
    Effect(LayerEffect),
    /// Present in the file but not supported; carries a display name
    Skipped(String),
}

/// Whether `key` names an effect, supported or not
pub fn is_effect_key(key: &str) -> bool {
    SUPPORTED_EFFECT_KEYS.contains(&key) || SKIPPED_EFFECT_NAMES.iter().any(|(k, _)| *k == key)
}

/// Display name for an effect key the mapper does not support
pub fn skipped_effect_name(key: &str) -> String {
    SKIPPED_EFFECT_NAMES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Map one effect entry
pub fn map_effect(key: &str, items: &ItemMap) -> MappedEffect {
    let effect = match key {
        "DrSh" => LayerEffect::DropShadow(map_shadow(items, true)),
        "IrSh" => LayerEffect::InnerShadow(map_shadow(items, false)),
        "OrGl" => LayerEffect::OuterGlow(map_outer_glow(items)),
        "IrGl" => LayerEffect::InnerGlow(map_inner_glow(items)),
        "SoFi" => LayerEffect::ColorOverlay(map_color_overlay(items)),
        "GrFl" => LayerEffect::GradientOverlay(map_gradient_overlay(items)),
        "FrFX" => LayerEffect::Stroke(map_stroke(items)),
        "ebbl" => LayerEffect::BevelEmboss(map_bevel_emboss(items)),
        _ => {
            tracing::debug!("Unsupported layer effect '{}'", key);
            return MappedEffect::Skipped(skipped_effect_name(key));
        }
    };
    MappedEffect::Effect(effect)
}

fn map_shadow(items: &ItemMap, is_drop: bool) -> ShadowEffect {
    ShadowEffect {
        enabled: enabled(items),
        blend_mode: blend_mode(items, "Md  ", BlendMode::Multiply),
        color: color(items, "Clr ", Color::BLACK),
        opacity: ratio(items, &["Opct"], 1.0),
        angle: angle(items, &["lagl", "Angl"], DEFAULT_SHADOW_ANGLE),
        use_global_light: get_bool(items, "uglg").unwrap_or(true),
        distance: pixels(items, &["Dstn"], 5.0),
        spread: ratio(items, &["Ckmt"], 0.0),
        size: pixels(items, &["blur"], 5.0),
        noise: ratio(items, &["Nose"], 0.0),
        knocks_out: is_drop && get_bool(items, "layerConceals").unwrap_or(true),
    }
}

fn map_outer_glow(items: &ItemMap) -> OuterGlowEffect {
    OuterGlowEffect {
        enabled: enabled(items),
        blend_mode: blend_mode(items, "Md  ", BlendMode::Screen),
        color: color(items, "Clr ", DEFAULT_GLOW_COLOR),
        opacity: ratio(items, &["Opct"], 1.0),
        noise: ratio(items, &["Nose"], 0.0),
        technique: choice(items, "GlwT", GlowTechnique::from_code, GlowTechnique::Softer),
        spread: ratio(items, &["Ckmt"], 0.0),
        size: pixels(items, &["blur"], 5.0),
        range: ratio(items, &["Inpr"], 0.5),
        jitter: ratio(items, &["ShdN"], 0.0),
    }
}

fn map_inner_glow(items: &ItemMap) -> InnerGlowEffect {
    InnerGlowEffect {
        enabled: enabled(items),
        blend_mode: blend_mode(items, "Md  ", BlendMode::Screen),
        color: color(items, "Clr ", DEFAULT_GLOW_COLOR),
        opacity: ratio(items, &["Opct"], 1.0),
        noise: ratio(items, &["Nose"], 0.0),
        technique: choice(items, "GlwT", GlowTechnique::from_code, GlowTechnique::Softer),
        source: choice(items, "glwS", GlowSource::from_code, GlowSource::Edge),
        choke: ratio(items, &["Ckmt"], 0.0),
        size: pixels(items, &["blur"], 5.0),
        range: ratio(items, &["Inpr"], 0.5),
        jitter: ratio(items, &["ShdN"], 0.0),
    }
}

fn map_color_overlay(items: &ItemMap) -> ColorOverlayEffect {
    ColorOverlayEffect {
        enabled: enabled(items),
        blend_mode: blend_mode(items, "Md  ", BlendMode::Normal),
        color: color(items, "Clr ", DEFAULT_OVERLAY_COLOR),
        opacity: ratio(items, &["Opct"], 1.0),
    }
}

fn map_gradient_overlay(items: &ItemMap) -> GradientOverlayEffect {
    GradientOverlayEffect {
        enabled: enabled(items),
        blend_mode: blend_mode(items, "Md  ", BlendMode::Normal),
        opacity: ratio(items, &["Opct"], 1.0),
        stops: gradient_stops(items),
        style: choice(items, "Type", GradientStyle::from_code, GradientStyle::Linear),
        angle: angle(items, &["Angl", "angle"], DEFAULT_GRADIENT_ANGLE),
        scale: number(items, &["Scl "], 100.0).clamp(10.0, 150.0),
        reverse: get_bool(items, "Rvrs").unwrap_or(false),
        align_with_layer: get_bool(items, "Algn").unwrap_or(true),
        dither: get_bool(items, "Dthr").unwrap_or(false),
    }
}

fn map_stroke(items: &ItemMap) -> StrokeEffect {
    StrokeEffect {
        enabled: enabled(items),
        blend_mode: blend_mode(items, "Md  ", BlendMode::Normal),
        color: color(items, "Clr ", Color::BLACK),
        opacity: ratio(items, &["Opct"], 1.0),
        size: pixels(items, &["Sz  "], 3.0),
        position: choice(items, "Styl", StrokePosition::from_code, StrokePosition::Outside),
    }
}

fn map_bevel_emboss(items: &ItemMap) -> BevelEmbossEffect {
    BevelEmbossEffect {
        enabled: enabled(items),
        style: choice(items, "bvlS", BevelStyle::from_code, BevelStyle::InnerBevel),
        technique: choice(items, "bvlT", BevelTechnique::from_code, BevelTechnique::Smooth),
        depth: number(items, &["srgR"], 100.0).clamp(1.0, 1000.0),
        direction: choice(items, "bvlD", BevelDirection::from_code, BevelDirection::Up),
        size: pixels(items, &["blur"], 5.0),
        soften: pixels(items, &["Sftn"], 0.0),
        angle: angle(items, &["lagl", "Angl"], DEFAULT_SHADOW_ANGLE),
        altitude: number(items, &["Lald"], 30.0).clamp(0.0, 90.0),
        use_global_light: get_bool(items, "uglg").unwrap_or(true),
        highlight_mode: blend_mode(items, "hglM", BlendMode::Screen),
        highlight_color: color(items, "hglC", Color::WHITE),
        highlight_opacity: ratio(items, &["hglO"], 1.0),
        shadow_mode: blend_mode(items, "sdwM", BlendMode::Multiply),
        shadow_color: color(items, "sdwC", Color::BLACK),
        shadow_opacity: ratio(items, &["sdwO"], 1.0),
    }
}

/// Gradient stops from the `Grad` object, normalized to 0-1 and sorted.
///
/// Stop locations are in units of the gradient's interpolation (`Intr`,
/// 4096 when absent or invalid). Stops without a color or location are
/// dropped; an empty result becomes a white-to-black ramp.
fn gradient_stops(items: &ItemMap) -> Vec<GradientStop> {
    let mut stops: Vec<GradientStop> = get_object(items, "Grad")
        .map(|grad| {
            let interpolation = get_unit_number(&grad.items, "Intr")
                .map(|(_, v)| v)
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(DEFAULT_GRADIENT_INTERPOLATION);

            get_list(&grad.items, "Clrs")
                .unwrap_or(&[])
                .iter()
                .filter_map(|value| value.as_object())
                .filter_map(|stop| {
                    let color = get_color(&stop.items, "Clr ")?;
                    let location = get_unit_number(&stop.items, "Lctn")?.1;
                    let position = (location / interpolation) as f32;
                    position.is_finite().then(|| GradientStop {
                        position: position.clamp(0.0, 1.0),
                        color,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if stops.is_empty() {
        return vec![
            GradientStop {
                position: 0.0,
                color: Color::WHITE,
            },
            GradientStop {
                position: 1.0,
                color: Color::BLACK,
            },
        ];
    }

    stops.sort_by(|a, b| a.position.total_cmp(&b.position));
    stops
}

fn enabled(items: &ItemMap) -> bool {
    get_bool(items, "enab").unwrap_or(true)
}

fn color(items: &ItemMap, key: &str, default: Color) -> Color {
    get_color(items, key).unwrap_or(default)
}

fn blend_mode(items: &ItemMap, key: &str, default: BlendMode) -> BlendMode {
    choice(items, key, BlendMode::from_code, default)
}

/// Enum field through a code table, falling back on absent or unknown values
fn choice<T: Copy>(
    items: &ItemMap,
    key: &str,
    from_code: fn(&str) -> Option<T>,
    default: T,
) -> T {
    match get_enum(items, key) {
        Some(code) => from_code(code).unwrap_or_else(|| {
            tracing::debug!("Unknown value '{}' for '{}', using default", code, key);
            default
        }),
        None => default,
    }
}

/// First finite number under any of `keys`
fn lookup(items: &ItemMap, keys: &[&str]) -> Option<(Option<String>, f64)> {
    keys.iter()
        .filter_map(|key| get_unit_number(items, key))
        .find(|(_, v)| v.is_finite())
        .map(|(unit, v)| (unit.map(str::to_string), v))
}

fn number(items: &ItemMap, keys: &[&str], default: f32) -> f32 {
    lookup(items, keys).map_or(default, |(_, v)| v as f32)
}

fn angle(items: &ItemMap, keys: &[&str], default: f32) -> f32 {
    number(items, keys, default)
}

fn pixels(items: &ItemMap, keys: &[&str], default: f32) -> f32 {
    number(items, keys, default)
}

/// Percent-like value as 0-1.
///
/// `#Prc` values are divided by 100; unitless values above 1 are taken as
/// percent too.
fn ratio(items: &ItemMap, keys: &[&str], default: f32) -> f32 {
    let Some((unit, value)) = lookup(items, keys) else {
        return default;
    };
    let mut v = value as f32;
    match unit.as_deref() {
        Some("#Prc") => v /= 100.0,
        _ => {
            if v > 1.0 {
                v /= 100.0;
            }
        }
    }
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::descriptor::{Descriptor, TaggedValue};
    use crate::test_support::{enumerated, rgb, unit};

    fn effect(key: &str, desc: Descriptor) -> LayerEffect {
        match map_effect(key, &desc.items) {
            MappedEffect::Effect(effect) => effect,
            other => panic!("expected an effect for {key}, got {other:?}"),
        }
    }

    fn stop(location: f64, color: TaggedValue) -> TaggedValue {
        TaggedValue::Object(
            Descriptor::new("Clrt")
                .with("Clr ", color)
                .with("Lctn", TaggedValue::Integer(location as i32)),
        )
    }

    #[test]
    fn test_drop_shadow_normalization() {
        let desc = Descriptor::new("DrSh")
            .with("enab", TaggedValue::Bool(true))
            .with("Md  ", enumerated("BlnM", "Mltp"))
            .with("Clr ", rgb(10.4, 20.6, 300.0))
            .with("Opct", unit("#Prc", 75.0))
            .with("lagl", unit("#Ang", 120.0))
            .with("Dstn", unit("#Pxl", 5.0));

        let LayerEffect::DropShadow(shadow) = effect("DrSh", desc) else {
            panic!("expected drop shadow");
        };
        assert!((shadow.opacity - 0.75).abs() < 1e-6);
        assert_eq!(shadow.angle, 120.0);
        assert_eq!(shadow.distance, 5.0);
        assert_eq!(shadow.blend_mode, BlendMode::Multiply);
        assert_eq!(shadow.color, Color::rgb(10, 21, 255));
        assert!(shadow.knocks_out);
    }

    #[test]
    fn test_legacy_angle_key_and_unitless_percent() {
        let desc = Descriptor::new("IrSh")
            .with("Angl", TaggedValue::Float(45.0))
            .with("Opct", TaggedValue::Integer(40))
            .with("Ckmt", TaggedValue::Float(0.3));

        let LayerEffect::InnerShadow(shadow) = effect("IrSh", desc) else {
            panic!("expected inner shadow");
        };
        assert_eq!(shadow.angle, 45.0);
        assert!((shadow.opacity - 0.4).abs() < 1e-6);
        assert!((shadow.spread - 0.3).abs() < 1e-6);
        assert!(!shadow.knocks_out);
    }

    #[test]
    fn test_defaults_for_empty_effect() {
        let LayerEffect::BevelEmboss(bevel) = effect("ebbl", Descriptor::new("ebbl")) else {
            panic!("expected bevel");
        };
        assert!(bevel.enabled);
        assert_eq!(bevel.style, BevelStyle::InnerBevel);
        assert_eq!(bevel.angle, 120.0);
        assert_eq!(bevel.altitude, 30.0);
        assert_eq!(bevel.depth, 100.0);
        assert_eq!(bevel.highlight_color, Color::WHITE);
        assert_eq!(bevel.shadow_mode, BlendMode::Multiply);
    }

    #[test]
    fn test_bevel_clamps_and_enums() {
        let desc = Descriptor::new("ebbl")
            .with("bvlS", enumerated("BESl", "PlEb"))
            .with("bvlT", enumerated("bvlT", "Slmt"))
            .with("bvlD", enumerated("BESs", "Out "))
            .with("srgR", unit("#Prc", 5000.0))
            .with("Lald", unit("#Ang", 120.0));

        let LayerEffect::BevelEmboss(bevel) = effect("ebbl", desc) else {
            panic!("expected bevel");
        };
        assert_eq!(bevel.style, BevelStyle::PillowEmboss);
        assert_eq!(bevel.technique, BevelTechnique::ChiselSoft);
        assert_eq!(bevel.direction, BevelDirection::Down);
        assert_eq!(bevel.depth, 1000.0);
        assert_eq!(bevel.altitude, 90.0);
    }

    #[test]
    fn test_unknown_enum_value_uses_default() {
        let desc = Descriptor::new("SoFi").with("Md  ", enumerated("BlnM", "Wrdd"));
        let LayerEffect::ColorOverlay(overlay) = effect("SoFi", desc) else {
            panic!("expected color overlay");
        };
        assert_eq!(overlay.blend_mode, BlendMode::Normal);
        assert_eq!(overlay.opacity, 1.0);
    }

    #[test]
    fn test_long_form_blend_mode() {
        let desc = Descriptor::new("FrFX")
            .with("Md  ", enumerated("BlnM", "linearDodge"))
            .with("Styl", enumerated("FStl", "InsF"))
            .with("Sz  ", unit("#Pxl", 7.0));
        let LayerEffect::Stroke(stroke) = effect("FrFX", desc) else {
            panic!("expected stroke");
        };
        assert_eq!(stroke.blend_mode, BlendMode::LinearDodge);
        assert_eq!(stroke.position, StrokePosition::Inside);
        assert_eq!(stroke.size, 7.0);
    }

    #[test]
    fn test_gradient_stops_are_normalized_and_sorted() {
        let grad = Descriptor::new("Grdn")
            .with("Intr", TaggedValue::Float(4096.0))
            .with(
                "Clrs",
                TaggedValue::List(vec![
                    stop(4096.0, rgb(0.0, 0.0, 255.0)),
                    stop(0.0, rgb(255.0, 0.0, 0.0)),
                ]),
            );
        let desc = Descriptor::new("GrFl")
            .with("Grad", TaggedValue::Object(grad))
            .with("Type", enumerated("GrdT", "Rdl "))
            .with("Scl ", unit("#Prc", 400.0));

        let LayerEffect::GradientOverlay(gradient) = effect("GrFl", desc) else {
            panic!("expected gradient overlay");
        };
        assert_eq!(gradient.stops.len(), 2);
        assert_eq!(gradient.stops[0].position, 0.0);
        assert_eq!(gradient.stops[0].color, Color::rgb(255, 0, 0));
        assert_eq!(gradient.stops[1].position, 1.0);
        assert_eq!(gradient.stops[1].color, Color::rgb(0, 0, 255));
        assert_eq!(gradient.style, GradientStyle::Radial);
        assert_eq!(gradient.angle, 90.0);
        assert_eq!(gradient.scale, 150.0);
    }

    #[test]
    fn test_gradient_zero_interpolation_uses_default() {
        let grad = Descriptor::new("Grdn")
            .with("Intr", TaggedValue::Float(0.0))
            .with("Clrs", TaggedValue::List(vec![stop(2048.0, rgb(1.0, 2.0, 3.0))]));
        let desc = Descriptor::new("GrFl").with("Grad", TaggedValue::Object(grad));

        let LayerEffect::GradientOverlay(gradient) = effect("GrFl", desc) else {
            panic!("expected gradient overlay");
        };
        assert_eq!(gradient.stops.len(), 1);
        assert_eq!(gradient.stops[0].position, 0.5);
    }

    #[test]
    fn test_missing_gradient_is_white_to_black() {
        let LayerEffect::GradientOverlay(gradient) = effect("GrFl", Descriptor::new("GrFl"))
        else {
            panic!("expected gradient overlay");
        };
        assert_eq!(gradient.stops[0].color, Color::WHITE);
        assert_eq!(gradient.stops[1].color, Color::BLACK);
    }

    #[test]
    fn test_nan_percent_uses_default() {
        let desc = Descriptor::new("SoFi").with("Opct", TaggedValue::Float(f64::NAN));
        let LayerEffect::ColorOverlay(overlay) = effect("SoFi", desc) else {
            panic!("expected color overlay");
        };
        assert_eq!(overlay.opacity, 1.0);

        let desc = Descriptor::new("FrFX").with("Opct", unit("#Prc", f64::NAN));
        let LayerEffect::Stroke(stroke) = effect("FrFX", desc) else {
            panic!("expected stroke");
        };
        assert_eq!(stroke.opacity, 1.0);
    }

    #[test]
    fn test_non_finite_angle_falls_through() {
        let desc = Descriptor::new("DrSh")
            .with("lagl", unit("#Ang", f64::NAN))
            .with("Angl", unit("#Ang", 30.0));
        let LayerEffect::DropShadow(shadow) = effect("DrSh", desc) else {
            panic!("expected drop shadow");
        };
        assert_eq!(shadow.angle, 30.0);

        let desc = Descriptor::new("ebbl")
            .with("lagl", TaggedValue::Float(f64::INFINITY))
            .with("Angl", TaggedValue::Float(f64::NEG_INFINITY));
        let LayerEffect::BevelEmboss(bevel) = effect("ebbl", desc) else {
            panic!("expected bevel");
        };
        assert_eq!(bevel.angle, 120.0);
    }

    #[test]
    fn test_gradient_without_interpolation_uses_4096() {
        let grad = Descriptor::new("Grdn")
            .with("Clrs", TaggedValue::List(vec![stop(2048.0, rgb(9.0, 9.0, 9.0))]));
        let desc = Descriptor::new("GrFl").with("Grad", TaggedValue::Object(grad));
        let LayerEffect::GradientOverlay(gradient) = effect("GrFl", desc) else {
            panic!("expected gradient overlay");
        };
        assert_eq!(gradient.stops.len(), 1);
        assert_eq!(gradient.stops[0].position, 0.5);
        assert_eq!(gradient.stops[0].color, Color::rgb(9, 9, 9));
    }

    #[test]
    fn test_gradient_infinite_interpolation_uses_4096() {
        let grad = Descriptor::new("Grdn")
            .with("Intr", TaggedValue::Float(f64::INFINITY))
            .with("Clrs", TaggedValue::List(vec![stop(1024.0, rgb(0.0, 0.0, 0.0))]));
        let desc = Descriptor::new("GrFl").with("Grad", TaggedValue::Object(grad));
        let LayerEffect::GradientOverlay(gradient) = effect("GrFl", desc) else {
            panic!("expected gradient overlay");
        };
        assert_eq!(gradient.stops[0].position, 0.25);
    }

    #[test]
    fn test_undecodable_stops_are_white_to_black() {
        let no_color =
            TaggedValue::Object(Descriptor::new("Clrt").with("Lctn", TaggedValue::Integer(0)));
        let no_location =
            TaggedValue::Object(Descriptor::new("Clrt").with("Clr ", rgb(1.0, 1.0, 1.0)));
        let grad = Descriptor::new("Grdn")
            .with("Intr", TaggedValue::Float(4096.0))
            .with(
                "Clrs",
                TaggedValue::List(vec![no_color, no_location, TaggedValue::Integer(7)]),
            );
        let desc = Descriptor::new("GrFl").with("Grad", TaggedValue::Object(grad));

        let LayerEffect::GradientOverlay(gradient) = effect("GrFl", desc) else {
            panic!("expected gradient overlay");
        };
        assert_eq!(
            gradient.stops,
            vec![
                GradientStop {
                    position: 0.0,
                    color: Color::WHITE,
                },
                GradientStop {
                    position: 1.0,
                    color: Color::BLACK,
                },
            ]
        );
    }

    #[test]
    fn test_unsupported_keys() {
        let items = ItemMap::new();
        assert_eq!(map_effect("ChFX", &items), MappedEffect::Skipped("Satin".into()));
        assert_eq!(map_effect("Xyzw", &items), MappedEffect::Skipped("Xyzw".into()));
        assert!(is_effect_key("patternFill"));
        assert!(!is_effect_key("Nm  "));
    }
}
