//! Inline CSS for guide primitives.

use kurbo::Rect;
use pageguide_core::config::GuideColor;
use pageguide_core::surface::LineStyle;

/// Format a number without trailing zeros.
fn number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// A length in CSS pixels.
pub fn px(value: f64) -> String {
    format!("{}px", number(value))
}

/// An `rgba()` color.
pub fn css_color(color: GuideColor) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        color.r,
        color.g,
        color.b,
        number(color.alpha())
    )
}

/// Properties set once when a primitive is created. Primitives start hidden.
pub fn base_properties(style: &LineStyle) -> Vec<(&'static str, String)> {
    vec![
        ("position", "absolute".to_string()),
        ("pointer-events", "none".to_string()),
        ("display", "none".to_string()),
        ("z-index", style.z_index.to_string()),
        ("box-sizing", "border-box".to_string()),
        ("background-color", css_color(style.color)),
    ]
}

/// Properties that move a primitive over `rect` and show it.
pub fn placement_properties(rect: Rect) -> [(&'static str, String); 5] {
    [
        ("left", px(rect.x0)),
        ("top", px(rect.y0)),
        ("width", px(rect.width())),
        ("height", px(rect.height())),
        ("display", "block".to_string()),
    ]
}
