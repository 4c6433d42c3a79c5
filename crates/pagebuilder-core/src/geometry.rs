//! Rectangle overlap and pixel-value helpers used by placement.

use kurbo::Rect;

/// Test whether two axis-aligned rectangles overlap.
///
/// Rectangles that only share an edge (or a corner) are *not* overlapping;
/// any intersection with nonzero area is. Elements placed flush against
/// each other on the grid are therefore allowed.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    let a = a.abs();
    let b = b.abs();
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Parse a pixel style value of the form `"<integer>px"`.
///
/// A bare number is accepted as pixels too. Anything else (percentages,
/// `auto`, empty strings) yields `None`, meaning "unset".
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Format a pixel value as `"<integer>px"`.
pub fn format_px(value: f64) -> String {
    format!("{}px", value.round() as i64)
}
