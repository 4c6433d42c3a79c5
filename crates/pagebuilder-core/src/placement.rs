//! Collision-checked placement of elements on the canvas.
//!
//! Placement uses each element's stored pixel box (or the default size when
//! no pixel width/height is stored). That box can disagree with what the
//! renderer draws when CSS sizes an element with non-pixel units.

use crate::document::Document;
use crate::element::{ElementId, Style};
use crate::geometry::rects_overlap;
use crate::store::Store;
use kurbo::{Point, Rect, Size};

/// Result of a placement attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// The new box was committed to the store.
    Accepted(Rect),
    /// The new box overlaps another element; nothing changed.
    Rejected { collided_with: ElementId },
    /// The element already occupies the requested box.
    Unchanged,
    /// No element has the given id.
    Missing,
}

impl Placement {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Placement::Accepted(_))
    }
}

/// Find the first top-level element overlapping `rect`, ignoring `exclude`
/// and its enclosing top-level container.
pub fn find_collision(
    document: &Document,
    exclude: &ElementId,
    rect: Rect,
    default_size: Size,
) -> Option<ElementId> {
    document
        .other_bounds(exclude, default_size)
        .find(|(_, other)| rects_overlap(rect, *other))
        .map(|(id, _)| id.clone())
}

/// Move an element so its top-left corner sits at `position`.
///
/// The element keeps its current size. The move is rejected if the new
/// box overlaps another element.
pub fn try_move(store: &mut Store, id: &ElementId, position: Point, default_size: Size) -> Placement {
    let Some(element) = store.get(id) else {
        return Placement::Missing;
    };
    let current = element.bounds(default_size);
    let candidate = Rect::from_origin_size(position, current.size());
    if candidate == current && element.style.contains(Style::LEFT) && element.style.contains(Style::TOP) {
        return Placement::Unchanged;
    }
    if let Some(other) = find_collision(store.document(), id, candidate, default_size) {
        log::debug!("Move of {} to {:?} blocked by {}", id, position, other);
        return Placement::Rejected { collided_with: other };
    }

    store.update_with(id, |element| {
        element.style.set("position", "absolute");
        element.style.set_px(Style::LEFT, position.x);
        element.style.set_px(Style::TOP, position.y);
        element.style.set("zIndex", 1);
    });
    Placement::Accepted(candidate)
}

/// Resize an element to `size`, keeping its top-left corner.
///
/// The resize is rejected if the new box overlaps another element.
pub fn try_resize(store: &mut Store, id: &ElementId, size: Size, default_size: Size) -> Placement {
    let Some(element) = store.get(id) else {
        return Placement::Missing;
    };
    let current = element.bounds(default_size);
    let candidate = Rect::from_origin_size(current.origin(), size);
    if candidate == current
        && element.style.px(Style::WIDTH).is_some()
        && element.style.px(Style::HEIGHT).is_some()
    {
        return Placement::Unchanged;
    }
    if let Some(other) = find_collision(store.document(), id, candidate, default_size) {
        log::debug!("Resize of {} to {:?} blocked by {}", id, size, other);
        return Placement::Rejected { collided_with: other };
    }

    store.update_with(id, |element| {
        element.style.set_px(Style::WIDTH, size.width);
        element.style.set_px(Style::HEIGHT, size.height);
    });
    Placement::Accepted(candidate)
}
