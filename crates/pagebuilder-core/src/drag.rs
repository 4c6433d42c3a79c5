//! Drag gesture state machine for placing, moving and resizing elements.
//!
//! A gesture goes `Idle → Pending → Dragging → Idle`. The press stays
//! pending until the pointer travels past the activation distance. While
//! dragging, every pointer move snaps a candidate position (or size) to the
//! grid and commits it through the store unless it would overlap another
//! element. A rejected tick leaves the element where it is but keeps the
//! gesture alive.
//!
//! All pointer coordinates are canvas coordinates.

use crate::element::{Element, ElementId, ElementUpdate, Style};
use crate::placement::{self, Placement};
use crate::snap::{snap_offset, snap_point, snap_size};
use crate::store::{Store, StoreError};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Id prefix used by palette draggables.
pub const PALETTE_ID_PREFIX: &str = "toolbar-";

/// Data carried by a draggable: `{ type }` for palette items,
/// `{ type, component }` for elements already on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Element>,
}

/// What a gesture is dragging.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A palette item; dropping it on the canvas creates an element.
    Palette { tag: String },
    /// An element on the canvas being moved.
    Element { id: ElementId },
    /// The resize handle of an element on the canvas.
    Resize { id: ElementId },
}

impl DragSource {
    /// Classify a draggable by its id and payload.
    ///
    /// A payload carrying a `component` is a move of that component. Without
    /// one, ids with the palette prefix are palette items and anything else
    /// is taken as the id of a canvas element.
    pub fn from_draggable(draggable_id: &str, payload: &DragPayload) -> Self {
        if let Some(component) = &payload.component {
            return DragSource::Element {
                id: component.id.clone(),
            };
        }
        if draggable_id.starts_with(PALETTE_ID_PREFIX) {
            DragSource::Palette {
                tag: payload.tag.clone(),
            }
        } else {
            DragSource::Element {
                id: ElementId::from(draggable_id),
            }
        }
    }

    /// Id of the canvas element this gesture acts on.
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            DragSource::Element { id } | DragSource::Resize { id } => Some(id),
            DragSource::Palette { .. } => None,
        }
    }
}

/// Where the pointer was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Canvas,
    Outside,
}

/// An activated drag.
#[derive(Debug, Clone)]
pub struct ActiveDrag {
    pub source: DragSource,
    /// Pointer position at press.
    pub start: Point,
    /// Element position captured at activation.
    pub origin: Point,
    /// Element size captured at activation.
    pub origin_size: Size,
    /// Element style before the gesture, for cancellation.
    original_style: Option<Style>,
    /// Number of ticks committed to the store.
    pub commits: usize,
}

/// State of the drag controller.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed, activation distance not yet exceeded.
    Pending { source: DragSource, start: Point },
    Dragging(ActiveDrag),
}

/// Result of a pointer move.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// No gesture in progress.
    Ignored,
    /// Still below the activation distance.
    Pending,
    /// Palette drag: where the element would be created.
    Preview(Point),
    /// The snapped move or resize was committed.
    Committed(Placement),
    /// The snapped candidate overlapped another element.
    Rejected { collided_with: ElementId },
    /// The snapped candidate equals the current state.
    Unchanged,
}

/// Result of releasing or cancelling a gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// No gesture in progress.
    Ignored,
    /// Released before activation.
    Click(DragSource),
    /// A palette drop created a new element.
    Created(ElementId),
    /// A move or resize finished over the canvas.
    Finished { id: ElementId, commits: usize },
    /// The gesture ended without a drop. `reverted` tells whether committed
    /// ticks were rolled back.
    Cancelled { reverted: bool },
}

/// Tunables for the drag controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSettings {
    pub grid_size: f64,
    pub activation_distance: f64,
    pub default_size: Size,
}

/// Drives one drag gesture at a time against a [`Store`].
#[derive(Debug, Clone)]
pub struct DragController {
    settings: DragSettings,
    state: DragState,
}

impl DragController {
    pub fn new(settings: DragSettings) -> Self {
        Self {
            settings,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn settings(&self) -> &DragSettings {
        &self.settings
    }

    /// Whether a gesture has activated.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Whether any press or gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Start a press on `source`. Ignored while another gesture is active.
    pub fn pointer_down(&mut self, source: DragSource, pointer: Point) {
        if self.is_active() {
            log::warn!("Pointer down on {:?} ignored: gesture already active", source);
            return;
        }
        self.state = DragState::Pending {
            source,
            start: pointer,
        };
    }

    /// Track the pointer, activating and committing moves as needed.
    pub fn pointer_move(&mut self, pointer: Point, store: &mut Store) -> MoveOutcome {
        if let DragState::Pending { source, start } = &self.state {
            if (pointer - *start).hypot() <= self.settings.activation_distance {
                return MoveOutcome::Pending;
            }
            let (source, start) = (source.clone(), *start);
            match self.activate(source, start, store) {
                Some(drag) => self.state = DragState::Dragging(drag),
                None => {
                    self.state = DragState::Idle;
                    return MoveOutcome::Ignored;
                }
            }
        }

        let settings = self.settings;
        let DragState::Dragging(drag) = &mut self.state else {
            return MoveOutcome::Ignored;
        };
        let delta = pointer - drag.start;

        let placement = match &drag.source {
            DragSource::Palette { .. } => {
                return MoveOutcome::Preview(snap_point(pointer, settings.grid_size).point);
            }
            DragSource::Element { id } => {
                let position = snap_offset(drag.origin, delta, settings.grid_size);
                placement::try_move(store, id, position, settings.default_size)
            }
            DragSource::Resize { id } => {
                let size = snap_size(drag.origin_size + delta.to_size(), settings.grid_size);
                placement::try_resize(store, id, size, settings.default_size)
            }
        };

        match placement {
            Placement::Accepted(_) => {
                drag.commits += 1;
                MoveOutcome::Committed(placement)
            }
            Placement::Rejected { collided_with } => MoveOutcome::Rejected { collided_with },
            Placement::Unchanged => MoveOutcome::Unchanged,
            Placement::Missing => {
                log::warn!("Dragged element disappeared; ending gesture");
                self.state = DragState::Idle;
                MoveOutcome::Ignored
            }
        }
    }

    /// Release the pointer over `target`.
    ///
    /// Palette drops over the canvas create a new element at the snapped
    /// pointer position. Moves and resizes keep whatever was committed,
    /// wherever the pointer is released.
    pub fn pointer_up(
        &mut self,
        pointer: Point,
        target: DropTarget,
        store: &mut Store,
    ) -> Result<DragOutcome, StoreError> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => Ok(DragOutcome::Ignored),
            DragState::Pending { source, .. } => Ok(DragOutcome::Click(source)),
            DragState::Dragging(drag) => match (drag.source, target) {
                (DragSource::Palette { tag }, DropTarget::Canvas) => {
                    let position = snap_point(pointer, self.settings.grid_size).point;
                    let element = Element::from_palette(
                        ElementId::generate(),
                        &tag,
                        position,
                        self.settings.default_size,
                    );
                    let id = element.id.clone();
                    store.add(element)?;
                    log::debug!("Dropped new {} at {:?}", tag, position);
                    Ok(DragOutcome::Created(id))
                }
                (DragSource::Palette { .. }, DropTarget::Outside) => {
                    Ok(DragOutcome::Cancelled { reverted: false })
                }
                (DragSource::Element { id } | DragSource::Resize { id }, DropTarget::Canvas) => {
                    Ok(DragOutcome::Finished {
                        id,
                        commits: drag.commits,
                    })
                }
                (DragSource::Element { .. } | DragSource::Resize { .. }, DropTarget::Outside) => {
                    Ok(DragOutcome::Cancelled { reverted: false })
                }
            },
        }
    }

    /// Abort the gesture (e.g. on Escape).
    ///
    /// A move or resize that already committed ticks is restored to its
    /// pre-drag style with one more update, unless the element already has
    /// that style (e.g. the ticks were undone mid-drag).
    pub fn cancel(&mut self, store: &mut Store) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Pending { .. } => DragOutcome::Cancelled { reverted: false },
            DragState::Dragging(drag) => {
                let reverted = match (drag.source.element_id(), drag.original_style) {
                    (Some(id), Some(style)) if drag.commits > 0 => {
                        let current = store.get(id).map(|element| &element.style);
                        current.is_some_and(|current| *current != style)
                            && store.update(id, ElementUpdate::new().style(style))
                    }
                    _ => false,
                };
                if reverted {
                    log::debug!("Drag cancelled; restored pre-drag state");
                }
                DragOutcome::Cancelled { reverted }
            }
        }
    }

    fn activate(&self, source: DragSource, start: Point, store: &Store) -> Option<ActiveDrag> {
        let (origin, origin_size, original_style) = match source.element_id() {
            Some(id) => {
                let Some(element) = store.get(id) else {
                    log::warn!("Drag started on unknown element {}", id);
                    return None;
                };
                (
                    element.position(),
                    element.size(self.settings.default_size),
                    Some(element.style.clone()),
                )
            }
            None => (start, self.settings.default_size, None),
        };
        Some(ActiveDrag {
            source,
            start,
            origin,
            origin_size,
            original_style,
            commits: 0,
        })
    }
}
