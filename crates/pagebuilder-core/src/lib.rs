//! Page Builder Core Library
//!
//! Platform-agnostic document model, undo history, grid placement and code
//! export for the drag-and-drop page builder.

pub mod builder;
pub mod config;
pub mod document;
pub mod drag;
pub mod element;
pub mod export;
pub mod geometry;
pub mod history;
pub mod inspector;
pub mod palette;
pub mod placement;
pub mod shortcuts;
pub mod snap;
pub mod storage;
pub mod store;

pub use builder::Builder;
pub use config::{BuilderConfig, ConfigError};
pub use document::Document;
pub use drag::{DragController, DragOutcome, DragPayload, DragSource, DragState, DropTarget, MoveOutcome};
pub use element::{Element, ElementError, ElementId, ElementKind, ElementUpdate, Style, StyleValue};
pub use export::{CodeExporter, ExportArtifact, ExportOptions, export_document};
pub use geometry::rects_overlap;
pub use history::History;
pub use palette::{Palette, PaletteItem};
pub use placement::Placement;
pub use shortcuts::{Command, Modifiers, Shortcut, ShortcutRegistry};
pub use snap::{GRID_SIZE, SnapResult, snap_point, snap_to_grid};
pub use storage::{Storage, StorageError};
pub use store::{Store, StoreError};

pub use kurbo::{Point, Rect, Size, Vec2};
