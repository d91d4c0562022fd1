use egui::{Pos2, Rect, Vec2};

use super::types::{ElementId, PointerId, PositionMode};

/// Layout queries the controller needs from the host document.
pub trait ViewportGeometry {
    /// Bounding box of `element` in viewport coordinates, `None` if it no longer exists.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Size of the visible area.
    fn viewport_size(&self) -> Vec2;

    /// How far the document is scrolled; page = viewport + scroll offset.
    fn scroll_offset(&self) -> Vec2;
}

pub trait ScrollControl {
    /// Shift the viewport by `delta`. Returns the delta that was actually applied,
    /// which is smaller when the document edge is reached.
    fn scroll_by(&mut self, delta: Vec2) -> Vec2;
}

/// Document mutations performed while dragging.
pub trait DomMutation {
    /// Walk from the element under the pointer to the draggable element it belongs to.
    fn resolve_drag_handle(&self, hit: ElementId) -> Option<ElementId>;

    /// Move `element` to the top-level layer so it can float above its siblings.
    fn float_to_top_layer(&mut self, element: ElementId);

    fn set_position(&mut self, element: ElementId, mode: PositionMode, pos: Pos2);

    fn set_raised(&mut self, element: ElementId, raised: bool);

    /// Start routing move/release events of `pointer` from the whole document.
    fn listen_document_pointer(&mut self, pointer: PointerId);

    fn unlisten_document_pointer(&mut self, pointer: PointerId);
}

/// Everything a [`super::PointerDragController`] talks to.
pub trait DragHost: ViewportGeometry + ScrollControl + DomMutation {}

impl<T: ViewportGeometry + ScrollControl + DomMutation + ?Sized> DragHost for T {}
