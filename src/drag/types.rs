use egui::{Pos2, Vec2};

/// Handle of an element in the host document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ElementId(pub u32);

/// Logical pointer: the mouse, or one finger of a touch screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

pub type DragSessionId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// `hit` is the innermost element under the pointer, if any.
    Press { hit: Option<ElementId> },
    Move,
    Release,
}

/// A pointer lifecycle event as delivered by the host.
///
/// `pos` is in page coordinates (viewport position plus scroll offset).
/// `None` (or a non-finite position) marks a malformed event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub kind: PointerEventKind,
    pub pos: Option<Pos2>,
}

impl PointerEvent {
    pub fn press(pointer: PointerId, hit: Option<ElementId>, pos: Pos2) -> Self {
        Self {
            pointer,
            kind: PointerEventKind::Press { hit },
            pos: Some(pos),
        }
    }

    pub fn moved(pointer: PointerId, pos: Pos2) -> Self {
        Self {
            pointer,
            kind: PointerEventKind::Move,
            pos: Some(pos),
        }
    }

    pub fn release(pointer: PointerId, pos: Option<Pos2>) -> Self {
        Self {
            pointer,
            kind: PointerEventKind::Release,
            pos,
        }
    }

    /// The page position, if present and finite.
    pub(crate) fn page_pos(&self) -> Option<Pos2> {
        self.pos.filter(|p| p.x.is_finite() && p.y.is_finite())
    }
}

/// How an element's offsets are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PositionMode {
    /// Placed by document flow; offsets are ignored.
    #[default]
    Flow,
    /// Floating: offsets are viewport coordinates, unaffected by scrolling.
    Fixed,
    /// Offsets are document (page) coordinates; scrolls with the page.
    Absolute,
}

/// Which coordinates a drag may change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DragAxis {
    #[default]
    Both,
    /// Only `x` follows the pointer (slider thumbs).
    Horizontal,
    Vertical,
}

/// The box a dragged element must stay inside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DragBounds {
    #[default]
    Viewport,
    /// The current bounding box of another element, e.g. a slider track.
    Element(ElementId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DragConstraints {
    pub axis: DragAxis,
    pub bounds: DragBounds,
    /// Leave the element under its parent instead of floating it to the top layer,
    /// whatever [`super::DragOptions::float_to_top_layer`] says.
    pub keep_parent: bool,
}

impl DragConstraints {
    pub fn slider(track: ElementId) -> Self {
        Self {
            axis: DragAxis::Horizontal,
            bounds: DragBounds::Element(track),
            keep_parent: true,
        }
    }
}

/// What [`super::PointerDragController::handle_event`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    Started {
        session: DragSessionId,
        target: ElementId,
        grab_offset: Vec2,
    },
    Moved {
        target: ElementId,
        /// Applied top-left, viewport coordinates.
        pos: Pos2,
        /// Scroll actually performed by auto-scroll on this move.
        scrolled: Vec2,
    },
    Ended {
        target: ElementId,
        /// Final top-left, document coordinates.
        document_pos: Pos2,
    },
}
