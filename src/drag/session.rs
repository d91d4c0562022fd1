use egui::{Pos2, Vec2};

use super::types::{DragConstraints, DragSessionId, ElementId, PointerId};

/// One press → move → release interaction.
///
/// Created on press and dropped on release; only the owning
/// [`super::PointerDragController`] can construct or mutate it.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    id: DragSessionId,
    pointer: PointerId,
    target: ElementId,
    grab_offset: Vec2,
    constraints: DragConstraints,
    start_pos: Pos2,
    start_scroll: Vec2,
    pub(super) last_pos: Pos2,
    pub(super) auto_scroll_steps: u32,
}

impl DragSession {
    pub(super) fn new(
        id: DragSessionId,
        pointer: PointerId,
        target: ElementId,
        grab_offset: Vec2,
        constraints: DragConstraints,
        start_pos: Pos2,
        start_scroll: Vec2,
    ) -> Self {
        Self {
            id,
            pointer,
            target,
            grab_offset,
            constraints,
            start_pos,
            start_scroll,
            last_pos: start_pos,
            auto_scroll_steps: 0,
        }
    }

    pub fn id(&self) -> DragSessionId {
        self.id
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Pointer position relative to the target's top-left at press time.
    pub fn grab_offset(&self) -> Vec2 {
        self.grab_offset
    }

    pub fn constraints(&self) -> DragConstraints {
        self.constraints
    }

    /// Target top-left (viewport coordinates) when the session started.
    pub fn start_pos(&self) -> Pos2 {
        self.start_pos
    }

    pub fn start_scroll(&self) -> Vec2 {
        self.start_scroll
    }

    /// Where an axis-locked coordinate sits in the viewport at `scroll_offset`.
    ///
    /// The lock is kept in document space, so the target follows its container when the
    /// page scrolls mid-drag.
    pub fn locked_pos(&self, scroll_offset: Vec2) -> Pos2 {
        self.start_pos + self.start_scroll - scroll_offset
    }

    /// Last applied target top-left, viewport coordinates.
    pub fn last_pos(&self) -> Pos2 {
        self.last_pos
    }

    /// Number of move events that scrolled the viewport.
    pub fn auto_scroll_steps(&self) -> u32 {
        self.auto_scroll_steps
    }
}
