use egui::{Pos2, Rect, Vec2};
use itertools::Itertools as _;

use crate::drag::{
    DomMutation, ElementId, PointerId, PositionMode, ScrollControl, ViewportGeometry, center_in,
};

/// One box in a [`DragScene`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneElement {
    pub label: String,
    pub parent: Option<ElementId>,
    /// Flow box, relative to the parent's top-left (or the document origin for top-level elements).
    pub layout_rect: Rect,
    pub mode: PositionMode,
    /// Used by [`PositionMode::Fixed`] (viewport) and [`PositionMode::Absolute`] (document).
    pub offset: Pos2,
    /// Whether a press on this element (or a descendant) starts a drag of it.
    pub draggable: bool,
    pub raised: bool,
    seq: u64,
}

/// A small retained document: nested boxes, a scrollable viewport and
/// document-level pointer listeners.
///
/// Implements the host traits so a [`crate::PointerDragController`] can drive it
/// directly, both in the demo and in tests.
#[derive(Debug)]
pub struct DragScene {
    elements: ahash::HashMap<ElementId, SceneElement>,
    next_id: u32,
    next_seq: u64,
    viewport_size: Vec2,
    document_size: Vec2,
    scroll_offset: Vec2,
    document_listeners: ahash::HashSet<PointerId>,
}

impl DragScene {
    pub fn new(viewport_size: Vec2, document_size: Vec2) -> Self {
        Self {
            elements: Default::default(),
            next_id: 0,
            next_seq: 0,
            viewport_size,
            document_size: document_size.max(viewport_size),
            scroll_offset: Vec2::ZERO,
            document_listeners: Default::default(),
        }
    }

    fn allocate_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Add a flow-positioned box. A `parent` that does not exist is treated as `None`.
    pub fn add_element(
        &mut self,
        parent: Option<ElementId>,
        label: impl Into<String>,
        layout_rect: Rect,
        draggable: bool,
    ) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        let seq = self.allocate_seq();
        let parent = parent.filter(|p| self.elements.contains_key(p));
        self.elements.insert(
            id,
            SceneElement {
                label: label.into(),
                parent,
                layout_rect,
                mode: PositionMode::Flow,
                offset: Pos2::ZERO,
                draggable,
                raised: false,
                seq,
            },
        );
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.get(&id)
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size;
        self.document_size = self.document_size.max(size);
        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
    }

    pub fn document_size(&self) -> Vec2 {
        self.document_size
    }

    pub fn scroll_to(&mut self, offset: Vec2) {
        self.scroll_offset = self.clamp_scroll(offset);
    }

    fn clamp_scroll(&self, offset: Vec2) -> Vec2 {
        let max = (self.document_size - self.viewport_size).max(Vec2::ZERO);
        offset.clamp(Vec2::ZERO, max)
    }

    pub fn is_listening(&self, pointer: PointerId) -> bool {
        self.document_listeners.contains(&pointer)
    }

    /// Bounding box in document coordinates.
    pub fn document_rect(&self, id: ElementId) -> Option<Rect> {
        let element = self.elements.get(&id)?;
        let size = element.layout_rect.size();
        Some(match element.mode {
            PositionMode::Flow => {
                let origin = match element.parent {
                    Some(parent) => self.document_rect(parent)?.min,
                    None => Pos2::ZERO,
                };
                element.layout_rect.translate(origin.to_vec2())
            }
            PositionMode::Absolute => Rect::from_min_size(element.offset, size),
            PositionMode::Fixed => Rect::from_min_size(element.offset + self.scroll_offset, size),
        })
    }

    /// Place a flow element in the middle of its parent (or of the document).
    pub fn center_in_parent(&mut self, id: ElementId) {
        let Some(element) = self.elements.get(&id) else {
            return;
        };
        let container_size = match element.parent {
            Some(parent) => self.document_rect(parent).map(|r| r.size()),
            None => Some(self.document_size),
        };
        let Some(container_size) = container_size else {
            return;
        };
        let size = element.layout_rect.size();
        let min = center_in(Rect::from_min_size(Pos2::ZERO, container_size), size);
        if let Some(element) = self.elements.get_mut(&id) {
            element.layout_rect = Rect::from_min_size(min, size);
        }
    }

    fn depth(&self, id: ElementId) -> usize {
        let mut depth = 0;
        let mut current = self.elements.get(&id).and_then(|e| e.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.elements.get(&parent).and_then(|e| e.parent);
        }
        depth
    }

    fn root_of(&self, id: ElementId) -> ElementId {
        let mut current = id;
        while let Some(parent) = self.elements.get(&current).and_then(|e| e.parent) {
            current = parent;
        }
        current
    }

    /// Elements back to front: raised trees last, then by when each tree was
    /// (re)attached to the top layer, parents before children.
    pub fn paint_order(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter_map(|(&id, element)| {
                let root = self.elements.get(&self.root_of(id))?;
                let raised = element.raised || root.raised;
                Some(((raised, root.seq, self.depth(id), element.seq), id))
            })
            .sorted_by_key(|(key, _)| *key)
            .map(|(_, id)| id)
            .collect()
    }

    /// Topmost element under a viewport position.
    pub fn hit_test(&self, pos: Pos2) -> Option<ElementId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|&id| self.bounding_rect(id).is_some_and(|r| r.contains(pos)))
    }
}

impl ViewportGeometry for DragScene {
    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        self.document_rect(element)
            .map(|r| r.translate(-self.scroll_offset))
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }
}

impl ScrollControl for DragScene {
    fn scroll_by(&mut self, delta: Vec2) -> Vec2 {
        let before = self.scroll_offset;
        self.scroll_offset = self.clamp_scroll(before + delta);
        self.scroll_offset - before
    }
}

impl DomMutation for DragScene {
    fn resolve_drag_handle(&self, hit: ElementId) -> Option<ElementId> {
        let mut current = Some(hit);
        while let Some(id) = current {
            let element = self.elements.get(&id)?;
            if element.draggable {
                return Some(id);
            }
            current = element.parent;
        }
        None
    }

    fn float_to_top_layer(&mut self, element: ElementId) {
        let seq = self.allocate_seq();
        if let Some(e) = self.elements.get_mut(&element) {
            e.parent = None;
            e.seq = seq;
        }
    }

    fn set_position(&mut self, element: ElementId, mode: PositionMode, pos: Pos2) {
        if let Some(e) = self.elements.get_mut(&element) {
            e.mode = mode;
            e.offset = pos;
        }
    }

    fn set_raised(&mut self, element: ElementId, raised: bool) {
        if let Some(e) = self.elements.get_mut(&element) {
            e.raised = raised;
        }
    }

    fn listen_document_pointer(&mut self, pointer: PointerId) {
        self.document_listeners.insert(pointer);
    }

    fn unlisten_document_pointer(&mut self, pointer: PointerId) {
        self.document_listeners.remove(&pointer);
    }
}
