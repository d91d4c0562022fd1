use std::collections::VecDeque;

use egui::{Pos2, Rect, Vec2};
use itertools::Itertools as _;

mod debug;
mod error;
mod geometry;
mod host;
mod options;
#[cfg(feature = "persistence")]
mod persistence;
mod session;
mod types;


pub use error::DragRejection;
pub use geometry::{ElementCoords, auto_scroll_delta, center_in, clamp_top_left, element_coords};
pub use host::{DomMutation, DragHost, ScrollControl, ViewportGeometry};
pub use options::DragOptions;
#[cfg(feature = "persistence")]
pub use persistence::{OPTIONS_SNAPSHOT_VERSION, OptionsPersistenceError, OptionsSnapshot};
pub use session::DragSession;
pub use types::{
    DragAxis, DragBounds, DragConstraints, DragOutcome, DragSessionId, ElementId, PointerEvent,
    PointerEventKind, PointerId, PositionMode,
};

use geometry::{is_finite_rect, page_to_viewport, viewport_rect, viewport_to_document};

/// Turns press → move → release pointer sequences into element repositioning.
///
/// Per pointer the controller is either idle (no entry) or dragging exactly one
/// [`DragSession`]. All document access goes through a [`DragHost`], so the
/// controller itself holds no reference to any UI.
///
/// Behavior:
/// - Press: records the grab offset, floats the target to the top layer without moving
///   it on screen, raises it, and starts listening to the pointer document-wide.
/// - Move: keeps the grab offset under the pointer, clamps into the bounds and
///   auto-scrolls while the target is pinned to the top or bottom viewport edge.
/// - Release: converts the final position to document coordinates and leaves the
///   target there.
///
/// Unusable events are dropped silently (see [`DragRejection`]).
#[derive(Debug, Default)]
pub struct PointerDragController {
    pub options: DragOptions,

    sessions: ahash::HashMap<PointerId, DragSession>,
    constraints: ahash::HashMap<ElementId, DragConstraints>,
    next_session_id: DragSessionId,

    debug_log: VecDeque<String>,
    debug_event_seq: u64,
}

impl PointerDragController {
    pub fn new(options: DragOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Route one pointer event to the matching operation.
    pub fn handle_event<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: PointerEvent,
    ) -> Option<DragOutcome> {
        match event.kind {
            PointerEventKind::Press { .. } => {
                self.begin_drag(host, event).map(|session| DragOutcome::Started {
                    session: session.id(),
                    target: session.target(),
                    grab_offset: session.grab_offset(),
                })
            }
            PointerEventKind::Move => {
                self.debug_event_seq += 1;
                match self.try_move(host, event) {
                    Ok((target, pos, scrolled)) => Some(DragOutcome::Moved {
                        target,
                        pos,
                        scrolled,
                    }),
                    Err(rejection) => {
                        self.note_rejection(rejection);
                        None
                    }
                }
            }
            PointerEventKind::Release => {
                self.debug_event_seq += 1;
                match self.try_end(host, event.pointer) {
                    Ok((target, document_pos)) => Some(DragOutcome::Ended {
                        target,
                        document_pos,
                    }),
                    Err(rejection) => {
                        self.note_rejection(rejection);
                        None
                    }
                }
            }
        }
    }

    /// Start a session for the press, if it hits a draggable element.
    pub fn begin_drag<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        press: PointerEvent,
    ) -> Option<&DragSession> {
        self.debug_event_seq += 1;
        match self.try_begin(host, press) {
            Ok(session) => {
                log::debug!(
                    "drag session {} started: {:?} on {:?}, grab offset {:?}",
                    session.id(),
                    session.pointer(),
                    session.target(),
                    session.grab_offset()
                );
                self.debug_log_event(format!(
                    "session START id={} pointer={:?} target={:?} grab_offset={:?}",
                    session.id(),
                    session.pointer(),
                    session.target(),
                    session.grab_offset()
                ));
                let pointer = session.pointer();
                let session: &DragSession = self.sessions.entry(pointer).or_insert(session);
                Some(session)
            }
            Err(rejection) => {
                self.note_rejection(rejection);
                None
            }
        }
    }

    /// Follow the pointer. Returns the applied top-left in viewport coordinates.
    pub fn on_move<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: PointerEvent,
    ) -> Option<Pos2> {
        self.debug_event_seq += 1;
        match self.try_move(host, event) {
            Ok((_target, pos, _scrolled)) => Some(pos),
            Err(rejection) => {
                self.note_rejection(rejection);
                None
            }
        }
    }

    /// Finish the pointer's session. Returns the final top-left in document coordinates.
    ///
    /// Releasing a pointer without a session does nothing, so a repeated release is harmless.
    pub fn end_drag<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        release: PointerEvent,
    ) -> Option<Pos2> {
        self.debug_event_seq += 1;
        match self.try_end(host, release.pointer) {
            Ok((_target, document_pos)) => Some(document_pos),
            Err(rejection) => {
                self.note_rejection(rejection);
                None
            }
        }
    }

    /// End every open session as if its pointer was released, e.g. when the window loses focus.
    pub fn cancel_all<H: DragHost + ?Sized>(&mut self, host: &mut H) -> Vec<DragOutcome> {
        let pointers = self.sessions.keys().copied().sorted().collect_vec();
        pointers
            .into_iter()
            .filter_map(|pointer| {
                self.debug_event_seq += 1;
                self.try_end(host, pointer)
                    .ok()
                    .map(|(target, document_pos)| DragOutcome::Ended {
                        target,
                        document_pos,
                    })
            })
            .collect()
    }

    /// Constrain future drags of `target` (axis lock, bounding element).
    pub fn set_constraints(&mut self, target: ElementId, constraints: DragConstraints) {
        self.constraints.insert(target, constraints);
    }

    pub fn clear_constraints(&mut self, target: ElementId) {
        self.constraints.remove(&target);
    }

    pub fn constraints_for(&self, target: ElementId) -> DragConstraints {
        self.constraints.get(&target).copied().unwrap_or_default()
    }

    pub fn is_dragging(&self, pointer: PointerId) -> bool {
        self.sessions.contains_key(&pointer)
    }

    pub fn session(&self, pointer: PointerId) -> Option<&DragSession> {
        self.sessions.get(&pointer)
    }

    /// Active sessions, oldest first.
    pub fn sessions(&self) -> impl Iterator<Item = &DragSession> + '_ {
        self.sessions.values().sorted_by_key(|s| s.id())
    }

    pub fn is_target_dragged(&self, target: ElementId) -> bool {
        self.owner_of(target).is_some()
    }

    fn owner_of(&self, target: ElementId) -> Option<PointerId> {
        self.sessions
            .values()
            .find(|s| s.target() == target)
            .map(DragSession::pointer)
    }

    fn allocate_session_id(&mut self) -> DragSessionId {
        let id = self.next_session_id.max(1);
        self.next_session_id = id.saturating_add(1);
        id
    }

    fn try_begin<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        press: PointerEvent,
    ) -> Result<DragSession, DragRejection> {
        let pointer = press.pointer;
        let PointerEventKind::Press { hit } = press.kind else {
            return Err(DragRejection::MalformedEvent { pointer });
        };
        if self.sessions.contains_key(&pointer) {
            return Err(DragRejection::SessionActive { pointer });
        }

        let target = hit
            .and_then(|hit| host.resolve_drag_handle(hit))
            .ok_or(DragRejection::MissingTarget { pointer })?;
        if let Some(owner) = self.owner_of(target) {
            return Err(DragRejection::TargetBusy { target, owner });
        }

        let page = press
            .page_pos()
            .ok_or(DragRejection::MalformedEvent { pointer })?;
        let rect = host
            .bounding_rect(target)
            .ok_or(DragRejection::MissingTarget { pointer })?;
        let scroll = host.scroll_offset();
        if !is_finite_rect(rect) || !scroll.is_finite() {
            return Err(DragRejection::MalformedEvent { pointer });
        }

        let grab_offset = page_to_viewport(page, scroll) - rect.min;
        let constraints = self.constraints_for(target);

        // Re-parenting drops the flow position, so pin the current on-screen
        // top-left right after it.
        if self.options.float_to_top_layer && !constraints.keep_parent {
            host.float_to_top_layer(target);
        }
        host.set_position(target, PositionMode::Fixed, rect.min);
        if self.options.raise_while_dragging {
            host.set_raised(target, true);
        }
        host.listen_document_pointer(pointer);

        Ok(DragSession::new(
            self.allocate_session_id(),
            pointer,
            target,
            grab_offset,
            constraints,
            rect.min,
            scroll,
        ))
    }

    fn try_move<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: PointerEvent,
    ) -> Result<(ElementId, Pos2, Vec2), DragRejection> {
        let pointer = event.pointer;
        let Some(session) = self.sessions.get(&pointer) else {
            return Err(DragRejection::StaleSession { pointer });
        };
        let malformed = DragRejection::MalformedEvent { pointer };

        let page = event.page_pos().ok_or(malformed)?;
        let target = session.target();
        let rect = host
            .bounding_rect(target)
            .filter(|r| is_finite_rect(*r))
            .ok_or(malformed)?;
        let scroll = host.scroll_offset();
        let viewport = viewport_rect(host.viewport_size());
        if !scroll.is_finite() || !is_finite_rect(viewport) {
            return Err(malformed);
        }

        // Layout may have changed since the last move (scrolling, resizes), so the
        // bounds are looked up again every time.
        let constraints = session.constraints();
        let bounds = match constraints.bounds {
            DragBounds::Viewport => viewport,
            DragBounds::Element(element) => host
                .bounding_rect(element)
                .filter(|r| is_finite_rect(*r))
                .unwrap_or(viewport),
        };

        let desired = page_to_viewport(page, scroll) - session.grab_offset();
        let mut pos = geometry::clamp_top_left(desired, rect.size(), bounds);
        let locked = session.locked_pos(scroll);
        match constraints.axis {
            DragAxis::Both => {}
            DragAxis::Horizontal => pos.y = locked.y,
            DragAxis::Vertical => pos.x = locked.x,
        }
        // Bounds elements may reach past the viewport; the viewport always wins.
        if bounds != viewport {
            pos = geometry::clamp_top_left(pos, rect.size(), viewport);
        }

        // Scrolling would move a bounds element under the target after it was clamped
        // against it, so only viewport-bounded drags auto-scroll.
        let mut scrolled = Vec2::ZERO;
        let step = match constraints.bounds {
            DragBounds::Viewport => self.options.effective_auto_scroll_step(),
            DragBounds::Element(_) => None,
        };
        if let Some(step) = step {
            let dy = geometry::auto_scroll_delta(
                Rect::from_min_size(pos, rect.size()),
                viewport,
                self.options.effective_edge_threshold(),
                step,
            );
            if dy != 0.0 {
                scrolled = host.scroll_by(egui::vec2(0.0, dy));
            }
        }

        host.set_position(target, PositionMode::Fixed, pos);

        if let Some(session) = self.sessions.get_mut(&pointer) {
            session.last_pos = pos;
            if scrolled != Vec2::ZERO {
                session.auto_scroll_steps = session.auto_scroll_steps.saturating_add(1);
            }
        }
        log::trace!("drag {pointer:?}: {target:?} -> {pos:?} (scrolled {scrolled:?})");

        Ok((target, pos, scrolled))
    }

    fn try_end<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        pointer: PointerId,
    ) -> Result<(ElementId, Pos2), DragRejection> {
        let session = self
            .sessions
            .remove(&pointer)
            .ok_or(DragRejection::StaleSession { pointer })?;
        let target = session.target();

        let on_screen = host
            .bounding_rect(target)
            .filter(|r| is_finite_rect(*r))
            .map_or(session.last_pos(), |r| r.min);
        let scroll = Some(host.scroll_offset())
            .filter(|s| s.is_finite())
            .unwrap_or(session.start_scroll());
        let document_pos = viewport_to_document(on_screen, scroll);

        host.set_position(target, PositionMode::Absolute, document_pos);
        host.set_raised(target, false);
        host.unlisten_document_pointer(pointer);

        log::debug!(
            "drag session {} ended: {target:?} left at {document_pos:?} after {} auto-scroll steps",
            session.id(),
            session.auto_scroll_steps()
        );
        self.debug_log_event(format!(
            "session END id={} target={target:?} document_pos={document_pos:?}",
            session.id()
        ));

        Ok((target, document_pos))
    }

    fn note_rejection(&mut self, rejection: DragRejection) {
        if rejection.is_routine() {
            log::trace!("drag event ignored: {rejection}");
            return;
        }
        log::debug!("drag event ignored: {rejection}");
        self.debug_log_event(format!("session REJECT {rejection}"));
    }
}
