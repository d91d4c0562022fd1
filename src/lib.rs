#![forbid(unsafe_code)]

pub mod drag;
pub mod input;
pub mod scene;

pub use drag::{
    DomMutation, DragAxis, DragBounds, DragConstraints, DragHost, DragOptions, DragOutcome,
    DragRejection, DragSession, DragSessionId, ElementCoords, ElementId, PointerDragController,
    PointerEvent, PointerEventKind, PointerId, PositionMode, ScrollControl, ViewportGeometry,
    auto_scroll_delta, center_in, clamp_top_left, element_coords,
};
pub use input::{InputMapping, dispatch_pointer_events, pointer_events};
pub use scene::{DragScene, SceneElement};

#[cfg(feature = "persistence")]
pub use drag::{OPTIONS_SNAPSHOT_VERSION, OptionsPersistenceError, OptionsSnapshot};
