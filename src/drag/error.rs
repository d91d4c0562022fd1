use super::types::{ElementId, PointerId};

/// Why the controller dropped an event.
///
/// These never reach the caller of the public handlers: a dropped drag event must not
/// interrupt the user, so rejections are only logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragRejection {
    /// The press did not resolve to a draggable element.
    MissingTarget { pointer: PointerId },
    /// The event carried no usable coordinates, or the host reported unusable geometry.
    MalformedEvent { pointer: PointerId },
    /// A press arrived while this pointer already drives a session.
    SessionActive { pointer: PointerId },
    /// The target is already being dragged by another pointer.
    TargetBusy { target: ElementId, owner: PointerId },
    /// A move or release arrived for a pointer without a session.
    StaleSession { pointer: PointerId },
}

impl std::fmt::Display for DragRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTarget { pointer } => {
                write!(f, "press of {pointer:?} did not hit a draggable element")
            }
            Self::MalformedEvent { pointer } => {
                write!(f, "event of {pointer:?} has no usable coordinates")
            }
            Self::SessionActive { pointer } => {
                write!(f, "{pointer:?} already has an active drag session")
            }
            Self::TargetBusy { target, owner } => {
                write!(f, "{target:?} is already dragged by {owner:?}")
            }
            Self::StaleSession { pointer } => {
                write!(f, "no drag session for {pointer:?}")
            }
        }
    }
}

impl std::error::Error for DragRejection {}

impl DragRejection {
    /// Stale and malformed events are routine during fast input; the rest are worth a debug line.
    pub(super) fn is_routine(&self) -> bool {
        matches!(
            self,
            Self::StaleSession { .. } | Self::MalformedEvent { .. } | Self::MissingTarget { .. }
        )
    }
}
