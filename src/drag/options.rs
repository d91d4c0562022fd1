/// Options for [`super::PointerDragController`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragOptions {
    /// Scroll the viewport while the dragged element is pinned against its top or bottom edge.
    pub auto_scroll: bool,

    /// Points scrolled per move event while at an edge.
    pub auto_scroll_step: f32,

    /// Distance (in points) from the viewport edge at which auto-scroll kicks in.
    ///
    /// `0.0` means the element must touch the edge.
    pub auto_scroll_edge_threshold: f32,

    /// Re-parent the target to the top-level layer on press so it can move over its siblings.
    ///
    /// Disable for elements that should stay inside their container, e.g. slider thumbs.
    pub float_to_top_layer: bool,

    /// Raise the target above its siblings for the duration of the drag.
    pub raise_while_dragging: bool,

    /// If true, record session start/end/reject lines in a small ring buffer
    /// (see [`super::PointerDragController::debug_log_text`]).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            auto_scroll: true,
            auto_scroll_step: 20.0,
            auto_scroll_edge_threshold: 0.0,
            float_to_top_layer: true,
            raise_while_dragging: true,
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

impl DragOptions {
    /// Scroll step to use, or `None` when auto-scroll is off or misconfigured.
    pub(crate) fn effective_auto_scroll_step(&self) -> Option<f32> {
        (self.auto_scroll && self.auto_scroll_step.is_finite() && self.auto_scroll_step > 0.0)
            .then_some(self.auto_scroll_step)
    }

    pub(crate) fn effective_edge_threshold(&self) -> f32 {
        if self.auto_scroll_edge_threshold.is_finite() {
            self.auto_scroll_edge_threshold.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_scroll_step_is_none_when_disabled() {
        let opt = DragOptions {
            auto_scroll: false,
            ..Default::default()
        };
        assert_eq!(opt.effective_auto_scroll_step(), None);
        assert_eq!(DragOptions::default().effective_auto_scroll_step(), Some(20.0));
    }

    #[test]
    fn nonsensical_scroll_tuning_is_ignored() {
        let opt = DragOptions {
            auto_scroll_step: -5.0,
            auto_scroll_edge_threshold: f32::NAN,
            ..Default::default()
        };
        assert_eq!(opt.effective_auto_scroll_step(), None);
        assert_eq!(opt.effective_edge_threshold(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let opt: DragOptions =
            serde_json::from_str(r#"{ "auto_scroll_step": 35.0 }"#).expect("valid options json");
        assert_eq!(opt.auto_scroll_step, 35.0);
        assert!(opt.auto_scroll);
        assert_eq!(opt.debug_event_log_capacity, 200);
    }
}
