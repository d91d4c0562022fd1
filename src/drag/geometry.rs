use egui::{Pos2, Rect, Vec2};

pub(super) fn viewport_rect(size: Vec2) -> Rect {
    Rect::from_min_size(Pos2::ZERO, size)
}

pub(super) fn page_to_viewport(page: Pos2, scroll_offset: Vec2) -> Pos2 {
    page - scroll_offset
}

pub(super) fn viewport_to_document(pos: Pos2, scroll_offset: Vec2) -> Pos2 {
    pos + scroll_offset
}

pub(super) fn is_finite_rect(rect: Rect) -> bool {
    rect.min.x.is_finite()
        && rect.min.y.is_finite()
        && rect.max.x.is_finite()
        && rect.max.y.is_finite()
}

/// Clamp a top-left corner so a box of `size` stays inside `bounds`.
///
/// When the box is larger than `bounds` the max collapses onto the min, so the box
/// is pinned to the top-left of `bounds` instead of panicking in `f32::clamp`.
pub fn clamp_top_left(desired: Pos2, size: Vec2, bounds: Rect) -> Pos2 {
    let max_x = (bounds.max.x - size.x).max(bounds.min.x);
    let max_y = (bounds.max.y - size.y).max(bounds.min.y);
    egui::pos2(
        desired.x.clamp(bounds.min.x, max_x),
        desired.y.clamp(bounds.min.y, max_y),
    )
}

/// Vertical auto-scroll step for a dragged box at `rect` inside `viewport`.
///
/// Touching (or passing within `threshold` of) the top edge scrolls up, the bottom
/// edge scrolls down. A box touching both edges does not scroll.
pub fn auto_scroll_delta(rect: Rect, viewport: Rect, threshold: f32, step: f32) -> f32 {
    let at_top = rect.min.y <= viewport.min.y + threshold;
    let at_bottom = rect.max.y >= viewport.max.y - threshold;
    match (at_top, at_bottom) {
        (true, false) => -step,
        (false, true) => step,
        _ => 0.0,
    }
}

/// Top-left that centers a box of `size` inside `container`, rounded to whole points.
///
/// Halves round up, so an odd leftover space puts the extra point above/left.
pub fn center_in(container: Rect, size: Vec2) -> Pos2 {
    let mid = container.center();
    egui::pos2(
        (mid.x - size.x / 2.0 + 0.5).floor(),
        (mid.y - size.y / 2.0 + 0.5).floor(),
    )
}

/// Outer bounding box of an element plus its inner (client) box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ElementCoords {
    pub outer: Rect,
    pub inner: Rect,
}

/// `client_origin` is the top/left border width, `client_size` the size without
/// borders and scrollbars.
pub fn element_coords(outer: Rect, client_origin: Vec2, client_size: Vec2) -> ElementCoords {
    ElementCoords {
        outer,
        inner: Rect::from_min_size(outer.min + client_origin, client_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        viewport_rect(Vec2::new(800.0, 600.0))
    }

    #[test]
    fn clamp_keeps_box_inside_viewport() {
        let size = Vec2::splat(20.0);
        assert_eq!(
            clamp_top_left(egui::pos2(805.0, 600.0), size, viewport()),
            egui::pos2(780.0, 580.0)
        );
        assert_eq!(
            clamp_top_left(egui::pos2(-40.0, -1.0), size, viewport()),
            Pos2::ZERO
        );
        assert_eq!(
            clamp_top_left(egui::pos2(100.0, 200.0), size, viewport()),
            egui::pos2(100.0, 200.0)
        );
    }

    #[test]
    fn clamp_pins_oversized_box_to_min() {
        let bounds = Rect::from_min_size(egui::pos2(10.0, 10.0), Vec2::new(50.0, 50.0));
        let pos = clamp_top_left(egui::pos2(30.0, -5.0), Vec2::new(80.0, 20.0), bounds);
        assert_eq!(pos, egui::pos2(10.0, 10.0));
    }

    #[test]
    fn auto_scroll_direction_follows_touched_edge() {
        let size = Vec2::splat(20.0);
        let top = Rect::from_min_size(egui::pos2(100.0, 0.0), size);
        let bottom = Rect::from_min_size(egui::pos2(100.0, 580.0), size);
        let middle = Rect::from_min_size(egui::pos2(100.0, 300.0), size);

        assert_eq!(auto_scroll_delta(top, viewport(), 0.0, 20.0), -20.0);
        assert_eq!(auto_scroll_delta(bottom, viewport(), 0.0, 20.0), 20.0);
        assert_eq!(auto_scroll_delta(middle, viewport(), 0.0, 20.0), 0.0);
    }

    #[test]
    fn auto_scroll_threshold_widens_the_edge() {
        let near_top = Rect::from_min_size(egui::pos2(0.0, 8.0), Vec2::splat(20.0));
        assert_eq!(auto_scroll_delta(near_top, viewport(), 0.0, 20.0), 0.0);
        assert_eq!(auto_scroll_delta(near_top, viewport(), 10.0, 20.0), -20.0);
    }

    #[test]
    fn box_filling_viewport_does_not_scroll() {
        assert_eq!(auto_scroll_delta(viewport(), viewport(), 0.0, 20.0), 0.0);
    }

    #[test]
    fn center_rounds_to_whole_points() {
        let field = Rect::from_min_size(Pos2::ZERO, Vec2::new(101.0, 60.0));
        assert_eq!(center_in(field, Vec2::splat(40.0)), egui::pos2(31.0, 10.0));

        let offset_field = Rect::from_min_size(egui::pos2(100.0, 50.0), Vec2::new(200.0, 100.0));
        assert_eq!(
            center_in(offset_field, Vec2::splat(40.0)),
            egui::pos2(180.0, 80.0)
        );
    }

    #[test]
    fn inner_box_is_inset_by_border() {
        let outer = Rect::from_min_size(egui::pos2(10.0, 20.0), Vec2::new(110.0, 60.0));
        let coords = element_coords(outer, Vec2::splat(5.0), Vec2::new(100.0, 50.0));
        assert_eq!(coords.outer, outer);
        assert_eq!(
            coords.inner,
            Rect::from_min_max(egui::pos2(15.0, 25.0), egui::pos2(115.0, 75.0))
        );
    }
}
