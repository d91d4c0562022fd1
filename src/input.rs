use egui::{Event, InputState, PointerButton, Pos2, TouchPhase, Vec2};

use crate::drag::{
    DragOutcome, PointerDragController, PointerEvent, PointerId, ViewportGeometry as _,
};
use crate::scene::DragScene;

/// Where a [`DragScene`] is shown and which egui events drive it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputMapping {
    /// Screen position of the scene's viewport top-left.
    pub canvas_origin: Pos2,

    /// Also translate raw touch events, one pointer per finger.
    ///
    /// Most integrations already synthesize mouse events from the first touch, so with this on
    /// the first finger shows up twice; the second press is then rejected because its target
    /// is already taken.
    pub include_touch: bool,
}

impl Default for InputMapping {
    fn default() -> Self {
        Self {
            canvas_origin: Pos2::ZERO,
            include_touch: false,
        }
    }
}

impl InputMapping {
    fn to_viewport(&self, screen: Pos2) -> Pos2 {
        screen - self.canvas_origin.to_vec2()
    }

    fn to_page(&self, screen: Pos2, scroll_offset: Vec2) -> Pos2 {
        self.to_viewport(screen) + scroll_offset
    }

    /// Translate one egui event against the scene as it is right now.
    fn translate(&self, event: &Event, scene: &DragScene) -> Option<PointerEvent> {
        let scroll = scene.scroll_offset();
        match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                let page = self.to_page(*pos, scroll);
                Some(if *pressed {
                    PointerEvent::press(
                        PointerId::Mouse,
                        scene.hit_test(self.to_viewport(*pos)),
                        page,
                    )
                } else {
                    PointerEvent::release(PointerId::Mouse, Some(page))
                })
            }
            Event::PointerMoved(pos) => Some(PointerEvent::moved(
                PointerId::Mouse,
                self.to_page(*pos, scroll),
            )),
            Event::Touch { id, phase, pos, .. } if self.include_touch => {
                let pointer = PointerId::Touch(id.0);
                let page = self.to_page(*pos, scroll);
                Some(match phase {
                    TouchPhase::Start => PointerEvent::press(
                        pointer,
                        scene.hit_test(self.to_viewport(*pos)),
                        page,
                    ),
                    TouchPhase::Move => PointerEvent::moved(pointer, page),
                    TouchPhase::End | TouchPhase::Cancel => {
                        PointerEvent::release(pointer, Some(page))
                    }
                })
            }
            _ => None,
        }
    }
}

/// Translate this frame's egui events into page-coordinate pointer events for `scene`,
/// in delivery order.
///
/// Every event is translated against the scene as it is now, so the result describes the
/// frame only while nothing scrolls in between. To drive a controller use
/// [`dispatch_pointer_events`], which translates each event after the previous one was handled.
/// Only the primary mouse button starts and ends drags.
pub fn pointer_events(
    input: &InputState,
    scene: &DragScene,
    mapping: InputMapping,
) -> Vec<PointerEvent> {
    input
        .events
        .iter()
        .filter_map(|event| mapping.translate(event, scene))
        .collect()
}

/// Feed this frame's egui events to `drag`, one at a time and in delivery order.
///
/// Each event is converted to page coordinates with the scroll offset left behind by the
/// events before it, so an auto-scroll triggered early in the frame does not shift the
/// pointer positions that follow. Returns the outcome of every event that did something.
pub fn dispatch_pointer_events(
    input: &InputState,
    drag: &mut PointerDragController,
    scene: &mut DragScene,
    mapping: InputMapping,
) -> Vec<DragOutcome> {
    let mut outcomes = Vec::new();
    for event in &input.events {
        let Some(event) = mapping.translate(event, scene) else {
            continue;
        };
        outcomes.extend(drag.handle_event(scene, event));
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use egui::{Context, Modifiers, Rect, RawInput, TouchDeviceId, TouchId};

    use super::*;
    use crate::drag::{ElementId, PointerEventKind};

    fn begin_pass(ctx: &Context, events: Vec<Event>) {
        let raw = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            events,
            ..Default::default()
        };
        ctx.begin_pass(raw);
    }

    fn scene_with_ball() -> (DragScene, ElementId) {
        let mut scene = DragScene::new(Vec2::new(800.0, 560.0), Vec2::new(800.0, 2000.0));
        let ball = scene.add_element(
            None,
            "ball",
            Rect::from_min_size(egui::pos2(50.0, 50.0), Vec2::splat(20.0)),
            true,
        );
        (scene, ball)
    }

    #[test]
    fn mouse_press_move_release_become_pointer_events() {
        let ctx = Context::default();
        let (mut scene, ball) = scene_with_ball();
        scene.scroll_to(Vec2::new(0.0, 100.0));

        begin_pass(
            &ctx,
            vec![
                Event::PointerButton {
                    pos: egui::pos2(55.0, 95.0),
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::NONE,
                },
                Event::PointerMoved(egui::pos2(65.0, 105.0)),
                Event::PointerButton {
                    pos: egui::pos2(65.0, 105.0),
                    button: PointerButton::Primary,
                    pressed: false,
                    modifiers: Modifiers::NONE,
                },
            ],
        );

        // The scene starts 40 points below the top of the screen.
        let mapping = InputMapping {
            canvas_origin: egui::pos2(0.0, 40.0),
            ..Default::default()
        };
        let events = ctx.input(|i| pointer_events(i, &scene, mapping));

        assert_eq!(events.len(), 3);
        // Ball is at document y=50, scrolled up by 100 → viewport y=-50; the press at
        // viewport (55, 55) misses it.
        assert_eq!(events[0].kind, PointerEventKind::Press { hit: None });
        assert_eq!(events[0].pos, Some(egui::pos2(55.0, 155.0)));
        assert_eq!(events[1].kind, PointerEventKind::Move);
        assert_eq!(events[1].pos, Some(egui::pos2(65.0, 165.0)));
        assert_eq!(events[2].kind, PointerEventKind::Release);

        scene.scroll_to(Vec2::ZERO);
        let events = ctx.input(|i| pointer_events(i, &scene, mapping));
        assert_eq!(events[0].kind, PointerEventKind::Press { hit: Some(ball) });
    }

    #[test]
    fn secondary_button_is_ignored() {
        let ctx = Context::default();
        let (scene, _ball) = scene_with_ball();
        begin_pass(
            &ctx,
            vec![Event::PointerButton {
                pos: egui::pos2(55.0, 55.0),
                button: PointerButton::Secondary,
                pressed: true,
                modifiers: Modifiers::NONE,
            }],
        );
        let events = ctx.input(|i| pointer_events(i, &scene, InputMapping::default()));
        assert!(events.is_empty());
    }

    #[test]
    fn touches_map_to_their_own_pointers_when_enabled() {
        let ctx = Context::default();
        let (scene, ball) = scene_with_ball();
        let touch = |id: u64, phase: TouchPhase, pos: Pos2| Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos,
            force: None,
        };
        begin_pass(
            &ctx,
            vec![
                touch(3, TouchPhase::Start, egui::pos2(60.0, 60.0)),
                touch(3, TouchPhase::Move, egui::pos2(70.0, 60.0)),
                touch(3, TouchPhase::Cancel, egui::pos2(70.0, 60.0)),
            ],
        );

        let ignored = ctx.input(|i| pointer_events(i, &scene, InputMapping::default()));
        assert!(ignored.is_empty());

        let mapping = InputMapping {
            include_touch: true,
            ..Default::default()
        };
        let events = ctx.input(|i| pointer_events(i, &scene, mapping));
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.pointer == PointerId::Touch(3)));
        assert_eq!(events[0].kind, PointerEventKind::Press { hit: Some(ball) });
        assert_eq!(events[2].kind, PointerEventKind::Release);
    }

    #[test]
    fn moves_after_an_auto_scroll_in_the_same_frame_use_the_new_offset() {
        let ctx = Context::default();
        let mut scene = DragScene::new(Vec2::new(800.0, 560.0), Vec2::new(800.0, 2000.0));
        let ball = scene.add_element(
            None,
            "ball",
            Rect::from_min_size(egui::pos2(50.0, 450.0), Vec2::splat(20.0)),
            true,
        );
        scene.scroll_to(Vec2::new(0.0, 400.0));
        let mut drag = PointerDragController::default();

        begin_pass(
            &ctx,
            vec![
                Event::PointerButton {
                    pos: egui::pos2(55.0, 55.0),
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::NONE,
                },
                Event::PointerMoved(egui::pos2(100.0, 3.0)),
                Event::PointerMoved(egui::pos2(100.0, 3.0)),
            ],
        );
        let outcomes = ctx.input(|i| {
            dispatch_pointer_events(i, &mut drag, &mut scene, InputMapping::default())
        });

        assert_eq!(outcomes.len(), 3, "{outcomes:?}");
        assert!(matches!(outcomes[0], DragOutcome::Started { target, .. } if target == ball));
        for outcome in &outcomes[1..] {
            assert_eq!(
                *outcome,
                DragOutcome::Moved {
                    target: ball,
                    pos: egui::pos2(95.0, 0.0),
                    scrolled: Vec2::new(0.0, -20.0),
                }
            );
        }
        assert_eq!(scene.scroll_offset(), Vec2::new(0.0, 360.0));
        assert_eq!(scene.bounding_rect(ball).map(|r| r.min), Some(egui::pos2(95.0, 0.0)));

        // Nothing left to scroll: the next move holds the ball at the edge.
        scene.scroll_to(Vec2::ZERO);
        let outcome = drag.handle_event(
            &mut scene,
            PointerEvent::moved(PointerId::Mouse, egui::pos2(100.0, 3.0)),
        );
        assert_eq!(
            outcome,
            Some(DragOutcome::Moved {
                target: ball,
                pos: egui::pos2(95.0, 0.0),
                scrolled: Vec2::ZERO,
            })
        );
    }
}
