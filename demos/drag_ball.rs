#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind, Vec2};
use egui_pointer_drag::{
    DragConstraints, DragOptions, DragOutcome, DragScene, ElementId, InputMapping,
    PointerDragController, ViewportGeometry as _, dispatch_pointer_events, element_coords,
};

struct App {
    scene: DragScene,
    drag: PointerDragController,
    ball: ElementId,
    track: ElementId,
    thumb: ElementId,
    last_press: Option<Pos2>,
    last_outcome: Option<DragOutcome>,
}

impl Default for App {
    fn default() -> Self {
        let mut scene = DragScene::new(Vec2::new(800.0, 600.0), Vec2::new(800.0, 1600.0));

        let field = scene.add_element(
            None,
            "field",
            Rect::from_min_size(egui::pos2(40.0, 60.0), Vec2::new(400.0, 240.0)),
            false,
        );
        let ball = scene.add_element(
            Some(field),
            "ball",
            Rect::from_min_size(Pos2::ZERO, Vec2::splat(40.0)),
            true,
        );
        scene.center_in_parent(ball);

        let track = scene.add_element(
            None,
            "slider",
            Rect::from_min_size(egui::pos2(40.0, 360.0), Vec2::new(300.0, 8.0)),
            false,
        );
        let thumb = scene.add_element(
            Some(track),
            "thumb",
            Rect::from_min_size(egui::pos2(0.0, -6.0), Vec2::new(12.0, 20.0)),
            true,
        );

        let hero = scene.add_element(
            None,
            "hero",
            Rect::from_min_size(egui::pos2(480.0, 900.0), Vec2::new(160.0, 100.0)),
            true,
        );
        scene.add_element(
            Some(hero),
            "face",
            Rect::from_min_size(egui::pos2(50.0, 20.0), Vec2::splat(60.0)),
            false,
        );

        let mut drag = PointerDragController::new(DragOptions {
            debug_event_log: true,
            ..Default::default()
        });
        drag.set_constraints(thumb, DragConstraints::slider(track));

        Self {
            scene,
            drag,
            ball,
            track,
            thumb,
            last_press: None,
            last_outcome: None,
        }
    }
}

impl App {
    fn slider_value(&self) -> f32 {
        let (Some(track), Some(thumb)) = (
            self.scene.bounding_rect(self.track),
            self.scene.bounding_rect(self.thumb),
        ) else {
            return 0.0;
        };
        let span = (track.width() - thumb.width()).max(1.0);
        ((thumb.min.x - track.min.x) / span).clamp(0.0, 1.0)
    }

    fn paint_scene(&self, painter: &egui::Painter, origin: Pos2, ui: &egui::Ui) {
        let visuals = ui.visuals();
        for id in self.scene.paint_order() {
            let (Some(element), Some(rect)) = (self.scene.element(id), self.scene.bounding_rect(id))
            else {
                continue;
            };
            let rect = rect.translate(origin.to_vec2());
            match element.label.as_str() {
                "ball" => {
                    let radius = rect.width() / 2.0;
                    painter.circle_filled(rect.center(), radius, Color32::from_rgb(220, 80, 60));
                }
                "thumb" => {
                    painter.rect_filled(rect, CornerRadius::same(3), visuals.selection.bg_fill);
                }
                "face" => {
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        "☺",
                        FontId::proportional(40.0),
                        visuals.text_color(),
                    );
                }
                label => {
                    painter.rect_filled(rect, CornerRadius::same(4), visuals.faint_bg_color);
                    painter.rect_stroke(
                        rect,
                        CornerRadius::same(4),
                        Stroke::new(1.0, visuals.weak_text_color()),
                        StrokeKind::Inside,
                    );
                    if element.draggable {
                        painter.text(
                            rect.left_top() + Vec2::splat(6.0),
                            Align2::LEFT_TOP,
                            label,
                            FontId::proportional(13.0),
                            visuals.text_color(),
                        );
                    }
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.drag.options.auto_scroll, "Auto-scroll");
                ui.add(
                    egui::Slider::new(&mut self.drag.options.auto_scroll_step, 1.0..=80.0)
                        .text("step"),
                );
                ui.add(
                    egui::Slider::new(&mut self.drag.options.auto_scroll_edge_threshold, 0.0..=60.0)
                        .text("edge"),
                );
                ui.checkbox(&mut self.drag.options.float_to_top_layer, "Float to top layer");
            });
            ui.horizontal(|ui| {
                if let Some(pos) = self.last_press {
                    ui.label(format!("press: {:.0}:{:.0}", pos.x, pos.y));
                }
                ui.label(format!("slider: {:.2}", self.slider_value()));
                if let Some(coords) = self.scene.bounding_rect(self.ball).map(|outer| {
                    element_coords(outer, Vec2::ZERO, outer.size())
                }) {
                    ui.label(format!(
                        "ball: {:.0},{:.0}",
                        coords.outer.min.x, coords.outer.min.y
                    ));
                }
                if let Some(outcome) = self.last_outcome {
                    ui.label(format!("{outcome:?}"));
                }
            });
        });

        egui::SidePanel::right("log").show(ctx, |ui| {
            ui.heading("Drag log");
            if ui.button("Clear").clicked() {
                self.drag.debug_log_clear();
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.monospace(self.drag.debug_log_text());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, _response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
            self.scene.set_viewport_size(rect.size());

            if !ctx.input(|i| i.focused) && self.drag.sessions().next().is_some() {
                self.drag.cancel_all(&mut self.scene);
            }

            let wheel = ctx.input(|i| i.smooth_scroll_delta);
            if wheel.y != 0.0 && ui.rect_contains_pointer(rect) {
                use egui_pointer_drag::ScrollControl as _;
                self.scene.scroll_by(Vec2::new(0.0, -wheel.y));
            }

            let mapping = InputMapping {
                canvas_origin: rect.min,
                ..Default::default()
            };
            let outcomes = ctx.input(|i| {
                dispatch_pointer_events(i, &mut self.drag, &mut self.scene, mapping)
            });
            for outcome in outcomes {
                if let DragOutcome::Started {
                    target, grab_offset, ..
                } = outcome
                {
                    self.last_press = self.scene.bounding_rect(target).map(|r| r.min + grab_offset);
                }
                self.last_outcome = Some(outcome);
            }

            let painter = ui.painter_at(rect);
            self.paint_scene(&painter, rect.min, ui);
        });
    }
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_title("egui_pointer_drag: ball, slider and hero"),
        ..Default::default()
    };
    eframe::run_native(
        "egui_pointer_drag: ball, slider and hero",
        options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}
