//! egui adapter for the pane editor
//!
//! Input events of a frame are fed to the [`Editor`] in order, then the pane
//! is painted once through [`EguiSurface`].

use card_editor::{
    Canvas, CursorIcon, Editor, MarkerStyle, Point, PointerEvent, PointerId, QUAD_POINTS, Size,
    StrokeStyle, Surface, repaint,
};
use eframe::egui;
use std::collections::HashSet;

/// Pointer id used for the mouse; touch ids come from the platform
const MOUSE_POINTER: PointerId = PointerId(u64::MAX);

const CANVAS_BACKGROUND: egui::Color32 = egui::Color32::from_gray(32);

/// Per-canvas input bookkeeping carried across frames
#[derive(Default)]
pub struct CanvasInput {
    /// Touches that started on this canvas
    touches: HashSet<u64>,
}

pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    texture: Option<egui::TextureId>,
}

impl<'a> EguiSurface<'a> {
    pub fn new(
        painter: &'a egui::Painter,
        origin: egui::Pos2,
        texture: Option<egui::TextureId>,
    ) -> Self {
        Self {
            painter,
            origin,
            texture,
        }
    }

    fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.origin + egui::vec2(p.x as f32, p.y as f32)
    }
}

fn color([r, g, b]: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, CANVAS_BACKGROUND);
    }

    fn draw_image(&mut self, origin: Point, size: Size) {
        let Some(texture) = self.texture else {
            return;
        };
        let rect = egui::Rect::from_min_size(
            self.to_screen(origin),
            egui::vec2(size.width as f32, size.height as f32),
        );
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        self.painter.image(texture, rect, uv, egui::Color32::WHITE);
    }

    fn stroke_closed_path(&mut self, points: &[Point; QUAD_POINTS], style: StrokeStyle) {
        let points = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter.add(egui::Shape::closed_line(
            points,
            egui::Stroke::new(style.width as f32, color(style.color)),
        ));
    }

    fn fill_marker(&mut self, center: Point, radius: f64, style: MarkerStyle) {
        self.painter.circle(
            self.to_screen(center),
            radius as f32,
            color(style.fill),
            egui::Stroke::new(style.rim.width as f32, color(style.rim.color)),
        );
    }
}

/// Lay out the canvas, route this frame's input to the editor and paint.
pub fn show_canvas(
    ui: &mut egui::Ui,
    editor: &mut Editor,
    input: &mut CanvasInput,
    texture: Option<egui::TextureId>,
    size: egui::Vec2,
) -> egui::Response {
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
    let rect = response.rect;

    editor.resize_canvas(Canvas::new(Size::new(
        rect.width() as f64,
        rect.height() as f64,
    )));

    let events = ui.input(|i| i.events.clone());
    let hover_pos = ui.input(|i| i.pointer.hover_pos());
    let mut changed = false;
    for event in &events {
        changed |= route_event(event, rect, hover_pos, editor, input);
    }
    if changed {
        ui.ctx().request_repaint();
    }

    if editor.image_size().is_none() {
        painter.rect_filled(rect, 0.0, CANVAS_BACKGROUND);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Open or drop a photo",
            egui::FontId::proportional(16.0),
            egui::Color32::GRAY,
        );
    } else {
        let mut surface = EguiSurface::new(&painter, rect.min, texture);
        repaint(editor, &mut surface);
    }

    if response.hovered() || !editor.gesture().is_idle() {
        ui.ctx().set_cursor_icon(match editor.cursor() {
            CursorIcon::Default => egui::CursorIcon::Default,
            CursorIcon::Grab => egui::CursorIcon::Grab,
            CursorIcon::Grabbing => egui::CursorIcon::Grabbing,
            CursorIcon::PointAtHandle => egui::CursorIcon::PointingHand,
        });
    }

    response
}

fn local(rect: egui::Rect, pos: egui::Pos2) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}

/// Feed one egui event to the editor. Returns whether a repaint is needed.
fn route_event(
    event: &egui::Event,
    rect: egui::Rect,
    hover_pos: Option<egui::Pos2>,
    editor: &mut Editor,
    input: &mut CanvasInput,
) -> bool {
    let tracking = !editor.gesture().is_idle();

    match event {
        egui::Event::Touch { id, phase, pos, .. } => {
            let pointer = PointerId(id.0);
            let p = local(rect, *pos);
            match phase {
                egui::TouchPhase::Start => {
                    if !rect.contains(*pos) {
                        return false;
                    }
                    input.touches.insert(id.0);
                    editor.pointer(PointerEvent::down(pointer, p))
                }
                _ if !input.touches.contains(&id.0) => false,
                egui::TouchPhase::Move => editor.pointer(PointerEvent::moved(pointer, p)),
                egui::TouchPhase::End => {
                    input.touches.remove(&id.0);
                    editor.pointer(PointerEvent::up(pointer, p))
                }
                egui::TouchPhase::Cancel => {
                    input.touches.remove(&id.0);
                    editor.pointer(PointerEvent::cancel(pointer, p))
                }
            }
        }
        // Platforms echo touches as mouse events; ignore those while fingers are down
        _ if !input.touches.is_empty() => false,
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => {
            let p = local(rect, *pos);
            if *pressed {
                if !rect.contains(*pos) {
                    return false;
                }
                editor.pointer(PointerEvent::down(MOUSE_POINTER, p))
            } else {
                editor.pointer(PointerEvent::up(MOUSE_POINTER, p))
            }
        }
        egui::Event::PointerMoved(pos) => {
            if rect.contains(*pos) || tracking {
                editor.pointer(PointerEvent::moved(MOUSE_POINTER, local(rect, *pos)))
            } else {
                editor.pointer_left();
                false
            }
        }
        egui::Event::PointerGone => {
            // The position is gone too; a cancel does not need one
            editor.pointer(PointerEvent::cancel(MOUSE_POINTER, Point::ZERO));
            editor.pointer_left();
            tracking
        }
        egui::Event::MouseWheel { delta, .. } => match hover_pos {
            // egui reports scrolling up as positive; the editor expects the opposite
            Some(pos) if rect.contains(pos) && delta.y != 0.0 => {
                editor.wheel(local(rect, pos), -delta.y as f64)
            }
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_editor::{GestureMode, Quad};

    fn canvas_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn loaded_editor() -> Editor {
        let mut editor = Editor::new(Canvas::new(Size::new(800.0, 600.0)));
        editor.load_image(Size::new(1600.0, 1200.0));
        editor
    }

    fn press(pos: egui::Pos2) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn feed(editor: &mut Editor, input: &mut CanvasInput, events: &[egui::Event]) {
        for event in events {
            route_event(event, canvas_rect(), None, editor, input);
        }
    }

    #[test]
    fn test_pointer_gone_ends_pan() {
        let mut editor = loaded_editor();
        let mut input = CanvasInput::default();

        feed(
            &mut editor,
            &mut input,
            &[press(egui::pos2(400.0, 300.0)), egui::Event::PointerGone],
        );
        assert!(editor.gesture().is_idle());
        assert!(editor.gesture().pointers().is_empty());

        let offset = editor.viewport().offset;
        feed(
            &mut editor,
            &mut input,
            &[egui::Event::PointerMoved(egui::pos2(500.0, 300.0))],
        );
        assert_eq!(editor.viewport().offset, offset);
    }

    #[test]
    fn test_pointer_gone_ends_corner_drag() {
        let mut editor = loaded_editor();
        editor.install_quad(Quad::from([
            [100.0, 100.0],
            [1500.0, 100.0],
            [1500.0, 1100.0],
            [100.0, 1100.0],
        ]));
        let mut input = CanvasInput::default();

        feed(&mut editor, &mut input, &[press(egui::pos2(50.0, 50.0))]);
        assert!(matches!(
            editor.gesture().mode(),
            GestureMode::Dragging { corner: 0, .. }
        ));

        feed(
            &mut editor,
            &mut input,
            &[
                egui::Event::PointerGone,
                egui::Event::PointerMoved(egui::pos2(200.0, 200.0)),
            ],
        );
        assert!(editor.gesture().is_idle());
        assert_eq!(
            editor.quad().and_then(|q| q.point(0)),
            Some(Point::new(100.0, 100.0))
        );
    }
}
