use card_editor::constants::MARKER_RADIUS;
use card_editor::*;

#[derive(Debug, PartialEq)]
enum Op {
    Clear,
    Image(Point, Size),
    Outline([Point; 4]),
    Marker(Point, f64),
}

#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn draw_image(&mut self, origin: Point, size: Size) {
        self.ops.push(Op::Image(origin, size));
    }

    fn stroke_closed_path(&mut self, points: &[Point; QUAD_POINTS], _style: StrokeStyle) {
        self.ops.push(Op::Outline(*points));
    }

    fn fill_marker(&mut self, center: Point, radius: f64, _style: MarkerStyle) {
        self.ops.push(Op::Marker(center, radius));
    }
}

fn loaded_editor() -> Editor {
    let mut editor = Editor::new(Canvas::new(Size::new(800.0, 600.0)));
    editor.load_image(Size::new(1600.0, 1200.0));
    editor
}

#[test]
fn test_repaint_without_image_draws_nothing() {
    let editor = Editor::new(Canvas::default());
    let mut surface = RecordingSurface::default();
    repaint(&editor, &mut surface);
    assert!(surface.ops.is_empty());
}

#[test]
fn test_repaint_without_quad_draws_image_only() {
    let editor = loaded_editor();
    let mut surface = RecordingSurface::default();
    repaint(&editor, &mut surface);

    assert_eq!(
        surface.ops,
        vec![
            Op::Clear,
            Op::Image(Point::ZERO, Size::new(800.0, 600.0)),
        ]
    );
}

#[test]
fn test_repaint_draws_outline_then_markers_in_index_order() {
    let mut editor = loaded_editor();
    editor.install_quad(Quad::from([
        [100.0, 100.0],
        [1500.0, 100.0],
        [1500.0, 1100.0],
        [100.0, 1100.0],
    ]));

    let mut surface = RecordingSurface::default();
    repaint(&editor, &mut surface);

    let corners = [
        Point::new(50.0, 50.0),
        Point::new(750.0, 50.0),
        Point::new(750.0, 550.0),
        Point::new(50.0, 550.0),
    ];
    let mut expected = vec![
        Op::Clear,
        Op::Image(Point::ZERO, Size::new(800.0, 600.0)),
        Op::Outline(corners),
    ];
    expected.extend(corners.iter().map(|c| Op::Marker(*c, MARKER_RADIUS)));

    assert_eq!(surface.ops, expected);
}

#[test]
fn test_zoom_buttons_clamp_and_report_percent() {
    let mut editor = loaded_editor();
    assert_eq!(editor.zoom_percent(), 50);

    assert!(editor.zoom_in());
    assert_eq!(editor.zoom_percent(), 60);

    for _ in 0..30 {
        editor.zoom_in();
    }
    assert_eq!(editor.zoom_percent(), 500);

    for _ in 0..30 {
        editor.zoom_out();
    }
    assert_eq!(editor.zoom_percent(), 20);
}

#[test]
fn test_zoom_button_keeps_canvas_center() {
    let mut editor = loaded_editor();
    let image = editor.image_size().unwrap();
    let canvas = editor.canvas().size;
    editor.pointer(PointerEvent::down(PointerId(1), Point::new(400.0, 300.0)));
    editor.pointer(PointerEvent::moved(PointerId(1), Point::new(470.0, 260.0)));
    editor.pointer(PointerEvent::up(PointerId(1), Point::new(470.0, 260.0)));

    let center = canvas.center();
    let under = canvas_to_image(center, editor.viewport(), image, canvas);
    editor.zoom_in();
    let back = image_to_canvas(under, editor.viewport(), image, canvas);

    assert!((back.x - center.x).abs() < 1e-6 && (back.y - center.y).abs() < 1e-6);
}

#[test]
fn test_wheel_direction() {
    let mut editor = loaded_editor();
    let anchor = Point::new(400.0, 300.0);

    editor.wheel(anchor, -120.0);
    assert!((editor.viewport().zoom() - 0.55).abs() < 1e-9);

    editor.wheel(anchor, 120.0);
    assert!((editor.viewport().zoom() - 0.495).abs() < 1e-9);
}

#[test]
fn test_zoom_without_image_is_noop() {
    let mut editor = Editor::new(Canvas::default());
    assert!(!editor.zoom_in());
    assert!(!editor.wheel(Point::new(1.0, 1.0), -1.0));
    assert_eq!(editor.zoom_percent(), 100);
}

#[test]
fn test_install_quad_requires_image() {
    let mut editor = Editor::new(Canvas::default());
    let quad = Quad::from([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    assert!(!editor.install_quad(quad));
    assert!(editor.quad().is_none());
}

#[test]
fn test_resize_canvas_requests_repaint_only_when_loaded() {
    let mut editor = Editor::new(Canvas::default());
    assert!(!editor.resize_canvas(Canvas::new(Size::new(640.0, 480.0))));

    let mut editor = loaded_editor();
    assert!(!editor.resize_canvas(Canvas::new(Size::new(800.0, 600.0))));
    assert!(editor.resize_canvas(Canvas::new(Size::new(640.0, 480.0))));
}
