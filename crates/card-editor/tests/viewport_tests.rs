use card_editor::constants::{MAX_ZOOM, MIN_ZOOM};
use card_editor::*;

const EPS: f64 = 1e-9;

fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
        "expected {:?} ≈ {:?}",
        a,
        b
    );
}

fn canvas() -> Size {
    Size::new(800.0, 600.0)
}

fn image() -> Size {
    Size::new(1600.0, 1200.0)
}

#[test]
fn test_fit_scales_large_image_down() {
    let v = Viewport::fit(image(), canvas());
    assert!((v.zoom() - 0.5).abs() < EPS);
    assert_eq!(v.offset, Point::ZERO);
}

#[test]
fn test_fit_never_upscales() {
    let v = Viewport::fit(Size::new(400.0, 300.0), canvas());
    assert!((v.zoom() - 1.0).abs() < EPS);
}

#[test]
fn test_fit_respects_zoom_floor() {
    // 800 / 10000 = 0.08, below the minimum zoom
    let v = Viewport::fit(Size::new(10000.0, 10000.0), canvas());
    assert!((v.zoom() - MIN_ZOOM).abs() < EPS);
}

#[test]
fn test_image_to_canvas_known_point() {
    let v = Viewport::fit(image(), canvas());
    let p = image_to_canvas(Point::new(100.0, 100.0), &v, image(), canvas());
    assert_close(p, Point::new(50.0, 50.0));
}

#[test]
fn test_image_is_centered_when_smaller_than_canvas() {
    let v = Viewport::new(1.0, Point::ZERO);
    let img = Size::new(400.0, 200.0);
    let origin = image_to_canvas(Point::ZERO, &v, img, canvas());
    assert_close(origin, Point::new(200.0, 200.0));
}

#[test]
fn test_offset_shifts_canvas_position() {
    let v = Viewport::new(2.0, Point::new(15.0, -30.0));
    let img = Size::new(100.0, 100.0);
    // center offset = ((800 - 200) / 2, (600 - 200) / 2) = (300, 200)
    let p = image_to_canvas(Point::new(10.0, 20.0), &v, img, canvas());
    assert_close(p, Point::new(300.0 + 15.0 + 20.0, 200.0 - 30.0 + 40.0));
}

#[test]
fn test_round_trip_identity() {
    let zooms = [MIN_ZOOM, 0.37, 1.0, 2.5, MAX_ZOOM];
    let offsets = [
        Point::ZERO,
        Point::new(123.5, -48.25),
        Point::new(-1000.0, 2000.0),
    ];
    let points = [
        Point::ZERO,
        Point::new(100.0, 100.0),
        Point::new(1599.0, 1199.0),
        Point::new(-250.0, 4000.0),
    ];

    for zoom in zooms {
        for offset in offsets {
            let v = Viewport::new(zoom, offset);
            for p in points {
                let q = image_to_canvas(p, &v, image(), canvas());
                assert_close(canvas_to_image(q, &v, image(), canvas()), p);
            }
        }
    }
}

#[test]
fn test_zoom_at_keeps_anchor_fixed() {
    let start = Viewport::new(0.8, Point::new(-40.0, 25.0));
    let anchors = [
        Point::new(0.0, 0.0),
        Point::new(400.0, 300.0),
        Point::new(731.0, 12.0),
    ];
    let factors = [0.5, 0.9, 1.1, 3.0];

    for anchor in anchors {
        for factor in factors {
            let under = canvas_to_image(anchor, &start, image(), canvas());
            let next = zoom_at(anchor, factor, &start, image(), canvas());
            assert_close(image_to_canvas(under, &next, image(), canvas()), anchor);
        }
    }
}

#[test]
fn test_wheel_zoom_in_at_cursor() {
    let start = Viewport::new(1.0, Point::ZERO);
    let cursor = Point::new(400.0, 300.0);
    let under = canvas_to_image(cursor, &start, image(), canvas());

    let next = zoom_at(cursor, 1.1, &start, image(), canvas());

    assert!((next.zoom() - 1.1).abs() < EPS);
    assert_close(image_to_canvas(under, &next, image(), canvas()), cursor);
}

#[test]
fn test_anchor_holds_even_when_zoom_clamps() {
    let start = Viewport::new(4.5, Point::ZERO);
    let anchor = Point::new(120.0, 480.0);
    let under = canvas_to_image(anchor, &start, image(), canvas());

    let next = zoom_at(anchor, 10.0, &start, image(), canvas());

    assert!((next.zoom() - MAX_ZOOM).abs() < EPS);
    assert_close(image_to_canvas(under, &next, image(), canvas()), anchor);
}

#[test]
fn test_zoom_sequence_stays_clamped() {
    let mut v = Viewport::default();
    let anchor = Point::new(10.0, 10.0);
    for factor in [10.0, 10.0, 0.001, 0.5, 7.0, 0.0, f64::INFINITY] {
        v = zoom_at(anchor, factor, &v, image(), canvas());
        assert!(v.zoom() >= MIN_ZOOM && v.zoom() <= MAX_ZOOM, "zoom {}", v.zoom());
    }
}

#[test]
fn test_set_zoom_clamps() {
    let mut v = Viewport::default();
    v.set_zoom(100.0);
    assert_eq!(v.zoom(), MAX_ZOOM);
    v.set_zoom(-3.0);
    assert_eq!(v.zoom(), MIN_ZOOM);
    v.set_zoom(f64::NAN);
    assert_eq!(v.zoom(), MIN_ZOOM);
}
