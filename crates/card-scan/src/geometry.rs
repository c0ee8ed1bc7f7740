//! Small polygon helpers shared by detection and warping

/// Order four corners as top-left, top-right, bottom-right, bottom-left.
///
/// Top-left has the smallest `x + y`, bottom-right the largest; top-right has
/// the smallest `y - x`, bottom-left the largest.
pub fn order_corners(points: [(f32, f32); 4]) -> [(f32, f32); 4] {
    let sum = |p: &(f32, f32)| p.0 + p.1;
    let diff = |p: &(f32, f32)| p.1 - p.0;

    let pick = |key: &dyn Fn(&(f32, f32)) -> f32, largest: bool| {
        let mut best = points[0];
        for p in &points[1..] {
            let better = if largest {
                key(p) > key(&best)
            } else {
                key(p) < key(&best)
            };
            if better {
                best = *p;
            }
        }
        best
    };

    [
        pick(&sum, false),
        pick(&diff, false),
        pick(&sum, true),
        pick(&diff, true),
    ]
}

pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Absolute polygon area (shoelace formula)
pub fn polygon_area(points: &[(f32, f32)]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..points.len() {
        let (x1, y1) = points[i];
        let (x2, y2) = points[(i + 1) % points.len()];
        twice += x1 * y2 - x2 * y1;
    }
    (twice / 2.0).abs()
}
