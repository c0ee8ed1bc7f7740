//! Gesture state machine
//!
//! Classifies the active pointers as a corner drag, a pan or a pinch and
//! routes motion accordingly. The state is a plain value: each event consumes
//! the current [`GestureState`] and returns the next one, so a scripted event
//! sequence can be replayed in tests without any display surface.
//!
//! Transitions:
//!
//! | Mode | Down | Move | Up / Cancel |
//! |---|---|---|---|
//! | Idle | 2 pointers: Pinching; handle hit: Dragging; else Panning | hover only | stays Idle |
//! | Dragging(i) | 2 pointers: Pinching | own pointer moves corner `i` | own pointer: Idle |
//! | Panning | 2 pointers: Pinching | own pointer pans incrementally | own pointer: Idle |
//! | Pinching | extra pointers are tracked only | pair re-zooms at current center | fewer than 2 pointers: Idle |

use crate::constants::{PINCH_MIN_DISTANCE, clamp_zoom};
use crate::quad::{Quad, hit_test};
use crate::types::{Canvas, Point, PointerId, Size};
use crate::viewport::{Viewport, canvas_to_image, zoom_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer input, already converted to canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub pos: Point,
}

impl PointerEvent {
    pub fn down(id: PointerId, pos: Point) -> Self {
        Self {
            id,
            phase: PointerPhase::Down,
            pos,
        }
    }

    pub fn moved(id: PointerId, pos: Point) -> Self {
        Self {
            id,
            phase: PointerPhase::Move,
            pos,
        }
    }

    pub fn up(id: PointerId, pos: Point) -> Self {
        Self {
            id,
            phase: PointerPhase::Up,
            pos,
        }
    }

    pub fn cancel(id: PointerId, pos: Point) -> Self {
        Self {
            id,
            phase: PointerPhase::Cancel,
            pos,
        }
    }
}

/// Snapshot taken when the second pointer lands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchStart {
    pub start_distance: f64,
    pub start_zoom: f64,
    pub center: Point,
}

impl PinchStart {
    fn capture(a: Point, b: Point, zoom: f64) -> Self {
        Self {
            start_distance: a.distance(b).max(PINCH_MIN_DISTANCE),
            start_zoom: zoom,
            center: a.midpoint(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureMode {
    #[default]
    Idle,
    Dragging {
        pointer: PointerId,
        corner: usize,
    },
    Panning {
        pointer: PointerId,
        anchor: Point,
    },
    Pinching(PinchStart),
}

/// Active pointers with their last canvas position, in press order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSet {
    entries: Vec<(PointerId, Point)>,
}

impl PointerSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.entries.iter().any(|(pid, _)| *pid == id)
    }

    pub fn get(&self, id: PointerId) -> Option<Point> {
        self.entries
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, pos)| *pos)
    }

    fn press(&mut self, id: PointerId, pos: Point) {
        self.release(id);
        self.entries.push((id, pos));
    }

    /// Returns false if the pointer was not tracked
    fn update(&mut self, id: PointerId, pos: Point) -> bool {
        match self.entries.iter_mut().find(|(pid, _)| *pid == id) {
            Some(entry) => {
                entry.1 = pos;
                true
            }
            None => false,
        }
    }

    fn release(&mut self, id: PointerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(pid, _)| *pid != id);
        self.entries.len() != before
    }

    /// The two earliest pointers, which drive a pinch
    fn pair(&self) -> Option<((PointerId, Point), (PointerId, Point))> {
        match self.entries.as_slice() {
            [a, b, ..] => Some((*a, *b)),
            _ => None,
        }
    }
}

/// Everything a gesture may read or mutate while handling one event
pub struct Scene<'a> {
    pub viewport: &'a mut Viewport,
    pub quad: Option<&'a mut Quad>,
    pub image: Size,
    pub canvas: Canvas,
}

impl Scene<'_> {
    fn hit(&self, pos: Point) -> Option<usize> {
        self.quad.as_deref().and_then(|quad| {
            hit_test(
                pos,
                quad,
                &*self.viewport,
                self.image,
                self.canvas.size,
                self.canvas.hit_radius(),
            )
        })
    }
}

/// What the caller should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Repaint,
    /// Idle pointer motion; the handle under the pointer, if any
    Hover(Option<usize>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureState {
    pointers: PointerSet,
    mode: GestureMode,
}

impl GestureState {
    pub fn mode(&self) -> &GestureMode {
        &self.mode
    }

    pub fn pointers(&self) -> &PointerSet {
        &self.pointers
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, GestureMode::Idle)
    }

    /// Feed one pointer event through the state machine.
    pub fn step(mut self, event: &PointerEvent, scene: &mut Scene<'_>) -> (Self, Effect) {
        let effect = match event.phase {
            PointerPhase::Down => self.on_down(event.id, event.pos, scene),
            PointerPhase::Move => self.on_move(event.id, event.pos, scene),
            PointerPhase::Up | PointerPhase::Cancel => self.on_release(event.id, scene),
        };
        (self, effect)
    }

    /// Abort a corner drag whose quad is no longer valid. Pointers stay
    /// tracked; the user has to press again to start a new gesture.
    pub fn cancel_drag(mut self) -> Self {
        if matches!(self.mode, GestureMode::Dragging { .. }) {
            log::debug!("Cancelling corner drag");
            self.mode = GestureMode::Idle;
        }
        self
    }

    fn on_down(&mut self, id: PointerId, pos: Point, scene: &mut Scene<'_>) -> Effect {
        self.pointers.press(id, pos);

        match self.pointers.len() {
            1 => {
                self.mode = match scene.hit(pos) {
                    Some(corner) => GestureMode::Dragging {
                        pointer: id,
                        corner,
                    },
                    None => GestureMode::Panning {
                        pointer: id,
                        anchor: pos,
                    },
                };
            }
            2 => {
                if let Some(((_, a), (_, b))) = self.pointers.pair() {
                    let start = PinchStart::capture(a, b, scene.viewport.zoom());
                    self.mode = GestureMode::Pinching(start);
                    log::debug!("Pinch started");
                }
            }
            // Only reachable while already pinching
            _ => {}
        }

        Effect::None
    }

    fn on_move(&mut self, id: PointerId, pos: Point, scene: &mut Scene<'_>) -> Effect {
        if !self.pointers.update(id, pos) {
            // Hovering pointer that never pressed
            return match self.mode {
                GestureMode::Idle => Effect::Hover(scene.hit(pos)),
                _ => Effect::None,
            };
        }

        match self.mode {
            GestureMode::Idle => Effect::Hover(scene.hit(pos)),
            GestureMode::Panning { pointer, anchor } if pointer == id => {
                scene.viewport.offset += pos - anchor;
                self.mode = GestureMode::Panning {
                    pointer,
                    anchor: pos,
                };
                Effect::Repaint
            }
            GestureMode::Dragging { pointer, corner } if pointer == id => {
                match scene.quad.as_deref_mut() {
                    Some(quad) => {
                        let p =
                            canvas_to_image(pos, &*scene.viewport, scene.image, scene.canvas.size);
                        quad.set_point(corner, p);
                        Effect::Repaint
                    }
                    None => {
                        self.mode = GestureMode::Idle;
                        Effect::None
                    }
                }
            }
            GestureMode::Pinching(start) => {
                let Some(((a_id, a), (b_id, b))) = self.pointers.pair() else {
                    return Effect::None;
                };
                if id != a_id && id != b_id {
                    return Effect::None;
                }

                let factor = a.distance(b) / start.start_distance;
                let target = clamp_zoom(start.start_zoom * factor);
                let center = a.midpoint(b);
                *scene.viewport = zoom_to(
                    center,
                    target,
                    &*scene.viewport,
                    scene.image,
                    scene.canvas.size,
                );
                Effect::Repaint
            }
            _ => Effect::None,
        }
    }

    fn on_release(&mut self, id: PointerId, scene: &mut Scene<'_>) -> Effect {
        let pair_before = self.pointers.pair().map(|((a, _), (b, _))| (a, b));
        if !self.pointers.release(id) {
            return Effect::None;
        }

        match self.mode {
            GestureMode::Pinching(_) => match self.pointers.pair() {
                None => {
                    log::debug!("Pinch ended");
                    self.mode = GestureMode::Idle;
                }
                Some(((_, a), (_, b))) => {
                    // A third finger takes over; restart from the current zoom
                    if pair_before.is_some_and(|(x, y)| x == id || y == id) {
                        let start = PinchStart::capture(a, b, scene.viewport.zoom());
                        self.mode = GestureMode::Pinching(start);
                    }
                }
            },
            GestureMode::Dragging { pointer, .. } | GestureMode::Panning { pointer, .. }
                if pointer == id =>
            {
                self.mode = GestureMode::Idle;
            }
            _ => {}
        }

        Effect::None
    }
}
