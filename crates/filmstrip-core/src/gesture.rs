use tracing::debug;

use crate::layout::Point;

/// Which neighbour a completed swipe asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Content moved against the reading direction: show the next image.
    Advance,
    /// Content moved with the reading direction: show the previous image.
    Retreat,
}

/// Coarse classification of the touch sequence in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Panning,
    Pinching,
}

/// Everything captured at gesture start, plus the swipe decision as it
/// stands. The sample is discarded whole when the gesture ends, so a stale
/// decision can never leak into the next touch sequence.
#[derive(Clone, Copy, Debug)]
pub struct GestureSample {
    start: Point,
    start_scroll: f32,
    start_pinch_distance: f32,
    start_scale: f32,
    start_pan: Point,
    decision: Option<SwipeDirection>,
}

/// What the caller should do with a touch-move, in the caller's order:
/// scale before pan for a pinch, strip offset for an unscaled drag, pan for
/// a drag over a magnified image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveEffect {
    None,
    Pinch { scale: f32, pan_target: Point },
    DragStrip { offset: f32 },
    PanImage { target: Point },
}

/// Touch classifier. Feed it the full contact list on every start and move;
/// it keeps one [`GestureSample`] per gesture and reports the effect each
/// move should have.
#[derive(Clone, Copy, Debug, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Panning(GestureSample),
    Pinching(GestureSample),
}

impl Gesture {
    pub fn phase(&self) -> GesturePhase {
        match self {
            Gesture::Idle => GesturePhase::Idle,
            Gesture::Panning(_) => GesturePhase::Panning,
            Gesture::Pinching(_) => GesturePhase::Pinching,
        }
    }

    /// Begin (or re-begin) a gesture from the current contact list. Two or
    /// more contacts start a pinch; the return value tells the caller that
    /// the pinch baseline wants the current index re-asserted.
    pub fn touch_start(
        &mut self,
        points: &[Point],
        scale: f32,
        pan: Point,
        strip_offset: f32,
    ) -> bool {
        let Some(first) = points.first() else {
            *self = Gesture::Idle;
            return false;
        };
        let sample = GestureSample {
            start: *first,
            start_scroll: strip_offset,
            start_pinch_distance: 0.0,
            start_scale: scale,
            start_pan: pan,
            decision: None,
        };
        if points.len() >= 2 {
            debug!(contacts = points.len(), "pinch started");
            *self = Gesture::Pinching(GestureSample {
                start_pinch_distance: pinch_distance(points[0], points[1]),
                ..sample
            });
            true
        } else {
            *self = Gesture::Panning(sample);
            false
        }
    }

    /// Classify one touch-move. `scale` is the viewer's current
    /// magnification and decides whether a one-finger drag moves the strip
    /// or pans the image.
    pub fn touch_move(&mut self, points: &[Point], scale: f32, threshold: f32) -> MoveEffect {
        let Some(first) = points.first() else {
            *self = Gesture::Idle;
            return MoveEffect::None;
        };
        match self {
            Gesture::Idle => MoveEffect::None,
            Gesture::Pinching(sample) => {
                let Some(second) = points.get(1) else {
                    // A contact vanished without an end event; drop the
                    // gesture rather than pinch against a stale baseline.
                    *self = Gesture::Idle;
                    return MoveEffect::None;
                };
                let distance = pinch_distance(*first, *second);
                let scale = if sample.start_pinch_distance > 0.0 {
                    distance / sample.start_pinch_distance * sample.start_scale
                } else {
                    sample.start_scale
                };
                let pan_target = Point::new(
                    sample.start_pan.x + (first.x - sample.start.x),
                    sample.start_pan.y + (first.y - sample.start.y),
                );
                MoveEffect::Pinch { scale, pan_target }
            }
            Gesture::Panning(sample) => {
                if scale > 1.0 {
                    let target = Point::new(
                        sample.start_pan.x + (first.x - sample.start.x),
                        sample.start_pan.y + (first.y - sample.start.y),
                    );
                    MoveEffect::PanImage { target }
                } else {
                    let dx = first.x - sample.start.x;
                    sample.decision = swipe_decision(dx, threshold);
                    MoveEffect::DragStrip {
                        offset: sample.start_scroll - dx,
                    }
                }
            }
        }
    }

    /// End the gesture and hand back the swipe decision, if the travel ever
    /// cleared the threshold. The sample dies here either way.
    pub fn touch_end(&mut self) -> Option<SwipeDirection> {
        let decision = match self {
            Gesture::Panning(sample) => sample.decision,
            _ => None,
        };
        if let Some(direction) = decision {
            debug!(?direction, "swipe decided");
        }
        *self = Gesture::Idle;
        decision
    }
}

/// A swipe must travel strictly beyond `threshold` along x to count; the
/// decision follows the latest position, so backtracking under the
/// threshold revokes it.
pub fn swipe_decision(dx: f32, threshold: f32) -> Option<SwipeDirection> {
    if dx < -threshold {
        Some(SwipeDirection::Advance)
    } else if dx > threshold {
        Some(SwipeDirection::Retreat)
    } else {
        None
    }
}

/// Euclidean distance between the first two contacts of a pinch.
pub fn pinch_distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
