// Turns a pointer drag into discrete brush dabs.
// Visual: a fast swipe still leaves a continuous band instead of a dotted trail,
// because a dab is stamped every 2 to 4 px along the segment.

use crate::types::Point;

/// Spacing between interpolated dab centres, in buffer pixels.
pub const DAB_SPACING: f32 = 2.0;

/// Evenly spaced points from `from` to `to`, both endpoints included.
/// `steps = max(1, floor(distance / 2))`, so `steps + 1` points come out.
pub fn interpolate(from: Point, to: Point) -> impl Iterator<Item = Point> {
    let steps = ((from.distance(to) / DAB_SPACING).floor() as usize).max(1);
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    (0..=steps).map(move |i| {
        let t = i as f32 / steps as f32;
        Point::new(from.x + dx * t, from.y + dy * t)
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Drawing { last: Point },
}

/// Idle/Drawing state machine polled by the host loop.
/// It only produces dab positions; applying them is the editor's job.
#[derive(Clone, Debug, Default)]
pub struct Stroke {
    state: StrokeState,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Idle -> Drawing. Returns the first dab position.
    /// Starting while already drawing restarts the path from `point`.
    pub fn begin(&mut self, point: Point) -> Point {
        self.state = StrokeState::Drawing { last: point };
        point
    }

    /// Drawing -> Drawing. Returns the dab centres from the previous point to `point`.
    /// While idle this yields nothing.
    pub fn extend(&mut self, point: Point) -> Vec<Point> {
        match self.state {
            StrokeState::Idle => Vec::new(),
            StrokeState::Drawing { last } => {
                self.state = StrokeState::Drawing { last: point };
                interpolate(last, point).collect()
            }
        }
    }

    /// Drawing -> Idle. `true` if a stroke was open, so the caller snapshots once.
    pub fn end(&mut self) -> bool {
        let was_drawing = self.is_drawing();
        self.state = StrokeState::Idle;
        was_drawing
    }

    /// Drop the stroke without ending it (the session was reset under it).
    pub fn cancel(&mut self) {
        self.state = StrokeState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_includes_both_endpoints() {
        let pts: Vec<_> = interpolate(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[5], Point::new(10.0, 0.0));
        assert_eq!(pts[1], Point::new(2.0, 0.0));
    }

    #[test]
    fn short_or_zero_segment_gives_two_points() {
        let p = Point::new(3.0, 4.0);
        let pts: Vec<_> = interpolate(p, p).collect();
        assert_eq!(pts, vec![p, p]);

        let pts: Vec<_> = interpolate(Point::new(0.0, 0.0), Point::new(1.5, 0.0)).collect();
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn consecutive_dabs_never_skip_a_brush_width() {
        // floor() rounds the step count down, so gaps land in [2, 4).
        for to in [Point::new(57.3, -40.9), Point::new(3.0, 0.0), Point::new(5.0, 5.0)] {
            let pts: Vec<_> = interpolate(Point::new(0.0, 0.0), to).collect();
            for pair in pts.windows(2) {
                assert!(pair[0].distance(pair[1]) < 2.0 * DAB_SPACING);
            }
        }
    }

    #[test]
    fn state_machine_transitions() {
        let mut stroke = Stroke::new();
        assert!(stroke.extend(Point::new(5.0, 5.0)).is_empty());
        assert!(!stroke.end());

        assert_eq!(stroke.begin(Point::new(0.0, 0.0)), Point::new(0.0, 0.0));
        assert!(stroke.is_drawing());

        let dabs = stroke.extend(Point::new(4.0, 0.0));
        assert_eq!(dabs.len(), 3);
        assert_eq!(stroke.state(), StrokeState::Drawing { last: Point::new(4.0, 0.0) });

        // The next segment starts where the last one stopped.
        let dabs = stroke.extend(Point::new(4.0, 4.0));
        assert_eq!(dabs[0], Point::new(4.0, 0.0));

        assert!(stroke.end());
        assert!(!stroke.end());
    }

    #[test]
    fn cancel_returns_to_idle_without_ending() {
        let mut stroke = Stroke::new();
        stroke.begin(Point::new(1.0, 1.0));
        stroke.cancel();
        assert_eq!(stroke.state(), StrokeState::Idle);
        assert!(!stroke.end());
    }
}
