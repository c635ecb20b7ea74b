use egui::Pos2;

/// One quadratic piece of a smoothed stroke, ready to hand to the raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSegment {
    pub start: Pos2,
    pub control: Pos2,
    pub end: Pos2,
}

impl CurveSegment {
    /// True when all three points coincide and the segment draws nothing
    pub fn is_degenerate(&self) -> bool {
        self.start == self.control && self.control == self.end
    }
}

/// What one draw tick produced for the active stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothStep {
    pub segment: CurveSegment,
    /// Set when new input arrived since the previous tick
    pub moved_to: Option<Pos2>,
}

/// Rolling points for the stroke currently being drawn.
///
/// Pointer samples only touch `current`. Each tick draws a curve between the
/// midpoints of consecutive samples, bending through the sample itself
/// (midpoint smoothing), so the output never depends on how often the input
/// device reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeState {
    previous: Pos2,
    previous_mid: Pos2,
    current: Pos2,
}

impl StrokeState {
    /// Start a stroke where the pointer went down
    pub fn new(start: Pos2) -> Self {
        Self {
            previous: start,
            previous_mid: start,
            current: start,
        }
    }

    /// Record the latest pointer sample. Nothing is drawn until the next tick.
    pub fn update(&mut self, pos: Pos2) {
        self.current = pos;
    }

    pub fn current(&self) -> Pos2 {
        self.current
    }

    /// Advance the smoother by one tick
    pub fn advance(&mut self) -> SmoothStep {
        let mid = midpoint(self.previous, self.current);
        let segment = CurveSegment {
            start: mid,
            control: self.previous,
            end: self.previous_mid,
        };
        let moved_to = (self.current != self.previous).then_some(self.current);

        self.previous = self.current;
        self.previous_mid = mid;

        SmoothStep { segment, moved_to }
    }
}

fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_first_tick_without_movement_is_degenerate() {
        let mut state = StrokeState::new(pos2(3.0, 4.0));
        let step = state.advance();
        assert!(step.segment.is_degenerate());
        assert_eq!(step.moved_to, None);
    }

    #[test]
    fn test_tick_bends_through_the_previous_sample() {
        let mut state = StrokeState::new(pos2(0.0, 0.0));
        state.update(pos2(10.0, 0.0));
        let first = state.advance();

        assert_eq!(first.segment.start, pos2(5.0, 0.0));
        assert_eq!(first.segment.control, pos2(0.0, 0.0));
        assert_eq!(first.segment.end, pos2(0.0, 0.0));
        assert_eq!(first.moved_to, Some(pos2(10.0, 0.0)));

        state.update(pos2(10.0, 10.0));
        let second = state.advance();

        assert_eq!(second.segment.start, pos2(10.0, 5.0));
        assert_eq!(second.segment.control, pos2(10.0, 0.0));
        // Each segment picks up where the last one started
        assert_eq!(second.segment.end, first.segment.start);
    }

    #[test]
    fn test_only_latest_sample_between_ticks_counts() {
        let mut bursty = StrokeState::new(pos2(0.0, 0.0));
        bursty.update(pos2(1.0, 1.0));
        bursty.update(pos2(2.0, 2.0));
        bursty.update(pos2(8.0, 8.0));

        let mut sparse = StrokeState::new(pos2(0.0, 0.0));
        sparse.update(pos2(8.0, 8.0));

        assert_eq!(bursty.advance(), sparse.advance());
    }

    #[test]
    fn test_idle_tick_after_movement_reports_no_move() {
        let mut state = StrokeState::new(pos2(0.0, 0.0));
        state.update(pos2(4.0, 2.0));
        state.advance();

        let idle = state.advance();
        assert_eq!(idle.moved_to, None);
        assert_eq!(idle.segment.control, pos2(4.0, 2.0));
    }
}
