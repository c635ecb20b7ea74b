use egui::{Pos2, Rect, Response};

/// The four pointer events the drawing session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The pointer left the surface mid-gesture
    Cancel,
}

/// A pointer event in raster coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: PointerKind,
    pub pos: Pos2,
}

impl InputEvent {
    pub fn new(kind: PointerKind, pos: Pos2) -> Self {
        Self { kind, pos }
    }

    pub fn down(pos: Pos2) -> Self {
        Self::new(PointerKind::Down, pos)
    }

    pub fn moved(pos: Pos2) -> Self {
        Self::new(PointerKind::Move, pos)
    }

    pub fn up(pos: Pos2) -> Self {
        Self::new(PointerKind::Up, pos)
    }

    pub fn cancel(pos: Pos2) -> Self {
        Self::new(PointerKind::Cancel, pos)
    }
}

/// Map a screen position inside `canvas_rect` onto a raster of `raster_size`
pub fn to_raster_space(pos: Pos2, canvas_rect: Rect, raster_size: [usize; 2]) -> Pos2 {
    let local = pos - canvas_rect.min;
    let sx = if canvas_rect.width() > 0.0 {
        raster_size[0] as f32 / canvas_rect.width()
    } else {
        1.0
    };
    let sy = if canvas_rect.height() > 0.0 {
        raster_size[1] as f32 / canvas_rect.height()
    } else {
        1.0
    };
    Pos2::new(local.x * sx, local.y * sy)
}

/// Turns egui pointer state on the canvas widget into `InputEvent`s
#[derive(Debug, Default)]
pub struct InputHandler {
    pressed: bool,
    cancelled: bool,
    last_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's canvas response and generate our InputEvents
    pub fn process(&mut self, response: &Response, raster_size: [usize; 2]) -> Vec<InputEvent> {
        let screen_pos = response.interact_pointer_pos().or_else(|| response.hover_pos());
        let down = response.is_pointer_button_down_on();
        let inside = screen_pos.is_some_and(|p| response.rect.contains(p));
        let pos = screen_pos.map(|p| to_raster_space(p, response.rect, raster_size));

        self.step(down, inside, pos)
    }

    /// State machine behind `process`, independent of egui types
    fn step(&mut self, down: bool, inside: bool, pos: Option<Pos2>) -> Vec<InputEvent> {
        let mut events = Vec::new();

        match (self.pressed, down) {
            (false, true) => {
                if let Some(pos) = pos.filter(|_| inside) {
                    events.push(InputEvent::down(pos));
                    self.pressed = true;
                    self.cancelled = false;
                    self.last_pos = Some(pos);
                }
            }
            (true, true) if !self.cancelled => {
                if !inside {
                    let at = pos.or(self.last_pos).unwrap_or_default();
                    events.push(InputEvent::cancel(at));
                    self.cancelled = true;
                } else if let Some(pos) = pos {
                    if Some(pos) != self.last_pos {
                        events.push(InputEvent::moved(pos));
                        self.last_pos = Some(pos);
                    }
                }
            }
            (true, false) => {
                if !self.cancelled {
                    let at = pos.or(self.last_pos).unwrap_or_default();
                    events.push(InputEvent::up(at));
                }
                self.pressed = false;
                self.cancelled = false;
                self.last_pos = None;
            }
            _ => {}
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_to_raster_space_scales_canvas() {
        let rect = Rect::from_min_max(pos2(100.0, 50.0), pos2(300.0, 150.0));
        let p = to_raster_space(pos2(200.0, 100.0), rect, [400, 200]);
        assert_eq!(p, pos2(200.0, 100.0));
    }

    #[test]
    fn test_press_drag_release() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.step(true, true, Some(pos2(1.0, 1.0))),
            vec![InputEvent::down(pos2(1.0, 1.0))]
        );
        // Same position again: nothing new
        assert!(handler.step(true, true, Some(pos2(1.0, 1.0))).is_empty());
        assert_eq!(
            handler.step(true, true, Some(pos2(2.0, 3.0))),
            vec![InputEvent::moved(pos2(2.0, 3.0))]
        );
        assert_eq!(
            handler.step(false, true, None),
            vec![InputEvent::up(pos2(2.0, 3.0))]
        );
    }

    #[test]
    fn test_leaving_canvas_cancels_once() {
        let mut handler = InputHandler::new();
        handler.step(true, true, Some(pos2(1.0, 1.0)));

        assert_eq!(
            handler.step(true, false, Some(pos2(-5.0, 1.0))),
            vec![InputEvent::cancel(pos2(-5.0, 1.0))]
        );
        assert!(handler.step(true, true, Some(pos2(2.0, 2.0))).is_empty());
        // Releasing after a cancel doesn't produce a second end event
        assert!(handler.step(false, true, Some(pos2(2.0, 2.0))).is_empty());
    }
}
