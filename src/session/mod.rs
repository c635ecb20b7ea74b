//! The drawing session ties the raster, the stroke smoother, the flood filler
//! and the snapshot history together.
//!
//! Pointer callbacks only record where the pointer is; pixels change on
//! [`DrawingSession::tick`], which the host calls once per frame (or hands to a
//! [`crate::ticker::FrameTicker`]). History snapshots are taken only when a
//! stroke or fill completes, so every entry is a finished picture.
//!
//! # State Management
//!
//! - `Idle` → `StrokeActive` on pointer down in draw/erase mode
//! - `StrokeActive` → `StrokeEnding` on pointer up or cancel (the stroke is
//!   kept); the next tick draws the tail, emits `DrawEnd` and saves history
//!   before returning to `Idle`
//! - `Idle` → `FloodPending` on pointer down in flood mode; the next tick runs
//!   the fill and returns to `Idle`
//!
//! # Example
//!
//! ```rust,no_run
//! use inkpad::{DrawingSession, SessionConfig};
//! use egui::pos2;
//!
//! let mut session = DrawingSession::new(&SessionConfig::default())?;
//! session.pointer_down(pos2(10.0, 10.0))?;
//! session.pointer_move(pos2(40.0, 25.0))?;
//! session.tick()?;
//! session.pointer_up(pos2(40.0, 25.0))?;
//! session.tick()?;
//! session.undo()?;
//! # Ok::<(), inkpad::InkError>(())
//! ```
mod mode;

pub use mode::Mode;

use egui::{Color32, Pos2};

use crate::config::SessionConfig;
use crate::error::{InkError, InkResult};
use crate::event::{EventBus, InkEvent};
use crate::flood_fill::{flood_fill, FillOutcome};
use crate::history::History;
use crate::input::{InputEvent, PointerKind};
use crate::raster::{Brush, Raster};
use crate::snapshot::{PngCodec, Snapshot, SnapshotCodec, SnapshotId};
use crate::stroke::StrokeState;

/// Where the session is in its pointer state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    StrokeActive(StrokeState),
    /// The pointer was released; the next tick closes the stroke
    StrokeEnding(StrokeState),
    /// A fill was requested at this raster position and runs on the next tick
    FloodPending(Pos2),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::StrokeActive(_) => "StrokeActive",
            Self::StrokeEnding(_) => "StrokeEnding",
            Self::FloodPending(_) => "FloodPending",
        }
    }
}

pub struct DrawingSession {
    raster: Raster,
    mode: Mode,
    state: SessionState,
    brush_color: Color32,
    brush_width: f32,
    history: History<Snapshot>,
    codec: Box<dyn SnapshotCodec>,
    events: EventBus,
    /// Bumped every time the raster's pixels change
    revision: u64,
    destroyed: bool,
}

impl std::fmt::Debug for DrawingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSession")
            .field("raster", &self.raster)
            .field("mode", &self.mode)
            .field("state", &self.state.name())
            .field("history_len", &self.history.len())
            .field("history_position", &self.history.position())
            .field("revision", &self.revision)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl DrawingSession {
    /// Creates a session with a blank raster, storing history as PNG
    pub fn new(config: &SessionConfig) -> InkResult<Self> {
        Self::with_codec(config, Box::new(PngCodec))
    }

    /// Creates a session with a custom snapshot codec
    pub fn with_codec(config: &SessionConfig, codec: Box<dyn SnapshotCodec>) -> InkResult<Self> {
        config.validate()?;

        let raster = Raster::new(config.width, config.height);
        let initial = Snapshot::capture(codec.as_ref(), &raster)?;
        let history = History::with_limit(initial, config.history_limit);

        log::info!(
            "Drawing session created: {}x{}, mode {}",
            config.width,
            config.height,
            config.mode
        );

        Ok(Self {
            raster,
            mode: config.mode,
            state: SessionState::Idle,
            brush_color: config.brush_color,
            brush_width: config.brush_width,
            history,
            codec,
            events: EventBus::new(),
            revision: 0,
            destroyed: false,
        })
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    pub fn brush_color(&self) -> Color32 {
        self.brush_color
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        self.brush_color = color;
    }

    pub fn brush_width(&self) -> f32 {
        self.brush_width
    }

    pub fn set_brush_width(&mut self, width: f32) -> InkResult<()> {
        if !(width.is_finite() && width > 0.0) {
            return Err(InkError::InvalidArgument(format!("brush width must be positive, got {}", width)));
        }
        self.brush_width = width;
        Ok(())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_position(&self) -> usize {
        self.history.position()
    }

    pub fn can_undo(&self) -> bool {
        self.is_idle() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.is_idle() && self.history.can_redo()
    }

    /// The snapshot matching what is currently on the raster
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.history.value()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn ensure_alive(&self) -> InkResult<()> {
        if self.destroyed {
            return Err(InkError::InvalidState("session has been destroyed".to_owned()));
        }
        Ok(())
    }

    fn ensure_idle(&self, action: &str) -> InkResult<()> {
        self.ensure_alive()?;
        if !self.is_idle() {
            log::warn!("Rejected {} while {}", action, self.state.name());
            return Err(InkError::InvalidState(format!(
                "cannot {} while {}",
                action,
                self.state.name()
            )));
        }
        Ok(())
    }

    fn brush(&self) -> Brush {
        Brush::new(self.brush_color, self.brush_width, self.mode.composite())
    }

    /// Switch between draw, erase and flood. Only allowed while idle.
    pub fn set_mode(&mut self, mode: Mode) -> InkResult<()> {
        self.ensure_idle("switch mode")?;
        if self.mode != mode {
            log::debug!("Mode changed: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
        Ok(())
    }

    /// Switch mode by name ("draw", "erase" or "flood")
    pub fn set_mode_str(&mut self, name: &str) -> InkResult<()> {
        let mode: Mode = name.parse()?;
        self.set_mode(mode)
    }

    /// Dispatch a logical input event to the matching pointer callback
    pub fn handle_input(&mut self, event: InputEvent) -> InkResult<()> {
        match event.kind {
            PointerKind::Down => self.pointer_down(event.pos),
            PointerKind::Move => self.pointer_move(event.pos),
            PointerKind::Up => self.pointer_up(event.pos),
            PointerKind::Cancel => self.pointer_cancel(event.pos),
        }
    }

    pub fn pointer_down(&mut self, pos: Pos2) -> InkResult<()> {
        self.ensure_alive()?;
        if !self.is_idle() {
            log::debug!("Ignoring pointer down while {}", self.state.name());
            return Ok(());
        }

        if self.mode.is_stroke() {
            self.state = SessionState::StrokeActive(StrokeState::new(pos));
            log::debug!("Stroke started at {:?} ({})", pos, self.mode);
            self.events.emit(InkEvent::DrawBegin(pos));
        } else {
            if !self.raster.contains(pos) {
                return Err(InkError::InvalidArgument(format!(
                    "fill seed {:?} is outside the {}x{} raster",
                    pos,
                    self.raster.width(),
                    self.raster.height()
                )));
            }
            self.state = SessionState::FloodPending(pos);
        }
        Ok(())
    }

    /// Record the latest pointer position; drawing waits for the next tick
    pub fn pointer_move(&mut self, pos: Pos2) -> InkResult<()> {
        self.ensure_alive()?;
        if let SessionState::StrokeActive(stroke) = &mut self.state {
            stroke.update(pos);
        }
        Ok(())
    }

    /// Release the pointer. The stroke is closed on the next tick.
    pub fn pointer_up(&mut self, pos: Pos2) -> InkResult<()> {
        self.ensure_alive()?;
        let SessionState::StrokeActive(mut stroke) = self.state else {
            return Ok(());
        };

        stroke.update(pos);
        self.state = SessionState::StrokeEnding(stroke);
        Ok(())
    }

    /// The pointer left the surface. The partial stroke is kept.
    pub fn pointer_cancel(&mut self, pos: Pos2) -> InkResult<()> {
        if matches!(self.state, SessionState::StrokeActive(_)) {
            log::debug!("Stroke cancelled at {:?}", pos);
        }
        self.pointer_up(pos)
    }

    /// Render pending work. Call once per frame.
    pub fn tick(&mut self) -> InkResult<()> {
        self.ensure_alive()?;
        match self.state {
            SessionState::Idle => Ok(()),
            SessionState::StrokeActive(mut stroke) => {
                self.render_step(&mut stroke);
                self.state = SessionState::StrokeActive(stroke);
                Ok(())
            }
            SessionState::StrokeEnding(mut stroke) => {
                // One step for the last sample, one more to close the gap to it
                self.render_step(&mut stroke);
                self.render_step(&mut stroke);

                self.state = SessionState::Idle;
                log::debug!("Stroke ended at {:?}", stroke.current());
                self.events.emit(InkEvent::DrawEnd(stroke.current()));
                self.save_history()
            }
            SessionState::FloodPending(pos) => {
                self.state = SessionState::Idle;
                self.run_flood_fill(pos)
            }
        }
    }

    /// Advance the smoother once and draw the resulting curve
    fn render_step(&mut self, stroke: &mut StrokeState) {
        let brush = self.brush();
        let step = stroke.advance();

        if !step.segment.is_degenerate() {
            let seg = step.segment;
            self.raster.stroke_quadratic_curve(seg.start, seg.control, seg.end, &brush);
            self.revision += 1;
        }
        if let Some(pos) = step.moved_to {
            self.events.emit(InkEvent::Draw(pos));
        }
    }

    fn run_flood_fill(&mut self, pos: Pos2) -> InkResult<()> {
        let (x, y) = (pos.x.floor() as usize, pos.y.floor() as usize);
        match flood_fill(&mut self.raster, x, y, self.brush_color)? {
            FillOutcome::Unchanged => {
                log::debug!("Fill at ({}, {}) changed nothing; history untouched", x, y);
                Ok(())
            }
            FillOutcome::Filled { pixels } => {
                log::info!("Filled {} pixels from ({}, {})", pixels, x, y);
                self.revision += 1;
                self.save_history()
            }
        }
    }

    fn save_history(&mut self) -> InkResult<()> {
        let snapshot = Snapshot::capture(self.codec.as_ref(), &self.raster)?;
        let id = snapshot.id();
        self.history.save(snapshot)?;
        log::debug!(
            "Saved snapshot {} ({} of {})",
            id,
            self.history.position() + 1,
            self.history.len()
        );
        self.events.emit(InkEvent::Save(id));
        Ok(())
    }

    /// Step back one history entry. Returns false at the oldest entry.
    pub fn undo(&mut self) -> InkResult<bool> {
        self.ensure_idle("undo")?;
        if !self.history.undo() {
            return Ok(false);
        }
        if let Err(err) = self.restore_current() {
            self.history.redo();
            return Err(err);
        }
        Ok(true)
    }

    /// Step forward one history entry. Returns false at the newest entry.
    pub fn redo(&mut self) -> InkResult<bool> {
        self.ensure_idle("redo")?;
        if !self.history.redo() {
            return Ok(false);
        }
        if let Err(err) = self.restore_current() {
            self.history.undo();
            return Err(err);
        }
        Ok(true)
    }

    /// Replace the raster with the snapshot under the history cursor
    fn restore_current(&mut self) -> InkResult<()> {
        let snapshot = self.history.value().ok_or(InkError::HistoryCleared)?;
        let id: SnapshotId = snapshot.id();
        self.raster = snapshot.restore(self.codec.as_ref())?;
        self.revision += 1;
        log::info!("Restored snapshot {}", id);
        self.events.emit(InkEvent::Restored(id));
        Ok(())
    }

    /// Wipe the raster to transparency and record it
    pub fn clear_canvas(&mut self) -> InkResult<()> {
        self.ensure_idle("clear the canvas")?;
        self.raster.clear();
        self.revision += 1;
        self.save_history()
    }

    /// Composite an external image over the raster with its top-left corner
    /// at `at`, then record it
    pub fn draw_image(&mut self, image: &Raster, at: Pos2) -> InkResult<()> {
        self.ensure_idle("draw an image")?;
        self.raster
            .draw_image(image, at.x.round() as i32, at.y.round() as i32);
        self.revision += 1;
        log::info!(
            "Drew {}x{} image at {:?}",
            image.width(),
            image.height(),
            at
        );
        self.save_history()
    }

    /// Swap the canvas contents for an external image: the raster is wiped
    /// to transparency first, so nothing outside the image survives.
    pub fn replace_image(&mut self, image: &Raster) -> InkResult<()> {
        self.ensure_idle("replace the canvas")?;
        self.raster.clear();
        self.raster.draw_image(image, 0, 0);
        self.revision += 1;
        log::info!("Replaced canvas with {}x{} image", image.width(), image.height());
        self.save_history()
    }

    /// Paint the whole canvas one color and record it
    pub fn fill_canvas(&mut self, color: Color32) -> InkResult<()> {
        self.ensure_idle("fill the canvas")?;
        self.raster.fill(color);
        self.revision += 1;
        self.save_history()
    }

    /// Tear the session down. History is released and every later call that
    /// would touch the raster fails.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.state = SessionState::Idle;
        self.history.clear();
        self.destroyed = true;
        log::info!("Drawing session destroyed");
    }
}
