#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod flood_fill;
pub mod history;
pub mod image_loader;
pub mod input;
pub mod raster;
pub mod session;
pub mod snapshot;
pub mod stroke;
pub mod ticker;

pub use app::InkApp;
pub use config::SessionConfig;
pub use error::{InkError, InkResult};
pub use event::{ChannelHandler, EventBus, EventHandler, InkEvent};
pub use flood_fill::{flood_fill, FillOutcome};
pub use history::History;
pub use image_loader::{decode_image, load_image};
pub use input::{InputEvent, InputHandler, PointerKind};
pub use raster::{Brush, CompositeMode, Raster};
pub use session::{DrawingSession, Mode, SessionState};
pub use snapshot::{PngCodec, Snapshot, SnapshotCodec, SnapshotId};
pub use stroke::{CurveSegment, SmoothStep, StrokeState};
pub use ticker::FrameTicker;
