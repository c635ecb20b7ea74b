use egui::Pos2;

use crate::snapshot::SnapshotId;

/// Everything the drawing core announces to its subscribers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InkEvent {
    /// A stroke started where the pointer went down
    DrawBegin(Pos2),
    /// A draw tick rendered up to a new pointer position
    Draw(Pos2),
    /// The stroke finished (pointer up or cancelled)
    DrawEnd(Pos2),
    /// A new history entry was recorded
    Save(SnapshotId),
    /// Undo or redo replaced the raster with an earlier or later entry
    Restored(SnapshotId),
}
