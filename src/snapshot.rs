use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{InkError, InkResult};
use crate::raster::Raster;

/// Identifies one history snapshot; carried by save/restore events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(Uuid);

impl SnapshotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Turns a raster into an opaque blob and back
pub trait SnapshotCodec: Send {
    fn encode(&self, raster: &Raster) -> InkResult<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> InkResult<Raster>;
}

/// Stores snapshots as PNG images
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl SnapshotCodec for PngCodec {
    fn encode(&self, raster: &Raster) -> InkResult<Vec<u8>> {
        let image = RgbaImage::from_raw(
            raster.width() as u32,
            raster.height() as u32,
            raster.to_rgba_unmultiplied(),
        )
        .ok_or_else(|| InkError::EncodeFailure("raster size does not match its pixel data".to_owned()))?;

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|err| InkError::EncodeFailure(err.to_string()))?;
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> InkResult<Raster> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|err| InkError::DecodeFailure(err.to_string()))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Raster::from_rgba_unmultiplied(width as usize, height as usize, image.as_raw())
    }
}

/// An encoded copy of the raster at one point in time. Cheap to clone.
#[derive(Clone)]
pub struct Snapshot {
    id: SnapshotId,
    data: Arc<[u8]>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("id", &self.id)
            .field("data", &format!("<{} bytes>", self.data.len()))
            .finish()
    }
}

impl Snapshot {
    /// Encode the raster's current state
    pub fn capture(codec: &dyn SnapshotCodec, raster: &Raster) -> InkResult<Self> {
        let data = codec.encode(raster)?;
        Ok(Self {
            id: SnapshotId::new(),
            data: data.into(),
        })
    }

    /// Decode back into a raster
    pub fn restore(&self, codec: &dyn SnapshotCodec) -> InkResult<Raster> {
        codec.decode(&self.data)
    }

    pub fn id(&self) -> SnapshotId {
        self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
