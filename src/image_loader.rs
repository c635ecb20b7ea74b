use crate::error::{InkError, InkResult};
use crate::raster::Raster;

/// Decode an encoded image (PNG, JPEG, GIF, ...) into a raster that can be
/// drawn onto a session with `DrawingSession::draw_image`.
///
/// Bytes that don't look like any known image format are `UnsupportedInput`;
/// a recognised format with broken data is a `DecodeFailure`. Nothing is drawn
/// here, so a failure never leaves a half-composited canvas behind.
pub async fn load_image(bytes: Vec<u8>) -> InkResult<Raster> {
    decode_image(&bytes)
}

/// Blocking version of [`load_image`]
pub fn decode_image(bytes: &[u8]) -> InkResult<Raster> {
    let format = image::guess_format(bytes)
        .map_err(|err| InkError::UnsupportedInput(format!("not a recognised image: {}", err)))?;

    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|err| {
        log::error!("Failed to decode {:?} image: {}", format, err);
        InkError::DecodeFailure(err.to_string())
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Successfully decoded image: {}x{} ({:?})", width, height, format);

    Raster::from_rgba_unmultiplied(width as usize, height as usize, rgba.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{PngCodec, SnapshotCodec};
    use egui::Color32;
    use futures::executor::block_on;

    #[test]
    fn test_loads_png() {
        let mut source = Raster::new(3, 2);
        source.set_pixel(1, 1, Color32::GREEN);
        let bytes = PngCodec.encode(&source).unwrap();

        let loaded = block_on(load_image(bytes)).unwrap();
        assert_eq!(loaded, source);
    }

    #[test]
    fn test_unknown_bytes_are_unsupported() {
        let result = block_on(load_image(b"hello world".to_vec()));
        assert!(matches!(result, Err(InkError::UnsupportedInput(_))));
    }

    #[test]
    fn test_truncated_png_fails_to_decode() {
        let bytes = PngCodec.encode(&Raster::new(4, 4)).unwrap();
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(InkError::DecodeFailure(_))));
    }
}
