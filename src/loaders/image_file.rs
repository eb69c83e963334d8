use crate::error::Result;
use std::path::Path;

/// Decode an image file into RGBA8.
pub fn load_image(path: impl AsRef<Path>) -> Result<image::RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path)?.to_rgba8();
    tracing::info!(
        "Loaded image {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Decode an in-memory image (format guessed from its header) into RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<image::RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_png_roundtrips_pixels() {
        let source = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
        let mut png = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.as_raw(), source.as_raw());
    }

    #[test]
    fn test_garbage_is_an_image_error() {
        assert!(matches!(
            decode_image(b"not an image"),
            Err(crate::Error::Image(_))
        ));
    }
}
