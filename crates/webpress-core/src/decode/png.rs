//! PNG decoding with signature validation.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};

use super::{DecodeError, DecodedImage};

/// The 8-byte signature every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Check whether bytes start with the PNG signature.
///
/// This is a header check only; it does not guarantee the rest of the file
/// decodes.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.len() >= PNG_SIGNATURE.len() && bytes[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}

/// Decode a PNG image from bytes into an 8-bit pixel buffer.
///
/// Images with an alpha channel (RGBA, grayscale+alpha, or palette with a
/// transparency chunk) are returned as RGBA; everything else as RGB.
/// 16-bit samples are reduced to 8 bits.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the signature is not PNG.
/// Returns `DecodeError::CorruptedFile` if the PNG stream cannot be decoded.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if !is_png(bytes) {
        return Err(DecodeError::InvalidFormat);
    }

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(ImageFormat::Png);

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(normalize(img))
}

fn normalize(img: DynamicImage) -> DecodedImage {
    if img.color().has_alpha() {
        DecodedImage::from_rgba_image(img.into_rgba8())
    } else {
        DecodedImage::from_rgb_image(img.into_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;
    use crate::test_support::{encode_png, gradient_rgb, palette_png_with_trns, translucent_icon};

    #[test]
    fn test_is_png() {
        assert!(is_png(&PNG_SIGNATURE));
        assert!(!is_png(&PNG_SIGNATURE[..7]));
        assert!(!is_png(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0]));
        assert!(!is_png(&[]));
    }

    #[test]
    fn test_decode_rgb_png() {
        let png = encode_png(&gradient_rgb(40, 30));
        let img = decode_png(&png).unwrap();

        assert_eq!((img.width, img.height), (40, 30));
        assert_eq!(img.layout, PixelLayout::Rgb);
        assert_eq!(img.pixels.len(), 40 * 30 * 3);
        assert!(!img.has_alpha());
    }

    #[test]
    fn test_decode_rgba_png() {
        let png = encode_png(&translucent_icon(16));
        let img = decode_png(&png).unwrap();

        assert_eq!((img.width, img.height), (16, 16));
        assert_eq!(img.layout, PixelLayout::Rgba);
        assert!(img.has_transparency());
    }

    #[test]
    fn test_decode_grayscale_png_becomes_rgb() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_fn(8, 8, |x, _| {
            image::Luma([(x * 30) as u8])
        }));
        let img = decode_png(&encode_png(&gray)).unwrap();

        assert_eq!(img.layout, PixelLayout::Rgb);
        assert_eq!(&img.pixels[0..3], &[0, 0, 0]);
        assert_eq!(&img.pixels[3..6], &[30, 30, 30]);
    }

    #[test]
    fn test_decode_16bit_png_reduced_to_8bit() {
        let deep = DynamicImage::ImageRgb16(image::ImageBuffer::from_pixel(
            4,
            4,
            image::Rgb([u16::MAX, 0, u16::MAX]),
        ));
        let img = decode_png(&encode_png(&deep)).unwrap();

        assert_eq!(img.layout, PixelLayout::Rgb);
        assert_eq!(&img.pixels[0..3], &[255, 0, 255]);
    }

    #[test]
    fn test_decode_wrong_signature() {
        let result = decode_png(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
        assert_eq!(result.unwrap_err(), DecodeError::InvalidFormat);
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert_eq!(decode_png(&[]).unwrap_err(), DecodeError::InvalidFormat);
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(&gradient_rgb(20, 20));
        let truncated = &png[..png.len() / 2];

        match decode_png(truncated) {
            Err(DecodeError::CorruptedFile(_)) => {}
            other => panic!("Expected CorruptedFile error, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_gray_alpha_png_becomes_rgba() {
        let gray_alpha = DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_fn(4, 2, |x, _| {
            image::LumaA([100, (x * 80) as u8])
        }));
        let img = decode_png(&encode_png(&gray_alpha)).unwrap();

        assert_eq!(img.layout, PixelLayout::Rgba);
        assert!(img.has_alpha());
        assert!(img.has_transparency());
        assert_eq!(&img.pixels[0..4], &[100, 100, 100, 0]);
        assert_eq!(&img.pixels[4..8], &[100, 100, 100, 80]);
    }

    #[test]
    fn test_decode_palette_png_with_trns_becomes_rgba() {
        let img = decode_png(&palette_png_with_trns()).unwrap();

        assert_eq!((img.width, img.height), (2, 2));
        assert_eq!(img.layout, PixelLayout::Rgba);
        assert!(img.has_transparency());
        assert_eq!(
            img.pixels,
            vec![
                255, 0, 0, 255, 0, 0, 255, 0, //
                0, 0, 255, 0, 255, 0, 0, 255,
            ]
        );
    }
}
