//! Synthetic fixtures shared by unit tests.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

/// Encode an image as PNG bytes.
pub(crate) fn encode_png(img: &DynamicImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .expect("PNG encoding of a fixture");
    buffer.into_inner()
}

/// Decode WebP bytes produced by the encoder under test.
pub(crate) fn decode_webp(bytes: &[u8]) -> DynamicImage {
    image::load_from_memory_with_format(bytes, ImageFormat::WebP).expect("valid WebP output")
}

/// Smooth opaque RGB gradient.
pub(crate) fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    }))
}

/// Opaque gradient with deterministic grain, photo-like for the encoder.
pub(crate) fn noisy_photo(width: u32, height: u32) -> DynamicImage {
    let mut state = 0x2545_F491_u32;
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let grain = (state % 48) as i32 - 24;
        let shade = |base: u32| (base as i32 + grain).clamp(0, 255) as u8;
        Rgb([
            shade(x * 255 / width.max(1)),
            shade(y * 255 / height.max(1)),
            shade((x + y) * 127 / (width + height).max(1)),
        ])
    }))
}

/// Square icon: an opaque disc on a fully transparent background, with a
/// half-transparent ring.
pub(crate) fn translucent_icon(size: u32) -> DynamicImage {
    let center = size as f32 / 2.0;
    DynamicImage::ImageRgba8(RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < center * 0.6 {
            Rgba([220, 40, 40, 255])
        } else if distance < center * 0.85 {
            Rgba([40, 40, 220, 128])
        } else {
            Rgba([0, 0, 0, 0])
        }
    }))
}

/// Hand-built 2x2 palette PNG with a `tRNS` chunk.
///
/// Palette entry 0 is opaque red, entry 1 is fully transparent blue. Rows are
/// `[0, 1]` and `[1, 0]`.
pub(crate) fn palette_png_with_trns() -> Vec<u8> {
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&2u32.to_be_bytes());
    ihdr.extend_from_slice(&2u32.to_be_bytes());
    // bit depth 8, colour type 3 (indexed), deflate, no filter, no interlace
    ihdr.extend_from_slice(&[8, 3, 0, 0, 0]);

    let plte = [255, 0, 0, 0, 0, 255];
    let trns = [255, 0];
    // Each scanline starts with filter type 0
    let scanlines = [0, 0, 1, 0, 1, 0];

    let mut png = crate::decode::PNG_SIGNATURE.to_vec();
    push_chunk(&mut png, b"IHDR", &ihdr);
    push_chunk(&mut png, b"PLTE", &plte);
    push_chunk(&mut png, b"tRNS", &trns);
    push_chunk(&mut png, b"IDAT", &zlib_stored(&scanlines));
    push_chunk(&mut png, b"IEND", &[]);
    png
}

fn push_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(kind);
    png.extend_from_slice(data);

    let mut crc_input = kind.to_vec();
    crc_input.extend_from_slice(data);
    png.extend_from_slice(&crc32(&crc_input).to_be_bytes());
}

/// Wrap data in a zlib stream made of a single stored deflate block.
fn zlib_stored(data: &[u8]) -> Vec<u8> {
    let len = data.len() as u16;
    let mut out = vec![0x78, 0x01, 0x01];
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&(!len).to_le_bytes());
    out.extend_from_slice(data);
    out.extend_from_slice(&adler32(data).to_be_bytes());
    out
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = u32::MAX;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

fn adler32(data: &[u8]) -> u32 {
    let (mut a, mut b) = (1u32, 0u32);
    for &byte in data {
        a = (a + byte as u32) % 65521;
        b = (b + a) % 65521;
    }
    (b << 16) | a
}
