//! Alpha flattening for outputs that drop transparency.

/// Composite straight-alpha RGBA pixels over an opaque background.
///
/// Returns an RGB buffer with 3 bytes per input pixel. Trailing bytes that
/// do not form a whole pixel are ignored; callers validate buffer length
/// beforehand.
pub fn flatten_alpha(rgba: &[u8], background: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);

    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for channel in 0..3 {
            rgb.push(blend(px[channel], background[channel], alpha));
        }
    }

    rgb
}

#[inline]
fn blend(fg: u8, bg: u8, alpha: u32) -> u8 {
    let value = fg as u32 * alpha + bg as u32 * (255 - alpha);
    ((value + 127) / 255) as u8
}
