//! BT.601 limited-range YUV to RGB conversion in integer arithmetic.

#[inline]
pub fn clamp_0_255(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Converts one limited-range sample (black at Y=16, white at Y=235, chroma
/// centered at 128). Out of range results saturate instead of wrapping.
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let c = y as i32 - 16;
    let d = u as i32 - 128;
    let e = v as i32 - 128;

    let r = clamp_0_255((298 * c + 516 * d + 128) >> 8);
    let g = clamp_0_255((298 * c - 100 * d - 208 * e + 128) >> 8);
    let b = clamp_0_255((298 * c + 409 * e + 128) >> 8);

    (r, g, b)
}

#[inline]
pub fn luma_to_rgb(y: u8) -> (u8, u8, u8) {
    (y, y, y)
}
