//! Color adjustments applied after rasterisation.
//!
//! Both transforms are blends between the image and a degenerate version of
//! it: saturation blends toward the luma image, brightness toward black.
//! A factor of 1 returns the input unchanged; 0 returns the degenerate image.
//! Alpha is never touched.
//!
//! Integer behaviour follows the usual `L` conversion and blend: luma is the
//! 16.16 fixed-point ITU-R 601-2 sum rounded to nearest, and the blended value
//! is truncated, then clamped to `0..=255`.

use image::RgbaImage;

/// Apply saturation, then brightness.
pub fn adjust(mut img: RgbaImage, saturation: f32, brightness: f32) -> RgbaImage {
    enhance_color(&mut img, saturation);
    enhance_brightness(&mut img, brightness);
    img
}

/// ITU-R 601-2 luma in 16.16 fixed point, rounded.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

fn blend(degenerate: u8, value: u8, factor: f32) -> u8 {
    let mixed = degenerate as f32 + factor * (value as f32 - degenerate as f32);
    mixed.clamp(0.0, 255.0) as u8
}

/// Blend each pixel toward its luma by `factor`.
pub fn enhance_color(img: &mut RgbaImage, factor: f32) {
    if factor == 1.0 {
        return;
    }
    for px in img.pixels_mut() {
        let [r, g, b, _] = px.0;
        let l = luma(r, g, b);
        px.0[0] = blend(l, r, factor);
        px.0[1] = blend(l, g, factor);
        px.0[2] = blend(l, b, factor);
    }
}

/// Blend each pixel toward black by `factor`.
pub fn enhance_brightness(img: &mut RgbaImage, factor: f32) {
    if factor == 1.0 {
        return;
    }
    for px in img.pixels_mut() {
        for channel in &mut px.0[..3] {
            *channel = blend(0, *channel, factor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn one(px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(1, 1, Rgba(px))
    }

    #[test]
    fn zero_saturation_is_gray_with_alpha_kept() {
        let out = adjust(one([255, 0, 0, 128]), 0.0, 1.0);
        // (255 * 19595 + 0x8000) >> 16 = 76
        assert_eq!(out.get_pixel(0, 0).0, [76, 76, 76, 128]);
    }

    #[test]
    fn unit_factors_are_identity() {
        let src = one([12, 200, 99, 255]);
        assert_eq!(adjust(src.clone(), 1.0, 1.0), src);
    }

    #[test]
    fn brightness_half_darkens() {
        let out = adjust(one([200, 100, 50, 255]), 1.0, 0.5);
        assert_eq!(out.get_pixel(0, 0).0, [100, 50, 25, 255]);
    }

    #[test]
    fn luma_rounds_to_nearest() {
        // 255 * (19595 + 38470) / 65536 = 225.94
        let out = adjust(one([255, 255, 0, 255]), 0.0, 1.0);
        assert_eq!(out.get_pixel(0, 0).0, [226, 226, 226, 255]);
    }

    #[test]
    fn blend_truncates() {
        // 101 * 0.7 = 70.7
        let out = adjust(one([101, 101, 101, 255]), 1.0, 0.7);
        assert_eq!(out.get_pixel(0, 0).0, [70, 70, 70, 255]);
        // 76 + 0.5 * (255 - 76) = 165.5
        let out = adjust(one([255, 0, 0, 255]), 0.5, 1.0);
        assert_eq!(out.get_pixel(0, 0).0[0], 165);
    }

    #[test]
    fn oversaturation_clamps() {
        let out = adjust(one([255, 0, 0, 255]), 4.0, 1.0);
        let [r, g, b, _] = out.get_pixel(0, 0).0;
        assert_eq!((r, g, b), (255, 0, 0));
    }

    #[test]
    fn gray_input_unchanged_by_desaturation() {
        let src = one([90, 90, 90, 255]);
        assert_eq!(adjust(src.clone(), 0.0, 1.0), src);
    }
}
