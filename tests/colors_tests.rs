//! Integration tests for colors module

mod common;
use common::*;

use palette::{FromColor, Hsv, Srgb};
use wreath_fade::colors::{
    ChannelOrder, brighten_and_convert, dim_color, dim_range, hsv_to_rgb, hue_dist,
    merge_and_scale, scale_color,
};
use wreath_fade::PackedRgb;

/// Reference HSV conversion through palette, hue given as a 0-1 fraction
fn palette_hsv(hue: f64, saturation: f64, value: f64) -> PackedRgb {
    let hsv = Hsv::new((hue * 360.0) as f32, saturation as f32, value as f32);
    PackedRgb::from_srgb(Srgb::from_color(hsv))
}

#[test]
fn scale_identity_and_zero() {
    for color in [WHITE, RED, PackedRgb(0x123456), PackedRgb(0x7F80FE)] {
        assert_eq!(scale_color(color, 1.0), color);
        assert_eq!(scale_color(color, 0.0), BLACK);
    }
}

#[test]
fn scale_truncates_toward_zero() {
    // 0x33 * 0.5 = 25.5
    assert_eq!(scale_color(PackedRgb(0x333333), 0.5), PackedRgb(0x191919));
}

#[test]
fn dim_color_subtracts_per_channel() {
    assert_eq!(dim_color(PackedRgb(0x80_40_20), 0x20), PackedRgb(0x60_20_00));
    assert_eq!(dim_color(PackedRgb(0x05_05_05), 0xFF), BLACK);
}

#[test]
fn dim_range_reports_when_all_off() {
    let mut pixels = [PackedRgb(0x101010), PackedRgb(0x050505), PackedRgb(0xFFFFFF)];

    // Only the first two are dimmed; the third is outside the range
    assert!(!dim_range(&mut pixels, 0, 1, 0x08));
    assert_eq!(pixels[0], PackedRgb(0x080808));
    assert_eq!(pixels[1], BLACK);
    assert_eq!(pixels[2], WHITE);

    assert!(dim_range(&mut pixels, 0, 1, 0x08));
    assert_eq!(pixels[0], BLACK);

    // An inverted range touches nothing and counts as all off
    assert!(dim_range(&mut pixels, 2, 1, 0x08));
    assert_eq!(pixels[2], WHITE);
}

#[test]
fn merge_and_scale_blends_by_amount() {
    assert_eq!(merge_and_scale(1.0, RED, BLUE), RED);
    assert_eq!(merge_and_scale(0.0, RED, BLUE), BLUE);

    // Half of 0xFF0000 is 0x7F8000, which masks down to 0x7F0000
    assert_eq!(merge_and_scale(0.5, RED, BLUE), PackedRgb(0x7F007F));
    // Blue truncates per half (127 + 127); red and green halves sum exactly
    assert_eq!(merge_and_scale(0.5, WHITE, WHITE), PackedRgb(0xFFFFFE));
}

#[test]
fn merge_and_scale_caps_each_channel() {
    assert_eq!(merge_and_scale(1.5, WHITE, BLACK), WHITE);
}

#[test]
fn hsv_to_rgb_creates_primary_colors() {
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), RED);
    assert_eq!(hsv_to_rgb(0.5, 1.0, 1.0), PackedRgb(0x00FFFF));
    assert_eq!(hsv_to_rgb(0.0, 0.0, 0.0), BLACK);
}

#[test]
fn hsv_to_rgb_handles_saturation() {
    // Zero saturation is gray at the given value
    assert_eq!(hsv_to_rgb(0.3, 0.0, 0.5), PackedRgb(0x7F7F7F));
}

#[test]
fn hsv_to_rgb_wraps_at_full_hue() {
    assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
}

#[test]
fn hsv_to_rgb_tracks_palette_conversion() {
    for step in 0..24 {
        let hue = f64::from(step) / 24.0;
        for (saturation, value) in [(1.0, 1.0), (0.5, 0.8), (1.0, 0.25)] {
            let ours = hsv_to_rgb(hue, saturation, value);
            let reference = palette_hsv(hue, saturation, value);
            assert!(
                colors_close(ours, reference, 2),
                "hue {hue} s {saturation} v {value}: {ours:?} vs {reference:?}"
            );
        }
    }
}

#[test]
fn hue_dist_is_radius_over_span() {
    assert!((hue_dist(3.0, 4.0, 10.0) - 0.5).abs() < 1e-12);
    assert_eq!(hue_dist(0.0, 0.0, 5.0), 0.0);
}

#[test]
fn brighten_and_convert_reorders_channels() {
    let color = PackedRgb(0x80_40_20);
    assert_eq!(brighten_and_convert(color, 255, ChannelOrder::Rgb), 0x7F_3F_1F);
    assert_eq!(brighten_and_convert(color, 255, ChannelOrder::Grb), 0x3F_7F_1F);
    assert_eq!(
        brighten_and_convert(color, 255, ChannelOrder::Rgbw),
        0x7F_3F_1F_00
    );
}

#[test]
fn brighten_and_convert_scales_brightness() {
    assert_eq!(brighten_and_convert(WHITE, 128, ChannelOrder::Rgb), 0x7F7F7F);
    assert_eq!(brighten_and_convert(WHITE, 0, ChannelOrder::Rgb), 0);
}

#[test]
fn channel_order_resolves_names_once() {
    assert_eq!(ChannelOrder::from_name("RGB"), ChannelOrder::Rgb);
    assert_eq!(ChannelOrder::from_name("GRB"), ChannelOrder::Grb);
    assert_eq!(ChannelOrder::from_name("RGBW"), ChannelOrder::Rgbw);
    assert_eq!(ChannelOrder::from_name("grb"), ChannelOrder::Rgb);
}
