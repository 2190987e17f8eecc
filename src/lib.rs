#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! Packed-color math and timed per-pixel fades for addressable LED strips.
//!
//! # Core Concepts
//!
//! - **`PackedRgb`**: A `0x00RRGGBB` pixel word, as stored in strip buffers
//! - **`apply_dimming`**: Steps every pixel's fade by an elapsed time, writing an output buffer
//! - **`FadeFrame`**: Owns the source, output, rate and remaining-time buffers of one session
//! - **`WreathDisplay`**: Services a `FadeFrame` from a `TimeSource` and pushes frames to a `PixelSink`
//! - **`DisplayConfig`**: Channel order, brightness, speed and per-segment overrides
//! - **`FadeTrace`**: Optional per-pixel diagnostics hook
//!
//! A fade rate is the fraction of brightness gained or lost per millisecond.
//! Positive rates fade toward black, negative rates fade up toward the source
//! color, and zero shows the source color unchanged.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod command;
pub mod config;
pub mod display;
pub mod fade;
pub mod frame;
pub mod packed;
pub mod time;
pub mod types;

pub use colors::{
    ChannelOrder, brighten_and_convert, dim_color, dim_range, hsv_to_rgb, hue_dist,
    merge_and_scale, scale_color, scale_color_saturating,
};
pub use command::DisplayAction;
pub use config::{DisplayConfig, DisplayConfigBuilder, SegmentLayout};
pub use display::{FrameStatus, PixelSink, WreathDisplay};
pub use fade::{
    ChangedOnly, FadeDirection, FadeEvent, FadeTrace, NoTrace, apply_dimming,
    apply_dimming_traced, fade_fraction,
};
#[cfg(feature = "defmt")]
pub use fade::DefmtTrace;
pub use frame::{DEFAULT_FADE_DURATION_MS, FadeFrame};
pub use packed::PackedRgb;
pub use time::{FrameClock, TimeDuration, TimeInstant, TimeSource};
pub use types::FadeError;

pub const BLACK: PackedRgb = PackedRgb::new(0, 0, 0);
pub const WHITE: PackedRgb = PackedRgb::new(255, 255, 255);
pub const RED: PackedRgb = PackedRgb::new(255, 0, 0);
pub const GREEN: PackedRgb = PackedRgb::new(0, 255, 0);
pub const BLUE: PackedRgb = PackedRgb::new(0, 0, 255);
