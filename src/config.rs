//! Display configuration: strip channel order, brightness, speed and segment layouts.

use crate::colors::ChannelOrder;
use crate::types::FadeError;
use heapless::Vec;

/// Maximum number of segment layouts a configuration holds.
pub const MAX_SEGMENTS: usize = 8;

/// Default brightness applied when converting pixels for the strip.
pub const DEFAULT_BRIGHTNESS: u8 = 255;

/// A contiguous run of pixels with its own output settings.
///
/// Pixels not covered by any segment use the configuration defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentLayout {
    /// First pixel of the segment.
    pub offset: usize,

    /// Number of pixels.
    pub len: usize,

    /// Channel order of the strip this segment is wired to.
    pub order: ChannelOrder,

    /// Brightness override, `None` to follow the display default.
    pub brightness: Option<u8>,

    /// Stays lit while the display is blanked (e.g. clock digits).
    pub keep_lit: bool,
}

impl SegmentLayout {
    /// Creates a segment using the given channel order, default brightness, not kept lit.
    pub fn new(offset: usize, len: usize, order: ChannelOrder) -> Self {
        Self {
            offset,
            len,
            order,
            brightness: None,
            keep_lit: false,
        }
    }

    /// Sets a brightness override.
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Keeps the segment on while the display is blanked.
    pub fn keep_lit(mut self) -> Self {
        self.keep_lit = true;
        self
    }

    /// One past the last pixel, saturating at `usize::MAX`.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.len)
    }

    /// Returns true if `index` lies in this segment.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.offset && index < self.end()
    }
}

/// Validated output settings for a display.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    order: ChannelOrder,
    brightness: u8,
    speed_percent: u32,
    segments: Vec<SegmentLayout, MAX_SEGMENTS>,
}

impl DisplayConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> DisplayConfigBuilder {
        DisplayConfigBuilder::new()
    }

    /// Default channel order.
    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    /// Default brightness.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Animation speed as a percentage of real time.
    pub fn speed_percent(&self) -> u32 {
        self.speed_percent
    }

    /// Segment layouts in the order they were added.
    pub fn segments(&self) -> &[SegmentLayout] {
        &self.segments
    }

    /// Returns the segment covering `index`, if any.
    pub fn segment_for(&self, index: usize) -> Option<&SegmentLayout> {
        self.segments.iter().find(|s| s.contains(index))
    }

    pub(crate) fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub(crate) fn set_speed_percent(&mut self, speed_percent: u32) {
        self.speed_percent = speed_percent;
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            order: ChannelOrder::default(),
            brightness: DEFAULT_BRIGHTNESS,
            speed_percent: 100,
            segments: Vec::new(),
        }
    }
}

/// Builder for constructing validated display configurations.
#[derive(Debug)]
pub struct DisplayConfigBuilder {
    config: DisplayConfig,
    overflowed: bool,
}

impl DisplayConfigBuilder {
    /// Creates a builder with RGB order, full brightness and real-time speed.
    pub fn new() -> Self {
        Self {
            config: DisplayConfig::default(),
            overflowed: false,
        }
    }

    /// Sets the default channel order.
    pub fn order(mut self, order: ChannelOrder) -> Self {
        self.config.order = order;
        self
    }

    /// Sets the default brightness.
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.config.brightness = brightness;
        self
    }

    /// Sets the animation speed as a percentage of real time.
    pub fn speed_percent(mut self, speed_percent: u32) -> Self {
        self.config.speed_percent = speed_percent;
        self
    }

    /// Adds a segment layout.
    pub fn segment(mut self, segment: SegmentLayout) -> Self {
        if self.config.segments.push(segment).is_err() {
            self.overflowed = true;
        }
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `ZeroSpeed` - Speed is zero
    /// * `TooManySegments` - More than [`MAX_SEGMENTS`] segments were added
    /// * `EmptySegment` - A segment has zero length
    /// * `SegmentOutOfBounds` - A segment's end overflows `usize`
    /// * `OverlappingSegments` - Two segments share a pixel
    pub fn build(self) -> Result<DisplayConfig, FadeError> {
        if self.config.speed_percent == 0 {
            return Err(FadeError::ZeroSpeed);
        }

        if self.overflowed {
            return Err(FadeError::TooManySegments);
        }

        let segments = self.config.segments();
        for (i, segment) in segments.iter().enumerate() {
            if segment.len == 0 {
                return Err(FadeError::EmptySegment);
            }

            // No frame can hold a segment whose end does not fit in a usize.
            if segment.offset.checked_add(segment.len).is_none() {
                return Err(FadeError::SegmentOutOfBounds {
                    end: usize::MAX,
                    len: usize::MAX,
                });
            }

            for other in &segments[i + 1..] {
                if segment.offset < other.end() && other.offset < segment.end() {
                    return Err(FadeError::OverlappingSegments);
                }
            }
        }

        Ok(self.config)
    }
}

impl Default for DisplayConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
