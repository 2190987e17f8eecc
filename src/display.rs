//! LED display driver built on the fade stepper.
//!
//! Provides [`WreathDisplay`] which owns a pixel sink, a [`FadeFrame`] and a
//! [`FrameClock`], and on every [`service`](WreathDisplay::service) call steps
//! the fades, converts pixels to the strip's wire format and pushes them out.
//! Also defines the [`PixelSink`] trait for hardware abstraction.

use crate::colors::brighten_and_convert;
use crate::command::DisplayAction;
use crate::config::DisplayConfig;
use crate::fade::FadeTrace;
use crate::frame::FadeFrame;
use crate::time::{FrameClock, TimeInstant, TimeSource};
use crate::types::FadeError;
use heapless::Vec;

/// Trait for abstracting addressable LED strip hardware.
///
/// Implement this for your strip driver (RMT, SPI, PIO, etc.).
pub trait PixelSink {
    /// Writes one frame of converted pixel words, one per LED.
    ///
    /// Words are already brightness-scaled and in the strip's channel order.
    /// Handle any hardware errors internally - this method cannot fail.
    fn write_pixels(&mut self, words: &[u32]);
}

/// Result of a service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameStatus {
    /// At least one fade is still running. Service again at your frame rate.
    Animating,

    /// No fades are running. The output only changes when pixels are set again.
    Settled,
}

/// Drives an LED strip through per-pixel fades.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - Pixel sink implementation type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of pixels
pub struct WreathDisplay<'t, I: TimeInstant, S: PixelSink, T: TimeSource<I>, const N: usize> {
    sink: S,
    time_source: &'t T,
    frame: FadeFrame<N>,
    clock: FrameClock<I>,
    config: DisplayConfig,
    words: Vec<u32, N>,
    blanked: bool,
}

impl<'t, I: TimeInstant, S: PixelSink, T: TimeSource<I>, const N: usize>
    WreathDisplay<'t, I, S, T, N>
{
    /// Creates a display of `len` pixels and blacks out the strip.
    ///
    /// # Errors
    /// * `CapacityExceeded` - `len` is larger than `N`
    /// * `SegmentOutOfBounds` - A configured segment reaches past `len`
    pub fn new(
        mut sink: S,
        time_source: &'t T,
        config: DisplayConfig,
        len: usize,
    ) -> Result<Self, FadeError> {
        let frame = FadeFrame::with_len(len)?;

        if let Some(segment) = config.segments().iter().find(|s| s.end() > len) {
            return Err(FadeError::SegmentOutOfBounds {
                end: segment.end(),
                len,
            });
        }

        let mut words = Vec::new();
        // `with_len` already checked `len <= N`.
        let _ = words.resize(len, 0);
        sink.write_pixels(&words);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "display ready: {=usize} px, {=usize} segments",
            len,
            config.segments().len()
        );

        Ok(Self {
            sink,
            time_source,
            frame,
            clock: FrameClock::new(config.speed_percent()),
            config,
            words,
            blanked: false,
        })
    }

    /// Handles a display action by dispatching to the appropriate method.
    ///
    /// Actions only change state; the strip is updated on the next
    /// [`service`](Self::service).
    pub fn handle_action(&mut self, action: DisplayAction) -> Result<(), FadeError> {
        match action {
            DisplayAction::SetPixel {
                index,
                color,
                rate_per_ms,
                duration_ms,
            } => self.frame.set_pixel(index, color, rate_per_ms, duration_ms),
            DisplayAction::SetStatic { index, color } => self.frame.set_static(index, color),
            DisplayAction::Fill(color) => {
                self.frame.fill(color);
                Ok(())
            }
            DisplayAction::Dim { start, end, amount } => {
                self.frame.dim(start, end, amount)?;
                Ok(())
            }
            DisplayAction::SetBrightness(brightness) => {
                self.config.set_brightness(brightness);
                Ok(())
            }
            DisplayAction::SetSpeed(speed_percent) => self.set_speed_percent(speed_percent),
            DisplayAction::Blank(blanked) => {
                self.blank(blanked);
                Ok(())
            }
            DisplayAction::Clear => {
                self.frame.clear();
                Ok(())
            }
        }
    }

    /// Steps fades by the time since the last service and refreshes the strip.
    ///
    /// The first call after creation steps by zero milliseconds, which renders
    /// every pixel at its current fade position without advancing it.
    pub fn service(&mut self) -> FrameStatus {
        let elapsed = self.tick();
        self.frame.step(elapsed);
        self.render()
    }

    /// Like [`service`](Self::service), reporting each faded pixel to `trace`.
    pub fn service_traced<F: FadeTrace + ?Sized>(&mut self, trace: &mut F) -> FrameStatus {
        let elapsed = self.tick();
        self.frame.step_traced(elapsed, trace);
        self.render()
    }

    fn tick(&mut self) -> u32 {
        let now = self.time_source.now();
        self.clock.tick(now).unwrap_or(0)
    }

    fn render(&mut self) -> FrameStatus {
        for (index, (word, &color)) in self
            .words
            .iter_mut()
            .zip(self.frame.output().iter())
            .enumerate()
        {
            let segment = self.config.segment_for(index);
            let keep_lit = segment.is_some_and(|s| s.keep_lit);

            *word = if self.blanked && !keep_lit {
                0
            } else {
                let order = segment.map_or(self.config.order(), |s| s.order);
                let brightness = segment
                    .and_then(|s| s.brightness)
                    .unwrap_or(self.config.brightness());
                brighten_and_convert(color, brightness, order)
            };
        }

        self.sink.write_pixels(&self.words);

        if self.frame.active_fades() > 0 {
            FrameStatus::Animating
        } else {
            FrameStatus::Settled
        }
    }

    /// Turns off every pixel outside `keep_lit` segments, or restores them.
    pub fn blank(&mut self, blanked: bool) {
        self.blanked = blanked;
    }

    /// Changes animation speed as a percentage of real time.
    ///
    /// # Errors
    /// * `ZeroSpeed` - `speed_percent` is zero
    pub fn set_speed_percent(&mut self, speed_percent: u32) -> Result<(), FadeError> {
        if speed_percent == 0 {
            return Err(FadeError::ZeroSpeed);
        }
        self.config.set_speed_percent(speed_percent);
        self.clock.set_speed_percent(speed_percent);
        Ok(())
    }

    /// Returns true if the display is blanked.
    pub fn is_blanked(&self) -> bool {
        self.blanked
    }

    /// Returns the fade buffers.
    pub fn frame(&self) -> &FadeFrame<N> {
        &self.frame
    }

    /// Returns the fade buffers for direct pixel updates.
    pub fn frame_mut(&mut self) -> &mut FadeFrame<N> {
        &mut self.frame
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Returns the pixel sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the words last written to the sink.
    pub fn last_words(&self) -> &[u32] {
        &self.words
    }
}
