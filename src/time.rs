//! Time abstraction traits for platform-agnostic timing.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Turns successive instants into scaled per-tick elapsed times.
///
/// Animation speed is a percentage of real time: at 50 a one-second fade
/// takes two seconds. Fractions of a millisecond lost to the scaling are
/// carried into the next tick so slow speeds still make progress.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock<I: TimeInstant> {
    last: Option<I>,
    speed_percent: u32,
    carry: u64,
}

impl<I: TimeInstant> FrameClock<I> {
    /// Creates a clock running at `speed_percent` of real time.
    pub fn new(speed_percent: u32) -> Self {
        Self {
            last: None,
            speed_percent,
            carry: 0,
        }
    }

    /// Records `now` and returns the scaled milliseconds since the previous tick.
    ///
    /// The first tick only establishes the reference point and returns `None`.
    /// Results saturate at `u32::MAX`.
    pub fn tick(&mut self, now: I) -> Option<u32> {
        let last = self.last.replace(now)?;

        let real = now.duration_since(last).as_millis();
        let scaled = real
            .saturating_mul(u64::from(self.speed_percent))
            .saturating_add(self.carry);
        self.carry = scaled % 100;

        Some(u32::try_from(scaled / 100).unwrap_or(u32::MAX))
    }

    /// Forgets the reference point; the next tick returns `None`.
    pub fn reset(&mut self) {
        self.last = None;
        self.carry = 0;
    }

    /// Current speed as a percentage of real time.
    pub fn speed_percent(&self) -> u32 {
        self.speed_percent
    }

    /// Changes the speed for subsequent ticks.
    pub fn set_speed_percent(&mut self, speed_percent: u32) {
        self.speed_percent = speed_percent;
    }
}
