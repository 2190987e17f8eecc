//! Shared error type for the session and display layers.

/// Errors from building or addressing fade buffers and display layouts.
///
/// The per-tick stepper itself never fails; these cover the setup calls
/// that index into caller-sized buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeError {
    /// Requested pixel count exceeds the buffer capacity.
    CapacityExceeded { requested: usize, capacity: usize },

    /// Pixel index is past the end of the frame.
    PixelOutOfRange { index: usize, len: usize },

    /// Range start is after its end, or the end is past the frame.
    InvalidRange { start: usize, end: usize },

    /// Speed percentage of zero would freeze every fade.
    ZeroSpeed,

    /// A segment layout covers no pixels.
    EmptySegment,

    /// Two segment layouts claim the same pixel.
    OverlappingSegments,

    /// More segment layouts than the configuration can hold.
    TooManySegments,

    /// A segment layout reaches past the end of the frame.
    SegmentOutOfBounds { end: usize, len: usize },
}

impl core::fmt::Display for FadeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FadeError::CapacityExceeded { requested, capacity } => {
                write!(
                    f,
                    "{} pixels requested but buffers hold at most {}",
                    requested, capacity
                )
            }
            FadeError::PixelOutOfRange { index, len } => {
                write!(f, "pixel {} out of range for frame of {}", index, len)
            }
            FadeError::InvalidRange { start, end } => {
                write!(f, "invalid pixel range {}..={}", start, end)
            }
            FadeError::ZeroSpeed => {
                write!(f, "speed must be greater than zero percent")
            }
            FadeError::EmptySegment => {
                write!(f, "segment must cover at least one pixel")
            }
            FadeError::OverlappingSegments => {
                write!(f, "segments overlap")
            }
            FadeError::TooManySegments => {
                write!(f, "segment capacity exceeded")
            }
            FadeError::SegmentOutOfBounds { end, len } => {
                write!(f, "segment ends at pixel {} but frame has {}", end, len)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FadeError {}
