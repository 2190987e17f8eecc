//! Shared test infrastructure for wreath-fade integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use wreath_fade::{PixelSink, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Pixel Sink
// ============================================================================

/// Mock strip that counts frames and keeps the most recent one
pub struct MockSink {
    frames_written: usize,
    last_frame: heapless::Vec<u32, 16>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            frames_written: 0,
            last_frame: heapless::Vec::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames_written
    }

    pub fn last_frame(&self) -> &[u32] {
        &self.last_frame
    }
}

impl PixelSink for MockSink {
    fn write_pixels(&mut self, words: &[u32]) {
        self.frames_written += 1;
        self.last_frame.clear();
        for &word in words {
            let _ = self.last_frame.push(word);
        }
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Re-export color constants from library for test convenience
// ============================================================================

#[allow(unused_imports)]
pub use wreath_fade::{BLACK, BLUE, GREEN, RED, WHITE};

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two packed colors allowing each channel to differ by `tolerance`
pub fn colors_close(a: wreath_fade::PackedRgb, b: wreath_fade::PackedRgb, tolerance: u8) -> bool {
    a.red().abs_diff(b.red()) <= tolerance
        && a.green().abs_diff(b.green()) <= tolerance
        && a.blue().abs_diff(b.blue()) <= tolerance
}
