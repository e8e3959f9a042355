//! Fixed-Size Circular Buffer for Frame History
//!
//! ## Overview
//!
//! The engine keeps the last N compensated frames in a ring buffer so the
//! context classifier and curve analyzer can look back over recent signal
//! without dynamic allocation. Capacity is a compile-time constant; when the
//! buffer is full the oldest frame is silently overwritten, matching the
//! sensor use case where recent data is strictly more valuable than old.
//!
//! ## Access model
//!
//! Unlike a general-purpose ring buffer, consumers here address frames
//! relative to the newest one: [`FrameHistory::at`]`(0)` is the latest
//! frame, `at(1)` the one before it, and so on. `at(k)` returns `None`
//! until at least `k + 1` frames have been appended, so callers never see
//! uninitialized slots.
//!
//! ## Internal invariants
//!
//! - `write_pos < N` (next write position is always valid)
//! - `len <= N` (capacity never grows)
//! - Iteration yields frames in chronological order
//!
//! All operations are O(1) except iteration; nothing allocates.

use crate::frame::SensorFrame;

/// Fixed-capacity history of the most recent sensor frames
///
/// `N` is the retention depth. The engine uses
/// [`HISTORY_CAPACITY`](crate::constants::HISTORY_CAPACITY) (20 frames,
/// 10 minutes at the 30 s cadence).
#[derive(Clone)]
pub struct FrameHistory<const N: usize> {
    /// Storage using Option for never-written slots; avoids unsafe
    /// MaybeUninit handling
    data: [Option<SensorFrame>; N],

    /// Index where the next write will occur, wraps modulo N
    write_pos: usize,

    /// Number of valid frames, increases to N then stays constant
    len: usize,
}

impl<const N: usize> FrameHistory<N> {
    /// Creates an empty history
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Appends a frame, overwriting the oldest when full
    ///
    /// Frames are never individually removed; eviction is implicit via
    /// overwrite.
    pub fn push(&mut self, frame: SensorFrame) {
        self.data[self.write_pos] = Some(frame);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored frames
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no frame has been appended yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the buffer has reached capacity
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// The most recently appended frame
    pub fn latest(&self) -> Option<&SensorFrame> {
        self.at(0)
    }

    /// Frame `offset_from_latest` steps before the newest one
    ///
    /// `at(0)` is the latest frame. Returns `None` when fewer than
    /// `offset_from_latest + 1` frames have been appended.
    pub fn at(&self, offset_from_latest: usize) -> Option<&SensorFrame> {
        if offset_from_latest >= self.len {
            return None;
        }
        self.get(self.len - 1 - offset_from_latest)
    }

    /// Iterate over frames from oldest to newest
    pub fn iter(&self) -> FrameHistoryIter<'_, N> {
        FrameHistoryIter {
            history: self,
            index: 0,
        }
    }

    /// Frame by logical index (0 = oldest, len-1 = newest)
    ///
    /// When the buffer is full the oldest element sits at `write_pos`, so
    /// the logical index is offset by it:
    ///
    /// ```text
    /// Physical array:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical view:    [A, B, C, D, E]  (chronological order)
    /// Mapping: logical[0] = physical[(2 + 0) % 5] = A
    /// ```
    fn get(&self, index: usize) -> Option<&SensorFrame> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            // Not full yet, data starts at 0
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over history contents, oldest first
pub struct FrameHistoryIter<'a, const N: usize> {
    history: &'a FrameHistory<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for FrameHistoryIter<'a, N> {
    type Item = &'a SensorFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.history.get(self.index)?;
        self.index += 1;
        Some(item)
    }
}

impl<const N: usize> Default for FrameHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(gsr: u32, timestamp: u64) -> SensorFrame {
        SensorFrame {
            ambient_temp: None,
            ambient_humidity: None,
            body_temp: None,
            gsr_raw: gsr,
            timestamp,
            outdoor: false,
        }
    }

    #[test]
    fn empty_history() {
        let history: FrameHistory<5> = FrameHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.latest().is_none());
        assert!(history.at(0).is_none());
    }

    #[test]
    fn latest_and_offsets() {
        let mut history = FrameHistory::<5>::new();
        for i in 0..3 {
            history.push(frame(i, i as u64 * 1000));
        }

        assert_eq!(history.latest().unwrap().gsr_raw, 2);
        assert_eq!(history.at(1).unwrap().gsr_raw, 1);
        assert_eq!(history.at(2).unwrap().gsr_raw, 0);
        // Only 3 frames ever appended
        assert!(history.at(3).is_none());
    }

    #[test]
    fn circular_overwrite() {
        let mut history = FrameHistory::<3>::new();

        for i in 0..5 {
            history.push(frame(i, i as u64 * 1000));
        }

        assert_eq!(history.len(), 3);
        assert!(history.is_full());

        // Oldest two were overwritten
        let values: heapless::Vec<u32, 3> = history.iter().map(|f| f.gsr_raw).collect();
        assert_eq!(values.as_slice(), &[2, 3, 4]);
    }

    #[test]
    fn capacity_never_grows() {
        let mut history = FrameHistory::<20>::new();
        for i in 0..100 {
            history.push(frame(i, i as u64));
            assert!(history.len() <= 20);
        }
        assert_eq!(history.len(), 20);
    }

    #[test]
    fn oldest_retained_after_wraparound() {
        let mut history = FrameHistory::<20>::new();
        // Appends 1..=25; frames 1-5 are evicted
        for i in 1..=25 {
            history.push(frame(i, i as u64 * 30_000));
        }

        // Oldest retained entry is the 6th appended frame
        assert_eq!(history.at(19).unwrap().gsr_raw, 6);
        assert_eq!(history.latest().unwrap().gsr_raw, 25);
    }

    #[test]
    fn iterator_chronological() {
        let mut history = FrameHistory::<4>::new();
        for i in 0..4 {
            history.push(frame(i, i as u64));
        }

        let timestamps: heapless::Vec<u64, 4> = history.iter().map(|f| f.timestamp).collect();
        assert_eq!(timestamps.as_slice(), &[0, 1, 2, 3]);
    }
}
