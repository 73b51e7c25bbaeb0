//! Random target selection for shuffle.

pub trait IndexPicker {
    /// Pick an index in `0..len`, never `exclude` when `len > 1`.
    ///
    /// Callers guarantee `len > 0`.
    fn pick(&mut self, len: usize, exclude: usize) -> usize;
}

/// Uniform picker over the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPicker;

impl IndexPicker for ThreadPicker {
    fn pick(&mut self, len: usize, exclude: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        // Draw over the `len - 1` other slots, then step over `exclude`.
        let i = rand::random_range(0..len - 1);
        if i >= exclude { i + 1 } else { i }
    }
}
