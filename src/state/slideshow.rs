#[cfg(test)]
#[path = "slideshow_test.rs"]
mod slideshow_test;

use std::num::NonZeroUsize;

/// Which way the user paged through the image set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Slideshow state: which image in the fixed set is currently shown.
///
/// The set size is fixed at construction and the active index always stays
/// within `[0, size - 1]`, wrapping at both boundaries.
#[derive(Clone, Debug)]
pub struct SlideshowState {
    active_index: usize,
    size: NonZeroUsize,
}

impl SlideshowState {
    /// Create a slideshow over a set of `size` images, starting at index 0.
    #[must_use]
    pub fn new(size: NonZeroUsize) -> Self {
        Self { active_index: 0, size }
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// Move one image left or right, wrapping modulo the set size.
    pub fn navigate(&mut self, direction: Direction) {
        let size = self.size.get();
        self.active_index = match direction {
            Direction::Left => (self.active_index + size - 1) % size,
            Direction::Right => (self.active_index + 1) % size,
        };
    }
}
